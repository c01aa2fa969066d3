#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::{sync::Arc, time};

use async_trait::async_trait;
use eyre::{Context, Result};
use futures::StreamExt;
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};

use crate::{
    api::{CHAT_PATH, CHAT_STREAM_PATH, ChatError, ChatResponse, Utf8ChunkDecoder},
    config::{BackendConfig, user_agent},
    models::UploadFile,
};

#[async_trait]
pub trait ChatBackend {
    /// Sends the query and waits for the whole answer.
    async fn chat(&self, thread_id: &str, query: &str, files: Option<&[UploadFile]>)
    -> Result<String>;

    /// Sends the query and hands every decoded piece of the answer to
    /// `on_chunk` as soon as it arrives.
    async fn chat_stream(
        &self,
        thread_id: &str,
        query: &str,
        files: Option<&[UploadFile]>,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<()>;
}

pub type ArcChatBackend = Arc<dyn ChatBackend + Send + Sync>;

#[derive(Default)]
pub struct ChatApi {
    endpoint: String,
    timeout: Option<time::Duration>,
    client: reqwest::Client,
}

impl From<&BackendConfig> for ChatApi {
    fn from(value: &BackendConfig) -> Self {
        let mut api = ChatApi::new().with_endpoint(&value.endpoint);
        if let Some(secs) = value.timeout_secs {
            api = api.with_timeout(time::Duration::from_secs(secs as u64));
        }
        api
    }
}

impl From<ChatApi> for ArcChatBackend {
    fn from(value: ChatApi) -> Self {
        Arc::new(value)
    }
}

/// Multipart payload shared by both endpoints: `query`, `thread_id` and
/// one `files` part per attachment.
pub fn build_chat_form(
    thread_id: &str,
    query: &str,
    files: Option<&[UploadFile]>,
) -> Result<Form> {
    let mut form = Form::new()
        .text("query", query.to_string())
        .text("thread_id", thread_id.to_string());

    for file in files.unwrap_or_default() {
        let part = Part::bytes(file.data().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())
            .wrap_err(format!("invalid mime type for {}", file.name()))?;
        form = form.part("files", part);
    }
    Ok(form)
}

impl ChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<reqwest::Response> {
        let mut req = self
            .client
            .post(format!("{}{}", self.endpoint, path))
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req
            .multipart(form)
            .send()
            .await
            .wrap_err(format!("posting to {}", path))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            log::error!("Chat backend error {} on {}: {}", status, path, body);
            return Err(ChatError::Http { status, body }.into());
        }
        Ok(res)
    }
}

#[async_trait]
impl ChatBackend for ChatApi {
    async fn chat(
        &self,
        thread_id: &str,
        query: &str,
        files: Option<&[UploadFile]>,
    ) -> Result<String> {
        let form = build_chat_form(thread_id, query, files)?;
        let res = self.post_form(CHAT_PATH, form).await?;
        let res = res
            .json::<ChatResponse>()
            .await
            .wrap_err("parsing chat response")?;
        Ok(res.answer)
    }

    async fn chat_stream(
        &self,
        thread_id: &str,
        query: &str,
        files: Option<&[UploadFile]>,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<()> {
        let form = build_chat_form(thread_id, query, files)?;
        let res = self.post_form(CHAT_STREAM_PATH, form).await?;

        if res.status() == StatusCode::NO_CONTENT {
            return Err(ChatError::NoStreamBody.into());
        }

        let mut stream = res.bytes_stream();
        let mut decoder = Utf8ChunkDecoder::new();
        let mut chunks = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.wrap_err("reading chat stream")?;
            log::trace!("Received chunk of {} byte(s)", chunk.len());
            let text = decoder.decode(&chunk);
            if text.is_empty() {
                continue;
            }
            on_chunk(&text);
            chunks += 1;
        }

        if let Some(rest) = decoder.finish() {
            on_chunk(&rest);
            chunks += 1;
        }

        log::debug!("Chat stream for thread {} finished after {} chunk(s)", thread_id, chunks);
        Ok(())
    }
}
