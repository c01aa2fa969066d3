use super::constants::*;

pub(crate) fn hello_message() -> Option<String> {
    Some(HELLO_MESSAGE.to_string())
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn backend_endpoint() -> String {
    BACKEND_ENDPOINT.to_string()
}

pub(crate) fn avatar_base_url() -> String {
    AVATAR_BASE_URL.to_string()
}

pub(crate) fn system_avatar_seed() -> String {
    SYSTEM_AVATAR_SEED.to_string()
}

pub(crate) fn user_avatar_seed() -> String {
    USER_AVATAR_SEED.to_string()
}
