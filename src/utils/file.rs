#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::{fmt::Debug, sync::Arc};

use crate::models::UploadFile;

/// Accepted-type filter for user supplied files.
#[derive(Clone)]
pub enum FileTypes {
    List(Vec<String>),
    Predicate(Arc<dyn Fn(&[String]) -> bool + Send + Sync>),
}

impl Debug for FileTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileTypes::List(types) => f.debug_tuple("List").field(types).finish(),
            FileTypes::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<Vec<String>> for FileTypes {
    fn from(value: Vec<String>) -> Self {
        FileTypes::List(value)
    }
}

#[derive(Debug)]
pub enum FileSelection {
    Accepted(Vec<UploadFile>),
    /// Nothing passed the filter; the user should be told to pick valid files.
    Rejected,
}

pub fn check_file_types(types: &[String], file_types: Option<&FileTypes>) -> bool {
    match file_types {
        None => true,
        Some(FileTypes::List(accepted)) => accepted.iter().any(|t| types.contains(t)),
        Some(FileTypes::Predicate(accept)) => accept(types),
    }
}

pub fn filter_files(files: Vec<UploadFile>, file_types: Option<&FileTypes>) -> Vec<UploadFile> {
    files
        .into_iter()
        .filter(|file| check_file_types(&[file.mime().to_string()], file_types))
        .collect()
}

pub fn extract_files(files: Vec<UploadFile>, file_types: Option<&FileTypes>) -> FileSelection {
    let filtered = filter_files(files, file_types);
    if filtered.is_empty() {
        return FileSelection::Rejected;
    }
    FileSelection::Accepted(filtered)
}
