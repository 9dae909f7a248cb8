//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] portico_storage::StorageError),

    #[error("Page error: {0}")]
    Page(#[from] portico_page::PageError),

    #[error("Editor error: {0}")]
    Editor(#[from] portico_editor::EditorError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
