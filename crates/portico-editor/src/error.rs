//! Editor error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid font size entry: {0:?}")]
    InvalidFontSize(String),
}
