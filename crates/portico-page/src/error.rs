//! Page controller error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("No filter option {index} in group {group}")]
    UnknownFilter { group: String, index: usize },
}
