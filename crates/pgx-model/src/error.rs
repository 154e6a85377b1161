use thiserror::Error;

use crate::Gene;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate marker column '{column}' for {gene}")]
    DuplicateColumn { gene: Gene, column: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
