use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown required column: {0}")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
