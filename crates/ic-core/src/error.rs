use thiserror::Error;

#[derive(Error, Debug)]
pub enum IcError {
    #[error("empty content after cleaning")]
    EmptyContent,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, IcError>;
