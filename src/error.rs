use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("model has not been fitted")]
    NotFitted,
}

impl Error {
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
