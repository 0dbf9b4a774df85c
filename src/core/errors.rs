use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinlianError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no eligible phrases in the selected levels")]
    NoEligiblePhrases,

    #[error("invalid study configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("PinlianError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for PinlianError {
    fn from(error: std::io::Error) -> Self {
        PinlianError::Io(Box::new(error))
    }
}
