use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Register response did not contain an access key: {0}")]
    MissingAccessKey(String),
    #[error("Invalid access key: {0}")]
    InvalidAccessKey(String),
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,
    #[error("Failed to fetch dataset {source_name} ({status})")]
    Dataset {
        source_name: String,
        status: StatusCode,
    },
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        match error.url() {
            Some(url) => ClientError::Transport(format!("{url}: {error}")),
            None => ClientError::Transport(error.to_string()),
        }
    }
}

impl ClientError {
    pub fn is_transport_error(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
