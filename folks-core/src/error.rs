use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FolksError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Background job reported failure")]
    JobFailed,

    #[error("Lost contact with background job: {0}")]
    JobTransport(String),

    #[error("Background job still running after {0} polls")]
    JobTimedOut(u32),

    #[error("Deleted {deleted} of {total} records before an error")]
    PartialFailure { deleted: usize, total: usize },

    #[error("Operation was cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for FolksError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FolksError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FolksError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FolksError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for FolksError {
    fn from(err: url::ParseError) -> Self {
        FolksError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for FolksError {
    fn from(err: serde_json::Error) -> Self {
        FolksError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolksError>;
