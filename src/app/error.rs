use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Configuration not loaded")]
    ConfigUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;
