use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("API key not found: set NEWSAPI_KEY or pass api_key")]
    MissingApiKey,

    #[error("request error when contacting news provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to fetch news: {0}")]
    Upstream(String),

    #[error("invalid JSON from news provider: {0}")]
    Decode(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
