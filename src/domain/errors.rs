use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Cart serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid storage key: {0:?}")]
    InvalidStorageKey(String),
    #[error("Invalid link: {0}")]
    InvalidLink(#[from] url::ParseError),
    #[error("Could not open link: {0}")]
    Opener(String),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type ShopResult<T> = Result<T, ShopError>;
