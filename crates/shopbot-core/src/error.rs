use thiserror::Error;

/// Top-level error type for the storefront assistant.
///
/// Errors only arise at integration surfaces: loading configuration,
/// reading a product catalog, or (de)serializing session state. The
/// conversational path itself never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShopbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ShopbotError {
    fn from(err: toml::de::Error) -> Self {
        ShopbotError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShopbotError {
    fn from(err: serde_json::Error) -> Self {
        ShopbotError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for shopbot operations.
pub type Result<T> = std::result::Result<T, ShopbotError>;
