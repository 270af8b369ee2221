use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ShopbotError};

/// Top-level configuration for the storefront assistant.
///
/// Loaded from `~/.shopbot/config.toml` by default. Every section falls back
/// to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopbotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl ShopbotConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShopbotConfig = toml::from_str(&content)?;
        config.chat.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// What a follow-up question does when the remembered product is no longer
/// in the catalog snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleProductFallback {
    /// Answer about the first product of the snapshot.
    #[default]
    FirstProduct,
    /// Ignore the stale reference and reply with the general listing.
    GeneralListing,
}

/// Conversational engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum number of messages retained in a conversation history.
    pub max_history_length: usize,
    /// Maximum number of products shown in filtered lists.
    pub display_limit: usize,
    /// Number of products shown by cheapest / most-expensive replies.
    pub comparison_limit: usize,
    /// Symbol prefixed to every rendered amount.
    pub currency_symbol: String,
    /// Behaviour when a remembered product cannot be resolved.
    pub stale_product_fallback: StaleProductFallback,
    /// Maximum number of follow-up suggestions attached to a reply.
    pub suggestion_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history_length: 50,
            display_limit: 5,
            comparison_limit: 3,
            currency_symbol: "€".to_string(),
            stale_product_fallback: StaleProductFallback::FirstProduct,
            suggestion_limit: 3,
        }
    }
}

impl ChatConfig {
    /// Reject settings that would make replies empty or history unusable.
    pub fn validate(&self) -> Result<()> {
        if self.max_history_length < 2 {
            return Err(ShopbotError::Config(format!(
                "chat.max_history_length must be at least 2, got {}",
                self.max_history_length
            )));
        }
        if self.display_limit == 0 {
            return Err(ShopbotError::Config(
                "chat.display_limit must be greater than 0".to_string(),
            ));
        }
        if self.comparison_limit == 0 {
            return Err(ShopbotError::Config(
                "chat.comparison_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Product catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a JSON array of products.
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "products.json".to_string(),
        }
    }
}

/// Conversation persistence across restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the conversation snapshot is kept. `None` disables persistence.
    pub path: Option<String>,
}
