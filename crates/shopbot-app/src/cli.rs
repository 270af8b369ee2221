//! CLI argument definitions for the shopbot terminal assistant.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Shopbot: chat with a storefront assistant over a JSON product catalog.
#[derive(Parser, Debug)]
#[command(name = "shopbot", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON file with the product catalog.
    #[arg(short = 'p', long = "catalog")]
    pub catalog: Option<PathBuf>,

    /// File the conversation is restored from and saved to.
    #[arg(short = 's', long = "session")]
    pub session: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Customer id used for personal recommendations.
    #[arg(short = 'u', long = "user-id")]
    pub user_id: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SHOPBOT_CONFIG env var > platform default (~/.shopbot/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SHOPBOT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Priority: --catalog flag > config file value.
    pub fn resolve_catalog_path(&self, config_path: &str) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_path))
    }

    /// Priority: --session flag > config file value. `None` disables persistence.
    pub fn resolve_session_path(&self, config_path: Option<&str>) -> Option<PathBuf> {
        self.session
            .clone()
            .or_else(|| config_path.map(PathBuf::from))
    }

    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".shopbot").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".shopbot").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::parse_from([
            "shopbot",
            "--catalog",
            "/tmp/items.json",
            "--session",
            "/tmp/s.json",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.resolve_catalog_path("products.json"), PathBuf::from("/tmp/items.json"));
        assert_eq!(
            args.resolve_session_path(Some("other.json")),
            Some(PathBuf::from("/tmp/s.json"))
        );
        assert_eq!(args.resolve_log_level("info"), "debug");
    }

    #[test]
    fn test_config_values_without_flags() {
        let args = CliArgs::parse_from(["shopbot"]);
        assert_eq!(args.resolve_catalog_path("products.json"), PathBuf::from("products.json"));
        assert_eq!(args.resolve_session_path(None), None);
        assert_eq!(
            args.resolve_session_path(Some("session.json")),
            Some(PathBuf::from("session.json"))
        );
        assert_eq!(args.resolve_log_level("warn"), "warn");
        assert!(args.user_id.is_none());
    }

    #[test]
    fn test_explicit_config_path() {
        let args = CliArgs::parse_from(["shopbot", "-c", "/etc/shopbot.toml", "-u", "c42"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/etc/shopbot.toml"));
        assert_eq!(args.user_id.as_deref(), Some("c42"));
    }
}
