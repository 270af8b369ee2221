//! Shopbot application binary - composition root.
//!
//! 1. Load configuration from TOML
//! 2. Load the product catalog from JSON
//! 3. Restore the previous conversation, if session persistence is on
//! 4. Run the chat loop on stdin/stdout
//! 5. Save the conversation on exit

mod cli;
mod repl;

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use shopbot_chat::{ChatEngine, ConversationContext};
use shopbot_core::{CategoryRecommender, ChatConfig, InMemoryCatalog, ProductCatalog, ShopbotConfig};

use cli::CliArgs;
use repl::Repl;

/// Restore the saved conversation, or start fresh when there is none.
fn restore_engine(config: ChatConfig, session_path: Option<&Path>) -> ChatEngine {
    let Some(path) = session_path.filter(|p| p.exists()) else {
        return ChatEngine::new(config);
    };
    match ConversationContext::load_json(path) {
        Ok(context) => {
            tracing::info!(
                path = %path.display(),
                messages = context.history().len(),
                "Conversation restored"
            );
            ChatEngine::with_context(config, context)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable session");
            ChatEngine::new(config)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing starts so its log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = ShopbotConfig::load(&config_file);
    let config_level = loaded
        .as_ref()
        .map(|c| c.general.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let level = args.resolve_log_level(&config_level);

    // Tracing. Logs go to stderr to keep the conversation on stdout clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting shopbot v{}", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(path = %config_file.display(), error = %e, "Using default configuration");
            ShopbotConfig::default()
        }
    };

    // Catalog.
    let catalog_path = args.resolve_catalog_path(&config.catalog.path);
    let catalog = InMemoryCatalog::from_json_file(&catalog_path)?;
    let recommender = Arc::new(CategoryRecommender::new(catalog.list_products()?));

    // Conversation.
    let session_path = args.resolve_session_path(config.session.path.as_deref());
    let engine = restore_engine(config.chat.clone(), session_path.as_deref());

    let mut repl = Repl::new(engine, Box::new(catalog)).with_recommender(recommender);
    if let Some(user) = &args.user_id {
        repl = repl.with_user(user.as_str());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl.run(stdin.lock(), &mut stdout)?;

    if let Some(path) = &session_path {
        repl.into_engine().context().save_json(path)?;
        tracing::info!(path = %path.display(), "Conversation saved");
    }

    Ok(())
}
