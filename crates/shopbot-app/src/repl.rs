//! Line-oriented chat loop.
//!
//! Reads customer messages from any `BufRead`, answers through the engine,
//! and writes replies plus numbered suggestions. Typing a suggestion's
//! number sends that suggestion.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::{debug, warn};

use shopbot_chat::ChatEngine;
use shopbot_core::{CategoryRecommender, ProductCatalog};

const CATALOG_UNAVAILABLE: &str = "Sorry, the product catalog is unavailable right now.";

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Quit,
    Clear,
    History,
    Skip,
    Ask(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Skip,
        "/quit" | "/exit" => Command::Quit,
        "/clear" => Command::Clear,
        "/history" => Command::History,
        other => Command::Ask(other),
    }
}

/// An interactive session over one engine and one catalog.
pub struct Repl {
    engine: ChatEngine,
    catalog: Box<dyn ProductCatalog>,
    recommender: Option<Arc<CategoryRecommender>>,
    user_id: Option<String>,
    last_suggestions: Vec<String>,
}

impl Repl {
    pub fn new(engine: ChatEngine, catalog: Box<dyn ProductCatalog>) -> Self {
        Self {
            engine,
            catalog,
            recommender: None,
            user_id: None,
            last_suggestions: Vec::new(),
        }
    }

    /// Suggest related products and learn from what the customer looks at.
    pub fn with_recommender(mut self, recommender: Arc<CategoryRecommender>) -> Self {
        self.engine = self.engine.with_recommender(recommender.clone());
        self.recommender = Some(recommender);
        self
    }

    /// Identify the customer for personal recommendations.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.apply_user();
        self
    }

    fn apply_user(&mut self) {
        if let Some(user) = &self.user_id {
            self.engine.context_mut().set_metadata("user_id", user.as_str());
        }
    }

    pub fn engine(&self) -> &ChatEngine {
        &self.engine
    }

    /// Process lines until end of input or `/quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(
            output,
            "Shop assistant ready. Commands: /history, /clear, /quit"
        )?;
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Command::Quit => break,
                Command::Skip => {}
                Command::Clear => {
                    self.engine.clear_history();
                    self.apply_user();
                    self.last_suggestions.clear();
                    writeln!(output, "Conversation cleared.")?;
                }
                Command::History => {
                    for (sender, text) in self.engine.history() {
                        writeln!(output, "[{}] {}", sender, text)?;
                    }
                }
                Command::Ask(text) => {
                    let query = self.pick_suggestion(text).unwrap_or_else(|| text.to_string());
                    self.ask(&query, output)?;
                }
            }
        }
        Ok(())
    }

    fn pick_suggestion(&self, text: &str) -> Option<String> {
        let n: usize = text.parse().ok()?;
        n.checked_sub(1)
            .and_then(|i| self.last_suggestions.get(i))
            .cloned()
    }

    fn ask<W: Write>(&mut self, query: &str, output: &mut W) -> io::Result<()> {
        let products = match self.catalog.list_products() {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Catalog lookup failed");
                return writeln!(output, "{}", CATALOG_UNAVAILABLE);
            }
        };

        let previous = self.engine.context().last_product_id().map(str::to_string);
        let reply = self.engine.respond_detailed(query, &products);
        writeln!(output, "{}", reply.text)?;
        for (i, suggestion) in reply.suggestions.iter().enumerate() {
            writeln!(output, "  {}. {}", i + 1, suggestion)?;
        }
        self.last_suggestions = reply.suggestions;

        // Only a turn that moved to a new product counts as a view.
        let current = self.engine.context().last_product_id();
        if current == previous.as_deref() {
            return Ok(());
        }
        if let (Some(recommender), Some(user), Some(product)) =
            (&self.recommender, &self.user_id, current)
        {
            recommender.record_view(user, product);
            debug!(user = %user, product, "Product view recorded");
        }
        Ok(())
    }

    pub fn into_engine(self) -> ChatEngine {
        self.engine
    }
}
