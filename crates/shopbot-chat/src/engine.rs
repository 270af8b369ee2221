//! Chat engine: one conversation, wired through classifier, handlers, and context.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use shopbot_core::{ChatConfig, Product, ProductCatalog, Recommender};

use crate::context::{ContextSnapshot, ConversationContext};
use crate::error::ChatError;
use crate::handlers::{dispatch, HandlerRequest};
use crate::intent::IntentClassifier;
use crate::response::suggestions;
use crate::types::{ChatReply, Sender};

/// Smallest history that still holds one full exchange.
const MIN_HISTORY_LENGTH: usize = 2;

/// Conversational façade over a single session.
///
/// Turns on one engine are sequential (`&mut self`); separate engines share
/// nothing and can run independently.
pub struct ChatEngine {
    config: ChatConfig,
    classifier: IntentClassifier,
    context: ConversationContext,
    recommender: Option<Arc<dyn Recommender>>,
}

impl ChatEngine {
    /// Start a fresh conversation.
    ///
    /// A history bound below one exchange is raised so the customer's own
    /// message survives its turn.
    pub fn new(mut config: ChatConfig) -> Self {
        if config.max_history_length < MIN_HISTORY_LENGTH {
            warn!(
                requested = config.max_history_length,
                "History limit too small, using {}", MIN_HISTORY_LENGTH
            );
            config.max_history_length = MIN_HISTORY_LENGTH;
        }
        let context = ConversationContext::new(config.max_history_length);
        Self::with_context(config, context)
    }

    /// Continue an existing conversation.
    pub fn with_context(config: ChatConfig, context: ConversationContext) -> Self {
        Self {
            config,
            classifier: IntentClassifier::new(),
            context,
            recommender: None,
        }
    }

    /// Use `recommender` for follow-up suggestions.
    pub fn with_recommender(mut self, recommender: Arc<dyn Recommender>) -> Self {
        self.recommender = Some(recommender);
        self
    }

    /// Answer `query` against a catalog snapshot. Never fails, never empty.
    pub fn respond(&mut self, query: &str, products: &[Product]) -> String {
        self.respond_detailed(query, products).text
    }

    /// Answer `query` and report the classified intent and follow-up suggestions.
    pub fn respond_detailed(&mut self, query: &str, products: &[Product]) -> ChatReply {
        self.context.add_user_message(query, None);

        let classification = self.classifier.classify_detailed(query, Some(&self.context));
        let intent = classification.intent;
        self.context.set_last_intent(intent, None);

        let request = HandlerRequest::new(query, products, &self.config);
        let text = dispatch(intent, &request, &mut self.context);

        let suggestions = suggestions(
            intent,
            &self.context,
            products,
            self.recommender.as_deref(),
            &self.config,
        );

        let mut metadata = Map::new();
        metadata.insert("intent".to_string(), Value::from(intent.name()));
        self.context.add_bot_message(text.clone(), Some(metadata));

        debug!(
            session = %self.context.session_id(),
            %intent,
            stage = ?classification.stage,
            history = self.context.history().len(),
            "Turn completed"
        );

        ChatReply {
            text,
            intent,
            suggestions,
        }
    }

    /// Fetch the current snapshot from `catalog`, then answer.
    pub fn respond_from_catalog(
        &mut self,
        query: &str,
        catalog: &dyn ProductCatalog,
    ) -> Result<String, ChatError> {
        let products = catalog.list_products()?;
        Ok(self.respond(query, &products))
    }

    /// Forget the conversation. The session id is kept.
    pub fn clear_history(&mut self) {
        self.context.clear();
    }

    /// Transcript as `(sender, text)` pairs, oldest first.
    pub fn history(&self) -> Vec<(Sender, String)> {
        self.context
            .history()
            .iter()
            .map(|m| (m.sender, m.text.clone()))
            .collect()
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ConversationContext {
        &mut self.context
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        self.context.to_snapshot()
    }

    /// Replace the conversation with one restored from `snapshot`.
    pub fn restore(&mut self, snapshot: ContextSnapshot) {
        self.context = ConversationContext::from_snapshot(snapshot);
        debug!(
            session = %self.context.session_id(),
            messages = self.context.history().len(),
            "Conversation restored"
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
