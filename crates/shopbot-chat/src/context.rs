//! Conversation context management.
//!
//! Holds the bounded message history and the short-term memory a session
//! builds up: the last classified intent, the last product discussed, and a
//! free-form metadata store for active filters.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use shopbot_core::ProductId;

use crate::error::ChatError;
use crate::types::{ChatIntent, ChatMessage, Sender};

/// Default number of messages kept in a session.
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 50;

// =============================================================================
// ConversationContext
// =============================================================================

/// Session-scoped conversation state.
///
/// One context belongs to one conversation; callers must not interleave
/// turns on the same instance.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    session_id: Uuid,
    max_history_length: usize,
    history: VecDeque<ChatMessage>,
    last_intent: Option<ChatIntent>,
    last_product_id: Option<ProductId>,
    metadata: HashMap<String, Value>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_LENGTH)
    }
}

impl ConversationContext {
    /// Create an empty context retaining at most `max_history_length` messages.
    pub fn new(max_history_length: usize) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            max_history_length,
            history: VecDeque::new(),
            last_intent: None,
            last_product_id: None,
            metadata: HashMap::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn max_history_length(&self) -> usize {
        self.max_history_length
    }

    // -----------------------------------------------------------------
    // History
    // -----------------------------------------------------------------

    /// Append a customer message.
    pub fn add_user_message(&mut self, text: impl Into<String>, metadata: Option<Map<String, Value>>) {
        self.push(ChatMessage::new(Sender::User, text, metadata));
    }

    /// Append an assistant reply.
    pub fn add_bot_message(&mut self, text: impl Into<String>, metadata: Option<Map<String, Value>>) {
        self.push(ChatMessage::new(Sender::Bot, text, metadata));
    }

    fn push(&mut self, message: ChatMessage) {
        self.history.push_back(message);
        self.trim_history();
    }

    // Oldest first out.
    fn trim_history(&mut self) {
        while self.history.len() > self.max_history_length {
            self.history.pop_front();
        }
    }

    /// Full history, oldest first.
    pub fn history(&self) -> &VecDeque<ChatMessage> {
        &self.history
    }

    /// The last `n` messages in chronological order (all of them if fewer exist).
    pub fn recent_messages(&self, n: usize) -> Vec<&ChatMessage> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).collect()
    }

    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.last_from(Sender::User)
    }

    pub fn last_bot_message(&self) -> Option<&ChatMessage> {
        self.last_from(Sender::Bot)
    }

    fn last_from(&self, sender: Sender) -> Option<&ChatMessage> {
        self.history.iter().rev().find(|m| m.sender == sender)
    }

    // -----------------------------------------------------------------
    // Short-term memory
    // -----------------------------------------------------------------

    /// Record the latest intent. A `None` product keeps the remembered one.
    pub fn set_last_intent(&mut self, intent: ChatIntent, product_id: Option<&str>) {
        self.last_intent = Some(intent);
        if let Some(id) = product_id {
            self.last_product_id = Some(id.to_string());
        }
    }

    pub fn last_intent(&self) -> Option<ChatIntent> {
        self.last_intent
    }

    pub fn last_product_id(&self) -> Option<&str> {
        self.last_product_id.as_deref()
    }

    // -----------------------------------------------------------------
    // Session metadata
    // -----------------------------------------------------------------

    pub fn metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Insert or overwrite a metadata entry.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn has_metadata(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Remove one metadata entry, returning its previous value.
    pub fn clear_metadata(&mut self, key: &str) -> Option<Value> {
        self.metadata.remove(key)
    }

    pub fn metadata_entries(&self) -> &HashMap<String, Value> {
        &self.metadata
    }

    /// Reset history, memory, and metadata. The session id is kept.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_intent = None;
        self.last_product_id = None;
        self.metadata.clear();
        debug!(session = %self.session_id, "Conversation context cleared");
    }

    // -----------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------

    /// Export the full state.
    pub fn to_snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            session_id: self.session_id,
            max_history_length: self.max_history_length,
            history: self.history.iter().cloned().collect(),
            last_intent: self.last_intent.map(|i| i.name().to_string()),
            last_product_id: self.last_product_id.clone(),
            session_metadata: self
                .metadata
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Rebuild a context from a snapshot.
    ///
    /// Unrecognized intent names become [`ChatIntent::Unknown`]; a history
    /// longer than the snapshot's limit keeps only its newest messages.
    pub fn from_snapshot(snapshot: ContextSnapshot) -> Self {
        let last_intent = snapshot.last_intent.as_deref().map(|name| {
            let intent = ChatIntent::from_name_lossy(name);
            if intent == ChatIntent::Unknown && name != ChatIntent::Unknown.name() {
                warn!(name, "Unrecognized intent in snapshot, using unknown");
            }
            intent
        });

        let mut context = Self {
            session_id: snapshot.session_id,
            max_history_length: snapshot.max_history_length,
            history: snapshot.history.into(),
            last_intent,
            last_product_id: snapshot.last_product_id,
            metadata: snapshot.session_metadata.into_iter().collect(),
        };
        context.trim_history();
        context
    }

    /// Export as a plain JSON structure.
    pub fn to_value(&self) -> Result<Value, ChatError> {
        Ok(serde_json::to_value(self.to_snapshot())?)
    }

    /// Import from a plain JSON structure.
    pub fn from_value(value: Value) -> Result<Self, ChatError> {
        let snapshot: ContextSnapshot = serde_json::from_value(value)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the snapshot as JSON to `path`, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<(), ChatError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.to_snapshot())?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), messages = self.history.len(), "Session saved");
        Ok(())
    }

    /// Read a snapshot previously written by [`ConversationContext::save_json`].
    pub fn load_json(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: ContextSnapshot = serde_json::from_str(&content)?;
        Ok(Self::from_snapshot(snapshot))
    }
}

// =============================================================================
// ContextSnapshot
// =============================================================================

/// Plain, serializable form of a [`ConversationContext`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    #[serde(default = "Uuid::new_v4")]
    pub session_id: Uuid,
    #[serde(default = "default_max_history_length")]
    pub max_history_length: usize,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub last_intent: Option<String>,
    #[serde(default)]
    pub last_product_id: Option<ProductId>,
    #[serde(default)]
    pub session_metadata: Map<String, Value>,
}

fn default_max_history_length() -> usize {
    DEFAULT_MAX_HISTORY_LENGTH
}

// =============================================================================
// Tests
// =============================================================================
