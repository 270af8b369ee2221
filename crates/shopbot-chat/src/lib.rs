//! Conversational shopping assistant.
//!
//! Classifies free-text customer questions into intents, extracts products,
//! categories, and price ranges from them, and answers from a product catalog
//! snapshot while keeping short-term conversation memory.

pub mod context;
pub mod engine;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod intent;
pub mod response;
pub mod text;
pub mod types;

pub use context::{ContextSnapshot, ConversationContext};
pub use engine::ChatEngine;
pub use error::ChatError;
pub use extract::{extract_category, extract_price_range, extract_product};
pub use handlers::{dispatch, handler_for, Handler, HandlerRequest};
pub use intent::{classify, Classification, ClassificationStage, IntentClassifier};
pub use types::{ChatIntent, ChatMessage, ChatReply, PriceRange, Sender};
