//! Core types and value objects for the conversational engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Enums
// =============================================================================

/// The discrete goal a customer message is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatIntent {
    PriceInquiry,
    StockCheck,
    ProductSearch,
    CheapestProduct,
    MostExpensiveProduct,
    Greeting,
    Help,
    CategoryFilter,
    PriceRangeSearch,
    Unknown,
}

impl ChatIntent {
    /// Every intent, in declaration order.
    pub const ALL: [ChatIntent; 10] = [
        ChatIntent::PriceInquiry,
        ChatIntent::StockCheck,
        ChatIntent::ProductSearch,
        ChatIntent::CheapestProduct,
        ChatIntent::MostExpensiveProduct,
        ChatIntent::Greeting,
        ChatIntent::Help,
        ChatIntent::CategoryFilter,
        ChatIntent::PriceRangeSearch,
        ChatIntent::Unknown,
    ];

    /// Stable external name, used in session snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            ChatIntent::PriceInquiry => "priceInquiry",
            ChatIntent::StockCheck => "stockCheck",
            ChatIntent::ProductSearch => "productSearch",
            ChatIntent::CheapestProduct => "cheapestProduct",
            ChatIntent::MostExpensiveProduct => "mostExpensiveProduct",
            ChatIntent::Greeting => "greeting",
            ChatIntent::Help => "help",
            ChatIntent::CategoryFilter => "categoryFilter",
            ChatIntent::PriceRangeSearch => "priceRangeSearch",
            ChatIntent::Unknown => "unknown",
        }
    }

    /// Parse an external name, falling back to [`ChatIntent::Unknown`].
    pub fn from_name_lossy(name: &str) -> ChatIntent {
        name.parse().unwrap_or(ChatIntent::Unknown)
    }

    /// Intents after which a pronoun-style follow-up refers to a product.
    pub fn is_product_focused(&self) -> bool {
        matches!(
            self,
            ChatIntent::ProductSearch | ChatIntent::PriceInquiry | ChatIntent::StockCheck
        )
    }
}

impl fmt::Display for ChatIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ChatIntent {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatIntent::ALL
            .iter()
            .copied()
            .find(|intent| intent.name() == s)
            .ok_or_else(|| format!("Unknown chat intent: {}", s))
    }
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

// =============================================================================
// Value objects
// =============================================================================

/// One turn of the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, metadata: Option<Map<String, Value>>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            metadata,
        }
    }
}

/// An inclusive price interval. `max` is `f64::INFINITY` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// `0..=max`
    pub fn up_to(max: f64) -> Self {
        Self { min: 0.0, max }
    }

    /// `min..` with no upper bound.
    pub fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    /// Interval between two amounts given in either order.
    pub fn between(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.max.is_finite()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Full result of one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Natural-language answer. Never empty.
    pub text: String,
    /// Intent the query was classified as.
    pub intent: ChatIntent,
    /// Follow-up prompts the user might send next.
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names_round_trip() {
        for intent in ChatIntent::ALL {
            assert_eq!(intent.name().parse::<ChatIntent>().unwrap(), intent);
        }
    }

    #[test]
    fn test_intent_from_unknown_name() {
        assert!("refundRequest".parse::<ChatIntent>().is_err());
        assert_eq!(ChatIntent::from_name_lossy("refundRequest"), ChatIntent::Unknown);
        assert_eq!(ChatIntent::from_name_lossy(""), ChatIntent::Unknown);
    }

    #[test]
    fn test_intent_serde_matches_name() {
        let json = serde_json::to_string(&ChatIntent::MostExpensiveProduct).unwrap();
        assert_eq!(json, "\"mostExpensiveProduct\"");
    }

    #[test]
    fn test_product_focused_intents() {
        assert!(ChatIntent::ProductSearch.is_product_focused());
        assert!(ChatIntent::PriceInquiry.is_product_focused());
        assert!(ChatIntent::StockCheck.is_product_focused());
        assert!(!ChatIntent::Greeting.is_product_focused());
        assert!(!ChatIntent::CategoryFilter.is_product_focused());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_message_without_timestamp_deserializes() {
        let msg: ChatMessage = serde_json::from_str(r#"{"sender":"user","text":"hi"}"#).unwrap();
        assert_eq!(msg.sender, Sender::User);
        assert!(msg.metadata.is_none());
    }

    #[test]
    fn test_price_range_inclusive_bounds() {
        let range = PriceRange::between(10.0, 50.0);
        assert!(range.contains(10.0));
        assert!(range.contains(50.0));
        assert!(!range.contains(50.01));
        assert!(!range.contains(9.99));
    }

    #[test]
    fn test_price_range_between_normalizes_order() {
        let range = PriceRange::between(50.0, 10.0);
        assert_eq!(range.min, 10.0);
        assert_eq!(range.max, 50.0);
    }

    #[test]
    fn test_price_range_unbounded() {
        let range = PriceRange::at_least(20.0);
        assert!(!range.is_bounded());
        assert!(range.contains(1_000_000.0));
        assert!(PriceRange::up_to(5.0).is_bounded());
    }
}
