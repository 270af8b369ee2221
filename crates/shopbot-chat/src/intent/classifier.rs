//! Layered intent classification.
//!
//! Stages, first decisive one wins:
//! 1. empty query is `Unknown`;
//! 2. context-aware follow-up ("how much is it?" after a product reply);
//! 3. precise patterns by descending priority;
//! 4. priority-weighted keyword scoring;
//! 5. `Unknown`.

use tracing::debug;

use crate::context::ConversationContext;
use crate::intent::patterns::{PatternCatalog, CATALOG};
use crate::text::{contains_any_phrase, contains_any_term, contains_term, normalize};
use crate::types::ChatIntent;

/// Phrases that refer back to something said earlier.
const FOLLOW_UP_INDICATORS: &[&str] = &[
    "it", "that", "this", "them", "those", "yes", "yeah", "yep", "sure", "ok", "okay",
    "tell me more", "more info", "more details", "about it", "about that", "what about",
];

const PRICE_TERMS: &[&str] = &[
    "price", "cost", "how much", "expensive", "cheap", "€", "$", "euro", "dollar",
];

const STOCK_TERMS: &[&str] = &[
    "stock", "available", "in stock", "availability", "have", "get", "buy", "order",
];

/// Which stage produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationStage {
    EmptyQuery,
    FollowUp,
    Pattern,
    Keyword { score: u32 },
    NoMatch,
}

/// An intent together with the stage that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: ChatIntent,
    pub stage: ClassificationStage,
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// Rule-based intent classifier over a [`PatternCatalog`].
#[derive(Clone, Copy)]
pub struct IntentClassifier {
    catalog: &'static PatternCatalog,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier over the built-in catalog.
    pub fn new() -> Self {
        Self { catalog: &CATALOG }
    }

    /// Classify a query. Reads `context` but never modifies it.
    pub fn classify(&self, query: &str, context: Option<&ConversationContext>) -> ChatIntent {
        self.classify_detailed(query, context).intent
    }

    /// Classify a query and report which stage decided.
    pub fn classify_detailed(
        &self,
        query: &str,
        context: Option<&ConversationContext>,
    ) -> Classification {
        let normalized = normalize(query);
        let result = self.run_stages(&normalized, context);
        debug!(
            query = %normalized,
            intent = %result.intent,
            stage = ?result.stage,
            "Query classified"
        );
        result
    }

    fn run_stages(&self, normalized: &str, context: Option<&ConversationContext>) -> Classification {
        if normalized.is_empty() {
            return Classification {
                intent: ChatIntent::Unknown,
                stage: ClassificationStage::EmptyQuery,
            };
        }

        if let Some(intent) = context.and_then(|ctx| self.follow_up(normalized, ctx)) {
            return Classification {
                intent,
                stage: ClassificationStage::FollowUp,
            };
        }

        if let Some(intent) = self.pattern_match(normalized) {
            return Classification {
                intent,
                stage: ClassificationStage::Pattern,
            };
        }

        if let Some((intent, score)) = self.best_keyword_score(normalized) {
            return Classification {
                intent,
                stage: ClassificationStage::Keyword { score },
            };
        }

        Classification {
            intent: ChatIntent::Unknown,
            stage: ClassificationStage::NoMatch,
        }
    }

    // -----------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------

    /// Resolve pronoun-style follow-ups to a product-focused previous turn.
    fn follow_up(&self, normalized: &str, context: &ConversationContext) -> Option<ChatIntent> {
        let last = context.last_intent()?;
        if !last.is_product_focused() || !contains_any_phrase(normalized, FOLLOW_UP_INDICATORS) {
            return None;
        }
        if contains_any_term(normalized, PRICE_TERMS) {
            Some(ChatIntent::PriceInquiry)
        } else if contains_any_term(normalized, STOCK_TERMS) {
            Some(ChatIntent::StockCheck)
        } else {
            None
        }
    }

    fn pattern_match(&self, normalized: &str) -> Option<ChatIntent> {
        self.catalog
            .by_priority()
            .find(|entry| entry.matches(normalized))
            .map(|entry| entry.intent)
    }

    /// Per-intent keyword score, in catalog declaration order.
    ///
    /// Each keyword found in the query adds the entry's priority once.
    pub fn keyword_scores(&self, query: &str) -> Vec<(ChatIntent, u32)> {
        let normalized = normalize(query);
        self.catalog
            .entries()
            .iter()
            .map(|entry| {
                let hits = entry
                    .keywords
                    .iter()
                    .filter(|kw| contains_term(&normalized, kw))
                    .count() as u32;
                (entry.intent, hits * entry.priority)
            })
            .collect()
    }

    /// Highest non-zero score; ties go to the earliest declared intent.
    fn best_keyword_score(&self, normalized: &str) -> Option<(ChatIntent, u32)> {
        let mut best: Option<(ChatIntent, u32)> = None;
        for (intent, score) in self.keyword_scores(normalized) {
            if score == 0 {
                continue;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((intent, score));
            }
        }
        best
    }
}

/// Classify with the built-in catalog.
pub fn classify(query: &str, context: Option<&ConversationContext>) -> ChatIntent {
    IntentClassifier::new().classify(query, context)
}

// =============================================================================
// Tests
// =============================================================================
