//! Intent detection from customer queries.
//!
//! Combines a static pattern catalog with conversation context to map a
//! free-text query onto a [`ChatIntent`](crate::types::ChatIntent).

pub mod classifier;
pub mod patterns;

pub use classifier::{classify, Classification, ClassificationStage, IntentClassifier};
pub use patterns::{IntentPattern, PatternCatalog, CATALOG};
