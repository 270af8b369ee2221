pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{CategoryRecommender, InMemoryCatalog, ProductCatalog, Recommender};
pub use config::{ChatConfig, ShopbotConfig, StaleProductFallback};
pub use error::{Result, ShopbotError};
pub use types::*;
