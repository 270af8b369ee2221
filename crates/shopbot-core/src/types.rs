use serde::{Deserialize, Serialize};

/// Identifier of a product in the storefront catalog.
pub type ProductId = String;

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the persistence layer.
///
/// The assistant only ever reads products; it never mutates one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Non-negative currency amount.
    pub price: f64,
    /// Units on hand.
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Create a product with an empty description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            stock,
            category: category.into(),
        }
    }

    /// Builder-style setter for the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}
