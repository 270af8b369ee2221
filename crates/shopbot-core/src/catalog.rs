//! Product catalog and recommendation capabilities.
//!
//! The assistant treats persistence and recommendation scoring as external
//! collaborators. These traits are the only surface it needs from them; the
//! in-memory implementations back the terminal session and the tests.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

use tracing::{debug, info};

use crate::error::{Result, ShopbotError};
use crate::types::{Product, ProductId};

// =============================================================================
// Traits
// =============================================================================

/// Read access to the product catalog.
pub trait ProductCatalog: Send + Sync {
    /// Snapshot of every product, in catalog order.
    fn list_products(&self) -> Result<Vec<Product>>;

    /// Look up a single product by id.
    fn get_product(&self, id: &str) -> Result<Option<Product>>;
}

/// Product recommendation service.
pub trait Recommender: Send + Sync {
    /// Products related to the given one, best first.
    fn related_products(&self, id: &str) -> Vec<Product>;

    /// Products suggested from a user's browsing behaviour, best first.
    fn behavioral_recommendations(&self, user_id: &str) -> Vec<Product>;
}

// =============================================================================
// InMemoryCatalog
// =============================================================================

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Build a catalog, rejecting negative or non-finite prices and duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::new();
        for p in &products {
            if !p.price.is_finite() || p.price < 0.0 {
                return Err(ShopbotError::Catalog(format!(
                    "product {} has invalid price {}",
                    p.id, p.price
                )));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(ShopbotError::Catalog(format!("duplicate product id {}", p.id)));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a JSON array of products from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            products = catalog.products.len(),
            "Product catalog loaded"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn get_product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

// =============================================================================
// CategoryRecommender
// =============================================================================

/// Recommends products sharing a category.
///
/// Behavioural recommendations come from the categories a user has viewed,
/// recorded through [`CategoryRecommender::record_view`].
pub struct CategoryRecommender {
    products: Vec<Product>,
    views: RwLock<HashMap<String, Vec<ProductId>>>,
}

impl CategoryRecommender {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            views: RwLock::new(HashMap::new()),
        }
    }

    /// Remember that `user_id` looked at `product_id`.
    pub fn record_view(&self, user_id: &str, product_id: &str) {
        if let Ok(mut views) = self.views.write() {
            let entry = views.entry(user_id.to_string()).or_default();
            if !entry.iter().any(|id| id == product_id) {
                entry.push(product_id.to_string());
            }
        }
    }

    fn viewed(&self, user_id: &str) -> Vec<ProductId> {
        self.views
            .read()
            .ok()
            .and_then(|views| views.get(user_id).cloned())
            .unwrap_or_default()
    }
}

impl Recommender for CategoryRecommender {
    fn related_products(&self, id: &str) -> Vec<Product> {
        let Some(anchor) = self.products.iter().find(|p| p.id == id) else {
            return Vec::new();
        };

        let mut related: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.id != anchor.id && p.in_category(&anchor.category))
            .cloned()
            .collect();

        // In-stock first, then closest in price.
        related.sort_by(|a, b| {
            b.is_in_stock().cmp(&a.is_in_stock()).then_with(|| {
                (a.price - anchor.price)
                    .abs()
                    .total_cmp(&(b.price - anchor.price).abs())
            })
        });
        debug!(product = id, related = related.len(), "Related products computed");
        related
    }

    fn behavioral_recommendations(&self, user_id: &str) -> Vec<Product> {
        let viewed = self.viewed(user_id);
        let categories: HashSet<String> = self
            .products
            .iter()
            .filter(|p| viewed.contains(&p.id))
            .map(|p| p.category.to_lowercase())
            .collect();

        let mut picks: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_in_stock())
            .filter(|p| categories.is_empty() || categories.contains(&p.category.to_lowercase()))
            .filter(|p| !viewed.contains(&p.id))
            .cloned()
            .collect();
        picks.sort_by(|a, b| a.price.total_cmp(&b.price));
        picks
    }
}
