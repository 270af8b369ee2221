//! Reply formatting and follow-up suggestions.
//!
//! Renders products, prices, and ranges into reply text, and proposes what
//! the customer might ask next.

use shopbot_core::{ChatConfig, Product, Recommender};

use crate::context::ConversationContext;
use crate::types::{ChatIntent, PriceRange};

// =============================================================================
// ReplyFormatter
// =============================================================================

/// Renders catalog data with a fixed currency symbol.
#[derive(Debug, Clone, Copy)]
pub struct ReplyFormatter<'a> {
    symbol: &'a str,
}

impl<'a> ReplyFormatter<'a> {
    pub fn new(symbol: &'a str) -> Self {
        Self { symbol }
    }

    pub fn from_config(config: &'a ChatConfig) -> Self {
        Self::new(&config.currency_symbol)
    }

    /// Price with exactly two decimals: `€10.00`.
    pub fn price(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }

    /// Range bound: whole amounts without decimals (`€50`), others with two (`€49.99`).
    pub fn amount(&self, amount: f64) -> String {
        if amount.fract() == 0.0 {
            format!("{}{:.0}", self.symbol, amount)
        } else {
            format!("{}{:.2}", self.symbol, amount)
        }
    }

    /// "under €50", "over €20", or "between €10 and €50".
    pub fn range(&self, range: &PriceRange) -> String {
        if !range.is_bounded() {
            format!("over {}", self.amount(range.min))
        } else if range.min <= 0.0 {
            format!("under {}", self.amount(range.max))
        } else {
            format!("between {} and {}", self.amount(range.min), self.amount(range.max))
        }
    }

    /// `• Shirt: €10.00 (in stock, 5 units)`
    pub fn product_line(&self, product: &Product) -> String {
        format!(
            "• {}: {} ({})",
            product.name,
            self.price(product.price),
            stock_label(product)
        )
    }

    /// Bullet line followed by the description, when there is one.
    pub fn product_line_with_description(&self, product: &Product) -> String {
        let line = self.product_line(product);
        if product.description.trim().is_empty() {
            line
        } else {
            format!("{} - {}", line, product.description.trim())
        }
    }

    /// Multi-line description of a single product.
    pub fn product_details(&self, product: &Product) -> String {
        let mut out = format!(
            "{}\nPrice: {}\nAvailability: {}",
            product.name,
            self.price(product.price),
            stock_label(product)
        );
        if !product.description.trim().is_empty() {
            out.push('\n');
            out.push_str(product.description.trim());
        }
        out
    }

    /// Bullet list of at most `limit` products, noting how many were left out.
    pub fn product_list(&self, products: &[&Product], limit: usize, with_description: bool) -> String {
        let mut lines: Vec<String> = products
            .iter()
            .take(limit)
            .map(|p| {
                if with_description {
                    self.product_line_with_description(p)
                } else {
                    self.product_line(p)
                }
            })
            .collect();
        if products.len() > limit {
            lines.push(format!("(and {} more)", products.len() - limit));
        }
        lines.join("\n")
    }
}

/// "in stock, N units" or "out of stock".
pub fn stock_label(product: &Product) -> String {
    match product.stock {
        0 => "out of stock".to_string(),
        1 => "in stock, 1 unit".to_string(),
        n => format!("in stock, {} units", n),
    }
}

// =============================================================================
// Suggestions
// =============================================================================

/// Follow-up prompts for the turn that was just answered.
///
/// With a recommender, prompts name related products of the remembered
/// product, or personal recommendations after a greeting. Otherwise (or if
/// the recommender has nothing to offer) a fixed list per intent is used.
pub fn suggestions(
    intent: ChatIntent,
    context: &ConversationContext,
    products: &[Product],
    recommender: Option<&dyn Recommender>,
    config: &ChatConfig,
) -> Vec<String> {
    let limit = config.suggestion_limit;
    if limit == 0 {
        return Vec::new();
    }

    if let Some(recommender) = recommender {
        let recommended = recommended_products(intent, context, recommender);
        let prompts: Vec<String> = recommended
            .iter()
            .filter(|p| context.last_product_id() != Some(p.id.as_str()))
            // Only suggest what the current snapshot can answer about.
            .filter(|p| products.iter().any(|known| known.id == p.id))
            .take(limit)
            .map(|p| format!("Tell me about {}", p.name))
            .collect();
        if !prompts.is_empty() {
            return prompts;
        }
    }

    let fmt = ReplyFormatter::from_config(config);
    fixed_suggestions(intent, &fmt)
        .into_iter()
        .take(limit)
        .collect()
}

fn recommended_products(
    intent: ChatIntent,
    context: &ConversationContext,
    recommender: &dyn Recommender,
) -> Vec<Product> {
    match intent {
        ChatIntent::ProductSearch
        | ChatIntent::PriceInquiry
        | ChatIntent::StockCheck
        | ChatIntent::CategoryFilter => context
            .last_product_id()
            .map(|id| recommender.related_products(id))
            .unwrap_or_default(),
        ChatIntent::Greeting => context
            .metadata("user_id")
            .and_then(|v| v.as_str())
            .map(|user| recommender.behavioral_recommendations(user))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn fixed_suggestions(intent: ChatIntent, fmt: &ReplyFormatter<'_>) -> Vec<String> {
    let under_fifty = format!("Show products under {}", fmt.amount(50.0));
    match intent {
        ChatIntent::ProductSearch | ChatIntent::PriceInquiry | ChatIntent::StockCheck => vec![
            "How much is it?".to_string(),
            "Is it in stock?".to_string(),
            "What are the cheapest products?".to_string(),
        ],
        ChatIntent::CheapestProduct => vec![
            "What are the most expensive products?".to_string(),
            under_fifty,
            "What categories do you have?".to_string(),
        ],
        ChatIntent::MostExpensiveProduct => vec![
            "What are the cheapest products?".to_string(),
            under_fifty,
            "What categories do you have?".to_string(),
        ],
        ChatIntent::CategoryFilter => vec![
            under_fifty,
            "What are the cheapest products?".to_string(),
        ],
        ChatIntent::PriceRangeSearch => vec![
            "What categories do you have?".to_string(),
            "What are the cheapest products?".to_string(),
        ],
        ChatIntent::Greeting => vec![
            "What categories do you have?".to_string(),
            "What are the cheapest products?".to_string(),
            "Help".to_string(),
        ],
        ChatIntent::Help | ChatIntent::Unknown => vec![
            "What categories do you have?".to_string(),
            "What are the cheapest products?".to_string(),
            under_fifty,
        ],
    }
}

// =============================================================================
// Tests
// =============================================================================
