//! Price and stock questions about one product, or the whole catalog.

use shopbot_core::Product;

use crate::context::ConversationContext;
use crate::extract::extract_product;
use crate::handlers::{record_product, remembered_product, HandlerRequest};
use crate::response::{stock_label, ReplyFormatter};
use crate::types::ChatIntent;

const PRICE_CUES: &[&str] = &["it", "that"];
const STOCK_CUES: &[&str] = &["it", "that", "available"];

const NO_PRODUCTS: &str = "We don't have any products available right now.";

/// Target of a product question: named in the query, or referred back to.
fn target_product<'a>(
    request: &HandlerRequest<'a>,
    context: &ConversationContext,
    cues: &[&str],
) -> Option<&'a Product> {
    extract_product(request.query, request.products)
        .or_else(|| remembered_product(request, context, cues))
}

pub fn price_inquiry(request: &HandlerRequest<'_>, context: &mut ConversationContext) -> String {
    let fmt = ReplyFormatter::from_config(request.config);

    if let Some(product) = target_product(request, context, PRICE_CUES) {
        record_product(context, ChatIntent::PriceInquiry, product);
        return format!("The {} costs {}.", product.name, fmt.price(product.price));
    }

    if request.products.is_empty() {
        return NO_PRODUCTS.to_string();
    }
    let lines: Vec<String> = request
        .products
        .iter()
        .map(|p| format!("• {}: {}", p.name, fmt.price(p.price)))
        .collect();
    format!("Here are our current prices:\n{}", lines.join("\n"))
}

pub fn stock_check(request: &HandlerRequest<'_>, context: &mut ConversationContext) -> String {
    let fmt = ReplyFormatter::from_config(request.config);

    if let Some(product) = target_product(request, context, STOCK_CUES) {
        record_product(context, ChatIntent::StockCheck, product);
        return if product.is_in_stock() {
            format!("Yes, the {} is {}.", product.name, stock_label(product))
        } else {
            format!("Sorry, the {} is currently out of stock.", product.name)
        };
    }

    let available: Vec<&Product> = request.products.iter().filter(|p| p.is_in_stock()).collect();
    if available.is_empty() {
        return "Sorry, nothing is in stock right now.".to_string();
    }
    format!(
        "These products are in stock:\n{}",
        fmt.product_list(&available, available.len(), false)
    )
}
