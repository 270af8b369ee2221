//! Cheapest and most expensive products.

use std::cmp::Ordering;

use shopbot_core::Product;

use crate::context::ConversationContext;
use crate::handlers::HandlerRequest;
use crate::response::ReplyFormatter;

pub fn cheapest_product(request: &HandlerRequest<'_>, _context: &mut ConversationContext) -> String {
    ranked(request, "Our cheapest products:", |a, b| a.price.total_cmp(&b.price))
}

pub fn most_expensive_product(
    request: &HandlerRequest<'_>,
    _context: &mut ConversationContext,
) -> String {
    ranked(request, "Our most expensive products:", |a, b| {
        b.price.total_cmp(&a.price)
    })
}

/// Top `comparison_limit` products under `order`, ties in catalog order.
fn ranked(
    request: &HandlerRequest<'_>,
    heading: &str,
    order: impl Fn(&Product, &Product) -> Ordering,
) -> String {
    if request.products.is_empty() {
        return "There are no products available right now.".to_string();
    }
    let fmt = ReplyFormatter::from_config(request.config);

    let mut sorted: Vec<&Product> = request.products.iter().collect();
    sorted.sort_by(|a, b| order(a, b));
    sorted.truncate(request.config.comparison_limit);

    let lines: Vec<String> = sorted
        .iter()
        .map(|p| fmt.product_line_with_description(p))
        .collect();
    format!("{}\n{}", heading, lines.join("\n"))
}
