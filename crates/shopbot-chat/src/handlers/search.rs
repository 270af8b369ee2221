//! Product search and catalog filtering by category or price range.

use shopbot_core::Product;

use crate::context::ConversationContext;
use crate::extract::{extract_category, extract_price_range};
use crate::handlers::{info, record_product, record_range, HandlerRequest};
use crate::response::ReplyFormatter;
use crate::types::ChatIntent;

// =============================================================================
// Product search
// =============================================================================

/// Products whose name or description contains the query, or whose name
/// the query contains.
fn search_matches<'a>(query: &str, products: &'a [Product]) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| {
            let name = p.name.to_lowercase();
            name.contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || (!name.is_empty() && needle.contains(&name))
        })
        .collect()
}

pub fn product_search(request: &HandlerRequest<'_>, context: &mut ConversationContext) -> String {
    let fmt = ReplyFormatter::from_config(request.config);
    let matches = search_matches(request.query, request.products);

    match matches.as_slice() {
        [] => info::unknown(request, context),
        [only] => {
            record_product(context, ChatIntent::ProductSearch, only);
            format!(
                "{}\n\nWould you like to know more about the {}, for example whether it's in stock?",
                fmt.product_details(only),
                only.name
            )
        }
        [first, ..] => {
            record_product(context, ChatIntent::ProductSearch, first);
            format!(
                "I found {} products:\n{}",
                matches.len(),
                fmt.product_list(&matches, matches.len(), true)
            )
        }
    }
}

// =============================================================================
// Category filter
// =============================================================================

pub fn category_filter(request: &HandlerRequest<'_>, context: &mut ConversationContext) -> String {
    let fmt = ReplyFormatter::from_config(request.config);

    let Some(category) = extract_category(request.query, request.products) else {
        return category_overview(request.products);
    };
    context.set_metadata("active_category", category.as_str());

    let range = extract_price_range(request.query);
    if let Some(range) = &range {
        record_range(context, range);
    }

    let matches: Vec<&Product> = request
        .products
        .iter()
        .filter(|p| p.in_category(&category))
        .filter(|p| range.map_or(true, |r| r.contains(p.price)))
        .collect();

    let range_text = range.map(|r| format!(" {}", fmt.range(&r))).unwrap_or_default();
    let Some(first) = matches.first() else {
        return format!("I couldn't find any {} products{}.", category, range_text);
    };
    record_product(context, ChatIntent::CategoryFilter, first);

    format!(
        "{} products{}:\n{}",
        category,
        range_text,
        fmt.product_list(&matches, request.config.display_limit, false)
    )
}

fn category_overview(products: &[Product]) -> String {
    let mut categories: Vec<&str> = products
        .iter()
        .map(|p| p.category.trim())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    if categories.is_empty() {
        return "We don't have any product categories right now.".to_string();
    }
    let lines: Vec<String> = categories.iter().map(|c| format!("• {}", c)).collect();
    format!(
        "I'm not sure which category you mean. Did you mean one of these?\n{}",
        lines.join("\n")
    )
}

// =============================================================================
// Price range search
// =============================================================================

pub fn price_range_search(request: &HandlerRequest<'_>, context: &mut ConversationContext) -> String {
    let fmt = ReplyFormatter::from_config(request.config);

    let Some(range) = extract_price_range(request.query) else {
        return format!(
            "Tell me the price range you have in mind, for example \"under {}\" or \"between {} and {}\".",
            fmt.amount(50.0),
            fmt.amount(10.0),
            fmt.amount(30.0)
        );
    };
    record_range(context, &range);

    let category = extract_category(request.query, request.products);
    if let Some(category) = &category {
        context.set_metadata("active_category", category.as_str());
    }

    let mut matches: Vec<&Product> = request
        .products
        .iter()
        .filter(|p| range.contains(p.price))
        .filter(|p| category.as_deref().map_or(true, |c| p.in_category(c)))
        .collect();
    matches.sort_by(|a, b| a.price.total_cmp(&b.price));

    let range_text = fmt.range(&range);
    if matches.is_empty() {
        return match &category {
            Some(c) => format!("I couldn't find any {} products {}.", c, range_text),
            None => format!("I couldn't find any products {}.", range_text),
        };
    }

    let heading = match &category {
        Some(c) => format!("{} products {}:", c, range_text),
        None => format!("Products {}:", range_text),
    };
    format!(
        "{}\n{}",
        heading,
        fmt.product_list(&matches, request.config.display_limit, false)
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use shopbot_core::ChatConfig;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Shirt", 10.0, 5, "Clothing").with_description("Plain cotton shirt"),
            Product::new("p2", "Dress Shirt", 35.0, 2, "Clothing"),
            Product::new("p3", "Jacket", 60.0, 0, "Clothing"),
            Product::new("p4", "Lamp", 25.0, 4, "Home"),
            Product::new("p5", "Rug", 50.0, 1, "Home"),
        ]
    }

    fn run(
        handler: crate::handlers::Handler,
        query: &str,
        products: &[Product],
        ctx: &mut ConversationContext,
    ) -> String {
        let config = ChatConfig::default();
        handler(&HandlerRequest::new(query, products, &config), ctx)
    }

    // ---- Product search ----

    #[test]
    fn test_search_single_match() {
        let products = vec![Product::new("p1", "Shirt", 10.0, 5, "Clothing")];
        let mut ctx = ConversationContext::default();
        let reply = run(product_search, "show me shirt", &products, &mut ctx);
        assert!(reply.contains("Shirt"));
        assert!(reply.contains("10.00"));
        assert!(reply.contains("5"));
        assert_eq!(ctx.last_product_id(), Some("p1"));
        assert_eq!(ctx.last_intent(), Some(ChatIntent::ProductSearch));
    }

    #[test]
    fn test_search_multiple_matches_records_first() {
        let mut ctx = ConversationContext::default();
        let reply = run(product_search, "shirt", &catalog(), &mut ctx);
        assert!(reply.starts_with("I found 2 products:"));
        assert!(reply.contains("• Shirt: €10.00 (in stock, 5 units) - Plain cotton shirt"));
        assert!(reply.contains("• Dress Shirt: €35.00"));
        assert_eq!(ctx.last_product_id(), Some("p1"));
    }

    #[test]
    fn test_search_matches_description() {
        let mut ctx = ConversationContext::default();
        let reply = run(product_search, "cotton", &catalog(), &mut ctx);
        assert!(reply.starts_with("Shirt\n"));
    }

    #[test]
    fn test_search_without_match_is_unknown_reply() {
        let mut ctx = ConversationContext::default();
        let reply = run(product_search, "show me a bicycle", &catalog(), &mut ctx);
        assert_eq!(reply, info::UNKNOWN_REPLY);
        assert!(ctx.last_product_id().is_none());
    }

    #[test]
    fn test_search_empty_query() {
        let mut ctx = ConversationContext::default();
        assert_eq!(run(product_search, "  ", &catalog(), &mut ctx), info::UNKNOWN_REPLY);
    }

    // ---- Category filter ----

    #[test]
    fn test_category_filter() {
        let mut ctx = ConversationContext::default();
        let reply = run(category_filter, "show me clothing", &catalog(), &mut ctx);
        assert!(reply.starts_with("Clothing products:"));
        assert!(reply.contains("Jacket"));
        assert!(!reply.contains("Lamp"));
        assert_eq!(
            ctx.metadata("active_category").and_then(|v| v.as_str()),
            Some("Clothing")
        );
        assert_eq!(ctx.last_product_id(), Some("p1"));
    }

    #[test]
    fn test_category_filter_with_price_range() {
        let mut ctx = ConversationContext::default();
        let reply = run(category_filter, "clothing under 40", &catalog(), &mut ctx);
        assert!(reply.starts_with("Clothing products under €40:"));
        assert!(reply.contains("Dress Shirt"));
        assert!(!reply.contains("Jacket"));
        assert_eq!(ctx.metadata("price_max").and_then(|v| v.as_f64()), Some(40.0));
        assert_eq!(ctx.metadata("price_min").and_then(|v| v.as_f64()), Some(0.0));
    }

    #[test]
    fn test_category_filter_truncates() {
        let products: Vec<Product> = (0..8)
            .map(|i| Product::new(format!("p{}", i), format!("Item {}", i), 5.0, 1, "Toys"))
            .collect();
        let mut ctx = ConversationContext::default();
        let reply = run(category_filter, "browse toys", &products, &mut ctx);
        assert!(reply.ends_with("(and 3 more)"));
        assert!(reply.contains("Item 4"));
        assert!(!reply.contains("Item 5"));
    }

    #[test]
    fn test_category_overview_when_unrecognized() {
        let mut ctx = ConversationContext::default();
        let reply = run(category_filter, "what categories do you have?", &catalog(), &mut ctx);
        assert!(reply.contains("Did you mean one of these?"));
        let clothing = reply.find("• Clothing").unwrap();
        let home = reply.find("• Home").unwrap();
        assert!(clothing < home);
        assert_eq!(reply.matches("• Clothing").count(), 1);
        assert!(!ctx.has_metadata("active_category"));
    }

    #[test]
    fn test_category_filter_no_match_in_range() {
        let mut ctx = ConversationContext::default();
        let reply = run(category_filter, "home over 100", &catalog(), &mut ctx);
        assert_eq!(reply, "I couldn't find any Home products over €100.");
    }

    #[test]
    fn test_category_filter_empty_catalog() {
        let mut ctx = ConversationContext::default();
        let reply = run(category_filter, "show me clothing", &[], &mut ctx);
        assert!(!reply.is_empty());
    }

    // ---- Price range ----

    #[test]
    fn test_price_range_under() {
        let products = vec![
            Product::new("a", "Cheap", 10.0, 1, ""),
            Product::new("b", "Pricey", 60.0, 1, ""),
        ];
        let mut ctx = ConversationContext::default();
        let reply = run(price_range_search, "show products under 50 euros", &products, &mut ctx);
        assert!(reply.contains("under €50"));
        assert!(reply.contains("Cheap"));
        assert!(!reply.contains("Pricey"));
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let mut ctx = ConversationContext::default();
        let reply = run(price_range_search, "between 25 and 50", &catalog(), &mut ctx);
        assert!(reply.starts_with("Products between €25 and €50:"));
        assert!(reply.contains("Lamp"));
        assert!(reply.contains("Rug"));
        assert!(reply.contains("Dress Shirt"));
        assert!(!reply.contains("Jacket"));
    }

    #[test]
    fn test_price_range_sorted_ascending() {
        let mut ctx = ConversationContext::default();
        let reply = run(price_range_search, "over 20", &catalog(), &mut ctx);
        let order: Vec<usize> = ["Lamp", "Dress Shirt", "Rug", "Jacket"]
            .iter()
            .map(|name| reply.find(&format!("• {}:", name)).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(!ctx.has_metadata("price_max"));
    }

    #[test]
    fn test_price_range_with_category() {
        let mut ctx = ConversationContext::default();
        let reply = run(price_range_search, "home items under 30", &catalog(), &mut ctx);
        assert!(reply.starts_with("Home products under €30:"));
        assert!(reply.contains("Lamp"));
        assert!(!reply.contains("Shirt"));
        assert_eq!(ctx.metadata("active_category").and_then(|v| v.as_str()), Some("Home"));
    }

    #[test]
    fn test_price_range_missing() {
        let mut ctx = ConversationContext::default();
        let reply = run(price_range_search, "something affordable", &catalog(), &mut ctx);
        assert!(reply.contains("under €50"));
        assert!(!ctx.has_metadata("price_min"));
    }

    #[test]
    fn test_price_range_does_not_record_product() {
        let mut ctx = ConversationContext::default();
        run(price_range_search, "under 100", &catalog(), &mut ctx);
        assert!(ctx.last_product_id().is_none());
    }
}
