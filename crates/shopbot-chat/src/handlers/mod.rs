//! Intent handlers and the registry that dispatches to them.
//!
//! Every handler has the same shape: it reads the query and the catalog
//! snapshot, may record what it talked about in the conversation context,
//! and returns the reply text. Handlers never fail; missing information
//! degrades to an explanatory reply.

pub mod info;
pub mod inquiry;
pub mod ranking;
pub mod search;

use tracing::{debug, warn};

use shopbot_core::{ChatConfig, Product, StaleProductFallback};

use crate::context::ConversationContext;
use crate::text::{contains_any_phrase, normalize};
use crate::types::{ChatIntent, PriceRange};

/// Inputs shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct HandlerRequest<'a> {
    pub query: &'a str,
    pub products: &'a [Product],
    pub config: &'a ChatConfig,
}

impl<'a> HandlerRequest<'a> {
    pub fn new(query: &'a str, products: &'a [Product], config: &'a ChatConfig) -> Self {
        Self {
            query,
            products,
            config,
        }
    }

    fn normalized_query(&self) -> String {
        normalize(self.query)
    }
}

/// Uniform handler signature. The context is the only thing a handler may change.
pub type Handler = fn(&HandlerRequest<'_>, &mut ConversationContext) -> String;

/// The handler for an intent.
pub fn handler_for(intent: ChatIntent) -> Handler {
    match intent {
        ChatIntent::PriceInquiry => inquiry::price_inquiry,
        ChatIntent::StockCheck => inquiry::stock_check,
        ChatIntent::ProductSearch => search::product_search,
        ChatIntent::CategoryFilter => search::category_filter,
        ChatIntent::PriceRangeSearch => search::price_range_search,
        ChatIntent::CheapestProduct => ranking::cheapest_product,
        ChatIntent::MostExpensiveProduct => ranking::most_expensive_product,
        ChatIntent::Greeting => info::greeting,
        ChatIntent::Help => info::help,
        ChatIntent::Unknown => info::unknown,
    }
}

/// Run the handler for `intent`. An empty reply is replaced by the fallback reply.
pub fn dispatch(
    intent: ChatIntent,
    request: &HandlerRequest<'_>,
    context: &mut ConversationContext,
) -> String {
    let reply = handler_for(intent)(request, context);
    if reply.trim().is_empty() {
        warn!(%intent, "Handler produced an empty reply, using fallback");
        return info::unknown(request, context);
    }
    debug!(%intent, chars = reply.len(), "Reply generated");
    reply
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Product a follow-up question refers to, if the query points back at one.
///
/// Requires a remembered product and one of `cues` in the query. When the
/// remembered product has left the catalog, the configured fallback decides.
fn remembered_product<'a>(
    request: &HandlerRequest<'a>,
    context: &ConversationContext,
    cues: &[&str],
) -> Option<&'a Product> {
    let id = context.last_product_id()?;
    if !contains_any_phrase(&request.normalized_query(), cues) {
        return None;
    }
    if let Some(product) = request.products.iter().find(|p| p.id == id) {
        return Some(product);
    }

    match request.config.stale_product_fallback {
        StaleProductFallback::FirstProduct => {
            let fallback = request.products.first();
            warn!(
                product_id = id,
                fallback = fallback.map(|p| p.id.as_str()),
                "Remembered product not in catalog, answering about the first product"
            );
            fallback
        }
        StaleProductFallback::GeneralListing => {
            warn!(product_id = id, "Remembered product not in catalog, ignoring it");
            None
        }
    }
}

/// Remember `product` as the subject of the conversation.
fn record_product(context: &mut ConversationContext, intent: ChatIntent, product: &Product) {
    context.set_last_intent(intent, Some(&product.id));
}

/// Store the bounds of an active price filter.
fn record_range(context: &mut ConversationContext, range: &PriceRange) {
    context.set_metadata("price_min", range.min);
    if range.is_bounded() {
        context.set_metadata("price_max", range.max);
    } else {
        context.clear_metadata("price_max");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Shirt", 10.0, 5, "Clothing"),
            Product::new("p2", "Lamp", 30.0, 0, "Home"),
        ]
    }

    // ---- Registry ----

    #[test]
    fn test_every_intent_has_a_handler_with_a_reply() {
        let products = catalog();
        let config = ChatConfig::default();
        let req = HandlerRequest::new("", &products, &config);
        for intent in ChatIntent::ALL {
            let mut ctx = ConversationContext::default();
            assert!(!dispatch(intent, &req, &mut ctx).trim().is_empty(), "{}", intent);
        }
    }

    #[test]
    fn test_every_intent_replies_on_empty_catalog() {
        let config = ChatConfig::default();
        let req = HandlerRequest::new("how much is it", &[], &config);
        for intent in ChatIntent::ALL {
            let mut ctx = ConversationContext::default();
            assert!(!dispatch(intent, &req, &mut ctx).trim().is_empty(), "{}", intent);
        }
    }

    #[test]
    fn test_handler_for_matches_dispatch() {
        let products = catalog();
        let config = ChatConfig::default();
        let req = HandlerRequest::new("hello", &products, &config);
        let mut a = ConversationContext::default();
        let mut b = ConversationContext::default();
        assert_eq!(
            handler_for(ChatIntent::Greeting)(&req, &mut a),
            dispatch(ChatIntent::Greeting, &req, &mut b)
        );
    }

    // ---- Remembered product ----

    #[test]
    fn test_remembered_product_needs_cue() {
        let products = catalog();
        let config = ChatConfig::default();
        let mut ctx = ConversationContext::default();
        ctx.set_last_intent(ChatIntent::ProductSearch, Some("p2"));

        let req = HandlerRequest::new("how much is it", &products, &config);
        assert_eq!(remembered_product(&req, &ctx, &["it"]).map(|p| p.id.as_str()), Some("p2"));

        let req = HandlerRequest::new("what are your prices", &products, &config);
        assert!(remembered_product(&req, &ctx, &["it"]).is_none());
    }

    #[test]
    fn test_remembered_product_without_memory() {
        let products = catalog();
        let config = ChatConfig::default();
        let ctx = ConversationContext::default();
        let req = HandlerRequest::new("how much is it", &products, &config);
        assert!(remembered_product(&req, &ctx, &["it"]).is_none());
    }

    #[test]
    fn test_stale_product_falls_back_to_first() {
        let products = catalog();
        let config = ChatConfig::default();
        let mut ctx = ConversationContext::default();
        ctx.set_last_intent(ChatIntent::ProductSearch, Some("gone"));
        let req = HandlerRequest::new("how much is it", &products, &config);
        assert_eq!(remembered_product(&req, &ctx, &["it"]).map(|p| p.id.as_str()), Some("p1"));
    }

    #[test]
    fn test_stale_product_general_listing() {
        let products = catalog();
        let config = ChatConfig {
            stale_product_fallback: StaleProductFallback::GeneralListing,
            ..ChatConfig::default()
        };
        let mut ctx = ConversationContext::default();
        ctx.set_last_intent(ChatIntent::ProductSearch, Some("gone"));
        let req = HandlerRequest::new("how much is it", &products, &config);
        assert!(remembered_product(&req, &ctx, &["it"]).is_none());
    }

    #[test]
    fn test_record_range_clears_unbounded_max() {
        let mut ctx = ConversationContext::default();
        record_range(&mut ctx, &PriceRange::between(10.0, 50.0));
        assert_eq!(ctx.metadata("price_max").and_then(|v| v.as_f64()), Some(50.0));

        record_range(&mut ctx, &PriceRange::at_least(20.0));
        assert_eq!(ctx.metadata("price_min").and_then(|v| v.as_f64()), Some(20.0));
        assert!(!ctx.has_metadata("price_max"));
    }
}
