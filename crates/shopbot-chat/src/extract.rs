//! Parameter extraction from free-text queries.
//!
//! Pulls a category, a price range, or a specific product out of raw
//! customer input. All functions are pure and never fail: "nothing found"
//! is `None`.

use std::sync::LazyLock;

use regex::Regex;

use shopbot_core::Product;

use crate::text::normalize;
use crate::types::PriceRange;

// =============================================================================
// Compiled price patterns (compiled once, reused across calls)
// =============================================================================

struct PricePatterns {
    upper_bound: Regex,
    lower_bound: Regex,
    between: Regex,
    bare_span: Regex,
}

static PRICE_PATTERNS: LazyLock<PricePatterns> = LazyLock::new(|| {
    let mk = |p: &str| Regex::new(p).expect("Invalid price regex");
    PricePatterns {
        // "under 50", "bis 30€", "max $20"
        upper_bound: mk(
            r"\b(?:under|below|cheaper\s+than|less\s+than|bis|maximum|max|unter)\s*(?:€|\$)?\s*(\d+(?:[.,]\d+)?)",
        ),
        // "over 20", "ab 10 euro", "über 100"
        lower_bound: mk(
            r"\b(?:over|above|more\s+than|greater\s+than|ab|minimum|min|über)\s*(?:€|\$)?\s*(\d+(?:[.,]\d+)?)",
        ),
        // "between 10 and 50", "von 10€ bis 50€", "from $5 to $9"
        between: mk(
            r"\b(?:between|from|von|zwischen)\s*(?:€|\$)?\s*(\d+(?:[.,]\d+)?)\s*(?:€|\$|euros?|eur|dollars?)?\s*(?:and|to|bis|und|-)\s*(?:€|\$)?\s*(\d+(?:[.,]\d+)?)",
        ),
        // "10-50", "10 € - 50 €", "20 to 40 euros"
        bare_span: mk(
            r"(\d+(?:[.,]\d+)?)\s*(?:€|\$|euros?|eur|dollars?)?\s*(?:-|–|\bto\b|\bbis\b)\s*(?:€|\$)?\s*(\d+(?:[.,]\d+)?)",
        ),
    }
});

/// Currency words that may sit between an amount and a bound keyword.
const CURRENCY_SUFFIXES: &[&str] = &["euros", "euro", "eur", "dollars", "dollar", "€", "$"];

// =============================================================================
// Category
// =============================================================================

/// First catalog category whose name appears in the query.
///
/// Categories are considered in the order they first occur in `products`.
/// The returned string keeps the catalog's casing.
pub fn extract_category(query: &str, products: &[Product]) -> Option<String> {
    let lower = normalize(query);
    let mut seen: Vec<String> = Vec::new();

    for product in products {
        let category = product.category.to_lowercase();
        if category.is_empty() || seen.contains(&category) {
            continue;
        }
        if lower.contains(&category) {
            return Some(product.category.clone());
        }
        seen.push(category);
    }
    None
}

// =============================================================================
// Price range
// =============================================================================

/// Extract a price range, trying upper bound, lower bound, "between", and
/// bare spans in that order.
///
/// Unbounded ranges use `f64::INFINITY` as `max`.
pub fn extract_price_range(query: &str) -> Option<PriceRange> {
    let lower = normalize(query);
    let pats = &*PRICE_PATTERNS;

    if let Some(max) = first_unanchored_amount(&pats.upper_bound, &lower) {
        return Some(PriceRange::up_to(max));
    }

    if let Some(min) = first_unanchored_amount(&pats.lower_bound, &lower) {
        return Some(PriceRange::at_least(min));
    }

    for re in [&pats.between, &pats.bare_span] {
        if let Some(caps) = re.captures(&lower) {
            let a = caps.get(1).and_then(|m| parse_amount(m.as_str()));
            let b = caps.get(2).and_then(|m| parse_amount(m.as_str()));
            if let (Some(a), Some(b)) = (a, b) {
                return Some(PriceRange::between(a, b));
            }
        }
    }

    None
}

/// First match of a single-bound pattern whose keyword is not itself preceded
/// by an amount, so "von 10 bis 50" is read as a span rather than "bis 50".
fn first_unanchored_amount(re: &Regex, text: &str) -> Option<f64> {
    re.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if preceded_by_amount(&text[..whole.start()]) {
            return None;
        }
        caps.get(1).and_then(|m| parse_amount(m.as_str()))
    })
}

fn preceded_by_amount(prefix: &str) -> bool {
    let mut rest = prefix.trim_end();
    for suffix in CURRENCY_SUFFIXES {
        if let Some(stripped) = rest.strip_suffix(suffix) {
            rest = stripped.trim_end();
            break;
        }
    }
    rest.chars().next_back().is_some_and(|c| c.is_ascii_digit())
}

/// Parse "49.99" or "49,99".
fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// =============================================================================
// Product
// =============================================================================

/// Resolve the one product a query is about, if that can be done confidently.
///
/// First looks for product names inside the query (longest name wins; two
/// different products tied for longest is ambiguous). Otherwise looks for the
/// query inside product names and descriptions, which must single out exactly
/// one product.
pub fn extract_product<'a>(query: &str, products: &'a [Product]) -> Option<&'a Product> {
    let lower = normalize(query);
    if lower.is_empty() {
        return None;
    }

    let mut best: Option<(&Product, usize)> = None;
    let mut tied = false;
    for product in products {
        let name = product.name.to_lowercase();
        if name.is_empty() || !lower.contains(&name) {
            continue;
        }
        let len = name.chars().count();
        match best {
            Some((_, best_len)) if len < best_len => {}
            Some((_, best_len)) if len == best_len => tied = true,
            _ => {
                best = Some((product, len));
                tied = false;
            }
        }
    }
    if let Some((product, _)) = best {
        return if tied { None } else { Some(product) };
    }

    let needle = lower.trim_matches(|c: char| !c.is_alphanumeric());
    if needle.chars().count() < 3 {
        return None;
    }
    let mut candidates = products.iter().filter(|p| {
        p.name.to_lowercase().contains(needle) || p.description.to_lowercase().contains(needle)
    });
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
