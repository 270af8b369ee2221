//! Static intent catalog: keywords, precise patterns, and priorities.
//!
//! English and German terms live side by side in one table; the classifier
//! never branches on language.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ChatIntent;

/// Catalog entry for one intent.
pub struct IntentPattern {
    pub intent: ChatIntent,
    /// Lower-case terms scored by the keyword fallback.
    pub keywords: &'static [&'static str],
    /// Precise expressions checked before keyword scoring.
    pub patterns: Vec<Regex>,
    /// Higher wins: checked first during pattern matching, weighs more when scoring.
    pub priority: u32,
}

impl IntentPattern {
    /// True if any precise expression matches the normalized query.
    pub fn matches(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(normalized))
    }
}

/// Ordered collection of intent patterns, compiled once and reused.
pub struct PatternCatalog {
    entries: Vec<IntentPattern>,
    by_priority: Vec<usize>,
}

/// Process-wide catalog.
pub static CATALOG: LazyLock<PatternCatalog> = LazyLock::new(PatternCatalog::new);

const CATEGORY_WORDS: &str = "clothing|kleidung|electronics|elektronik|shoes|schuhe|accessories|zubehör|books|bücher|sports?|toys|spielzeug|beauty|garden|garten";

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCatalog {
    /// Build the catalog in declaration order.
    pub fn new() -> Self {
        let mk = |pats: &[&str]| -> Vec<Regex> {
            pats.iter()
                .map(|p| Regex::new(p).expect("Invalid intent regex"))
                .collect()
        };

        let category_browse = format!(
            r"\b(?:show|list|browse|see|zeig\w*|find)\b.*\b(?:{})\b",
            CATEGORY_WORDS
        );
        let category_in = format!(r"\bin\s+(?:the\s+)?(?:{})\b", CATEGORY_WORDS);

        let entries = vec![
            IntentPattern {
                intent: ChatIntent::PriceInquiry,
                keywords: &[
                    "how much", "price", "cost", "kostet", "kosten", "preis", "teuer", "wie viel",
                    "euro", "dollar", "€", "$",
                ],
                patterns: mk(&[
                    r"\bhow\s+much\b",
                    r"\bprices?\b",
                    r"\bcosts?\b",
                    r"\bwas\s+kostet\b",
                    r"\bkostet\b",
                    r"\bpreis\w*",
                    r"\bwie\s+viel\b",
                ]),
                priority: 1,
            },
            IntentPattern {
                intent: ChatIntent::StockCheck,
                keywords: &[
                    "available", "availability", "in stock", "stock", "verfügbar", "lager",
                    "vorrätig", "sold out",
                ],
                patterns: mk(&[
                    r"\bin\s+stock\b",
                    r"\bstock\b",
                    r"\bavailab(?:le|ility)\b",
                    r"\bverfügbar\w*",
                    r"\bauf\s+lager\b",
                    r"\bvorrätig\b",
                    r"\bsold\s+out\b",
                    r"\bhow\s+many\b.*\bleft\b",
                ]),
                priority: 2,
            },
            IntentPattern {
                intent: ChatIntent::Greeting,
                keywords: &[
                    "hello", "hi", "hey", "hallo", "guten tag", "guten morgen", "good morning",
                    "good evening", "moin", "servus", "greetings",
                ],
                patterns: mk(&[
                    r"\b(?:hi|hello|hey|hallo|moin|servus|greetings|howdy)(?:$|[^\w-])",
                    r"\b(?:guten\s+(?:tag|morgen|abend)|good\s+(?:morning|afternoon|evening))\b",
                ]),
                priority: 3,
            },
            IntentPattern {
                intent: ChatIntent::CheapestProduct,
                keywords: &[
                    "cheapest", "billigste", "günstigste", "lowest price", "least expensive",
                ],
                patterns: mk(&[
                    r"\bcheapest\b",
                    r"\bbilligst\w*",
                    r"\bgünstigst\w*",
                    r"\blowest\s+price",
                    r"\bleast\s+(?:expensive|costly)\b",
                ]),
                priority: 2,
            },
            IntentPattern {
                intent: ChatIntent::MostExpensiveProduct,
                keywords: &["most expensive", "teuerste", "priciest", "highest price"],
                patterns: mk(&[
                    r"\bmost\s+(?:expensive|costly)\b",
                    r"\bteuerst\w*",
                    r"\bpriciest\b",
                    r"\bhighest\s+price",
                ]),
                priority: 2,
            },
            IntentPattern {
                intent: ChatIntent::Help,
                keywords: &["help", "hilfe", "what can you", "how does this work", "was kannst du"],
                patterns: mk(&[
                    r"^(?:help|hilfe)[\s!?.]*$",
                    r"\bwhat\s+can\s+you\b",
                    r"\bwas\s+kannst\s+du\b",
                    r"\bhow\s+does\s+this\s+work\b",
                    r"\bi\s+need\s+help\b",
                    r"\bbrauche\s+hilfe\b",
                ]),
                priority: 1,
            },
            IntentPattern {
                intent: ChatIntent::PriceRangeSearch,
                keywords: &[
                    "under", "below", "over", "above", "between", "unter", "über", "zwischen",
                    "less than", "more than", "price range",
                ],
                patterns: mk(&[
                    r"\b(?:under|below|cheaper\s+than|less\s+than|unter|bis|max(?:imum)?)\s*[€$]?\s*\d+",
                    r"\b(?:over|above|more\s+than|greater\s+than|über|ab|min(?:imum)?)\s*[€$]?\s*\d+",
                    r"\b(?:between|from|von|zwischen)\s*[€$]?\s*\d+(?:[.,]\d+)?\s*(?:€|\$|euros?|eur)?\s*(?:and|to|bis|und|-)\s*[€$]?\s*\d+",
                    r"\d+(?:[.,]\d+)?\s*(?:€|\$|euros?|eur)?\s*(?:-|–|\bto\b|\bbis\b)\s*[€$]?\s*\d+",
                ]),
                priority: 2,
            },
            IntentPattern {
                intent: ChatIntent::CategoryFilter,
                keywords: &[
                    "category", "categories", "kategorie", "clothing", "kleidung", "electronics",
                    "elektronik", "shoes", "schuhe", "accessories", "zubehör", "books", "bücher",
                    "sport", "toys", "spielzeug", "beauty", "garden", "garten", "home",
                ],
                patterns: vec![
                    Regex::new(r"\b(?:categor(?:y|ies)|kategorien?)\b")
                        .expect("Invalid intent regex"),
                    Regex::new(&category_browse).expect("Invalid intent regex"),
                    Regex::new(&category_in).expect("Invalid intent regex"),
                ],
                priority: 2,
            },
            IntentPattern {
                intent: ChatIntent::ProductSearch,
                keywords: &[
                    "show me", "looking for", "ich suche", "search", "find", "suche", "zeig",
                    "do you have", "haben sie", "product", "produkt",
                ],
                patterns: mk(&[
                    r"\bshow\s+me\b",
                    r"\blooking\s+for\b",
                    r"\bich\s+suche\b",
                    r"\bsearch(?:ing)?\s+for\b",
                    r"\bfind\b",
                    r"\bdo\s+you\s+(?:have|sell)\b",
                    r"\bhaben\s+sie\b",
                    r"\bzeig(?:e|en)?\s+mir\b",
                    r"\btell\s+me\s+about\b",
                    r"\bi\s+(?:want|need)\b",
                ]),
                priority: 1,
            },
        ];

        // Stable: equal priorities keep declaration order.
        let mut by_priority: Vec<usize> = (0..entries.len()).collect();
        by_priority.sort_by(|&a, &b| entries[b].priority.cmp(&entries[a].priority));

        Self {
            entries,
            by_priority,
        }
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[IntentPattern] {
        &self.entries
    }

    /// Entries by descending priority, ties in declaration order.
    pub fn by_priority(&self) -> impl Iterator<Item = &IntentPattern> {
        self.by_priority.iter().map(|&i| &self.entries[i])
    }

    pub fn get(&self, intent: ChatIntent) -> Option<&IntentPattern> {
        self.entries.iter().find(|e| e.intent == intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_classifiable_intent() {
        for intent in ChatIntent::ALL {
            if intent == ChatIntent::Unknown {
                assert!(CATALOG.get(intent).is_none());
            } else {
                assert!(CATALOG.get(intent).is_some(), "missing {}", intent);
            }
        }
    }

    #[test]
    fn test_declaration_order() {
        let order: Vec<ChatIntent> = CATALOG.entries().iter().map(|e| e.intent).collect();
        assert_eq!(
            order,
            vec![
                ChatIntent::PriceInquiry,
                ChatIntent::StockCheck,
                ChatIntent::Greeting,
                ChatIntent::CheapestProduct,
                ChatIntent::MostExpensiveProduct,
                ChatIntent::Help,
                ChatIntent::PriceRangeSearch,
                ChatIntent::CategoryFilter,
                ChatIntent::ProductSearch,
            ]
        );
    }

    #[test]
    fn test_priority_order_is_stable() {
        let order: Vec<ChatIntent> = CATALOG.by_priority().map(|e| e.intent).collect();
        assert_eq!(
            order,
            vec![
                ChatIntent::Greeting,
                ChatIntent::StockCheck,
                ChatIntent::CheapestProduct,
                ChatIntent::MostExpensiveProduct,
                ChatIntent::PriceRangeSearch,
                ChatIntent::CategoryFilter,
                ChatIntent::PriceInquiry,
                ChatIntent::Help,
                ChatIntent::ProductSearch,
            ]
        );
    }

    #[test]
    fn test_priorities() {
        let priority = |i| CATALOG.get(i).unwrap().priority;
        assert_eq!(priority(ChatIntent::Greeting), 3);
        assert_eq!(priority(ChatIntent::StockCheck), 2);
        assert_eq!(priority(ChatIntent::CategoryFilter), 2);
        assert_eq!(priority(ChatIntent::PriceInquiry), 1);
        assert_eq!(priority(ChatIntent::ProductSearch), 1);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for entry in CATALOG.entries() {
            for kw in entry.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {:?} of {}", kw, entry.intent);
            }
        }
    }

    #[test]
    fn test_entry_matches() {
        let greeting = CATALOG.get(ChatIntent::Greeting).unwrap();
        assert!(greeting.matches("hello there"));
        assert!(greeting.matches("guten tag"));
        assert!(!greeting.matches("this shirt"));
        assert!(greeting.matches("show me a shirt, hello"));
        assert!(greeting.matches("thanks and good evening"));
        assert!(!greeting.matches("hi-fi speakers"));

        let category = CATALOG.get(ChatIntent::CategoryFilter).unwrap();
        assert!(category.matches("show me electronics"));
        assert!(category.matches("what categories do you have?"));
        assert!(!category.matches("show me shirt"));
    }
}
