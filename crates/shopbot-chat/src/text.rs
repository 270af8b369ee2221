//! Word-aware containment checks over normalized query text.

/// Trim and lower-case a raw query.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// True if `phrase` occurs in `text` as a whole word or phrase.
///
/// Boundaries are only enforced on sides where the phrase itself starts or
/// ends with an alphanumeric character, so symbols like `€` match anywhere.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    occurs(text, phrase, true)
}

/// True if `term` occurs in `text` starting at a word boundary.
///
/// Terms of three characters or fewer must match as whole words
/// (`"hi"` matches "hi there" but not "shirt" or "high").
pub fn contains_term(text: &str, term: &str) -> bool {
    occurs(text, term, term.chars().count() <= 3)
}

/// True if any of `phrases` is contained as a whole phrase.
pub fn contains_any_phrase(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_phrase(text, p))
}

/// True if any of `terms` is contained at a word start.
pub fn contains_any_term(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(text, t))
}

/// Characters that continue a word to the right ("hi-fi" is not "hi").
fn joins_word(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}

fn occurs(text: &str, needle: &str, whole_word: bool) -> bool {
    if needle.is_empty() {
        return false;
    }
    let starts_alnum = needle.chars().next().is_some_and(char::is_alphanumeric);
    let ends_alnum = needle.chars().last().is_some_and(char::is_alphanumeric);

    text.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let left_ok = !starts_alnum
            || text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = !whole_word
            || !ends_alnum
            || text[end..].chars().next().map_or(true, |c| !joins_word(c));
        left_ok && right_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Show Me SHIRTS \n"), "show me shirts");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_phrase_requires_word_boundaries() {
        assert!(contains_phrase("how much is it?", "it"));
        assert!(contains_phrase("it is", "it"));
        assert!(!contains_phrase("a shirt with pockets", "it"));
        assert!(!contains_phrase("item", "it"));
        assert!(contains_phrase("tell me more please", "tell me more"));
    }

    #[test]
    fn test_phrase_finds_later_occurrence() {
        // First occurrence is inside "with", second is a real word.
        assert!(contains_phrase("with it", "it"));
    }

    #[test]
    fn test_term_matches_word_prefix() {
        assert!(contains_term("prices please", "price"));
        assert!(contains_term("50 euros", "euro"));
        assert!(!contains_term("teuro", "euro"));
    }

    #[test]
    fn test_short_term_is_whole_word() {
        assert!(contains_term("oh hi there", "hi"));
        assert!(!contains_term("shirt", "hi"));
        assert!(!contains_term("high quality", "hi"));
        assert!(contains_term("can i get it", "get"));
        assert!(!contains_term("together", "get"));
        assert!(!contains_term("hi-fi speakers", "hi"));
        assert!(contains_phrase("show me the t-shirt", "shirt"));
    }

    #[test]
    fn test_symbols_match_anywhere() {
        assert!(contains_term("under 50€", "€"));
        assert!(contains_phrase("costs $5", "$"));
    }

    #[test]
    fn test_unicode_boundaries() {
        assert!(contains_term("ist das verfügbar?", "verfügbar"));
        assert!(contains_term("die günstigsten", "günstigste"));
    }

    #[test]
    fn test_empty_needle_never_matches() {
        assert!(!contains_phrase("anything", ""));
        assert!(!contains_term("anything", ""));
    }
}
