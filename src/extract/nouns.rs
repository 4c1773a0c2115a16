//! Candidate class discovery: capitalized word runs → PascalCase names.
//!
//! "A Shopping Cart" → `ShoppingCart`, "each Order" is only seen from the
//! capital onward, "The" on its own is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A run of capitalized words separated by whitespace.
pub(crate) const CLASS_RUN: &str = r"[A-Z][a-z]*(?:\s+[A-Z][a-z]*)*";

static NOUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{CLASS_RUN}\b")).expect("noun regex"));

static LEADING_DETERMINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:a|an|the|some|each|multiple|many|several|one)\s+")
        .expect("determiner regex")
});

/// Tokens dropped anywhere inside a candidate.
const FILLER: &[&str] = &["or", "more", "the", "a", "an", "some"];

/// Capitalized words that are almost never entities.
const NON_CLASS_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "Has", "Have", "Is", "Are", "Was", "Were", "Be",
    "But", "Or", "And", "With", "For", "As", "On", "In", "At", "By", "To", "Of", "From", "If",
    "When", "Where", "Which", "Who", "What", "It", "Its", "They", "We", "You", "He", "She",
    "Each", "Every", "All", "Any", "Also", "Then", "There", "Can", "May", "Must", "Should",
    "Will", "Created", "Most", "Popular",
];

/// Normalize a raw span into a PascalCase class name (may return an empty string).
pub fn clean_class_name(raw: &str) -> String {
    let stripped = LEADING_DETERMINER.replace(raw.trim(), "");
    stripped
        .split_whitespace()
        .filter(|w| !FILLER.contains(&w.to_lowercase().as_str()))
        .map(title_case)
        .collect::<String>()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn is_class_like(name: &str) -> bool {
    name.chars().count() > 1 && !NON_CLASS_WORDS.contains(&name)
}

/// Cleaned, filtered, deduplicated candidates in order of first appearance.
pub fn candidate_classes(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    NOUN_RE
        .find_iter(text)
        .map(|m| clean_class_name(m.as_str()))
        .filter(|name| is_class_like(name))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
