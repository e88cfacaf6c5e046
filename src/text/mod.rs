//! Text normalization: tokenization and stopword filtering.
//!
//! [`tokenize`] is a pure function — identical input always yields
//! identical output, which keeps relevance scoring deterministic.

/// Common English function and auxiliary words removed during tokenization.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "would", "have", "had", "been",
    "this", "these", "they", "were", "not", "or", "but", "can", "could", "should", "may", "might",
    "must", "shall", "do", "does", "did", "get", "got", "make", "made", "take", "took", "come",
    "came", "go", "went", "see", "saw", "know", "knew", "think", "thought", "say", "said", "tell",
    "told", "give", "gave", "find", "found", "work", "worked", "call", "called", "try", "tried",
    "ask", "asked", "need", "needed", "feel", "felt", "become", "became", "leave", "left", "put",
    "set",
];

/// Check whether a (lower-cased) word is a stopword.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Split text into lower-cased alphabetic content tokens.
///
/// Non-alphabetic runs are dropped, tokens of length <= 2 are dropped,
/// and stopwords are removed. No stemming or other partial normalization
/// is performed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|tok| tok.len() > 2)
        .map(|tok| tok.to_ascii_lowercase())
        .filter(|tok| !is_stop_word(tok))
        .collect()
}
