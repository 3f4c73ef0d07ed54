//! Text normalisation and term extraction

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9\s]").expect("static pattern is valid")
});

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lowercase, drop everything except ASCII letters, digits and whitespace, trim.
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALPHANUMERIC.replace_all(&lowered, "").trim().to_string()
}

/// Whitespace tokens of the preprocessed text.
pub fn tokenize(text: &str) -> Vec<String> {
    preprocess(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Unigram and bigram terms of `text` after stopword removal.
///
/// Bigrams join adjacent surviving tokens with a single space.
pub fn extract_terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();

    let bigrams = tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));

    tokens.iter().cloned().chain(bigrams).collect()
}
