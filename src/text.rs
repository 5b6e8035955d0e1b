// src/text.rs
//! Lexical primitives: tokenizer, overlap scoring, and a short anonymizing
//! hash for log lines.

use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashSet;

fn word_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // \w covers [A-Za-z0-9_]; (?u) enables Unicode
    RE.get_or_init(|| Regex::new(r"(?u)\w+").expect("tokenizer regex"))
}

/// Lowercased word tokens as a set; duplicates collapse, order is irrelevant.
/// Punctuation and whitespace are separators, never tokens.
pub fn tokenize(input: &str) -> HashSet<String> {
    word_re()
        .find_iter(input)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Symmetric lexical overlap score in `[0, 1]`.
///
/// The denominator is `|A| + |B|`, not `|A u B|`: downstream thresholds
/// (the zero-score context filter, the compose budget) are tuned against
/// this formula and it must not be swapped for standard Jaccard.
pub fn similarity(a: &str, b: &str) -> f64 {
    let ta = tokenize(a);
    let tb = tokenize(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let inter = ta.intersection(&tb).count();
    inter as f64 / (ta.len() + tb.len()) as f64
}

/// Short hex digest for log lines. Never log raw feed text or full ids.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
