//! Search-keyword normalization.
//!
//! Raw product names arrive with seller decorations (bracketed badges like
//! `[무료배송]`, parenthetical notes, marketing terms) that hurt match
//! quality on the shopping API. [`QueryRules`] strips those and bounds the
//! keyword length before it is sent upstream.

use regex::Regex;

use crate::app_config::AppConfig;

/// Normalization rules for raw product names.
///
/// Construct once (the bracket pattern is compiled in the constructor) and
/// reuse across requests.
pub struct QueryRules {
    brackets: Regex,
    stop_terms: Vec<String>,
    max_chars: usize,
}

impl QueryRules {
    /// Creates rules with the given marketing stop-terms and truncation bound.
    #[must_use]
    pub fn new(stop_terms: Vec<String>, max_chars: usize) -> Self {
        // Non-greedy so that "[a] b [c]" drops both brackets, not the span
        // between them.
        let brackets = Regex::new(r"\[.*?\]|\(.*?\)").expect("valid regex");
        Self {
            brackets,
            stop_terms,
            max_chars,
        }
    }

    /// Creates rules from the loaded application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.query_stop_terms.clone(), config.query_max_chars)
    }

    /// Normalizes a raw product name into a search keyword.
    ///
    /// Removes bracketed/parenthetical segments and stop-terms, trims
    /// surrounding whitespace, and truncates to `max_chars` characters.
    /// Stop-terms are removed as literal substrings, so configured terms
    /// cannot alter the pattern. Truncation counts `char`s, never bytes,
    /// so multi-byte input cannot be split mid-character.
    ///
    /// Empty input yields an empty keyword; callers pass that through to
    /// the provider unchanged.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let mut cleaned = self.brackets.replace_all(raw, "").into_owned();
        for term in &self.stop_terms {
            cleaned = cleaned.replace(term.as_str(), "");
        }
        cleaned.trim().chars().take(self.max_chars).collect()
    }
}
