use crate::domain::store::CandidateStore;
use crate::utils::error::Result;
use crate::utils::validation::compile_symbol_class;
use regex::Regex;

/// Word characters plus `-` and `_`.
pub const DEFAULT_SYMBOL_CHARS: &str = r"\w\-_";

/// Completion backend the host queries on each completion request.
#[derive(Debug, Clone)]
pub struct CompletionSource {
    symbol_run: Regex,
}

impl CompletionSource {
    pub fn new(symbol_chars: &str) -> Result<Self> {
        Ok(Self {
            symbol_run: compile_symbol_class("symbol_chars", symbol_chars)?,
        })
    }

    /// The run of symbol characters ending at byte offset `cursor`.
    ///
    /// `None` when `cursor` is past the end of `text` or splits a character.
    /// `Some("")` when the character before the cursor is not a symbol character.
    pub fn prefix_before<'t>(&self, text: &'t str, cursor: usize) -> Option<&'t str> {
        let before = text.get(..cursor)?;
        let found = self.symbol_run.find(before)?;
        Some(found.as_str())
    }

    pub fn candidates(&self, store: &CandidateStore, prefix: &str) -> Vec<String> {
        store.query(prefix).map(str::to_string).collect()
    }

    pub fn complete(&self, store: &CandidateStore, text: &str, cursor: usize) -> Vec<String> {
        match self.prefix_before(text, cursor) {
            Some(prefix) => {
                let matches = self.candidates(store, prefix);
                tracing::debug!("prefix {:?} matched {} candidates", prefix, matches.len());
                matches
            }
            None => {
                tracing::debug!("cursor {} is not a valid position in the request text", cursor);
                Vec::new()
            }
        }
    }
}

impl Default for CompletionSource {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL_CHARS).expect("default symbol class compiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(values: &[&str]) -> CandidateStore {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_prefix_before_cursor() {
        let source = CompletionSource::default();
        let text = "(setq my-var";

        assert_eq!(source.prefix_before(text, text.len()), Some("my-var"));
        assert_eq!(source.prefix_before(text, 8), Some("my"));
        assert_eq!(source.prefix_before(text, 5), Some("setq"));
        assert_eq!(source.prefix_before(text, 6), Some(""));
        assert_eq!(source.prefix_before(text, 0), Some(""));
    }

    #[test]
    fn test_prefix_before_invalid_cursor() {
        let source = CompletionSource::default();
        assert_eq!(source.prefix_before("abc", 4), None);
        assert_eq!(source.prefix_before("é", 1), None);
    }

    #[test]
    fn test_prefix_with_unicode_word_chars() {
        let source = CompletionSource::default();
        let text = "x = größe";
        assert_eq!(source.prefix_before(text, text.len()), Some("größe"));
    }

    #[test]
    fn test_custom_symbol_chars() {
        let source = CompletionSource::new(r"\w\.").unwrap();
        let text = "call os.path";
        assert_eq!(source.prefix_before(text, text.len()), Some("os.path"));

        assert!(CompletionSource::new("").is_err());
    }

    #[test]
    fn test_complete_uses_store_order() {
        let source = CompletionSource::default();
        let store = store(&["alpha", "beta", "alp"]);

        assert_eq!(source.complete(&store, "x al", 4), vec!["alpha", "alp"]);
        assert_eq!(source.complete(&store, "x ", 2).len(), 3);
        assert!(source.complete(&store, "x al", 10).is_empty());
    }
}
