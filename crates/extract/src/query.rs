//! Query normalization and matching.
//!
//! Shared by the resolvers (finding "my part" in a page of search results)
//! and by the inventory filter (tokenizing free-text searches).

use exn::ResultExt;
use regex::Regex;

use crate::consts::FORBIDDEN_TRAILERS;
use crate::error::{ErrorKind, Result};

/// Escapes every regex metacharacter so that raw user input can be embedded
/// in a dynamically built pattern.
///
/// ```rust
/// use partscout_extract::query::escape_regex;
/// assert_eq!(escape_regex("1N4148 (DO-35)"), r"1N4148 \(DO\-35\)");
/// ```
pub fn escape_regex(s: &str) -> String {
    regex::escape(s)
}

/// Case-folds and strips everything except letters, digits and whitespace.
///
/// ```rust
/// use partscout_extract::query::normalize_for_match;
/// assert_eq!(normalize_for_match("LM-7805!"), "lm7805");
/// ```
pub fn normalize_for_match(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Splits a free-text query into normalized, non-empty tokens.
pub fn tokens(s: &str) -> Vec<String> {
    normalize_for_match(s).split_whitespace().map(str::to_string).collect()
}

fn is_forbidden_trailer(c: char) -> bool {
    c.is_ascii_alphanumeric() || FORBIDDEN_TRAILERS.contains(&c)
}

/// Whole-word, case-insensitive matcher for a part query.
///
/// Requires a word boundary on the left, and rejects a match that is directly
/// followed by an ASCII letter, digit, `-`, `/` or `.`. So `LM78` will not
/// match inside `LM7805`, nor will `LM7805` match `LM7805-T`.
#[derive(Debug, Clone)]
pub struct WholeWord {
    query: String,
    pattern: Regex,
}
impl WholeWord {
    pub fn new(query: &str) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            exn::bail!(ErrorKind::EmptyQuery);
        }
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", escape_regex(query)))
            .or_raise(|| ErrorKind::InvalidPattern(query.to_string()))?;
        Ok(Self {
            query: query.to_string(),
            pattern,
        })
    }

    /// The trimmed query this matcher was built from.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        let mut start = 0;
        while let Some(found) = self.pattern.find_at(haystack, start) {
            match haystack[found.end()..].chars().next() {
                Some(next) if is_forbidden_trailer(next) => {},
                _ => return true,
            }
            // Occurrences may overlap (think "A-A-A"), so step a single
            // character past the rejected start rather than past its end.
            start = found.start() + haystack[found.start()..].chars().next().map_or(1, char::len_utf8);
        }
        false
    }
}
