use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// ASCII punctuation plus common CJK and fullwidth marks.
pub const DEFAULT_PUNCTUATION: &[&str] = &[
    "!", "\"", "#", "$", "%", "&", "'", "(", ")", "*", "+", ",", "-", ".", "/", ":", ";", "<",
    "=", ">", "?", "@", "[", "\\", "]", "^", "_", "`", "{", "|", "}", "~", "，", "。", "！", "？",
    "；", "：", "、", "“", "”", "‘", "’", "《", "》", "（", "）", "…", "……", "—", "——", "...",
];

/// Decides which tokens may count as neighbors (and word-cloud terms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborFilter {
    /// Tokens must be strictly longer than this many characters.
    pub min_exclusive_chars: usize,
    pub reject_numeric: bool,
    pub punctuation: BTreeSet<String>,
}

impl Default for NeighborFilter {
    fn default() -> Self {
        Self {
            min_exclusive_chars: 1,
            reject_numeric: true,
            punctuation: DEFAULT_PUNCTUATION.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl NeighborFilter {
    /// Only the length rule: tokens longer than one character.
    pub fn length_only() -> Self {
        Self {
            min_exclusive_chars: 1,
            reject_numeric: false,
            punctuation: BTreeSet::new(),
        }
    }

    /// Token rules alone, without reference to a focal entity.
    pub fn admits_term(&self, token: &str) -> bool {
        if token.chars().count() <= self.min_exclusive_chars {
            return false;
        }
        if self.reject_numeric && token.chars().all(char::is_numeric) {
            return false;
        }
        !self.punctuation.contains(token)
    }

    /// Token rules, and the token is not the focal entity itself.
    pub fn admits(&self, token: &str, focal: &str) -> bool {
        token != focal && self.admits_term(token)
    }
}
