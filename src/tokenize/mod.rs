//! Word segmentation contract.
//!
//! The analytics core treats tokens as opaque strings; all it needs is an
//! ordered sequence that is reproducible for identical input.

pub mod segment;

pub use segment::JiebaTokenizer;

pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// v0: script-aware splitter.
///
/// - Whitespace separates tokens and is dropped.
/// - Runs of alphanumeric characters outside the CJK blocks form one token.
/// - Each CJK ideograph or kana is its own token.
/// - Each remaining character (punctuation, symbols) is its own token.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for c in text.chars() {
            if c.is_alphanumeric() && !is_cjk(c) {
                current.push(c);
                continue;
            }

            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if !c.is_whitespace() {
                tokens.push(c.to_string());
            }
        }

        if !current.is_empty() {
            tokens.push(current);
        }

        tokens
    }
}

pub(crate) fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x3040..=0x30FF      // hiragana, katakana
            | 0x3400..=0x4DBF  // extension A
            | 0x4E00..=0x9FFF  // unified ideographs
            | 0xF900..=0xFAFF  // compatibility ideographs
            | 0x20000..=0x2A6DF // extension B
    )
}
