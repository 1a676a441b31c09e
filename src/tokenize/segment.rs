use std::fmt;
use std::sync::Arc;

use jieba_rs::Jieba;
use once_cell::sync::Lazy;

use super::{is_cjk, SimpleTokenizer, Tokenizer};

static DEFAULT_DICTIONARY: Lazy<Arc<Jieba>> = Lazy::new(|| Arc::new(Jieba::new()));

/// v1: dictionary word segmentation for CJK text.
///
/// Runs of CJK characters are cut by jieba (bundled dictionary, HMM for
/// unknown words). Everything else follows [`SimpleTokenizer`], so Latin
/// words, digits and marks tokenize exactly as they do in v0.
#[derive(Clone)]
pub struct JiebaTokenizer {
    jieba: Arc<Jieba>,
    hmm: bool,
}

impl fmt::Debug for JiebaTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaTokenizer")
            .field("hmm", &self.hmm)
            .finish()
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self {
            jieba: Arc::clone(&DEFAULT_DICTIONARY),
            hmm: true,
        }
    }
}

impl JiebaTokenizer {
    /// Bundled dictionary plus extra words (character names, place names)
    /// that must always come out as single tokens.
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut jieba = Jieba::new();
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                jieba.add_word(word, None, None);
            }
        }
        Self {
            jieba: Arc::new(jieba),
            hmm: true,
        }
    }

    /// Disable HMM discovery of words missing from the dictionary.
    pub fn without_hmm(mut self) -> Self {
        self.hmm = false;
        self
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for (run, cjk) in script_runs(text) {
            if cjk {
                tokens.extend(
                    self.jieba
                        .cut(run, self.hmm)
                        .into_iter()
                        .filter(|w| !w.trim().is_empty())
                        .map(str::to_string),
                );
            } else {
                tokens.extend(SimpleTokenizer.tokenize(run));
            }
        }

        tokens
    }
}

/// Maximal slices that are either all CJK or all non-CJK, in text order.
fn script_runs(text: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let cjk = is_cjk(c);
        match current {
            Some(prev) if prev != cjk => {
                runs.push((&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        current = Some(cjk);
    }

    if let Some(cjk) = current {
        runs.push((&text[start..], cjk));
    }
    runs
}
