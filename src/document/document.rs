use serde::{Deserialize, Serialize};

use super::normalizer::{DetectingNormalizer, LossyUtf8Normalizer, TextNormalizer};
use crate::types::identifiers::DocumentVersion;

/// An uploaded text, normalized and versioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub source: String,
    pub version: DocumentVersion,
    pub text: String,
    /// True when undecodable bytes were replaced during ingestion.
    pub lossy: bool,
}

impl Document {
    /// Ingest raw bytes into a Document.
    ///
    /// Never fails: the normalizer substitutes what it cannot decode, and
    /// the version is computed on the normalized text.
    pub fn ingest(
        source: impl Into<String>,
        raw_content: &[u8],
        normalizer: &dyn TextNormalizer,
    ) -> Self {
        let normalized = normalizer.normalize(raw_content);
        let version = DocumentVersion::from_content(normalized.text.as_bytes());

        if normalized.lossy {
            tracing::warn!("document decoded with substitution characters");
        }

        Document {
            source: source.into(),
            version,
            text: normalized.text,
            lossy: normalized.lossy,
        }
    }

    /// Ingest with the default lossy UTF-8 normalizer.
    pub fn from_bytes(source: impl Into<String>, raw_content: &[u8]) -> Self {
        Self::ingest(source, raw_content, &LossyUtf8Normalizer)
    }

    /// Ingest a file of unknown encoding, e.g. a GBK-encoded novel.
    pub fn from_bytes_detected(source: impl Into<String>, raw_content: &[u8]) -> Self {
        Self::ingest(source, raw_content, &DetectingNormalizer)
    }

    pub fn from_text(source: impl Into<String>, text: &str) -> Self {
        Self::from_bytes(source, text.as_bytes())
    }

    /// Raw-text containment, used to tell "not in the document" apart from
    /// "present but unrelated".
    pub fn mentions(&self, entity: &str) -> bool {
        !entity.is_empty() && self.text.contains(entity)
    }
}
