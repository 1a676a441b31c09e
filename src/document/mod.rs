pub mod document;
pub mod normalizer;

pub use crate::types::identifiers::DocumentVersion;
pub use document::Document;
pub use normalizer::{DetectingNormalizer, LossyUtf8Normalizer, NormalizedText, TextNormalizer};
