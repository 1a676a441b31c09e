use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content hash of normalized document text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentVersion(String);

impl DocumentVersion {
    pub fn from_content(content: &[u8]) -> Self {
        DocumentVersion(sha256_tagged(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `sha256:<hex>` digest, the single hash format used across reports.
pub(crate) fn sha256_tagged(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);

    let hash = hasher.finalize();
    let hex = hex::encode(hash);

    format!("sha256:{hex}")
}
