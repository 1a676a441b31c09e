//! Topic-model collaborator contract. The model math lives outside this crate.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPIC_COUNT: usize = 3;

/// One latent topic, described in a model-specific format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Topic model failed: {0}")]
pub struct TopicError(pub String);

pub trait TopicModel {
    fn topics(&self, tokens: &[String], topic_count: usize) -> Result<Vec<Topic>, TopicError>;
}
