use serde::{Deserialize, Serialize};

use crate::frequency::FREQUENCY_TABLE_SIZE;
use crate::ranking::NeighborFilter;
use crate::relations::{DEFAULT_NEIGHBOR_LIMIT, DEFAULT_WINDOW};
use crate::topics::DEFAULT_TOPIC_COUNT;
use crate::types::identifiers::sha256_tagged;

pub const MIN_NEIGHBOR_LIMIT: usize = 5;
pub const MAX_NEIGHBOR_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Neighbor limit {0} outside [5, 50]")]
    InvalidNeighborLimit(usize),

    #[error("Window radius must be at least 1, got {0}")]
    InvalidWindow(usize),
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub frequency_limit: usize,
    pub window: usize,
    pub neighbor_limit: usize,
    pub topic_count: usize,
    pub filter: NeighborFilter,
}

impl AnalysisConfig {
    pub fn v1() -> Self {
        Self {
            frequency_limit: FREQUENCY_TABLE_SIZE,
            window: DEFAULT_WINDOW,
            neighbor_limit: DEFAULT_NEIGHBOR_LIMIT,
            topic_count: DEFAULT_TOPIC_COUNT,
            filter: NeighborFilter::default(),
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_neighbor_limit(mut self, neighbor_limit: usize) -> Self {
        self.neighbor_limit = neighbor_limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_neighbor_limit(self.neighbor_limit)?;
        if self.window == 0 {
            return Err(ConfigError::InvalidWindow(self.window));
        }
        Ok(())
    }

    /// `sha256:<hex>` over the JSON form; identical configs hash identically.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(sha256_tagged(&json))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::v1()
    }
}

pub fn validate_neighbor_limit(limit: usize) -> Result<(), ConfigError> {
    if (MIN_NEIGHBOR_LIMIT..=MAX_NEIGHBOR_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(ConfigError::InvalidNeighborLimit(limit))
    }
}
