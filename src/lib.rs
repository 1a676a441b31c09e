//! Deterministic text analytics for a single document.
//!
//! `lexigraph-core` tokenizes a raw text once, ranks token frequencies, and
//! answers focal-entity queries with a weighted star graph built from
//! windowed co-occurrence. Frequency and relationship computations are pure:
//! identical inputs always produce identical outputs, byte-for-byte.
//!
//! Segmentation, topic modeling, and rendering are collaborators reached
//! through traits; the crate ships simple default implementations where a
//! reproducible one is cheap.

pub mod assets;
pub mod document;
pub mod frequency;
pub mod pipeline;
pub mod ranking;
pub mod relations;
pub mod render;
pub mod tokenize;
pub mod topics;
pub mod types;
