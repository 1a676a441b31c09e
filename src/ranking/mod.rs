pub mod counter;
pub mod filters;

pub use counter::{rank_descending, OrderedTally};
pub use filters::{NeighborFilter, DEFAULT_PUNCTUATION};
