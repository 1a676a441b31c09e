pub mod analysis;
pub mod identifiers;

pub use analysis::{
    AnalysisReport, ArtifactSummary, FrequencyEntry, FrequencyTable, RelationshipEntry,
    RelationshipError, RelationshipMap, RelationshipOutcome, RelationshipTable, Section,
    SectionError, TableOrder,
};
pub use identifiers::DocumentVersion;
