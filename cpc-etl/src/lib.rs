//! cpc-etl library interface
//!
//! Merges project listings from every registered source into one
//! deduplicated, validated catalog file.

pub mod adapters;
pub mod dedup;
pub mod merge;
pub mod output;
pub mod sources;
pub mod validation;

pub use adapters::{
    default_adapters, AdapterError, RecordError, RecordResult, SourceAdapter, TransformContext,
};
pub use dedup::{ProjectMap, RecordKey};
pub use merge::{merge_projects, run_merge, MergeReport, SourceReport, SourceStatus};
pub use validation::{validate_project, ValidationError};
