//! Source adapters
//!
//! Each source file has its own raw shape. An adapter turns that source's raw
//! records into canonical [`Project`] values. Adapters are pure: the only
//! outside input they see is the [`TransformContext`].
//!
//! Registration order in [`default_adapters`] is processing order, and later
//! sources overwrite earlier ones on key collision.

mod arcg;
mod manual;
mod sewforcharity;

pub use arcg::ArcgAdapter;
pub use manual::ManualAdapter;
pub use sewforcharity::SewForCharityAdapter;

use chrono::NaiveDate;
use cpc_common::project::UNKNOWN_TITLE;
use cpc_common::Project;
use serde_json::Value;
use thiserror::Error;

/// Per-run inputs shared by all adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformContext {
    /// Processing date, used for `lastUpdated`
    pub today: NaiveDate,
}

impl TransformContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for a run happening now
    pub fn current() -> Self {
        Self::new(cpc_common::time::today())
    }
}

/// Outcome for one raw record: a canonical project, or why it was unreadable
pub type RecordResult = Result<Project, RecordError>;

/// Adapter for one source file
pub trait SourceAdapter {
    /// Adapter name for logs and reports
    fn name(&self) -> &'static str;

    /// File name under the sources directory
    fn source_file(&self) -> &'static str;

    /// Convert raw source records into canonical projects
    ///
    /// May drop records that are out of scope for the catalog. A record that
    /// cannot be read is returned as an `Err` entry and only that record is
    /// lost. An outer error fails the whole source; other sources are
    /// unaffected.
    fn transform(
        &self,
        raw: Vec<Value>,
        ctx: &TransformContext,
    ) -> Result<Vec<RecordResult>, AdapterError>;
}

/// Adapter transform failure, fatal for the source
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A raw record does not have the shape this source promises
    #[error("record {index} is not a valid {source_name} record: {reason}")]
    InvalidRecord {
        source_name: &'static str,
        index: usize,
        reason: String,
    },
}

/// A single raw record that could not be read as a project
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index} ('{title}') does not fit the project schema: {reason}")]
pub struct RecordError {
    pub index: usize,
    /// Raw title, or a placeholder if it has none
    pub title: String,
    pub reason: String,
}

impl RecordError {
    fn new(index: usize, raw: &Value, reason: impl Into<String>) -> Self {
        let title = raw
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();
        Self {
            index,
            title,
            reason: reason.into(),
        }
    }
}

/// Registered adapters, in processing order
pub fn default_adapters() -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(ManualAdapter),
        Box::new(ArcgAdapter),
        Box::new(SewForCharityAdapter),
    ]
}

/// Read raw records that are already in canonical form
pub(crate) fn passthrough(raw: Vec<Value>) -> Vec<RecordResult> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(RecordError::new(index, &value, "expected a JSON object"));
            }
            serde_json::from_value(value.clone())
                .map_err(|e| RecordError::new(index, &value, e.to_string()))
        })
        .collect()
}
