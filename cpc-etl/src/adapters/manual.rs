//! Manually entered projects, already in canonical form

use super::{passthrough, AdapterError, RecordResult, SourceAdapter, TransformContext};
use serde_json::Value;

pub struct ManualAdapter;

impl SourceAdapter for ManualAdapter {
    fn name(&self) -> &'static str {
        "Manual"
    }

    fn source_file(&self) -> &'static str {
        "manual.json"
    }

    fn transform(
        &self,
        raw: Vec<Value>,
        _ctx: &TransformContext,
    ) -> Result<Vec<RecordResult>, AdapterError> {
        Ok(passthrough(raw))
    }
}
