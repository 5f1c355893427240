//! ARCG listings, published in canonical form

use super::{passthrough, AdapterError, RecordResult, SourceAdapter, TransformContext};
use serde_json::Value;

pub struct ArcgAdapter;

impl SourceAdapter for ArcgAdapter {
    fn name(&self) -> &'static str {
        "ARCG"
    }

    fn source_file(&self) -> &'static str {
        "arcg.json"
    }

    fn transform(
        &self,
        raw: Vec<Value>,
        _ctx: &TransformContext,
    ) -> Result<Vec<RecordResult>, AdapterError> {
        Ok(passthrough(raw))
    }
}
