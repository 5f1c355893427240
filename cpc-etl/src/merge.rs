//! Merge orchestration
//!
//! Sources are processed strictly in registration order so that a later
//! source replaces an earlier one on key collision. A failing source never
//! stops the run; only writing the final catalog can fail.

use crate::adapters::{SourceAdapter, TransformContext};
use crate::dedup::ProjectMap;
use crate::output::write_catalog;
use crate::sources::{load_source, SourceData};
use crate::validation::validate_project;
use cpc_common::config::CatalogPaths;
use cpc_common::{Project, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// How far a source got through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Loaded,
    Missing,
    Malformed,
    TransformFailed,
}

/// Per-source counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source_file: &'static str,
    pub status: SourceStatus,
    /// Raw records read from the file
    pub raw_count: usize,
    /// Valid records stored in the merge map
    pub accepted: usize,
    /// Records dropped as unreadable or by validation
    pub skipped_invalid: usize,
}

impl SourceReport {
    fn new(source_file: &'static str, status: SourceStatus) -> Self {
        Self {
            source_file,
            status,
            raw_count: 0,
            accepted: 0,
            skipped_invalid: 0,
        }
    }
}

/// Summary of one merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub sources: Vec<SourceReport>,
    /// Accepted records that replaced an earlier record with the same key
    pub replaced: usize,
    /// Projects in the final catalog
    pub total: usize,
    /// Where the catalog was written, if it was
    pub output: Option<PathBuf>,
}

impl MergeReport {
    pub fn source(&self, source_file: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.source_file == source_file)
    }

    pub fn skipped_invalid(&self) -> usize {
        self.sources.iter().map(|s| s.skipped_invalid).sum()
    }
}

/// Load, transform, validate and store one source into the merge map
fn merge_source(
    adapter: &dyn SourceAdapter,
    paths: &CatalogPaths,
    ctx: &TransformContext,
    map: &mut ProjectMap,
    replaced: &mut usize,
) -> SourceReport {
    let source_file = adapter.source_file();
    info!(source = source_file, "Processing source");

    let raw = match load_source(&paths.source_path(source_file)) {
        SourceData::Loaded(raw) => raw,
        SourceData::Missing => return SourceReport::new(source_file, SourceStatus::Missing),
        SourceData::Malformed(_) => {
            return SourceReport::new(source_file, SourceStatus::Malformed)
        }
    };

    let mut report = SourceReport::new(source_file, SourceStatus::Loaded);
    report.raw_count = raw.len();

    let projects = match adapter.transform(raw, ctx) {
        Ok(projects) => projects,
        Err(e) => {
            error!(source = source_file, error = %e, "Error transforming source");
            report.status = SourceStatus::TransformFailed;
            return report;
        }
    };

    for record in projects {
        let project = match record {
            Ok(project) => project,
            Err(e) => {
                warn!(
                    source = source_file,
                    title = %e.title,
                    reason = %e.reason,
                    "Skipping unreadable project"
                );
                report.skipped_invalid += 1;
                continue;
            }
        };
        if let Err(e) = validate_project(&project) {
            warn!(
                source = source_file,
                title = project.display_title(),
                reason = %e,
                "Skipping invalid project"
            );
            report.skipped_invalid += 1;
            continue;
        }
        if map.insert(project).is_some() {
            *replaced += 1;
        }
        report.accepted += 1;
    }

    info!(
        source = source_file,
        accepted = report.accepted,
        skipped = report.skipped_invalid,
        "Loaded {} projects",
        report.accepted
    );
    report
}

/// Run every adapter and return the deduplicated, sorted catalog
pub fn merge_projects(
    adapters: &[Box<dyn SourceAdapter>],
    paths: &CatalogPaths,
    ctx: &TransformContext,
) -> (Vec<Project>, MergeReport) {
    let mut map = ProjectMap::new();
    let mut report = MergeReport::default();

    for adapter in adapters {
        let source_report =
            merge_source(adapter.as_ref(), paths, ctx, &mut map, &mut report.replaced);
        report.sources.push(source_report);
    }

    let projects = map.into_sorted_vec();
    report.total = projects.len();
    (projects, report)
}

/// Merge all sources and write the catalog to `paths.output_file`
///
/// # Errors
/// Only a failure to write the output file is returned.
pub fn run_merge(
    adapters: &[Box<dyn SourceAdapter>],
    paths: &CatalogPaths,
    ctx: &TransformContext,
) -> Result<MergeReport> {
    info!("Starting merge process");

    let (projects, mut report) = merge_projects(adapters, paths, ctx);
    write_catalog(&projects, &paths.output_file)?;
    report.output = Some(paths.output_file.clone());

    info!(
        total = report.total,
        replaced = report.replaced,
        skipped = report.skipped_invalid(),
        "Successfully merged {} projects into {}",
        report.total,
        paths.output_file.display()
    );
    Ok(report)
}
