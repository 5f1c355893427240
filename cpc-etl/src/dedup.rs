//! Identity keys and last-writer-wins deduplication

use cpc_common::Project;
use std::collections::BTreeMap;

/// Joins title and organiser name inside a key
const KEY_SEPARATOR: char = '\u{1f}';

/// Identity of a project across sources
///
/// Case and surrounding whitespace of the title and organiser name are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(title: &str, organiser_name: &str) -> Self {
        Self(format!(
            "{}{}{}",
            title.trim().to_lowercase(),
            KEY_SEPARATOR,
            organiser_name.trim().to_lowercase()
        ))
    }

    pub fn for_project(project: &Project) -> Self {
        Self::new(&project.title, project.organiser_name())
    }
}

/// Accumulated projects for one merge run, keyed by identity
#[derive(Debug, Default)]
pub struct ProjectMap {
    projects: BTreeMap<RecordKey, Project>,
}

impl ProjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a project, replacing any earlier one with the same key
    ///
    /// Returns the replaced project, if any.
    pub fn insert(&mut self, project: Project) -> Option<Project> {
        self.projects.insert(RecordKey::for_project(&project), project)
    }

    /// All projects, ascending by (title, organiser name)
    pub fn into_sorted_vec(self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.into_values().collect();
        projects.sort_by(|a, b| {
            (a.title.as_str(), a.organiser_name()).cmp(&(b.title.as_str(), b.organiser_name()))
        });
        projects
    }
}
