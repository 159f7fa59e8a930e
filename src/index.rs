//! Id-keyed lookup tables and the content context.
//!
//! Certificate and project cards embed their record id as a data attribute;
//! the detail views resolve those ids back to full records through the two
//! indexes built here. Both indexes are built once per language by
//! flattening the nested section lists, borrow from the bundle, and are
//! read-only afterwards.
//!
//! [`ContentContext`] bundles the language slice and both indexes into the
//! single value threaded through the render pipeline, so no lookup state
//! lives in globals.

use crate::bundle::{Certificate, LanguageSlice, Project};
use crate::types::Diagnostic;
use std::collections::BTreeMap;

/// Build an id → record map from an iterator of records.
///
/// Duplicate ids resolve last-write-wins; each overwritten id is reported
/// back so the build can tally it as a diagnostic.
pub fn build_index<'a, T>(
    records: impl Iterator<Item = &'a T>,
    id: impl Fn(&'a T) -> &'a str,
) -> (BTreeMap<&'a str, &'a T>, Vec<String>) {
    let mut map = BTreeMap::new();
    let mut duplicates = Vec::new();
    for record in records {
        let key = id(record);
        if map.insert(key, record).is_some() {
            duplicates.push(key.to_string());
        }
    }
    (map, duplicates)
}

/// One language's content plus its derived lookup tables.
pub struct ContentContext<'a> {
    pub slice: LanguageSlice<'a>,
    certificates: BTreeMap<&'a str, &'a Certificate>,
    projects: BTreeMap<&'a str, &'a Project>,
    duplicates: Vec<Diagnostic>,
}

impl<'a> ContentContext<'a> {
    pub fn new(slice: LanguageSlice<'a>) -> Self {
        let content = slice.content;
        let (certificates, cert_dups) = build_index(
            content
                .certificates
                .categories
                .iter()
                .flat_map(|c| c.items.iter()),
            |c| c.id.as_str(),
        );
        let (projects, proj_dups) =
            build_index(content.projects.items.iter(), |p| p.id.as_str());

        let duplicates = cert_dups
            .into_iter()
            .chain(proj_dups)
            .map(|id| Diagnostic::DuplicateId { id })
            .collect();

        Self {
            slice,
            certificates,
            projects,
            duplicates,
        }
    }

    /// Detail lookup; `None` for an unknown id (callers must no-op).
    pub fn certificate(&self, id: &str) -> Option<&'a Certificate> {
        self.certificates.get(id).copied()
    }

    /// Detail lookup; `None` for an unknown id (callers must no-op).
    pub fn project(&self, id: &str) -> Option<&'a Project> {
        self.projects.get(id).copied()
    }

    pub fn certificates(&self) -> &BTreeMap<&'a str, &'a Certificate> {
        &self.certificates
    }

    pub fn projects(&self) -> &BTreeMap<&'a str, &'a Project> {
        &self.projects
    }

    /// Duplicate-id diagnostics recorded while building the indexes.
    pub fn duplicate_diagnostics(&self) -> &[Diagnostic] {
        &self.duplicates
    }
}
