//! Shared report types passed between the generate stage and CLI output.

use std::fmt;

/// Non-fatal problems found while building a page.
///
/// Every variant is a local skip: the build continues and the problem is
/// tallied here and logged at warn level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `data-i18n` or `data-i18n-placeholder` key did not resolve to a
    /// string; the element's existing text was left in place.
    MissingTranslation { key: String },
    /// A renderer's target container id was absent from the shell; that
    /// section's markup was dropped.
    MissingContainer { id: String },
    /// Two records shared an id; the later one won.
    DuplicateId { id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingTranslation { key } => {
                write!(f, "missing translation key '{key}'")
            }
            Diagnostic::MissingContainer { id } => {
                write!(f, "container '#{id}' not found in shell")
            }
            Diagnostic::DuplicateId { id } => {
                write!(f, "duplicate id '{id}' (kept the later record)")
            }
        }
    }
}

/// Item count for one rendered section, for the build summary.
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub name: &'static str,
    pub items: usize,
}

/// Outcome of rendering one language's page.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub language: String,
    /// Output path relative to the output directory.
    pub output_path: String,
    pub sections: Vec<SectionReport>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a full build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Content hash of the bundle, stamped into each page.
    pub stamp: String,
    pub pages: Vec<PageReport>,
    pub assets_copied: usize,
}

impl BuildReport {
    pub fn diagnostic_count(&self) -> usize {
        self.pages.iter().map(|p| p.diagnostics.len()).sum()
    }
}
