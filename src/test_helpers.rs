//! Shared test utilities for the neonfolio test suite.
//!
//! Provides the fixture bundle and lookup helpers over build reports.
//! Finders panic with a clear message listing what was available, so a
//! failing test names the actual state instead of an index error.

use crate::bundle::ContentBundle;
use crate::types::{BuildReport, PageReport};

/// The fixture bundle as JSON text (two languages, all sections populated).
pub fn sample_bundle_json() -> &'static str {
    include_str!("../fixtures/data.json")
}

/// The fixture bundle, parsed.
pub fn sample_bundle() -> ContentBundle {
    ContentBundle::from_json(sample_bundle_json()).expect("fixture bundle must parse")
}

/// Find a page report by language. Panics if not found.
pub fn find_page<'a>(report: &'a BuildReport, language: &str) -> &'a PageReport {
    report
        .pages
        .iter()
        .find(|p| p.language == language)
        .unwrap_or_else(|| {
            let langs: Vec<&str> = report.pages.iter().map(|p| p.language.as_str()).collect();
            panic!("page for '{language}' not found. Available: {langs:?}")
        })
}

/// Item count of a named section in a page report. Panics if not found.
pub fn section_items(page: &PageReport, name: &str) -> usize {
    page.sections
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = page.sections.iter().map(|s| s.name).collect();
            panic!("section '{name}' not found. Available: {names:?}")
        })
        .items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_bundle_parses_with_both_languages() {
        let bundle = sample_bundle();
        assert_eq!(bundle.codes(), vec!["de", "en"]);
    }

    #[test]
    fn fixture_sections_are_populated() {
        let bundle = sample_bundle();
        let en = bundle.language("en").unwrap();
        assert!(!en.content.skills.categories.is_empty());
        assert!(!en.content.projects.items.is_empty());
        assert!(!en.content.certificates.categories.is_empty());
    }
}
