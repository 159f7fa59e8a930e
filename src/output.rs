//! CLI output formatting for build and check runs.
//!
//! Output is information-centric: the primary display for every page is
//! its language and destination, with section counts and warnings as
//! indented context lines. Each command has a `format_*` function
//! (returns `Vec<String>`) for testability and a `print_*` wrapper that
//! writes to stdout. Format functions are pure — no I/O, no side effects.
//!
//! ```text
//! Pages
//! 001 en → index.html
//!     skills: 12 items
//!     services: 4 items
//!     warning: missing translation key 'hero.subtitle'
//! 002 de → de/index.html
//!     ...
//!
//! Assets: 7 files copied
//! Build stamp: 3f9ac2d41b07
//! ```

use crate::types::{BuildReport, PageReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn page_lines(lines: &mut Vec<String>, pages: &[PageReport]) {
    lines.push("Pages".to_string());
    for (pos, page) in pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(pos + 1),
            page.language,
            page.output_path
        ));
        for section in &page.sections {
            lines.push(format!(
                "{}{}: {} items",
                indent(1),
                section.name,
                section.items
            ));
        }
        for diagnostic in &page.diagnostics {
            lines.push(format!("{}warning: {}", indent(1), diagnostic));
        }
    }
}

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    page_lines(&mut lines, &report.pages);
    lines.push(String::new());
    lines.push(format!("Assets: {} files copied", report.assets_copied));
    lines.push(format!("Build stamp: {}", report.stamp));
    lines
}

pub fn format_check_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    page_lines(&mut lines, &report.pages);
    let warnings = report.diagnostic_count();
    lines.push(String::new());
    lines.push(match warnings {
        0 => "No warnings".to_string(),
        1 => "1 warning".to_string(),
        n => format!("{n} warnings"),
    });
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{line}");
    }
}

pub fn print_check_output(report: &BuildReport) {
    for line in format_check_output(report) {
        println!("{line}");
    }
}
