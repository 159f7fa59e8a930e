//! The HTML shell: the fixed host document sections render into.
//!
//! A [`Shell`] wraps the pristine template text and a set of recorded
//! replacements — container markup keyed by element id, the document
//! title, and head meta contents. [`Shell::render`] applies everything to
//! the pristine template in one pass, so rendering is repeatable: setting
//! a container twice keeps the last value, and two renders of the same
//! shell produce identical output.
//!
//! Required collaborators (container ids, meta tags) are treated the way
//! the page treats them: a missing element is a per-element skip recorded
//! as a diagnostic, never a build failure.
//!
//! The default shell ships inside the binary; `--shell` swaps in a custom
//! host document that honors the same id contract.

use crate::dom::{self, Edit, ElementSpan};
use crate::types::Diagnostic;
use maud::Markup;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The embedded default host document.
const SHELL_STATIC: &str = include_str!("../static/shell.html");

#[derive(Debug, Clone)]
enum MetaKey {
    /// `<meta name="...">`
    Name(String),
    /// `<meta property="...">` (Open Graph / Twitter)
    Property(String),
}

#[derive(Debug, Clone)]
pub struct Shell {
    template: String,
    containers: BTreeMap<String, String>,
    title: Option<String>,
    metas: Vec<(MetaKey, String)>,
}

impl Shell {
    /// The shell bundled with the binary.
    pub fn embedded() -> Self {
        Self::from_template(SHELL_STATIC)
    }

    /// A custom host document from disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        Ok(Self::from_template(fs::read_to_string(path)?))
    }

    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            containers: BTreeMap::new(),
            title: None,
            metas: Vec::new(),
        }
    }

    /// Record markup for the container with the given id. Replaces any
    /// previously recorded markup for that id.
    pub fn set_container(&mut self, id: &str, markup: Markup) {
        self.containers.insert(id.to_string(), markup.into_string());
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn set_meta_name(&mut self, name: &str, content: &str) {
        self.metas
            .push((MetaKey::Name(name.to_string()), content.to_string()));
    }

    pub fn set_meta_property(&mut self, property: &str, content: &str) {
        self.metas
            .push((MetaKey::Property(property.to_string()), content.to_string()));
    }

    /// Apply all recorded replacements to the pristine template.
    pub fn render(&self) -> (String, Vec<Diagnostic>) {
        let mut edits: Vec<Edit> = Vec::new();
        let mut diagnostics = Vec::new();

        for (id, markup) in &self.containers {
            match dom::find_by_id(&self.template, id) {
                Some(span) => edits.push(Edit {
                    start: span.inner_start,
                    end: span.inner_end,
                    replacement: markup.clone(),
                }),
                None => {
                    log::warn!("container '#{id}' not found in shell, section dropped");
                    diagnostics.push(Diagnostic::MissingContainer { id: id.clone() });
                }
            }
        }

        if let Some(title) = &self.title {
            match dom::first_element(&self.template, "title") {
                Some(span) => edits.push(Edit {
                    start: span.inner_start,
                    end: span.inner_end,
                    replacement: dom::escape_attr(title),
                }),
                None => {
                    log::warn!("shell has no <title> element");
                    diagnostics.push(Diagnostic::MissingContainer {
                        id: "title".to_string(),
                    });
                }
            }
        }

        for (key, content) in &self.metas {
            let (attr, name) = match key {
                MetaKey::Name(n) => ("name", n.as_str()),
                MetaKey::Property(p) => ("property", p.as_str()),
            };
            match find_meta(&self.template, attr, name) {
                Some(span) => {
                    let open = span.open_tag(&self.template);
                    edits.push(Edit {
                        start: span.open_start,
                        end: span.open_end,
                        replacement: dom::set_attr(open, "content", content),
                    });
                }
                None => {
                    log::warn!("shell has no <meta {attr}=\"{name}\"> element");
                    diagnostics.push(Diagnostic::MissingContainer {
                        id: format!("meta:{name}"),
                    });
                }
            }
        }

        (dom::apply_edits(&self.template, edits), diagnostics)
    }
}

fn find_meta(html: &str, attr: &str, name: &str) -> Option<ElementSpan> {
    dom::elements_with_attr(html, attr)
        .into_iter()
        .find(|(span, value)| span.tag.eq_ignore_ascii_case("meta") && value == name)
        .map(|(span, _)| span)
}
