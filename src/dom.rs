//! Minimal element scanning over the HTML shell.
//!
//! The shell contract only needs three operations: find an element by id,
//! find every element carrying a given attribute, and rewrite a single
//! attribute in an open tag. This module implements exactly that — a
//! targeted scanner for documents we control, not a general HTML parser.
//!
//! Spans are byte ranges into the scanned string. The inner span of an
//! element is computed by walking subsequent tags and tracking nesting
//! depth for the same tag name, so containers may hold nested markup of
//! other tags freely. Void elements (`<input>`, `<meta>`, ...) and
//! self-closed tags get an empty inner span.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Tags with no closing counterpart.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
];

/// Any open or close tag: `<(/?)(name)(attrs)>`, quote-aware in the attr part.
fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:"[^"]*"|'[^']*'|[^>"'])*)>"#)
            .expect("tag regex must compile")
    })
}

/// A double-quoted attribute inside an open tag.
fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_][a-zA-Z0-9_:.-]*)\s*=\s*"([^"]*)""#)
            .expect("attr regex must compile")
    })
}

/// Byte spans of one element within a scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpan {
    pub tag: String,
    pub open_start: usize,
    /// Just past the `>` of the open tag; equals `inner_start`.
    pub open_end: usize,
    pub inner_start: usize,
    /// Start of the matching close tag. Equals `inner_start` for void and
    /// self-closed elements.
    pub inner_end: usize,
    pub close_end: usize,
}

impl ElementSpan {
    pub fn open_tag<'a>(&self, html: &'a str) -> &'a str {
        &html[self.open_start..self.open_end]
    }

    pub fn inner<'a>(&self, html: &'a str) -> &'a str {
        &html[self.inner_start..self.inner_end]
    }
}

fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

fn self_closed(attrs: &str) -> bool {
    attrs.trim_end().ends_with('/')
}

/// Read one attribute value out of an open tag's attribute text.
fn attr_in(attrs: &str, name: &str) -> Option<String> {
    attr_re()
        .captures_iter(attrs)
        .find(|c| c[1].eq_ignore_ascii_case(name))
        .map(|c| c[2].to_string())
}

/// Read one attribute value out of a full open tag.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    attr_in(open_tag, name)
}

/// Compute the full span for an open tag found at `[start..end)`.
///
/// Returns `None` when no matching close tag exists (malformed input);
/// callers skip the element.
fn span_from_open(
    html: &str,
    start: usize,
    end: usize,
    tag: &str,
    attrs: &str,
) -> Option<ElementSpan> {
    if is_void(tag) || self_closed(attrs) {
        return Some(ElementSpan {
            tag: tag.to_string(),
            open_start: start,
            open_end: end,
            inner_start: end,
            inner_end: end,
            close_end: end,
        });
    }

    let mut depth = 1usize;
    for caps in tag_re().captures_iter(&html[end..]) {
        if !caps[2].eq_ignore_ascii_case(tag) {
            continue;
        }
        let m = caps.get(0).expect("regex match has a whole-match group");
        if !caps[1].is_empty() {
            depth -= 1;
            if depth == 0 {
                return Some(ElementSpan {
                    tag: tag.to_string(),
                    open_start: start,
                    open_end: end,
                    inner_start: end,
                    inner_end: end + m.start(),
                    close_end: end + m.end(),
                });
            }
        } else if !self_closed(caps.get(3).map_or("", |a| a.as_str())) {
            depth += 1;
        }
    }
    None
}

/// Every element carrying the given attribute, in document order, paired
/// with the attribute's value.
pub fn elements_with_attr(html: &str, attr: &str) -> Vec<(ElementSpan, String)> {
    let mut out = Vec::new();
    for caps in tag_re().captures_iter(html) {
        if !caps[1].is_empty() {
            continue;
        }
        let attrs = caps.get(3).map_or("", |a| a.as_str());
        let Some(value) = attr_in(attrs, attr) else {
            continue;
        };
        let m = caps.get(0).expect("regex match has a whole-match group");
        if let Some(span) = span_from_open(html, m.start(), m.end(), &caps[2], attrs) {
            out.push((span, value));
        }
    }
    out
}

/// First element with the given `id` attribute value.
pub fn find_by_id(html: &str, id: &str) -> Option<ElementSpan> {
    elements_with_attr(html, "id")
        .into_iter()
        .find(|(_, value)| value == id)
        .map(|(span, _)| span)
}

/// First element with the given tag name.
pub fn first_element(html: &str, tag: &str) -> Option<ElementSpan> {
    for caps in tag_re().captures_iter(html) {
        if !caps[1].is_empty() || !caps[2].eq_ignore_ascii_case(tag) {
            continue;
        }
        let m = caps.get(0).expect("regex match has a whole-match group");
        let attrs = caps.get(3).map_or("", |a| a.as_str());
        return span_from_open(html, m.start(), m.end(), &caps[2], attrs);
    }
    None
}

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

/// Rewrite (or append) one attribute in an open tag, returning the new tag.
///
/// The pattern requires leading whitespace so `placeholder` never matches
/// the tail of `data-i18n-placeholder`.
pub fn set_attr(open_tag: &str, name: &str, value: &str) -> String {
    let escaped = escape_attr(value);
    let re = Regex::new(&format!(r#"\s{}\s*=\s*"[^"]*""#, regex::escape(name)))
        .expect("attribute rewrite regex must compile");
    if re.is_match(open_tag) {
        return re
            .replace(open_tag, NoExpand(&format!(r#" {name}="{escaped}""#)))
            .into_owned();
    }
    // No such attribute yet: insert before the closing bracket
    let insert_at = if open_tag.ends_with("/>") {
        open_tag.len() - 2
    } else {
        open_tag.len() - 1
    };
    format!(
        r#"{} {name}="{escaped}"{}"#,
        open_tag[..insert_at].trim_end(),
        &open_tag[insert_at..]
    )
}

/// One pending text replacement.
#[derive(Debug, Clone)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Apply edits to a document. Edits nested inside another edit's range are
/// dropped (the outer replacement wins, matching what replacing a parent's
/// inner markup does to its children).
pub fn apply_edits(html: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<Edit> = Vec::with_capacity(edits.len());
    let mut last_end = 0usize;
    for edit in edits {
        if edit.start < last_end {
            continue;
        }
        last_end = edit.end;
        kept.push(edit);
    }

    let mut out = html.to_string();
    for edit in kept.into_iter().rev() {
        out.replace_range(edit.start..edit.end, &edit.replacement);
    }
    out
}
