//! Translation pass over the rendered document.
//!
//! Elements tagged `data-i18n="a.b.c"` get their inner content replaced by
//! the string found at that dotted path in the language's raw JSON
//! sub-tree, one property per segment. A second pass handles
//! `data-i18n-placeholder`, assigning to the element's `placeholder`
//! attribute instead — the form-input variant of the same binding.
//!
//! A key that is missing, or that resolves to anything but a string,
//! leaves the element's existing text in place and emits one warn-level
//! diagnostic. Nothing here is fatal.
//!
//! Inner-content substitution is raw: headings may carry inline styled
//! spans from the bundle. That is safe only because the bundle is
//! developer-controlled content — this pass must never see user input.
//! Placeholder values go into an attribute and are escaped.

use crate::dom::{self, Edit};
use crate::types::Diagnostic;
use serde_json::Value;

/// Resolve a dotted path against a JSON tree, one property per segment.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| node.get(segment))
}

fn resolve_text<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    resolve(root, path).and_then(Value::as_str)
}

/// Apply both translation passes to a rendered document.
pub fn apply(html: &str, language: &Value) -> (String, Vec<Diagnostic>) {
    let mut edits: Vec<Edit> = Vec::new();
    let mut diagnostics = Vec::new();

    for (span, key) in dom::elements_with_attr(html, "data-i18n") {
        match resolve_text(language, &key) {
            Some(text) => edits.push(Edit {
                start: span.inner_start,
                end: span.inner_end,
                replacement: text.to_string(),
            }),
            None => {
                log::warn!("missing translation key '{key}'");
                diagnostics.push(Diagnostic::MissingTranslation { key });
            }
        }
    }

    for (span, key) in dom::elements_with_attr(html, "data-i18n-placeholder") {
        match resolve_text(language, &key) {
            Some(text) => {
                let open = span.open_tag(html);
                edits.push(Edit {
                    start: span.open_start,
                    end: span.open_end,
                    replacement: dom::set_attr(open, "placeholder", text),
                });
            }
            None => {
                log::warn!("missing placeholder translation key '{key}'");
                diagnostics.push(Diagnostic::MissingTranslation { key });
            }
        }
    }

    (dom::apply_edits(html, edits), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn present_key_replaces_element_text() {
        let lang = json!({ "hero": { "title": "Hello" } });
        let html = r#"<h1 data-i18n="hero.title">placeholder text</h1>"#;
        let (out, diags) = apply(html, &lang);
        assert_eq!(out, r#"<h1 data-i18n="hero.title">Hello</h1>"#);
        assert!(diags.is_empty());
    }

    #[test]
    fn missing_key_leaves_text_and_records_one_diagnostic() {
        let lang = json!({ "hero": {} });
        let html = r#"<h1 data-i18n="hero.title">existing</h1>"#;
        let (out, diags) = apply(html, &lang);
        assert_eq!(out, html);
        assert_eq!(
            diags,
            vec![Diagnostic::MissingTranslation {
                key: "hero.title".to_string()
            }]
        );
    }

    #[test]
    fn non_string_value_counts_as_missing() {
        let lang = json!({ "hero": { "title": { "nested": "no" } } });
        let html = r#"<h1 data-i18n="hero.title">existing</h1>"#;
        let (out, diags) = apply(html, &lang);
        assert_eq!(out, html);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn trusted_markup_inserted_raw() {
        let lang = json!({ "hero": { "title": r#"I build <span class="neon">things</span>"# } });
        let html = r#"<h1 data-i18n="hero.title">x</h1>"#;
        let (out, _) = apply(html, &lang);
        assert!(out.contains(r#"<span class="neon">things</span>"#));
    }

    #[test]
    fn placeholder_pass_sets_attribute() {
        let lang = json!({ "form": { "name": "Your name" } });
        let html = r#"<input data-i18n-placeholder="form.name" placeholder="old">"#;
        let (out, diags) = apply(html, &lang);
        assert!(out.contains(r#"placeholder="Your name""#));
        assert!(!out.contains(r#"placeholder="old""#));
        assert!(diags.is_empty());
    }

    #[test]
    fn placeholder_added_when_absent_from_tag() {
        let lang = json!({ "form": { "email": "Your email" } });
        let html = r#"<input type="email" data-i18n-placeholder="form.email">"#;
        let (out, _) = apply(html, &lang);
        assert!(out.contains(r#"placeholder="Your email""#));
    }

    #[test]
    fn multiple_elements_translated_in_one_pass() {
        let lang = json!({ "nav": { "home": "Home", "about": "About" } });
        let html = concat!(
            r#"<a data-i18n="nav.home">h</a>"#,
            r#"<a data-i18n="nav.about">a</a>"#,
        );
        let (out, diags) = apply(html, &lang);
        assert!(out.contains(">Home<"));
        assert!(out.contains(">About<"));
        assert!(diags.is_empty());
    }

    #[test]
    fn resolve_descends_one_property_per_segment() {
        let lang = json!({ "a": { "b": { "c": "deep" } } });
        assert_eq!(resolve(&lang, "a.b.c").and_then(Value::as_str), Some("deep"));
        assert_eq!(resolve(&lang, "a.b.missing"), None);
        assert_eq!(resolve(&lang, "a.missing.c"), None);
    }
}
