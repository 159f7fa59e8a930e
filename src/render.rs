//! Section renderers.
//!
//! One pure function per page section: a slice of the content bundle in,
//! [`Markup`] out. The shell injects each result into its named container,
//! always replacing the container's pristine content, so rendering is
//! idempotent by construction.
//!
//! Conventions shared by all renderers:
//!
//! - source order is display order — nothing here sorts;
//! - cards that open a detail view embed their record id as a
//!   `data-certificate` / `data-project` attribute, which the interaction
//!   script resolves through the embedded detail data;
//! - per-item `--animation-order` style hints drive the staggered-reveal
//!   CSS (cosmetic only);
//! - empty lists produce empty markup, and absent optional fields omit
//!   their sub-element;
//! - static button labels carry `data-i18n` tags so the translation pass
//!   (which runs after injection) localizes them with everything else.
//!
//! All interpolation is Maud-escaped. The only raw insertions are the
//! markdown-rendered about blurb and the JSON detail blob, both built here
//! from developer-controlled content.

use crate::bundle::{
    Certificate, Certificates, Contact, Experience, Project, Projects, ServiceModal,
    Services, Skills,
};
use crate::index::ContentContext;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whole-page replacement text for a failed bundle load.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading portfolio data.";

/// Skill categories with progress bars.
pub fn skills(skills: &Skills) -> Markup {
    html! {
        @for category in &skills.categories {
            div.skills-category {
                h3.category-title { (category.title) }
                div.skills-grid {
                    @for item in &category.items {
                        @let level = item.level.min(100);
                        div.skill-item data-skill=(item.name) {
                            div.skill-icon {
                                img src=(item.icon) alt={ (item.name) " logo" } loading="lazy";
                            }
                            div.skill-info {
                                h4 { (item.name) }
                                div.skill-bar {
                                    div.skill-progress data-level=(level) {}
                                }
                                span.skill-percentage { (level) "%" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Service cards with a request button per card.
pub fn services(services: &Services) -> Markup {
    html! {
        @for service in &services.items {
            div.service-card data-service-title=(service.title) {
                h3.service-title { (service.title) }
                p.service-description { (service.description) }
                button.request-button type="button" data-i18n="services.requestButton" {
                    "Request Service"
                }
            }
        }
    }
}

/// Experience timeline. An item without duties omits the content block.
pub fn experience(experience: &Experience) -> Markup {
    html! {
        @for item in &experience.items {
            div.experience-item {
                div.experience-header {
                    div.experience-company {
                        h3 { (item.role) }
                        @if !item.company.is_empty() {
                            h4 { (item.company) }
                        }
                    }
                    @if !item.period.is_empty() {
                        div.experience-period {
                            span.period { (item.period) }
                        }
                    }
                }
                @if !item.duties.is_empty() {
                    div.experience-content {
                        ul {
                            @for duty in &item.duties {
                                li { (duty) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Certificate cards grouped by category.
pub fn certificates(certificates: &Certificates) -> Markup {
    html! {
        @for category in &certificates.categories {
            div.certificate-category {
                h3 { (category.title) }
                div.certificates-list {
                    @for (idx, item) in category.items.iter().enumerate() {
                        div.certificate-card data-certificate=(item.id) {
                            img src=(item.image) alt={ (item.title) " certificate" }
                                loading="lazy" width="350" height="220";
                            div.certificate-title { (item.title) }
                            button.read-more-btn type="button"
                                style=(animation_order(idx))
                                data-i18n="certificates.readMore" {
                                "Read More"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Project cards with an external link each.
pub fn projects(projects: &Projects) -> Markup {
    html! {
        @for (idx, item) in projects.items.iter().enumerate() {
            div.project-card data-project=(item.id) {
                div.project-title { (item.title) }
                @if !item.link.is_empty() {
                    div.project-link {
                        a href=(item.link) target="_blank" rel="noopener noreferrer" {
                            (display_url(&item.link))
                        }
                    }
                }
                button.read-more-btn type="button"
                    style=(animation_order(idx))
                    data-i18n="projects.readMore" {
                    "Read More"
                }
            }
        }
    }
}

/// Options for a service-modal select. The first entry is the placeholder
/// and always carries an empty value.
pub fn select_options(options: &[String]) -> Markup {
    html! {
        @for (idx, label) in options.iter().enumerate() {
            @if idx == 0 {
                option value="" { (label) }
            } @else {
                option value=(label) { (label) }
            }
        }
    }
}

/// Contact rows for the about card. Label texts are translation-tagged.
pub fn contact_info(contact: &Contact) -> Markup {
    html! {
        ul.info-list {
            li {
                span.info-label data-i18n="about.emailLabel" { "Email" }
                a.info-value href={ "mailto:" (contact.email) } { (contact.email) }
            }
            @if !contact.phone.is_empty() {
                li {
                    span.info-label data-i18n="about.phoneLabel" { "Phone" }
                    span.info-value { (contact.phone) }
                }
            }
            @if !contact.linkedin.is_empty() {
                li {
                    span.info-label data-i18n="about.linkedinLabel" { "LinkedIn" }
                    a.info-value href=(contact.linkedin) target="_blank" rel="noopener" {
                        (display_url(&contact.linkedin))
                    }
                }
            }
            @if !contact.whatsapp.is_empty() {
                li {
                    span.info-label data-i18n="about.whatsappLabel" { "WhatsApp" }
                    a.info-value href=(contact.whatsapp) target="_blank" rel="noopener" {
                        (contact.local_number())
                    }
                }
            }
            @if !contact.address1.is_empty() {
                li { span.info-value { (contact.address1) } }
            }
            @if !contact.address2.is_empty() {
                li { span.info-value { (contact.address2) } }
            }
        }
    }
}

/// Social link row for the footer and hero.
pub fn social_links(contact: &Contact) -> Markup {
    html! {
        @if !contact.github.is_empty() {
            a.social-icon href=(contact.github) target="_blank" rel="noopener" aria-label="GitHub" {
                span { "GitHub" }
            }
        }
        @if !contact.linkedin.is_empty() {
            a.social-icon href=(contact.linkedin) target="_blank" rel="noopener" aria-label="LinkedIn" {
                span { "LinkedIn" }
            }
        }
        @if !contact.whatsapp.is_empty() {
            a.social-icon href=(contact.whatsapp) target="_blank" rel="noopener" aria-label="WhatsApp" {
                span { "WhatsApp" }
            }
        }
        @if !contact.email.is_empty() {
            a.social-icon href={ "mailto:" (contact.email) } aria-label="Email" {
                span { "Email" }
            }
        }
        @if !contact.phone.is_empty() {
            a.social-icon href={ "tel:" (contact.phone) } aria-label="Phone" {
                span { "Phone" }
            }
        }
    }
}

/// Layered code backdrop behind the hero. Layer speed and opacity step with
/// the layer index so output is reproducible build to build.
pub fn code_backdrop(snippets: &[String]) -> Markup {
    let layers: Vec<(String, String)> = (0..3usize)
        .filter_map(|layer| {
            let group: Vec<&str> = snippets
                .iter()
                .skip(layer * 3)
                .take(3)
                .map(String::as_str)
                .collect();
            if group.is_empty() {
                return None;
            }
            let style = format!(
                "animation-duration:{}s;opacity:{:.2};top:{}%;",
                10 + layer * 4,
                0.18 + 0.08 * layer as f64,
                layer * 13 % 40
            );
            Some((style, group.join("\n\n")))
        })
        .collect();

    html! {
        @for (style, text) in &layers {
            div.code-lines style=(style) { (text) }
        }
    }
}

/// Markdown about blurb rendered to HTML.
pub fn about_body(markdown: &str) -> Markup {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

/// Everything the interaction script needs, serialized for the embedded
/// `application/json` block: the two id-keyed detail maps, the modal
/// strings, the WhatsApp number, and the rain snippets.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailData<'a> {
    certificates: &'a BTreeMap<&'a str, &'a Certificate>,
    projects: &'a BTreeMap<&'a str, &'a Project>,
    service_modal: &'a ServiceModal,
    whatsapp_number: &'a str,
    code_rain_snippets: &'a [String],
}

pub fn detail_data(ctx: &ContentContext<'_>) -> Markup {
    let content = ctx.slice.content;
    let data = DetailData {
        certificates: ctx.certificates(),
        projects: ctx.projects(),
        service_modal: &content.service_modal,
        whatsapp_number: &content.contact.whatsapp_number,
        code_rain_snippets: &content.code_rain_snippets,
    };
    let json = serde_json::to_string(&data).expect("detail data must serialize");
    // "</" would terminate the surrounding script element early
    PreEscaped(json.replace("</", "<\\/"))
}

/// The whole-page document written when the bundle cannot be loaded.
pub fn error_page(message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Portfolio" }
            }
            body.load-error {
                h1 { (message) }
            }
        }
    }
}

fn animation_order(idx: usize) -> String {
    format!("--animation-order: {idx};")
}

/// Strip scheme and leading `www.` for link display text.
fn display_url(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_prefix("www.").unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{
        CertificateCategory, ExperienceItem, Service, Skill, SkillCategory,
    };

    fn sample_skills() -> Skills {
        Skills {
            categories: vec![SkillCategory {
                title: "Languages".to_string(),
                items: vec![Skill {
                    name: "Rust".to_string(),
                    icon: "icons/rust.svg".to_string(),
                    level: 90,
                }],
            }],
        }
    }

    #[test]
    fn skills_render_name_icon_and_level() {
        let html = skills(&sample_skills()).into_string();
        assert!(html.contains("Rust"));
        assert!(html.contains("icons/rust.svg"));
        assert!(html.contains(r#"data-level="90""#));
        assert!(html.contains("90%"));
    }

    #[test]
    fn skills_level_clamped_to_100() {
        let mut data = sample_skills();
        data.categories[0].items[0].level = 250;
        let html = skills(&data).into_string();
        assert!(html.contains(r#"data-level="100""#));
        assert!(!html.contains("250"));
    }

    #[test]
    fn empty_skills_render_nothing() {
        assert_eq!(skills(&Skills::default()).into_string(), "");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let data = sample_skills();
        assert_eq!(skills(&data).into_string(), skills(&data).into_string());
    }

    #[test]
    fn services_embed_title_attribute() {
        let data = Services {
            items: vec![Service {
                title: "Web Development".to_string(),
                description: "Sites".to_string(),
            }],
        };
        let html = services(&data).into_string();
        assert!(html.contains(r#"data-service-title="Web Development""#));
        assert!(html.contains("request-button"));
    }

    #[test]
    fn experience_omits_empty_duties_block() {
        let data = Experience {
            items: vec![ExperienceItem {
                role: "Developer".to_string(),
                company: "Acme".to_string(),
                period: "2024".to_string(),
                duties: vec![],
            }],
        };
        let html = experience(&data).into_string();
        assert!(html.contains("Developer"));
        assert!(!html.contains("experience-content"));
    }

    #[test]
    fn experience_lists_duties_in_order() {
        let data = Experience {
            items: vec![ExperienceItem {
                role: "Developer".to_string(),
                company: String::new(),
                period: String::new(),
                duties: vec!["first".to_string(), "second".to_string()],
            }],
        };
        let html = experience(&data).into_string();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn certificates_embed_id_and_animation_order() {
        let data = Certificates {
            categories: vec![CertificateCategory {
                title: "Cloud".to_string(),
                items: vec![
                    Certificate {
                        id: "c1".to_string(),
                        title: "First".to_string(),
                        image: "c1.png".to_string(),
                        description: "D".to_string(),
                    },
                    Certificate {
                        id: "c2".to_string(),
                        title: "Second".to_string(),
                        image: "c2.png".to_string(),
                        description: "D".to_string(),
                    },
                ],
            }],
        };
        let html = certificates(&data).into_string();
        assert!(html.contains(r#"data-certificate="c1""#));
        assert!(html.contains(r#"data-certificate="c2""#));
        assert!(html.contains("--animation-order: 0;"));
        assert!(html.contains("--animation-order: 1;"));
    }

    #[test]
    fn projects_strip_scheme_in_link_text() {
        let data = Projects {
            items: vec![Project {
                id: "p1".to_string(),
                title: "Folio".to_string(),
                link: "https://www.folio.dev".to_string(),
                description: "D".to_string(),
                tech: None,
            }],
        };
        let html = projects(&data).into_string();
        assert!(html.contains(r#"href="https://www.folio.dev""#));
        assert!(html.contains(">folio.dev<"));
    }

    #[test]
    fn project_without_link_omits_link_block() {
        let data = Projects {
            items: vec![Project {
                id: "p1".to_string(),
                title: "Folio".to_string(),
                link: String::new(),
                description: "D".to_string(),
                tech: None,
            }],
        };
        let html = projects(&data).into_string();
        assert!(!html.contains("project-link"));
    }

    #[test]
    fn first_select_option_gets_empty_value() {
        let options = vec![
            "Select an option".to_string(),
            "PayPal".to_string(),
            "Bank".to_string(),
        ];
        let html = select_options(&options).into_string();
        assert!(html.contains(r#"<option value="">Select an option</option>"#));
        assert!(html.contains(r#"<option value="PayPal">PayPal</option>"#));
    }

    #[test]
    fn empty_options_render_nothing() {
        assert_eq!(select_options(&[]).into_string(), "");
    }

    #[test]
    fn contact_info_builds_mailto_and_local_number() {
        let contact = Contact {
            email: "dev@example.com".to_string(),
            whatsapp: "https://wa.me/201234567890".to_string(),
            whatsapp_number: "201234567890".to_string(),
            ..Contact::default()
        };
        let html = contact_info(&contact).into_string();
        assert!(html.contains(r#"href="mailto:dev@example.com""#));
        assert!(html.contains(">1234567890<"));
    }

    #[test]
    fn code_backdrop_layers_step_deterministically() {
        let snippets: Vec<String> = (0..9).map(|i| format!("line {i}")).collect();
        let html = code_backdrop(&snippets).into_string();
        assert!(html.contains("animation-duration:10s"));
        assert!(html.contains("animation-duration:14s"));
        assert!(html.contains("animation-duration:18s"));
        assert_eq!(html, code_backdrop(&snippets).into_string());
    }

    #[test]
    fn code_backdrop_empty_snippets_render_nothing() {
        assert_eq!(code_backdrop(&[]).into_string(), "");
    }

    #[test]
    fn about_body_converts_markdown() {
        let html = about_body("This is **bold**.").into_string();
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn markup_is_escaped() {
        let data = Services {
            items: vec![Service {
                title: "<script>alert('xss')</script>".to_string(),
                description: String::new(),
            }],
        };
        let html = services(&data).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_page_is_a_complete_document() {
        let html = error_page(LOAD_ERROR_MESSAGE).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn detail_data_escapes_script_terminator() {
        use crate::bundle::ContentBundle;
        use crate::index::ContentContext;

        let bundle = ContentBundle::from_json(
            r#"{ "en": { "projects": { "items": [
                { "id": "p1", "title": "X", "link": "", "description": "see </script> tag", "tech": "Rust" }
            ] } } }"#,
        )
        .unwrap();
        let ctx = ContentContext::new(bundle.language("en").unwrap());
        let json = detail_data(&ctx).into_string();
        assert!(!json.contains("</script>"));
        assert!(json.contains(r#"<\/script>"#));
        assert!(json.contains(r#""tech":"Rust""#));
    }
}
