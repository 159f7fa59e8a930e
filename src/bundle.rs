//! Content bundle loading and data model.
//!
//! The bundle is a single JSON document mapping language codes to the full
//! content of the page in that language:
//!
//! ```text
//! {
//!   "en": {
//!     "meta":         { "title": "...", "description": "...", ... },
//!     "contact":      { "email": "...", "whatsapp_number": "...", ... },
//!     "skills":       { "categories": [ { "title": "...", "items": [...] } ] },
//!     "services":     { "items": [ { "title": "...", "description": "..." } ] },
//!     "experience":   { "items": [ { "role": "...", "duties": [...] } ] },
//!     "certificates": { "categories": [ { "items": [ { "id": "...", ... } ] } ] },
//!     "projects":     { "items": [ { "id": "...", "link": "...", ... } ] },
//!     "serviceModal": { "paymentOptions": [...], "timeframeOptions": [...] },
//!     "codeRainSnippets": [ "..." ],
//!     "heroCodeSnippets": [ "..." ],
//!     "hero": { "title": "..." },          // free-form translation strings
//!     ...
//!   },
//!   "de": { ... }
//! }
//! ```
//!
//! Structured sections deserialize into the typed model below. Everything
//! else in a language sub-tree — section headings, nav labels, the `hero.*`
//! strings — stays in the raw [`serde_json::Value`], which is what the
//! translation pass resolves dotted keys against. Both views are kept per
//! language so no content is lost to the typed model.
//!
//! The bundle is loaded exactly once per build and never mutated. Field
//! names are a wire contract: `data-i18n` keys in the shell resolve against
//! them segment by segment.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bundle root must be a JSON object keyed by language code")]
    NotAnObject,
    #[error("bundle contains no languages")]
    Empty,
    #[error("language '{requested}' not in bundle (available: {})", available.join(", "))]
    UnknownLanguage {
        requested: String,
        available: Vec<String>,
    },
}

/// The full multi-language content document, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    languages: BTreeMap<String, LanguageEntry>,
}

#[derive(Debug, Clone)]
struct LanguageEntry {
    content: LanguageContent,
    raw: Value,
}

/// A borrowed view of one language's content: the typed model plus the raw
/// JSON sub-tree for dotted-path translation lookups.
#[derive(Debug, Clone, Copy)]
pub struct LanguageSlice<'a> {
    pub code: &'a str,
    pub content: &'a LanguageContent,
    pub raw: &'a Value,
}

impl ContentBundle {
    /// Read and parse a bundle file.
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a bundle from JSON text.
    pub fn from_json(text: &str) -> Result<Self, BundleError> {
        let doc: Value = serde_json::from_str(text)?;
        let Value::Object(map) = doc else {
            return Err(BundleError::NotAnObject);
        };
        if map.is_empty() {
            return Err(BundleError::Empty);
        }

        let mut languages = BTreeMap::new();
        for (code, raw) in map {
            let content: LanguageContent = serde_json::from_value(raw.clone())?;
            languages.insert(code, LanguageEntry { content, raw });
        }
        Ok(Self { languages })
    }

    /// Language codes present in the bundle, sorted.
    pub fn codes(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// Select one language sub-tree.
    ///
    /// There is no fallback order: a code absent from the bundle is a
    /// configuration error and is reported as such.
    pub fn language(&self, code: &str) -> Result<LanguageSlice<'_>, BundleError> {
        match self.languages.get_key_value(code) {
            Some((key, entry)) => Ok(LanguageSlice {
                code: key,
                content: &entry.content,
                raw: &entry.raw,
            }),
            None => Err(BundleError::UnknownLanguage {
                requested: code.to_string(),
                available: self.codes().iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// All language slices in code order.
    pub fn slices(&self) -> impl Iterator<Item = LanguageSlice<'_>> {
        self.languages.iter().map(|(code, entry)| LanguageSlice {
            code,
            content: &entry.content,
            raw: &entry.raw,
        })
    }
}

/// One language's structured content.
///
/// Every field defaults so a sparse bundle still renders: absent sections
/// become empty lists and render as empty containers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageContent {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub services: Services,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub certificates: Certificates,
    #[serde(default)]
    pub projects: Projects,
    #[serde(default, rename = "serviceModal")]
    pub service_modal: ServiceModal,
    #[serde(default)]
    pub about: About,
    #[serde(default, rename = "codeRainSnippets")]
    pub code_rain_snippets: Vec<String>,
    #[serde(default, rename = "heroCodeSnippets")]
    pub hero_code_snippets: Vec<String>,
}

/// Head metadata: document title plus the description/keywords/author and
/// social-preview tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub author: String,
}

/// Contact details for the about card and the social-link row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    /// Full WhatsApp deep-link URL.
    #[serde(default)]
    pub whatsapp: String,
    /// Digits-only number with a two-digit country code prefix, used for the
    /// `wa.me` deep link.
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
}

impl Contact {
    /// The WhatsApp number as displayed: country code stripped.
    pub fn local_number(&self) -> &str {
        self.whatsapp_number.get(2..).unwrap_or("")
    }
}

/// Skill categories in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCategory {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Icon image path, relative to the site root.
    #[serde(default)]
    pub icon: String,
    /// Proficiency 0–100. Values above 100 are clamped at render time.
    #[serde(default)]
    pub level: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Services {
    #[serde(default)]
    pub items: Vec<Service>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub items: Vec<ExperienceItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    /// Bullet points; an empty list omits the duties block entirely.
    #[serde(default)]
    pub duties: Vec<String>,
}

/// Certificate categories in display order. Detail lookups flatten the
/// nested items into an id-keyed index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certificates {
    #[serde(default)]
    pub categories: Vec<CertificateCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateCategory {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Certificate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certificate {
    /// Unique within the collection; duplicate ids resolve last-write-wins.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projects {
    #[serde(default)]
    pub items: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Unique within the collection; duplicate ids resolve last-write-wins.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    /// Tech-stack summary; omitted from the detail view when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

/// Strings and option lists for the service-request modal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceModal {
    /// Payment options; the first entry is the placeholder option.
    #[serde(default)]
    pub payment_options: Vec<String>,
    /// Timeframe options; the first entry is the placeholder option.
    #[serde(default)]
    pub timeframe_options: Vec<String>,
    /// Template with `{fileName}` and `{fileSize}` placeholders.
    #[serde(default)]
    pub file_info: String,
    #[serde(default)]
    pub no_file: String,
    #[serde(default)]
    pub validation_error: String,
    #[serde(default)]
    pub success_message: String,
}

/// Optional about blurb, rendered from markdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct About {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
