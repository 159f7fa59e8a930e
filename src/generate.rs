//! Site generation.
//!
//! The pipeline, per language: select the language slice, build the
//! [`ContentContext`] (lookup tables), run every section renderer, inject
//! the results into the shell, populate the head, then run the
//! translation pass over the assembled document. Stage order matters:
//! injection happens before translation so tagged elements inside
//! rendered sections are localized with everything else, and the detail
//! data blob is embedded before anything client-side could want it.
//!
//! Every language renders in memory before a single file is written, so a
//! failed build never leaves a partially generated site. A bundle that
//! cannot be loaded (or a configured language missing from it) writes the
//! fixed error page as the entire output page and fails the build — the
//! published page shows only the error, never a partial render.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Configured root language
//! ├── de/
//! │   └── index.html             # Every other language in the bundle
//! ├── style.css                  # Theme variables + embedded stylesheet
//! ├── app.js                     # Interaction script
//! └── assets/...                 # Copied from --assets, if given
//! ```

use crate::bundle::{BundleError, ContentBundle, LanguageSlice};
use crate::config::{self, SiteConfig};
use crate::index::ContentContext;
use crate::render;
use crate::shell::Shell;
use crate::translate;
use crate::types::{BuildReport, PageReport, SectionReport};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/app.js");

/// Inputs for one build, resolved from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions<'a> {
    pub bundle_path: &'a Path,
    /// Custom host document; `None` uses the embedded shell.
    pub shell_path: Option<&'a Path>,
    pub output_dir: &'a Path,
    /// Static asset directory copied into the output, if given.
    pub assets_dir: Option<&'a Path>,
    /// Root-language override for `folio.toml`'s `language`.
    pub language: Option<&'a str>,
}

struct RenderedPage {
    html: String,
    report: PageReport,
}

/// Run the full pipeline and write the site.
pub fn build(opts: &BuildOptions<'_>, site: &SiteConfig) -> Result<BuildReport, GenerateError> {
    let shell = load_shell(opts.shell_path)?;
    let root_lang = opts.language.unwrap_or(&site.language);

    let (bundle, stamp) = match load_bundle(opts.bundle_path) {
        Ok(loaded) => loaded,
        Err(err) => {
            write_error_page(opts.output_dir).ok();
            return Err(err.into());
        }
    };
    let pages = match render_all(&bundle, root_lang, &shell, &stamp) {
        Ok(pages) => pages,
        Err(err) => {
            write_error_page(opts.output_dir).ok();
            return Err(err.into());
        }
    };

    fs::create_dir_all(opts.output_dir)?;

    let color_css = config::generate_color_css(&site.colors);
    fs::write(
        opts.output_dir.join("style.css"),
        format!("{color_css}\n\n{CSS_STATIC}"),
    )?;
    fs::write(opts.output_dir.join("app.js"), JS)?;

    for page in &pages {
        let path = opts.output_dir.join(&page.report.output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
    }

    let assets_copied = match opts.assets_dir {
        Some(assets) => copy_assets(assets, opts.output_dir)?,
        None => 0,
    };

    Ok(BuildReport {
        stamp,
        pages: pages.into_iter().map(|p| p.report).collect(),
        assets_copied,
    })
}

/// Load and render everything without writing: the `check` command.
pub fn check(opts: &BuildOptions<'_>, site: &SiteConfig) -> Result<BuildReport, GenerateError> {
    let shell = load_shell(opts.shell_path)?;
    let root_lang = opts.language.unwrap_or(&site.language);
    let (bundle, stamp) = load_bundle(opts.bundle_path)?;
    let pages = render_all(&bundle, root_lang, &shell, &stamp)?;
    Ok(BuildReport {
        stamp,
        pages: pages.into_iter().map(|p| p.report).collect(),
        assets_copied: 0,
    })
}

fn load_shell(path: Option<&Path>) -> Result<Shell, std::io::Error> {
    match path {
        Some(path) => Shell::from_path(path),
        None => Ok(Shell::embedded()),
    }
}

fn load_bundle(path: &Path) -> Result<(ContentBundle, String), BundleError> {
    let text = fs::read_to_string(path)?;
    let bundle = ContentBundle::from_json(&text)?;
    Ok((bundle, content_stamp(&text)))
}

/// Short content hash of the bundle, stamped into the generator meta tag
/// so deploys are distinguishable.
fn content_stamp(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest
        .iter()
        .take(6)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Render every language, configured root language first at `index.html`.
///
/// Fails up front if the root language is absent from the bundle — that is
/// a configuration error, not something to guess a fallback for.
fn render_all(
    bundle: &ContentBundle,
    root_lang: &str,
    shell: &Shell,
    stamp: &str,
) -> Result<Vec<RenderedPage>, BundleError> {
    bundle.language(root_lang)?;

    let mut pages = Vec::new();
    for slice in bundle.slices() {
        let output_path = if slice.code == root_lang {
            "index.html".to_string()
        } else {
            format!("{}/index.html", slice.code)
        };
        pages.push(render_page(slice, shell, stamp, output_path));
    }
    // Root language first, the rest in code order
    pages.sort_by_key(|p| p.report.output_path != "index.html");
    Ok(pages)
}

fn render_page(
    slice: LanguageSlice<'_>,
    shell: &Shell,
    stamp: &str,
    output_path: String,
) -> RenderedPage {
    let ctx = ContentContext::new(slice);
    let content = slice.content;
    let mut shell = shell.clone();

    shell.set_container("skills-container", render::skills(&content.skills));
    shell.set_container("services-grid", render::services(&content.services));
    shell.set_container("experience-container", render::experience(&content.experience));
    shell.set_container(
        "certificates-container",
        render::certificates(&content.certificates),
    );
    shell.set_container("projects-list", render::projects(&content.projects));
    shell.set_container(
        "payment-options",
        render::select_options(&content.service_modal.payment_options),
    );
    shell.set_container(
        "timeframe-options",
        render::select_options(&content.service_modal.timeframe_options),
    );
    shell.set_container("contact-info", render::contact_info(&content.contact));
    shell.set_container("social-links", render::social_links(&content.contact));
    shell.set_container(
        "code-backdrop",
        render::code_backdrop(&content.hero_code_snippets),
    );
    if let Some(body) = &content.about.body {
        shell.set_container("about-content", render::about_body(body));
    }
    shell.set_container("portfolio-data", render::detail_data(&ctx));

    let meta = &content.meta;
    if !meta.title.is_empty() {
        shell.set_title(&meta.title);
        shell.set_meta_property("og:title", &meta.title);
        shell.set_meta_property("twitter:title", &meta.title);
    }
    if !meta.description.is_empty() {
        shell.set_meta_name("description", &meta.description);
        shell.set_meta_property("og:description", &meta.description);
        shell.set_meta_property("twitter:description", &meta.description);
    }
    if !meta.keywords.is_empty() {
        shell.set_meta_name("keywords", &meta.keywords);
    }
    if !meta.author.is_empty() {
        shell.set_meta_name("author", &meta.author);
    }
    shell.set_meta_name("generator", &format!("neonfolio {stamp}"));

    let (html, shell_diags) = shell.render();
    let (html, i18n_diags) = translate::apply(&html, slice.raw);

    let mut diagnostics = ctx.duplicate_diagnostics().to_vec();
    diagnostics.extend(shell_diags);
    diagnostics.extend(i18n_diags);

    let sections = vec![
        SectionReport {
            name: "skills",
            items: content
                .skills
                .categories
                .iter()
                .map(|c| c.items.len())
                .sum(),
        },
        SectionReport {
            name: "services",
            items: content.services.items.len(),
        },
        SectionReport {
            name: "experience",
            items: content.experience.items.len(),
        },
        SectionReport {
            name: "certificates",
            items: content
                .certificates
                .categories
                .iter()
                .map(|c| c.items.len())
                .sum(),
        },
        SectionReport {
            name: "projects",
            items: content.projects.items.len(),
        },
    ];

    RenderedPage {
        html,
        report: PageReport {
            language: slice.code.to_string(),
            output_path,
            sections,
            diagnostics,
        },
    }
}

/// Replace the output page with the fixed load-error document.
fn write_error_page(output_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(output_dir)?;
    fs::write(
        output_dir.join("index.html"),
        render::error_page(render::LOAD_ERROR_MESSAGE).into_string(),
    )
}

fn copy_assets(src: &Path, dst: &Path) -> Result<usize, std::io::Error> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir entries live under the walk root");
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{find_page, sample_bundle, sample_bundle_json, section_items};
    use tempfile::TempDir;

    fn write_bundle(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("data.json");
        fs::write(&path, sample_bundle_json()).unwrap();
        path
    }

    #[test]
    fn build_writes_page_stylesheet_and_script() {
        let dir = TempDir::new().unwrap();
        let bundle_path = write_bundle(&dir);
        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &bundle_path,
            shell_path: None,
            output_dir: &out,
            assets_dir: None,
            language: None,
        };
        let report = build(&opts, &SiteConfig::default()).unwrap();

        assert!(out.join("index.html").exists());
        assert!(out.join("style.css").exists());
        assert!(out.join("app.js").exists());
        assert_eq!(report.stamp.len(), 12);
    }

    #[test]
    fn secondary_languages_land_in_subdirectories() {
        let dir = TempDir::new().unwrap();
        let bundle_path = write_bundle(&dir);
        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &bundle_path,
            shell_path: None,
            output_dir: &out,
            assets_dir: None,
            language: None,
        };
        let report = build(&opts, &SiteConfig::default()).unwrap();
        assert!(out.join("de/index.html").exists());
        assert_eq!(report.pages[0].output_path, "index.html");
        assert_eq!(report.pages[0].language, "en");
        assert_eq!(find_page(&report, "de").output_path, "de/index.html");
    }

    #[test]
    fn section_counts_match_the_bundle() {
        let dir = TempDir::new().unwrap();
        let bundle_path = write_bundle(&dir);
        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &bundle_path,
            shell_path: None,
            output_dir: &out,
            assets_dir: None,
            language: None,
        };
        let report = check(&opts, &SiteConfig::default()).unwrap();

        let bundle = sample_bundle();
        let en = bundle.language("en").unwrap();
        let skills: usize = en
            .content
            .skills
            .categories
            .iter()
            .map(|c| c.items.len())
            .sum();

        let page = find_page(&report, "en");
        assert_eq!(section_items(page, "skills"), skills);
        assert_eq!(
            section_items(page, "projects"),
            en.content.projects.items.len()
        );
    }

    #[test]
    fn missing_bundle_writes_error_page_and_fails() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &dir.path().join("missing.json"),
            shell_path: None,
            output_dir: &out,
            assets_dir: None,
            language: None,
        };
        let result = build(&opts, &SiteConfig::default());
        assert!(result.is_err());

        let page = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(page.contains(render::LOAD_ERROR_MESSAGE));
        assert!(!page.contains("skills-container"));
    }

    #[test]
    fn unknown_root_language_writes_error_page_and_fails() {
        let dir = TempDir::new().unwrap();
        let bundle_path = write_bundle(&dir);
        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &bundle_path,
            shell_path: None,
            output_dir: &out,
            assets_dir: None,
            language: Some("fr"),
        };
        let result = build(&opts, &SiteConfig::default());
        assert!(matches!(
            result,
            Err(GenerateError::Bundle(BundleError::UnknownLanguage { .. }))
        ));
        let page = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(page.contains(render::LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn check_renders_without_writing() {
        let dir = TempDir::new().unwrap();
        let bundle_path = write_bundle(&dir);
        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &bundle_path,
            shell_path: None,
            output_dir: &out,
            assets_dir: None,
            language: None,
        };
        let report = check(&opts, &SiteConfig::default()).unwrap();
        assert!(!report.pages.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn assets_copied_recursively() {
        let dir = TempDir::new().unwrap();
        let bundle_path = write_bundle(&dir);
        let assets = dir.path().join("assets");
        fs::create_dir_all(assets.join("icons")).unwrap();
        fs::write(assets.join("icons/rust.svg"), "<svg/>").unwrap();
        fs::write(assets.join("cv.png"), "png").unwrap();

        let out = dir.path().join("dist");
        let opts = BuildOptions {
            bundle_path: &bundle_path,
            shell_path: None,
            output_dir: &out,
            assets_dir: Some(&assets),
            language: None,
        };
        let report = build(&opts, &SiteConfig::default()).unwrap();
        assert_eq!(report.assets_copied, 2);
        assert!(out.join("icons/rust.svg").exists());
        assert!(out.join("cv.png").exists());
    }

    #[test]
    fn stamp_is_stable_for_identical_content() {
        assert_eq!(content_stamp("abc"), content_stamp("abc"));
        assert_ne!(content_stamp("abc"), content_stamp("abd"));
    }
}
