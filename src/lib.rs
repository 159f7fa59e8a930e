//! # neonfolio
//!
//! A minimal static site generator for single-page developer portfolios.
//! A JSON content bundle is the data source: language codes map to the
//! page's sections (skills, services, experience, certificates, projects),
//! contact details, and free-form translation strings. One build produces
//! the finished page per language, ready to drop on any file server.
//!
//! # Architecture: One Pipeline Per Language
//!
//! Every page is produced by the same strictly ordered pipeline:
//!
//! ```text
//! 1. Load       data.json     →  ContentBundle      (typed + raw views)
//! 2. Index      bundle slice  →  ContentContext     (id → record tables)
//! 3. Render     sections      →  Markup per section
//! 4. Inject     shell         →  assembled document (containers replaced)
//! 5. Translate  data-i18n     →  localized document
//! 6. Write      dist/         →  index.html, <lang>/index.html, assets
//! ```
//!
//! The ordering is load-bearing: injection must precede translation so
//! tagged elements inside freshly rendered sections are localized with the
//! rest of the page, and everything renders in memory before stage 6 so a
//! failed build never leaves a partially written site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bundle`] | Content bundle data model, one-shot load, explicit language selection |
//! | [`index`] | Id-keyed lookup tables and the content context threaded through the pipeline |
//! | [`render`] | Section renderers — pure data-to-Maud functions, one per page section |
//! | [`shell`] | The host document: container injection, head population, repeatable render |
//! | [`dom`] | Minimal element scanning the shell and translator share |
//! | [`translate`] | `data-i18n` dotted-path substitution with non-fatal diagnostics |
//! | [`generate`] | Pipeline orchestration, error page, asset copying, build stamp |
//! | [`config`] | `folio.toml` loading, validation, merging, and theme CSS generation |
//! | [`output`] | CLI output formatting — page summaries for build and check |
//! | [`types`] | Shared report and diagnostic types |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! Section markup is generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro system, rather than Handlebars or Tera.
//! Malformed markup is a build error, template variables are Rust
//! expressions, and all interpolation is auto-escaped.
//!
//! ## A Shell Document Instead of Whole-Page Templates
//!
//! The page skeleton — navbar, section headings, modals, form — lives in
//! one host document with named, empty containers. Renderers never see
//! the skeleton; they produce fragments, and [`shell::Shell`] splices
//! them into the pristine template on every render. That keeps custom
//! shells possible (`--shell`) while the container-id contract stays
//! stable for the interaction script.
//!
//! ## Trusted Content, Two Escaping Regimes
//!
//! Renderer interpolation is Maud-escaped. Translation substitution is
//! deliberately raw so headings can carry inline styled spans from the
//! bundle. The bundle is developer-controlled content; nothing here may
//! ever process user input.
//!
//! ## No Hidden State
//!
//! Lookup tables live in a [`index::ContentContext`] that borrows from the
//! bundle and is passed explicitly through the pipeline. The bundle is
//! written once at load and only read afterwards.
//!
//! # The Output
//!
//! Plain HTML, one stylesheet driven by CSS custom properties from
//! `folio.toml`, and one small vanilla interaction script that reads the
//! embedded JSON detail blob. No framework, no runtime fetches — the
//! generated site works from any static host, indefinitely.

pub mod bundle;
pub mod config;
pub mod dom;
pub mod generate;
pub mod index;
pub mod output;
pub mod render;
pub mod shell;
pub mod translate;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
