use clap::{Parser, Subcommand};
use neonfolio::{config, generate, output};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "neonfolio")]
#[command(about = "Static site generator for single-page developer portfolios")]
#[command(long_about = "\
Static site generator for single-page developer portfolios

A JSON content bundle is the data source. Each top-level key is a language
code; its sub-tree holds the structured sections (skills, services,
experience, certificates, projects, the service modal) plus free-form
translation strings resolved by dotted key.

Bundle structure:

  data.json
  ├── en
  │   ├── meta                  # Title, description, keywords, author
  │   ├── contact               # Email, phone, social links, WhatsApp
  │   ├── skills.categories     # Categories of { name, icon, level }
  │   ├── services.items        # { title, description }
  │   ├── experience.items      # { role, company, period, duties }
  │   ├── certificates.categories  # Categories of { id, title, image, description }
  │   ├── projects.items        # { id, title, link, description, tech }
  │   ├── serviceModal          # Option lists + message templates
  │   ├── codeRainSnippets      # Decorative canvas text
  │   ├── heroCodeSnippets      # Decorative hero backdrop text
  │   └── hero, nav, ...        # Free-form strings for data-i18n keys
  └── de                        # Rendered under de/index.html

The configured language renders at index.html; every other language in
the bundle renders under <code>/index.html. The host document is the
embedded shell unless --shell points at a custom one honoring the same
container-id contract.

Run 'neonfolio gen-config' to generate a documented folio.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content bundle JSON
    #[arg(long, default_value = "data.json", global = true)]
    bundle: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Custom HTML shell (defaults to the embedded one)
    #[arg(long, global = true)]
    shell: Option<PathBuf>,

    /// Static asset directory copied into the output
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Root-page language (overrides folio.toml)
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: load → render → translate → write
    Build,
    /// Validate the bundle and render everything without writing
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config_dir = cli.bundle.parent().unwrap_or(Path::new("."));
    let opts = generate::BuildOptions {
        bundle_path: &cli.bundle,
        shell_path: cli.shell.as_deref(),
        output_dir: &cli.output,
        assets_dir: cli.assets.as_deref(),
        language: cli.lang.as_deref(),
    };

    match cli.command {
        Command::Build => {
            let site = config::load_config(config_dir)?;
            println!("==> Building {}", cli.bundle.display());
            let report = generate::build(&opts, &site)?;
            output::print_build_output(&report);
            println!("==> Site generated at {}", cli.output.display());
        }
        Command::Check => {
            let site = config::load_config(config_dir)?;
            println!("==> Checking {}", cli.bundle.display());
            let report = generate::check(&opts, &site)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
