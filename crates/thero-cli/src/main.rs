mod error;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use thero_core::config::StudioConfig;
use thero_core::storage::FileStore;
use thero_core::{generate_stylesheet, KeyValueStore, TokenStore};
use thero_export::{ExportKind, ProjectExporter, ZipArchiveWriter};
use thero_fonts::{FontResolver, FontTarget, GoogleFontsClient, MemoryRegistry};

use crate::error::CliError;
use crate::session::{build_tokens, SessionArgs};

type Resolver = FontResolver<GoogleFontsClient, MemoryRegistry>;

/// Design-token studio: presets, palettes, fonts and starter-project export
#[derive(Parser, Debug)]
#[command(name = "thero", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the generated stylesheet
    Css(SessionArgs),

    /// Export a stylesheet or a starter project archive
    Export {
        /// css, react or vue
        kind: ExportKind,

        /// Output directory (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Search, apply and configure fonts
    Fonts {
        #[command(subcommand)]
        command: FontsCommand,
    },

    /// List the built-in presets
    Presets,
}

#[derive(Subcommand, Debug)]
enum FontsCommand {
    /// Search the font catalog (bundled list when no API key is set)
    Search { term: String },

    /// Use a family spec such as "Lora" or "Roboto Slab:wght@400;700"
    Use {
        spec: String,

        #[arg(long, value_enum, default_value = "body")]
        target: TargetArg,
    },

    /// Set the catalog API key, or clear it when omitted
    Key { key: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    Body,
    Heading,
}

impl From<TargetArg> for FontTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Body => FontTarget::Body,
            TargetArg::Heading => FontTarget::Heading,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thero=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StudioConfig::load()?;

    match cli.command {
        Command::Presets => {
            for preset in TokenStore::new().presets() {
                println!("{:<16} {}", preset.id, preset.label);
            }
        }
        Command::Css(args) => {
            let mut resolver = open_resolver(&config)?;
            let mut tokens = build_tokens(&args, &config, &mut rand::thread_rng())?;
            let fonts = resolver.restore(&mut tokens);
            print!(
                "{}",
                generate_stylesheet(
                    tokens.tokens(),
                    tokens.spacing_categories(),
                    &fonts,
                    &config.fonts.stylesheet_url,
                )
            );
        }
        Command::Export { kind, out, session } => {
            let mut resolver = open_resolver(&config)?;
            let mut tokens = build_tokens(&session, &config, &mut rand::thread_rng())?;
            let fonts = resolver.restore(&mut tokens);

            let exporter =
                ProjectExporter::with_writer(ZipArchiveWriter, config.export.css_file_name.clone());
            let deliverable =
                exporter.export_tokens(kind, &tokens, &fonts, &config.fonts.stylesheet_url)?;
            let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            let path = deliverable.save(&dir)?;
            println!("{}", path.display());
        }
        Command::Fonts { command } => fonts(command, &config).await?,
    }

    Ok(())
}

async fn fonts(command: FontsCommand, config: &StudioConfig) -> Result<(), CliError> {
    let mut resolver = open_resolver(config)?;

    match command {
        FontsCommand::Search { term } => {
            if resolver.credential().is_none() {
                tracing::info!("no API key set, searching the bundled font list");
            }
            for entry in resolver.search(&term).await {
                match &entry.category {
                    Some(category) => println!("{} ({category})", entry.family),
                    None => println!("{}", entry.family),
                }
            }
        }
        FontsCommand::Use { spec, target } => {
            let mut tokens = TokenStore::new();
            match resolver.resolve(&mut tokens, &spec, target.into()) {
                Some(resolution) => {
                    let stack = match target {
                        TargetArg::Body => &tokens.tokens().font_family_body,
                        TargetArg::Heading => &tokens.tokens().font_family_heading,
                    };
                    println!("{stack}");
                    println!("{}", resolution.url);
                }
                None => tracing::warn!("Ignoring empty font spec"),
            }
        }
        FontsCommand::Key { key } => {
            resolver.set_credential(key.as_deref());
            match resolver.credential() {
                Some(_) => println!("API key saved"),
                None => println!("API key cleared"),
            }
        }
    }

    Ok(())
}

fn open_resolver(config: &StudioConfig) -> Result<Resolver, CliError> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(StudioConfig::session_path()));
    let client = GoogleFontsClient::new(
        config.fonts.catalog_url.clone(),
        Duration::from_secs(config.fonts.request_timeout_secs),
    )?;
    Ok(FontResolver::new(
        client,
        MemoryRegistry::new(),
        store,
        config.fonts.stylesheet_url.clone(),
        Duration::from_millis(config.fonts.search_debounce_ms),
    ))
}
