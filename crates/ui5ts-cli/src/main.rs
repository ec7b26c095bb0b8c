//! `ui5ts` - generate TypeScript declarations from UI5 `api.json` files.
//!
//! Set the `UI5TS_LOG` environment variable to control logging:
//!
//! ```bash
//! UI5TS_LOG=debug ui5ts generate sap.m.api.json sap.ui.core.api.json
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ui5ts_generator::config::resolve_version;
use ui5ts_generator::{Generator, GeneratorConfig};

mod load;
mod output;

#[derive(Parser, Debug)]
#[command(name = "ui5ts", version, about = "TypeScript declarations for UI5")]
struct Cli {
    /// Enable debug logging (overrides UI5TS_LOG)
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate `.d.ts` files from one or more api.json documents
    Generate {
        /// api.json documents, one per library
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Generator configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Definitions directory (default: output.definitions_path, then "dist")
        #[arg(short, long)]
        out: Option<String>,
        /// Export stubs directory (default: output.exports_path)
        #[arg(long)]
        exports: Option<String>,
        /// UI5 version substituted for {{VERSION}} in output paths
        #[arg(long)]
        api_version: Option<String>,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("UI5TS_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Generate {
            files,
            config,
            out,
            exports,
            api_version,
        } => run_generate(&files, config, out, exports, api_version),
    };

    if let Err(err) = result {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run_generate(
    files: &[PathBuf],
    config_path: Option<PathBuf>,
    out: Option<String>,
    exports: Option<String>,
    api_version: Option<String>,
) -> anyhow::Result<()> {
    let config = match &config_path {
        Some(path) => GeneratorConfig::load_from_path(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let documents = load::read_documents(files)?;
    let generator = Generator::new(config);
    let generated = generator
        .generate(documents)
        .context("generate declarations")?;

    let version = api_version.or_else(|| generated.version.clone());
    let version = version.as_deref();
    let output_config = &generator.config().output;

    let definitions_dir = match out {
        Some(dir) => resolve_version(&dir, version),
        None => output_config.definitions_dir(version),
    };
    output::write_definitions(&PathBuf::from(&definitions_dir), &generated)?;

    let exports_dir = match exports {
        Some(dir) => Some(resolve_version(&dir, version)),
        None => output_config.exports_dir(version),
    };
    if let Some(dir) = exports_dir {
        output::write_exports(&PathBuf::from(dir), &generated.exports)?;
    }

    tracing::info!("wrote declarations to {}", definitions_dir);
    Ok(())
}
