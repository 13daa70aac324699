//! Command line entry point: exports recorded default texts and computes hashed keys.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use hashed_i18n::config::{
    ConfigError,
    ConfigManager,
};
use hashed_i18n::export::write_export;
use hashed_i18n::{
    DefaultValueCache,
    ExportOptions,
    ReferenceLinker,
    TranslationError,
    hash_text,
    hashed_key,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "hashed-i18n", version, about = "Hashed translation keys and translator exports")]
struct Cli {
    /// Workspace containing `.hashed-i18n.json` (defaults to the current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Export the recorded defaults of one namespace as a translation document
    Export {
        /// Cache dump in the form `{ namespace: { hashedKey: text } }`
        #[arg(long)]
        cache: PathBuf,
        /// Namespace to export
        #[arg(long)]
        namespace: String,
        /// Keys to place first, one per line or a JSON array
        #[arg(long)]
        order: Option<PathBuf>,
        /// Names to wrap in nested references, one per line or a JSON array
        #[arg(long)]
        link_names: Option<PathBuf>,
        /// Namespace the linked names resolve in (defaults to the fallback namespace)
        #[arg(long, requires = "link_names")]
        link_namespace: Option<String>,
        /// Directory to write `{namespace}.json` into; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the hash of a default text
    Hash {
        /// Default text to hash
        text: String,
        /// Print the full hashed key for this key instead of the bare hash
        #[arg(long)]
        key: Option<String>,
    },
}

/// Failures reported before exiting with a non-zero status
#[derive(Debug, Error)]
enum CliError {
    /// An input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// An input file is not the expected JSON
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Output could not be written
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// Settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Export failed
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// The link names do not form a usable pattern
    #[error("Invalid link names: {0}")]
    Pattern(#[from] regex::Error),
}

/// Sets up logging and runs the CLI.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one subcommand.
fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Export { cache, namespace, order, link_names, link_namespace, out } => {
            let workspace = match cli.workspace {
                Some(workspace) => workspace,
                None => std::env::current_dir()
                    .map_err(|source| CliError::Read { path: PathBuf::from("."), source })?,
            };
            let mut config_manager = ConfigManager::new();
            config_manager.load_settings(Some(workspace))?;
            let settings = config_manager.get_settings();

            let defaults: DefaultValueCache = serde_json::from_str(&read(&cache)?)
                .map_err(|source| CliError::Parse { path: cache.clone(), source })?;

            let linker = link_names
                .map(|path| -> Result<ReferenceLinker, CliError> {
                    let names = read_list(&path)?;
                    let link_namespace = link_namespace
                        .or_else(|| settings.fallback_namespace.clone())
                        .unwrap_or_else(|| namespace.clone());
                    Ok(ReferenceLinker::new(&link_namespace, names)?)
                })
                .transpose()?;
            let options = ExportOptions {
                reference_order: order.as_deref().map(read_list).transpose()?.unwrap_or_default(),
                linker,
            };

            let document =
                hashed_i18n::export::export_namespace(Some(&defaults), &namespace, &options)?;
            match out {
                Some(dir) => {
                    let path = write_export(&dir, &namespace, &document)?;
                    tracing::info!(path = %path.display(), "Export written");
                }
                None => writeln!(std::io::stdout().lock(), "{document}")?,
            }
        }
        Command::Hash { text, key } => {
            let output = key.map_or_else(|| hash_text(&text).to_string(), |k| hashed_key(&k, &text));
            writeln!(std::io::stdout().lock(), "{output}")?;
        }
    }
    Ok(())
}

/// Reads a whole input file.
fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

/// Reads a list file: a JSON array of strings, or one entry per non-blank line.
fn read_list(path: &Path) -> Result<Vec<String>, CliError> {
    let content = read(path)?;
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(&content)
            .map_err(|source| CliError::Parse { path: path.to_path_buf(), source });
    }
    Ok(content.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect())
}
