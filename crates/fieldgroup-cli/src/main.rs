mod commands;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fieldgroup_core::{parse_string, resolve, SchemaDocument};
use reader::read_manifest_files;

#[derive(Parser)]
#[command(
    name = "fieldgroup",
    version,
    about = "fieldgroup linter — find fields that share a prefix and belong in a nested type"
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint field manifests for prefix groups that should become nested types
    Lint {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: human (default), json or sarif
        #[arg(long, default_value = "human")]
        format: String,

        /// Config file to use instead of fieldgroup.config.yaml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum number of fields that makes a group reportable
        #[arg(long)]
        max_fields: Option<usize>,

        /// Additional allow-listed prefix (repeatable)
        #[arg(long = "prefix")]
        prefixes: Vec<String>,
    },

    /// List built-in rules
    Rules,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lint {
            path,
            format,
            config,
            max_fields,
            prefixes,
        } => {
            let overrides = commands::lint::Overrides {
                max_fields,
                prefixes,
            };
            match commands::lint::run_lint(&path, &format, config.as_deref(), &overrides) {
                Ok((output, error_count)) => {
                    println!("{output}");
                    if error_count > 0 {
                        process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Rules => println!("{}", commands::rules::run_rules()),
    }
}

pub fn build_document(
    input_path: &Path,
    sources: Option<&[String]>,
) -> Result<SchemaDocument, String> {
    let files = read_manifest_files(input_path, sources)?;

    if files.is_empty() {
        return Err(format!(
            "No field manifests (*.fields.yaml, *.fields.yml, *.fields.json) found at: {}",
            input_path.display()
        ));
    }

    let parsed_files = files
        .iter()
        .map(|f| parse_string(&f.content, &f.path))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let doc = resolve(&parsed_files);
    tracing::debug!(
        files = doc.sources.len(),
        types = doc.types.len(),
        fields = doc.field_count(),
        "loaded manifests"
    );

    Ok(doc)
}
