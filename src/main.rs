//! minigit CLI - Command line interface for the minigit object store
//!
//! Hashes, stores and reads back blobs in a git-compatible object directory.
//! The repository root comes from `--root`, then the `ROOT` environment
//! variable, then the current directory.

use anyhow::Context;
use clap::{Parser, Subcommand};
use minigit::{Blob, Object, ObjectId, ObjectStore};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minigit")]
#[command(about = "A minimal git-compatible content-addressed blob store")]
#[command(version)]
struct Cli {
    /// Repository root (the directory containing .git)
    #[arg(short, long, env = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Log debug diagnostics to stderr
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the id of a file's contents, optionally storing it
    HashObject {
        /// File to hash
        #[arg(required_unless_present = "stdin")]
        file: Option<PathBuf>,
        /// Read content from stdin instead of a file
        #[arg(long, conflicts_with = "file")]
        stdin: bool,
        /// Write the object into the store
        #[arg(short, long)]
        write: bool,
    },

    /// Print the verified contents of a blob
    CatFile {
        /// The object id
        id: String,
    },

    /// Show the id, encoding and compressed form of some content
    Inspect {
        /// File to inspect
        file: Option<PathBuf>,
        /// Read content from stdin
        #[arg(long, conflicts_with_all = ["file", "content"])]
        stdin: bool,
        /// Literal content to inspect
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,
    },

    /// Check that a stored object is intact
    Verify {
        /// The object id
        id: String,
    },

    /// Print where an object is stored
    Path {
        /// The object id
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let store = ObjectStore::new(&cli.root);

    match cli.command {
        Commands::HashObject { file, stdin, write } => {
            let content = read_input(file, stdin)?;
            let blob = Blob::new(content);
            let id = if write {
                let id = store.put(&blob)?;
                info!(id = %id, root = %cli.root.display(), "wrote object");
                id
            } else {
                blob.id()
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "id": id,
                    "size": blob.size(),
                    "written": write
                }),
            )?;
        }

        Commands::CatFile { id } => {
            let id = parse_id(&id)?;
            let blob = store.get_blob(&id)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(blob.content())?;
            stdout.flush()?;
        }

        Commands::Inspect {
            file,
            stdin,
            content,
        } => {
            let data = match (file, stdin, content) {
                (None, false, Some(text)) => text.into_bytes(),
                (None, false, None) => b"hello\n".to_vec(),
                (file, stdin, _) => read_input(file, stdin)?,
            };
            let blob = Blob::new(data);
            let encoded = blob.encode();
            let compressed = blob.compress()?;
            let id = encoded.id();
            output(
                &cli.format,
                &serde_json::json!({
                    "id": id,
                    "size": blob.size(),
                    "data": hex::encode(encoded.as_bytes()),
                    "compress": hex::encode(&compressed),
                    "path": store.object_path(&id).display().to_string()
                }),
            )?;
        }

        Commands::Verify { id } => {
            let id = parse_id(&id)?;
            match store.get_blob(&id) {
                Ok(blob) => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "ok",
                            "id": id,
                            "size": blob.size()
                        }),
                    )?;
                }
                Err(e) => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "error",
                            "id": id,
                            "kind": e.kind(),
                            "integrity": e.is_integrity_error(),
                            "message": e.to_string()
                        }),
                    )?;
                    std::process::exit(1);
                }
            }
        }

        Commands::Path { id } => {
            let id = parse_id(&id)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "id": id,
                    "path": store.object_path(&id).display().to_string(),
                    "exists": store.contains(&id)
                }),
            )?;
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_id(id: &str) -> anyhow::Result<ObjectId> {
    Ok(id.parse::<ObjectId>()?)
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> anyhow::Result<Vec<u8>> {
    let mut content = Vec::new();
    match file {
        Some(path) if !stdin => {
            content = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        _ => {
            std::io::stdin()
                .lock()
                .read_to_end(&mut content)
                .context("Failed to read stdin")?;
        }
    }
    Ok(content)
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value)?);
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}
