//! xref CLI tool
//!
//! Command-line interface for looking up scripture text and cross-reference connections.
//!
//! ## Commands
//!
//! - `text <REF>`: Print the text of a verse or chapter
//! - `connections <BOOK> <CHAPTER>`: Print the connection graph for a chapter
//! - `books`: List the books in the text feed in canonical order
//! - `audit`: Report book names that miss the alias tables and records that were skipped
//!
//! Feeds are located through `xref.toml` (see `--config`). `--text` and `--links` override the
//! configured paths.

use clap::{Parser, Subcommand};
use scripture_xref::{
    config::ScriptureConfig, corpus::Corpus, query::Mode, ScriptureError,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xref")]
#[command(author, version, about = "Scripture text lookup and cross-reference queries", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "xref.toml")]
    config: PathBuf,

    /// Text feed path, overriding the configured one
    #[arg(long, global = true)]
    text: Option<PathBuf>,

    /// Link feed path, overriding the configured one
    #[arg(long, global = true)]
    links: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text of a verse or a whole chapter
    Text {
        /// Reference identifier, e.g. `Gen.1.1`, `1Samuel16v7` or `John 3:16`
        reference: String,
    },

    /// Print the connections of one chapter
    Connections {
        /// Book name in any recognized spelling
        book: String,

        chapter: u32,

        /// `chapter` aggregates links by chapter pair, `verse` keeps one link per record
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the books of the text feed in canonical order
    Books,

    /// Report data-quality findings for the loaded feeds
    Audit {
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn load_config(cli: &Cli) -> Result<ScriptureConfig, ScriptureError> {
    let mut config = match (&cli.text, &cli.links) {
        (Some(text), Some(links)) if !cli.config.exists() => {
            ScriptureConfig::new(text.clone(), links.clone())
        }
        _ => ScriptureConfig::from_path(&cli.config)?,
    };
    if let Some(text) = &cli.text {
        config.text_corpus = text.clone();
    }
    if let Some(links) = &cli.links {
        config.link_corpus = links.clone();
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let corpus = Corpus::from_config(&config)?;

    match cli.command {
        Commands::Text { reference } => match corpus.get_text(&reference) {
            Ok(text) => println!("{text}"),
            Err(miss) => {
                eprintln!("{miss}");
                std::process::exit(1);
            }
        },
        Commands::Connections {
            book,
            chapter,
            mode,
            json,
        } => {
            let mode = mode.unwrap_or(config.default_mode);
            let Some(connections) = corpus.get_connections(Some(&book), Some(chapter), mode)
            else {
                eprintln!("Error: a book and chapter must be selected");
                std::process::exit(1);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&connections)?);
            } else if connections.is_empty() {
                println!("No connections for {book} {chapter}");
            } else {
                println!(
                    "{} nodes, {} links ({mode} mode)",
                    connections.nodes.len(),
                    connections.links.len()
                );
                for link in &connections.links {
                    println!("  {} -> {} ({})", link.source, link.target, link.value);
                }
            }
        }
        Commands::Books => {
            for book in corpus.list_canonical_books() {
                println!("{book}");
            }
        }
        Commands::Audit { json } => {
            let audit = corpus.audit();
            if json {
                println!("{}", serde_json::to_string_pretty(&audit)?);
            } else {
                println!("Text records skipped: {}", audit.text_skipped);
                println!("Link records skipped: {}", audit.links_skipped);
                for name in &audit.text_fallbacks {
                    println!("  text feed book without alias: {name}");
                }
                for name in &audit.link_fallbacks {
                    println!("  link feed book without alias: {name}");
                }
                for (name, table) in &audit.missing_aliases {
                    println!("  {name} missing from the {table:?} alias table");
                }
                if audit.is_clean() {
                    println!("✓ All book names resolved through the alias tables");
                }
            }
        }
    }

    Ok(())
}
