//! # qalam CLI
//!
//! Command-line interface for the qalam blog generator.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qalam")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "qalam.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new qalam project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Build the content artifacts (JSON indexes + HTML fragments)
    Build,

    /// List all posts
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single post by slug
    Post {
        /// Post slug (forward-slash separated)
        slug: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = PostFormat::Json)]
        format: PostFormat,
    },

    /// Search post metadata
    Search {
        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all series with their posts
    Series {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all tags
    Tags {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all categories
    Categories {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, ValueEnum)]
pub enum PostFormat {
    Json,
    Html,
    Meta,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build => commands::build_site(&cli.config),
        Commands::List { json } => commands::list_posts(&cli.config, json),
        Commands::Post { slug, format } => commands::show_post(&cli.config, &slug, format),
        Commands::Search { query, limit, json } => {
            commands::search_posts(&cli.config, &query, limit, json)
        }
        Commands::Series { json } => commands::list_series(&cli.config, json),
        Commands::Tags { json } => commands::list_tags(&cli.config, json),
        Commands::Categories { json } => commands::list_categories(&cli.config, json),
    }
}
