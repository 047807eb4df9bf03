//! CLI entry point for garden-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "garden")]
#[command(version)]
#[command(about = "Inspect and search the posts and projects of a markdown site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, project, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show one post or project by slug
    Show {
        /// Slug to look up
        slug: String,

        /// Look the slug up among projects instead of posts
        #[arg(short, long)]
        project: bool,
    },

    /// Show the featured post and projects
    Featured,

    /// Fuzzy-search posts
    #[command(alias = "s")]
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "garden_rs=debug,info"
    } else {
        "garden_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            garden_rs::commands::list::run(&garden, &r#type, cli.json)?;
        }

        Commands::Show { slug, project } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            garden_rs::commands::show::run(&garden, &slug, project, cli.json)?;
        }

        Commands::Featured => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            garden_rs::commands::list::featured(&garden, cli.json)?;
        }

        Commands::Search { query, limit } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            tracing::debug!("Searching posts in {:?}", garden.posts_dir);
            garden_rs::commands::search::run(&garden, &query, limit, cli.json)?;
        }

        Commands::Version => {
            println!("garden version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
