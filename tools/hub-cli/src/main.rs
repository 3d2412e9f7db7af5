//! Policy Hub CLI - Browse the policy catalog from the terminal.
//!
//! Commands:
//! - `policyhub list` - Search and filter the catalog
//! - `policyhub show` - Show one policy version
//! - `policyhub versions` - List the versions of a policy
//! - `policyhub docs` - Print documentation pages
//! - `policyhub facets` - List categories, providers and platforms
//! - `policyhub stats` - Show catalog totals

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DocsArgs, FacetsArgs, ListArgs, ShowArgs, VersionsArgs};

/// Policy Hub CLI - Browse API management policies
#[derive(Parser)]
#[command(name = "policyhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and filter the catalog
    List(ListArgs),

    /// Show a policy version
    Show(ShowArgs),

    /// List the versions of a policy
    Versions(VersionsArgs),

    /// Print documentation of a policy version
    Docs(DocsArgs),

    /// List known categories, providers and platforms
    Facets(FacetsArgs),

    /// Show catalog totals
    Stats,
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config and connect
    let ctx = context::Context::load(cli.config.as_deref(), cli.api_url, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Versions(args) => commands::versions::run(args, &ctx).await,
        Commands::Docs(args) => commands::docs::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Stats => commands::facets::stats(&ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
