//! CLI command implementations.

pub mod docs;
pub mod facets;
pub mod list;
pub mod show;
pub mod versions;

use clap::Args;
use hub_catalog::docs::DocPage;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Filter by provider (repeatable)
    #[arg(long = "provider")]
    pub providers: Vec<String>,

    /// Filter by supported platform (repeatable)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Start from a catalog query string (e.g. "categories=auth&page=2")
    #[arg(long)]
    pub query: Option<String>,

    /// Also show the filter sidebar
    #[arg(long)]
    pub filters: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Policy name
    pub name: String,

    /// Version to show (defaults to latest)
    #[arg(long)]
    pub version: Option<String>,
}

/// Arguments for the versions command.
#[derive(Args)]
pub struct VersionsArgs {
    /// Policy name
    pub name: String,
}

/// Arguments for the docs command.
#[derive(Args)]
pub struct DocsArgs {
    /// Policy name
    pub name: String,

    /// Version (defaults to latest)
    #[arg(long)]
    pub version: Option<String>,

    /// Documentation page: overview, configuration, examples or faq
    #[arg(long, default_value_t = DocPage::Overview)]
    pub page: DocPage,

    /// Fetch only the requested page
    #[arg(long)]
    pub single: bool,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// List every value instead of the first few
    #[arg(long)]
    pub all: bool,
}
