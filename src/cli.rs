use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::api::{self, Components};
use crate::config::Settings;
use crate::logging::init_logging;
use crate::runtime::block_on;
use crate::services::catalog::{CatalogSource, SearchOptions, SortOrder};
use crate::types::{ApiResponse, SearchRequest};

#[derive(Parser)]
#[command(
    name = "sourcing-scrape",
    version,
    about = "Product page extraction + wholesale catalog search (JSON only)"
)]
pub struct Cli {
    /// Settings file; defaults to config.json in the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract product fields from one or more allow-listed pages
    Scrape(ScrapeArgs),
    /// Search the wholesale catalog by keyword
    Search(SearchArgs),
}

#[derive(Args)]
struct ScrapeArgs {
    #[arg(required = true)]
    urls: Vec<String>,
}

#[derive(Args)]
struct SearchArgs {
    keyword: String,
    /// domeggook | ownerclan | domeme; all configured sources when omitted
    #[arg(long)]
    source: Option<CatalogSource>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    min_price: Option<u64>,
    #[arg(long)]
    max_price: Option<u64>,
    /// popular | price_asc | price_desc | latest
    #[arg(long)]
    sort: Option<SortOrder>,
    #[arg(long)]
    category: Option<String>,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        SearchRequest {
            keyword: args.keyword,
            source: args.source,
            options: SearchOptions {
                page: args.page,
                limit: args.limit,
                min_price: args.min_price,
                max_price: args.max_price,
                sort: args.sort,
                category: args.category,
            },
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load().context("loading settings")?,
    };
    if cli.json_logs {
        settings.logging.json = true;
    }
    init_logging(&settings.logging);

    let components = Components::from_settings(settings).context("building http clients")?;

    match cli.cmd {
        Command::Scrape(args) => {
            let mut responses = block_on(api::scrape_products(&components, args.urls));
            if responses.len() == 1 {
                print_json(&responses.remove(0))
            } else {
                print_json(&responses)
            }
        }
        Command::Search(args) => {
            match block_on(api::search_products(&components, args.into())) {
                Ok(response) => print_json(&response),
                Err(e) => print_json(&ApiResponse::<()>::failure(&e)),
            }
        }
    }
}

fn print_json<T: serde::Serialize>(val: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
