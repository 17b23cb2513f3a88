use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glean-page")]
#[command(about = "Searches the web and scrapes the result pages to markdown")]
#[command(version)]
pub struct Args {
    /// Search query
    #[arg(default_value = "Headache")]
    pub query: String,

    /// Maximum number of search results to scrape
    #[arg(short, long, default_value_t = 10)]
    pub max_results: usize,

    /// Output file for the scraped records
    #[arg(short, long, default_value = "scraped_results.json")]
    pub output: PathBuf,

    /// Optional JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of concurrent page fetches
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// SearxNG-compatible search endpoint
    #[arg(long)]
    pub searx_url: Option<String>,

    /// WebDriver endpoint used to render pages
    #[arg(long)]
    pub webdriver_url: Option<String>,
}
