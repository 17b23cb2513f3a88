use clap::Parser;
use glean_page::config::ScraperConfig;
use glean_page::{Scraper, results};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!(
        "Starting search-and-scrape for query: {} (max {} results)",
        args.query,
        args.max_results
    );

    // Base configuration: file if given, defaults otherwise
    let mut config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return;
            }
        },
        None => ScraperConfig::default(),
    };

    // Environment overrides, then explicit flags on top
    config.apply_env_overrides();
    if let Some(concurrency) = args.concurrency {
        config.fetch.max_concurrency = concurrency;
    }
    if let Some(searx_url) = &args.searx_url {
        config.search.base_url = searx_url.clone();
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        config.fetch.webdriver_url = webdriver_url.clone();
    }

    println!("Note: page rendering requires a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL and SEARX_URL environment variables if not using the defaults {} and {}",
        config.fetch.webdriver_url, config.search.base_url
    );

    let scraper = Scraper::new(config);

    let start_time = std::time::Instant::now();
    let result = scraper.search_and_scrape(&args.query, args.max_results).await;

    // A failed run is written as a literal JSON `null`, matching the output
    // contract; the process still exits cleanly.
    let records = match result {
        Ok(records) => {
            ::log::info!(
                "Scraped {} pages in {:.2} seconds",
                records.len(),
                start_time.elapsed().as_secs_f64()
            );
            Some(records)
        }
        Err(e) => {
            ::log::error!("Search-and-scrape run failed: {}", e);
            None
        }
    };

    if let Err(e) = results::write_json(&args.output, records.as_deref()) {
        ::log::error!("Failed to write {}: {}", args.output.display(), e);
        return;
    }

    ::log::info!("Wrote results to {}", args.output.display());
}
