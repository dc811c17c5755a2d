use clap::{Parser, Subcommand};
use env_logger::Env;
use gleaner::{
    configuration::get_configuration,
    services::{
        apply_filters, average_price_by_rating, count_by, out_of_stock_count,
        price_rating_correlation, scrape_books, scrape_books_by_category, scrape_jobs,
        scrape_quotes, timestamped_path, top_tags, write_csv, write_json, HttpFetcher,
    },
};

#[derive(Parser)]
#[command(name = "gleaner", about = "One-shot scrapers for public demo sites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the book catalog, enriched from detail pages, to CSV
    Books {
        /// Walk the category sidebar instead of the full catalog
        #[arg(long)]
        by_category: bool,
    },
    /// Scrape quotes with author details to JSON
    Quotes,
    /// Scrape job listings to CSV
    Jobs {
        /// Keep only jobs whose location contains this text
        #[arg(long)]
        city: Option<String>,
        /// Keep only jobs whose contract type contains this text
        #[arg(long)]
        contract: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let configuration = get_configuration().expect("Failed to read configuration.");
    let fetcher = HttpFetcher::new();
    let out_dir = configuration.output.directory;

    match cli.command {
        Command::Books { by_category } => {
            let books = match by_category {
                true => scrape_books_by_category(&fetcher, &configuration.sites.books_base_url).await,
                false => scrape_books(&fetcher, &configuration.sites.books_base_url).await,
            };

            for (rating, mean_price) in average_price_by_rating(&books) {
                log::info!("Average price for rating {}: £{:.2}", rating, mean_price);
            }
            log::info!("{} books out of stock", out_of_stock_count(&books));
            if let Some(r) = price_rating_correlation(&books) {
                log::info!("Price/rating correlation: {:.2}", r);
            }

            write_csv(&books, &timestamped_path(&out_dir, "books", "csv"))?;
        }
        Command::Quotes => {
            let quotes = scrape_quotes(&fetcher, &configuration.sites.quotes_base_url).await;

            for (tag, count) in top_tags(&quotes, 10) {
                log::info!("Tag {}: {} quotes", tag, count);
            }

            write_json(&quotes, &timestamped_path(&out_dir, "quotes", "json"))?;
        }
        Command::Jobs { city, contract } => {
            let jobs = scrape_jobs(&fetcher, &configuration.sites.jobs_base_url).await;

            for (location, count) in count_by(&jobs, |job| job.location.clone()) {
                log::info!("Location {}: {} jobs", location, count);
            }
            for (contract_type, count) in count_by(&jobs, |job| job.contract_type.as_str()) {
                log::info!("Contract {}: {} jobs", contract_type, count);
            }

            let jobs = apply_filters(jobs, city.as_deref(), contract.as_deref());
            log::info!("{} jobs after filtering", jobs.len());

            write_csv(&jobs, &timestamped_path(&out_dir, "jobs", "csv"))?;
        }
    }

    Ok(())
}
