use scraper::Html;

use crate::domain::quote::{extract_author_details, extract_quotes, AuthorDetails, QuoteRecord};

use super::{
    dedup_by_key, enrich_from_detail_page, walk_listing_pages, EnrichmentCache, PageFetcher,
};

/// Walk all quote pages, enriching each record with its author's details
/// through the run-scoped cache keyed by author URL.
pub async fn scrape_quotes<F: PageFetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
) -> Vec<QuoteRecord> {
    let pages = walk_listing_pages(fetcher, base_url).await;
    let mut cache: EnrichmentCache<AuthorDetails> = EnrichmentCache::new();
    let mut records: Vec<QuoteRecord> = vec![];

    for page in &pages {
        let quotes = {
            let doc = Html::parse_document(&page.html);
            extract_quotes(&doc, &page.url)
        };

        for mut quote in quotes {
            quote.author_details =
                enrich_from_detail_page(fetcher, &mut cache, &quote.author_url, |doc| {
                    extract_author_details(doc)
                })
                .await;
            records.push(quote);
        }
    }

    log::info!(
        "Extracted {} quotes across {} pages ({} distinct authors fetched)",
        records.len(),
        pages.len(),
        cache.len()
    );
    dedup_by_key(records, |quote| quote.natural_key())
}
