use scraper::Html;

use crate::domain::book::{
    extract_book_details, extract_books, extract_categories, BookDetails, BookRecord,
};

use super::{
    dedup_by_key, enrich_from_detail_page, walk_listing_pages, EnrichmentCache, FetchOutcome,
    PageFetcher,
};

/// Walk the whole catalog, enriching every book from its detail page through
/// the run-scoped cache.
pub async fn scrape_books<F: PageFetcher + ?Sized>(fetcher: &F, base_url: &str) -> Vec<BookRecord> {
    let pages = walk_listing_pages(fetcher, base_url).await;
    let mut cache: EnrichmentCache<BookDetails> = EnrichmentCache::new();
    let mut records: Vec<BookRecord> = vec![];

    for page in &pages {
        let books = {
            let doc = Html::parse_document(&page.html);
            extract_books(&doc, &page.url)
        };

        for mut book in books {
            let detail_url = book.detail_url.clone();
            let details = enrich_from_detail_page(fetcher, &mut cache, &detail_url, |doc| {
                extract_book_details(doc, &detail_url)
            })
            .await;
            book.merge_details(&details);
            records.push(book);
        }
    }

    log::info!("Extracted {} books across {} pages", records.len(), pages.len());
    dedup_by_key(records, |book| book.natural_key())
}

/// Walk each sidebar category separately, tagging records with the category
/// name instead of fetching detail pages.
pub async fn scrape_books_by_category<F: PageFetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
) -> Vec<BookRecord> {
    let front_page = match fetcher.fetch_page(base_url).await {
        FetchOutcome::Page(html) => html,
        FetchOutcome::Failed(reason) => {
            log::error!("Failed to fetch catalog front page: {}", reason);
            return vec![];
        }
    };

    let categories = {
        let doc = Html::parse_document(&front_page);
        extract_categories(&doc, base_url)
    };
    log::info!("Found {} categories", categories.len());

    let mut records: Vec<BookRecord> = vec![];
    for (name, url) in categories {
        log::info!("Scraping category: {}", name);
        let pages = walk_listing_pages(fetcher, &url).await;

        for page in &pages {
            let mut books = {
                let doc = Html::parse_document(&page.html);
                extract_books(&doc, &page.url)
            };
            for book in books.iter_mut() {
                book.main_category = name.clone();
            }
            records.extend(books);
        }
    }

    dedup_by_key(records, |book| book.natural_key())
}
