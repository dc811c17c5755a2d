use scraper::{Html, Selector};

use crate::domain::join_url;

use super::{FetchOutcome, PageFetcher};

/// One fetched listing page, markup kept raw so callers parse and extract
/// with their own selectors.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub url: String,
    pub html: String,
    pub number: u32,
}

/// Follow the pagination cursor from `start_url`, fetching each page exactly
/// once, until there is no "next" link or a fetch fails. A failed fetch ends
/// the walk but keeps the pages accumulated so far; a missing or malformed
/// next link is ordinary end-of-pagination.
pub async fn walk_listing_pages<F: PageFetcher + ?Sized>(
    fetcher: &F,
    start_url: &str,
) -> Vec<ListingPage> {
    let mut pages: Vec<ListingPage> = vec![];
    let mut cursor = Some(start_url.to_string());
    let mut number = 1;

    while let Some(url) = cursor.take() {
        match fetcher.fetch_page(&url).await {
            FetchOutcome::Failed(reason) => {
                log::error!("Stopping walk at page {} ({}): {}", number, url, reason);
                break;
            }
            FetchOutcome::Page(html) => {
                let next = {
                    let doc = Html::parse_document(&html);
                    next_page_url(&doc, &url)
                };
                pages.push(ListingPage { url, html, number });
                cursor = next;
                number += 1;
            }
        }
    }

    log::info!("Walked {} pages from {}", pages.len(), start_url);
    pages
}

/// The cursor lives in `li.next a`; its href resolves against the page it
/// was found on.
pub fn next_page_url(doc: &Html, page_url: &str) -> Option<String> {
    let next_selector = Selector::parse("li.next a").unwrap();

    doc.select(&next_selector)
        .next()
        .and_then(|a_tag| a_tag.value().attr("href"))
        .and_then(|href| join_url(page_url, href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockFetcher;

    const PAGE_ONE: &str = r#"<html><body>
        <div class="quote"></div>
        <ul class="pager"><li class="next"><a href="/page/2/">Next</a></li></ul>
        </body></html>"#;
    const PAGE_TWO: &str = r#"<html><body><div class="quote"></div></body></html>"#;

    #[tokio::test]
    async fn walk_follows_next_links_until_absent() {
        let fetcher = MockFetcher::new()
            .with_page("http://site.test/", PAGE_ONE)
            .with_page("http://site.test/page/2/", PAGE_TWO);

        let pages = walk_listing_pages(&fetcher, "http://site.test/").await;

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, "http://site.test/");
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].url, "http://site.test/page/2/");
        assert_eq!(pages[1].number, 2);
        assert_eq!(fetcher.hits("http://site.test/"), 1);
        assert_eq!(fetcher.hits("http://site.test/page/2/"), 1);
    }

    #[tokio::test]
    async fn failed_first_page_yields_no_pages() {
        let fetcher = MockFetcher::new();

        let pages = walk_listing_pages(&fetcher, "http://site.test/").await;

        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn failed_later_page_keeps_accumulated_pages() {
        let fetcher = MockFetcher::new().with_page("http://site.test/", PAGE_ONE);

        let pages = walk_listing_pages(&fetcher, "http://site.test/").await;

        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn malformed_next_link_ends_the_walk_silently() {
        let broken = r#"<html><body>
            <ul class="pager"><li class="next"><a>Next</a></li></ul>
            </body></html>"#;
        let fetcher = MockFetcher::new().with_page("http://site.test/", broken);

        let pages = walk_listing_pages(&fetcher, "http://site.test/").await;

        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn next_page_url_resolves_relative_href() {
        let doc = Html::parse_document(PAGE_ONE);

        assert_eq!(
            next_page_url(&doc, "http://site.test/"),
            Some("http://site.test/page/2/".to_string())
        );
        assert_eq!(next_page_url(&Html::parse_document(PAGE_TWO), "http://site.test/"), None);
    }
}
