use std::collections::HashMap;

use scraper::Html;

use super::{FetchOutcome, PageFetcher};

/// Run-scoped cache of detail-page enrichments, keyed by the record's
/// natural key (the detail URL). Created by the pipeline driver, populated
/// lazily, never evicted. Failed fetches are cached too, so every distinct
/// key costs at most one fetch over the run.
#[derive(Debug)]
pub struct EnrichmentCache<T> {
    entries: HashMap<String, T>,
}

impl<T: Clone> EnrichmentCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, value: T) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for EnrichmentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch-or-recall one enrichment. An empty key or a failed fetch yields the
/// all-empty `T::default()` shape so the record schema stays uniform; only a
/// cache miss with a non-empty key touches the network.
pub async fn enrich_from_detail_page<T, P, F>(
    fetcher: &P,
    cache: &mut EnrichmentCache<T>,
    key_url: &str,
    parse: F,
) -> T
where
    T: Clone + Default,
    P: PageFetcher + ?Sized,
    F: Fn(&Html) -> T,
{
    if key_url.is_empty() {
        return T::default();
    }
    if let Some(cached) = cache.get(key_url) {
        return cached.clone();
    }

    let details = match fetcher.fetch_page(key_url).await {
        FetchOutcome::Page(html) => {
            let doc = Html::parse_document(&html);
            parse(&doc)
        }
        FetchOutcome::Failed(reason) => {
            log::warn!("Detail fetch failed for {}: {}", key_url, reason);
            T::default()
        }
    };

    cache.insert(key_url.to_string(), details.clone());
    details
}
