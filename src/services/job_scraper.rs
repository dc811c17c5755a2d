use scraper::Html;

use crate::domain::job::JobRecord;

use super::{normalize_jobs, walk_listing_pages, PageFetcher};

/// Walk the job board and run the accumulated records through the
/// normalizer.
pub async fn scrape_jobs<F: PageFetcher + ?Sized>(fetcher: &F, base_url: &str) -> Vec<JobRecord> {
    let pages = walk_listing_pages(fetcher, base_url).await;
    let mut records: Vec<JobRecord> = vec![];

    for page in &pages {
        let jobs = {
            let doc = Html::parse_document(&page.html);
            crate::domain::job::extract_jobs(&doc, &page.url)
        };
        records.extend(jobs);
    }

    log::info!("Extracted {} jobs across {} pages", records.len(), pages.len());
    normalize_jobs(records)
}

/// Case-insensitive substring filters over normalized records (spec'd CLI
/// surface: `--city`, `--contract`).
pub fn apply_filters(
    jobs: Vec<JobRecord>,
    city: Option<&str>,
    contract: Option<&str>,
) -> Vec<JobRecord> {
    jobs.into_iter()
        .filter(|job| match city {
            Some(city) => job.location.to_lowercase().contains(&city.to_lowercase()),
            None => true,
        })
        .filter(|job| match contract {
            Some(contract) => job
                .contract_type
                .as_str()
                .to_lowercase()
                .contains(&contract.to_lowercase()),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::ContractType;
    use crate::services::MockFetcher;

    const PAGE: &str = r#"<html><body>
        <div class="card-content">
            <h2 class="title">Dev</h2>
            <h3 class="company">Acme</h3>
            <p class="location">Springfield, AA</p>
            <time datetime="2021-04-08">2021-04-08</time>
            <p class="description">full-time role</p>
            <footer><a href="jobs/dev.html">Apply</a></footer>
        </div>
        <div class="card-content">
            <h2 class="title">Dev</h2>
            <h3 class="company">Acme</h3>
            <p class="location">Springfield, AA</p>
            <p class="description">same job, different blurb</p>
        </div>
        <div class="card-content">
            <h2 class="title">Ops</h2>
            <h3 class="company">Initech</h3>
            <p class="location">Shelbyville, BB</p>
            <p class="description">part-time role</p>
        </div>
        </body></html>"#;

    #[tokio::test]
    async fn duplicate_composite_keys_keep_the_first_record() {
        let fetcher = MockFetcher::new().with_page("http://jobs.test/", PAGE);

        let jobs = scrape_jobs(&fetcher, "http://jobs.test/").await;

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].description, "full-time role");
        assert_eq!(jobs[0].contract_type, ContractType::FullTime);
        assert_eq!(jobs[0].date_posted.as_deref(), Some("2021-04-08"));
        assert_eq!(
            jobs[0].apply_url.as_deref(),
            Some("http://jobs.test/jobs/dev.html")
        );
    }

    #[tokio::test]
    async fn filters_match_case_insensitive_substrings() {
        let fetcher = MockFetcher::new().with_page("http://jobs.test/", PAGE);
        let jobs = scrape_jobs(&fetcher, "http://jobs.test/").await;

        let by_city = apply_filters(jobs.clone(), Some("springfield"), None);
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].title, "Dev");

        let by_contract = apply_filters(jobs.clone(), None, Some("part"));
        assert_eq!(by_contract.len(), 1);
        assert_eq!(by_contract[0].title, "Ops");

        let both = apply_filters(jobs, Some("nowhere"), None);
        assert!(both.is_empty());
    }
}
