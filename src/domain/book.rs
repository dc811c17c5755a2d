use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

use super::join_url;

pub const DEFAULT_TITLE: &str = "";
pub const DEFAULT_PRICE: f64 = 0.0;
pub const DEFAULT_RATING: u8 = 0;
pub const DEFAULT_STOCK: u32 = 0;

/// One book from a catalog listing page, enriched from its detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub title: String,
    pub detail_url: String,
    pub price: f64,
    pub rating: u8,
    pub main_category: String,
    pub sub_category: String,
    pub description: String,
    pub stock: u32,
    pub image_url: String,
}

/// Fields only available on the detail page. `Default` is the all-empty
/// shape merged in when the detail fetch fails.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BookDetails {
    pub main_category: String,
    pub sub_category: String,
    pub description: String,
    pub stock: u32,
    pub image_url: String,
}

impl BookRecord {
    pub fn natural_key(&self) -> (String, String) {
        (self.title.clone(), self.detail_url.clone())
    }

    pub fn merge_details(&mut self, details: &BookDetails) {
        self.main_category = details.main_category.clone();
        self.sub_category = details.sub_category.clone();
        self.description = details.description.clone();
        self.stock = details.stock;
        self.image_url = details.image_url.clone();
    }
}

pub fn rating_from_word(word: &str) -> u8 {
    match word {
        "One" => 1,
        "Two" => 2,
        "Three" => 3,
        "Four" => 4,
        "Five" => 5,
        other => {
            if !other.is_empty() {
                log::warn!("Unrecognized rating label: {}", other);
            }
            DEFAULT_RATING
        }
    }
}

/// Prices come as "£51.77", sometimes with the mis-encoded "Â£" artifact.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned = raw.replace('£', "").replace('Â', "");
    match cleaned.trim().parse::<f64>() {
        Ok(price) => price,
        Err(_) => {
            log::warn!("Failed to parse price from: {}", raw);
            DEFAULT_PRICE
        }
    }
}

/// Extract one record per `article.product_pod` on a listing page.
pub fn extract_books(doc: &Html, page_url: &str) -> Vec<BookRecord> {
    let pod_selector = Selector::parse("article.product_pod").unwrap();
    let title_link_selector = Selector::parse("h3 a").unwrap();
    let price_selector = Selector::parse("p.price_color").unwrap();
    let rating_selector = Selector::parse("p.star-rating").unwrap();

    doc.select(&pod_selector)
        .map(|pod| {
            let (title, detail_url) = match pod.select(&title_link_selector).next() {
                Some(a_tag) => {
                    let title = a_tag
                        .value()
                        .attr("title")
                        .unwrap_or(DEFAULT_TITLE)
                        .trim()
                        .to_string();
                    let detail_url = a_tag
                        .value()
                        .attr("href")
                        .and_then(|href| join_url(page_url, href))
                        .unwrap_or_default();
                    (title, detail_url)
                }
                None => (DEFAULT_TITLE.to_string(), String::new()),
            };

            let price = match pod.select(&price_selector).next() {
                Some(tag) => parse_price(&tag.text().collect::<String>()),
                None => DEFAULT_PRICE,
            };

            let rating = match pod.select(&rating_selector).next() {
                Some(tag) => tag
                    .value()
                    .classes()
                    .find(|class| *class != "star-rating")
                    .map(rating_from_word)
                    .unwrap_or(DEFAULT_RATING),
                None => DEFAULT_RATING,
            };

            BookRecord {
                title,
                detail_url,
                price,
                rating,
                main_category: String::new(),
                sub_category: String::new(),
                description: String::new(),
                stock: DEFAULT_STOCK,
                image_url: String::new(),
            }
        })
        .collect()
}

/// Parse the enrichment fields from a book detail page.
pub fn extract_book_details(doc: &Html, detail_url: &str) -> BookDetails {
    let breadcrumb_selector = Selector::parse("ul.breadcrumb li").unwrap();
    let description_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let stock_selector = Selector::parse("p.instock.availability").unwrap();
    let image_selector = Selector::parse("div.item.active img").unwrap();

    let crumbs: Vec<String> = doc
        .select(&breadcrumb_selector)
        .map(|li| li.text().collect::<String>().trim().to_string())
        .collect();
    let main_category = crumbs.get(2).cloned().unwrap_or_default();
    let sub_category = crumbs.get(3).cloned().unwrap_or_default();

    let description = doc
        .select(&description_selector)
        .next()
        .and_then(|tag| tag.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    let stock = match doc.select(&stock_selector).next() {
        Some(tag) => {
            let text = tag.text().collect::<String>();
            let digits = Regex::new(r"\d+").unwrap();
            digits
                .find(&text)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(DEFAULT_STOCK)
        }
        None => DEFAULT_STOCK,
    };

    let image_url = doc
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| join_url(detail_url, src))
        .unwrap_or_default();

    BookDetails {
        main_category,
        sub_category,
        description,
        stock,
        image_url,
    }
}

/// Category sidebar on the catalog front page: name → absolute URL.
pub fn extract_categories(doc: &Html, page_url: &str) -> Vec<(String, String)> {
    let category_selector = Selector::parse("ul.nav-list ul li a").unwrap();

    doc.select(&category_selector)
        .filter_map(|a_tag| {
            let name = a_tag.text().collect::<String>().trim().to_string();
            a_tag
                .value()
                .attr("href")
                .and_then(|href| join_url(page_url, href))
                .map(|url| (name, url))
        })
        .collect()
}
