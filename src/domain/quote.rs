use scraper::{Html, Selector};
use serde::Serialize;

use super::join_url;

pub const DEFAULT_AUTHOR_FIELD: &str = "";

/// One quote from a listing page, with the author enrichment nested the way
/// the JSON sink writes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRecord {
    pub text: String,
    pub author_name: String,
    pub author_url: String,
    pub tags: Vec<String>,
    pub author_details: AuthorDetails,
}

/// Fields from the author detail page. `Default` is the all-empty shape
/// merged in when the author fetch fails or no author link exists.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AuthorDetails {
    pub bio: String,
    pub born_date: String,
    pub born_location: String,
    pub death_date: String,
}

impl QuoteRecord {
    pub fn natural_key(&self) -> (String, String) {
        (self.text.clone(), self.author_name.clone())
    }
}

/// Extract one record per `div.quote` on a listing page.
pub fn extract_quotes(doc: &Html, page_url: &str) -> Vec<QuoteRecord> {
    let quote_selector = Selector::parse("div.quote").unwrap();
    let text_selector = Selector::parse("span.text").unwrap();
    let author_selector = Selector::parse("small.author").unwrap();
    let a_tag_selector = Selector::parse("a").unwrap();
    let tag_selector = Selector::parse("a.tag").unwrap();

    doc.select(&quote_selector)
        .map(|quote| {
            let text = quote
                .select(&text_selector)
                .next()
                .map(|tag| tag.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            let author_name = quote
                .select(&author_selector)
                .next()
                .map(|tag| tag.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            // First <a> inside the block is the "(about)" author link.
            let author_url = quote
                .select(&a_tag_selector)
                .next()
                .and_then(|a_tag| a_tag.value().attr("href"))
                .and_then(|href| join_url(page_url, href))
                .unwrap_or_default();

            let tags = quote
                .select(&tag_selector)
                .map(|tag| tag.text().collect::<String>().trim().to_string())
                .collect();

            QuoteRecord {
                text,
                author_name,
                author_url,
                tags,
                author_details: AuthorDetails::default(),
            }
        })
        .collect()
}

/// Parse the enrichment fields from an author detail page.
pub fn extract_author_details(doc: &Html) -> AuthorDetails {
    let bio_selector = Selector::parse("div.author-description").unwrap();
    let born_date_selector = Selector::parse("span.author-born-date").unwrap();
    let born_location_selector = Selector::parse("span.author-born-location").unwrap();
    let death_date_selector = Selector::parse("span.author-death-date").unwrap();

    let text_of = |selector: &Selector| {
        doc.select(selector)
            .next()
            .map(|tag| tag.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| DEFAULT_AUTHOR_FIELD.to_string())
    };

    AuthorDetails {
        bio: text_of(&bio_selector),
        born_date: text_of(&born_date_selector),
        born_location: text_of(&born_location_selector),
        death_date: text_of(&death_date_selector),
    }
}
