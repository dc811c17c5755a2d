use scraper::{Html, Selector};
use serde::Serialize;

use super::join_url;

pub const DEFAULT_FIELD: &str = "";

/// One job posting from a listing page. `date_posted` and `apply_url` hold
/// the raw extracted values until the normalizer canonicalizes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date_posted: Option<String>,
    pub apply_url: Option<String>,
    pub description: String,
    pub contract_type: ContractType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::FullTime => "Full-Time",
            ContractType::PartTime => "Part-Time",
            ContractType::Contract => "Contract",
            ContractType::Unknown => "Unknown",
        }
    }
}

impl JobRecord {
    pub fn natural_key(&self) -> (String, String, String) {
        (
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
        )
    }
}

/// Extract one record per `div.card-content` on a listing page.
pub fn extract_jobs(doc: &Html, page_url: &str) -> Vec<JobRecord> {
    let card_selector = Selector::parse("div.card-content").unwrap();
    let title_selector = Selector::parse("h2.title").unwrap();
    let company_selector = Selector::parse("h3.company").unwrap();
    let location_selector = Selector::parse("p.location").unwrap();
    let time_selector = Selector::parse("time").unwrap();
    let a_tag_selector = Selector::parse("a").unwrap();
    let description_selector = Selector::parse("p.description").unwrap();

    let text_of = |card: scraper::ElementRef, selector: &Selector| {
        card.select(selector)
            .next()
            .map(|tag| tag.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| DEFAULT_FIELD.to_string())
    };

    doc.select(&card_selector)
        .map(|card| {
            let date_posted = card
                .select(&time_selector)
                .next()
                .map(|tag| tag.text().collect::<String>().trim().to_string());

            // The card carries two footer links; the apply one is labeled "Apply".
            let apply_url = card
                .select(&a_tag_selector)
                .find(|a_tag| a_tag.text().collect::<String>().trim() == "Apply")
                .and_then(|a_tag| a_tag.value().attr("href"))
                .and_then(|href| join_url(page_url, href));

            JobRecord {
                title: text_of(card, &title_selector),
                company: text_of(card, &company_selector),
                location: text_of(card, &location_selector),
                date_posted,
                apply_url,
                description: text_of(card, &description_selector),
                contract_type: ContractType::Unknown,
            }
        })
        .collect()
}
