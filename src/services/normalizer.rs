use std::collections::HashSet;
use std::hash::Hash;

use regex::Regex;
use url::Url;

use crate::domain::job::{ContractType, JobRecord};

/// Extract a strict YYYY-MM-DD date from free text, else nothing.
pub fn canonical_date(raw: &str) -> Option<String> {
    let pattern = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    pattern.find(raw).map(|m| m.as_str().to_string())
}

/// First-match classification over a fixed priority order.
pub fn classify_contract(description: &str) -> ContractType {
    let desc = description.to_lowercase();
    if desc.contains("full-time") {
        ContractType::FullTime
    } else if desc.contains("part-time") {
        ContractType::PartTime
    } else if desc.contains("contract") {
        ContractType::Contract
    } else {
        ContractType::Unknown
    }
}

/// A URL is valid iff it parses with both a scheme and a non-empty host.
pub fn validate_url(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(parsed) => match parsed.host_str() {
            Some("") | None => None,
            Some(_) => Some(raw.to_string()),
        },
        Err(_) => None,
    }
}

/// Stable first-wins dedup: keeps the first record for each key in input
/// order, drops the rest.
pub fn dedup_by_key<R, K, F>(records: Vec<R>, key_of: F) -> Vec<R>
where
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(key_of(record)))
        .collect()
}

/// Post-process accumulated jobs: canonical dates, contract classification,
/// URL validation, then composite-key dedup, in that order.
pub fn normalize_jobs(mut jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    for job in jobs.iter_mut() {
        job.date_posted = job.date_posted.as_deref().and_then(canonical_date);
        job.contract_type = classify_contract(&job.description);
        job.apply_url = job.apply_url.as_deref().and_then(validate_url);
    }

    dedup_by_key(jobs, |job| job.natural_key())
}
