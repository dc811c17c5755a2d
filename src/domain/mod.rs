pub mod book;
pub mod job;
pub mod quote;

use url::Url;

/// Resolve an href against the page it was found on. A base or href that
/// does not resolve to an absolute URL yields `None`.
pub fn join_url(base: &str, href: &str) -> Option<String> {
    match Url::parse(base) {
        Ok(base_url) => base_url.join(href).ok().map(|u| u.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn join_url_resolves_relative_href() {
        let result = join_url("http://books.toscrape.com/index.html", "catalogue/page-2.html");
        assert_eq!(
            result,
            Some("http://books.toscrape.com/catalogue/page-2.html".to_string())
        );
    }

    #[test]
    fn join_url_keeps_absolute_href() {
        let result = join_url("http://quotes.toscrape.com/", "http://example.com/a");
        assert_eq!(result, Some("http://example.com/a".to_string()));
    }

    #[test]
    fn join_url_rejects_relative_base() {
        assert_eq!(join_url("/page-2.html", "next.html"), None);
    }
}
