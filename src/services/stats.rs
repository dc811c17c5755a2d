use std::hash::Hash;

use itertools::Itertools;

use crate::domain::book::BookRecord;
use crate::domain::quote::QuoteRecord;

/// Occurrence counts by key, most frequent first. Ties break on the key so
/// the order is deterministic.
pub fn count_by<R, K, F>(records: &[R], key_of: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Ord,
    F: Fn(&R) -> K,
{
    records
        .iter()
        .map(key_of)
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}

/// Mean price per rating value, ascending by rating.
pub fn average_price_by_rating(books: &[BookRecord]) -> Vec<(u8, f64)> {
    books
        .iter()
        .map(|book| (book.rating, book.price))
        .into_group_map()
        .into_iter()
        .map(|(rating, prices)| {
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            (rating, mean)
        })
        .sorted_by_key(|(rating, _)| *rating)
        .collect()
}

pub fn out_of_stock_count(books: &[BookRecord]) -> usize {
    books.iter().filter(|book| book.stock == 0).count()
}

/// Pearson correlation between rating and price. `None` when either series
/// has no variance or there are fewer than two books.
pub fn price_rating_correlation(books: &[BookRecord]) -> Option<f64> {
    if books.len() < 2 {
        return None;
    }

    let n = books.len() as f64;
    let mean_rating = books.iter().map(|b| b.rating as f64).sum::<f64>() / n;
    let mean_price = books.iter().map(|b| b.price).sum::<f64>() / n;

    let covariance = books
        .iter()
        .map(|b| (b.rating as f64 - mean_rating) * (b.price - mean_price))
        .sum::<f64>();
    let rating_variance = books
        .iter()
        .map(|b| (b.rating as f64 - mean_rating).powi(2))
        .sum::<f64>();
    let price_variance = books
        .iter()
        .map(|b| (b.price - mean_price).powi(2))
        .sum::<f64>();

    let denominator = (rating_variance * price_variance).sqrt();
    match denominator == 0.0 {
        true => None,
        false => Some(covariance / denominator),
    }
}

/// Most-used quote tags, most frequent first.
pub fn top_tags(quotes: &[QuoteRecord], limit: usize) -> Vec<(String, usize)> {
    quotes
        .iter()
        .flat_map(|quote| quote.tags.iter().cloned())
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::BookRecord;
    use crate::domain::quote::AuthorDetails;

    fn book(rating: u8, price: f64, stock: u32) -> BookRecord {
        BookRecord {
            title: String::new(),
            detail_url: String::new(),
            price,
            rating,
            main_category: String::new(),
            sub_category: String::new(),
            description: String::new(),
            stock,
            image_url: String::new(),
        }
    }

    #[test]
    fn count_by_orders_most_frequent_first() {
        let values = vec!["a", "b", "b", "c", "b", "a"];
        let counts = count_by(&values, |v| v.to_string());

        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn average_price_groups_by_rating() {
        let books = vec![book(1, 10.0, 5), book(1, 20.0, 0), book(3, 30.0, 2)];
        let averages = average_price_by_rating(&books);

        assert_eq!(averages, vec![(1, 15.0), (3, 30.0)]);
    }

    #[test]
    fn out_of_stock_counts_zero_stock_only() {
        let books = vec![book(1, 10.0, 5), book(2, 20.0, 0), book(3, 30.0, 0)];

        assert_eq!(out_of_stock_count(&books), 2);
    }

    #[test]
    fn correlation_of_perfectly_aligned_series_is_one() {
        let books = vec![book(1, 10.0, 1), book(2, 20.0, 1), book(3, 30.0, 1)];
        let r = price_rating_correlation(&books).unwrap();

        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_is_none_without_variance() {
        let books = vec![book(2, 10.0, 1), book(2, 20.0, 1)];

        assert_eq!(price_rating_correlation(&books), None);
        assert_eq!(price_rating_correlation(&[]), None);
    }

    #[test]
    fn top_tags_counts_across_quotes() {
        let quote = |tags: &[&str]| crate::domain::quote::QuoteRecord {
            text: String::new(),
            author_name: String::new(),
            author_url: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author_details: AuthorDetails::default(),
        };
        let quotes = vec![
            quote(&["life", "truth"]),
            quote(&["life"]),
            quote(&["humor"]),
        ];

        let tags = top_tags(&quotes, 2);

        assert_eq!(
            tags,
            vec![("life".to_string(), 2), ("humor".to_string(), 1)]
        );
    }
}
