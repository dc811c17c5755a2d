pub mod book_scraper;
pub mod enricher;
pub mod fetcher;
pub mod job_scraper;
pub mod normalizer;
pub mod quote_scraper;
pub mod sink;
pub mod stats;
pub mod walker;

pub use book_scraper::*;
pub use enricher::*;
pub use fetcher::*;
pub use job_scraper::*;
pub use normalizer::*;
pub use quote_scraper::*;
pub use sink::*;
pub use stats::*;
pub use walker::*;
