use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sites: SiteSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    pub books_base_url: String,
    pub quotes_base_url: String,
    pub jobs_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub directory: String,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("sites.books_base_url", "http://books.toscrape.com/")?
        .set_default("sites.quotes_base_url", "http://quotes.toscrape.com/")?
        .set_default(
            "sites.jobs_base_url",
            "https://realpython.github.io/fake-jobs/",
        )?
        .set_default("output.directory", ".")?
        .add_source(config::File::with_name("configuration").required(false))
        .build()?;

    settings.try_deserialize::<Settings>()
}
