use scraper::Html;
use tracing::{debug, info, warn};

pub mod aops;
pub mod browser;
pub mod config;
pub mod http;
pub mod normalize;
pub mod persistent;

mod data;
mod error;
mod utils;

pub use config::{CollectorConfig, Credentials, FetcherOptions};
pub use data::{ProblemArchive, ProblemRecord};
pub use error::CrawlerError;

/// Site-specific knowledge: where a page's problems live and which bucket a
/// URL belongs to.
pub trait Crawler {
    /// Bucket key for `url`, or `None` when the URL should be skipped.
    fn year_key(&self, url: &str) -> Option<String>;
    fn crawl(&self, doc: &Html) -> Vec<ProblemRecord>;
    /// Selector whose presence means a fetched page has finished rendering.
    fn ready_selector(&self) -> &str;
}

#[async_trait::async_trait]
pub trait PageFetcher {
    async fn login(&mut self, credentials: &Credentials, login_url: &str)
        -> Result<(), CrawlerError>;
    async fn fetch(&mut self, url: &str, ready_selector: &str) -> Result<String, CrawlerError>;
    async fn close(&mut self) -> Result<(), CrawlerError>;
}

#[derive(Debug, Default)]
pub struct CollectReport {
    pub archive: ProblemArchive,
    /// URLs for which no year key could be resolved.
    pub skipped: Vec<String>,
}

pub struct Collector<C, F> {
    config: CollectorConfig,
    crawler: C,
    fetcher: F,
}

impl<C, F> Collector<C, F>
where
    C: Crawler,
    F: PageFetcher,
{
    pub fn new(config: CollectorConfig, crawler: C, fetcher: F) -> Self {
        Collector {
            config,
            crawler,
            fetcher,
        }
    }

    /// Logs in, visits every link from the input file and writes a fresh
    /// archive to the output file. The first fetch or login failure aborts
    /// the run before anything is written.
    pub async fn collect(&mut self) -> Result<CollectReport, CrawlerError> {
        let links = persistent::read_links(&self.config.input_path)?;
        info!("Initial queue length: {}", links.len());

        let result = self.visit_all(&links).await;
        if let Err(e) = self.fetcher.close().await {
            warn!("Failed to close page fetcher: {}", e);
        }
        let report = result?;

        persistent::write_archive(&self.config.output_path, &report.archive)?;
        info!(
            "Scraping complete. {} problems in {} buckets saved to {}",
            report.archive.record_count(),
            report.archive.len(),
            self.config.output_path.display()
        );
        Ok(report)
    }

    async fn visit_all(&mut self, links: &[String]) -> Result<CollectReport, CrawlerError> {
        if self.config.credentials.is_empty() {
            warn!("Login id or password is empty");
        }
        self.fetcher
            .login(&self.config.credentials, &self.config.login_url)
            .await?;

        let mut report = CollectReport::default();
        for url in links {
            let Some(year) = self.crawler.year_key(url) else {
                warn!("Could not extract year from {}", url);
                report.skipped.push(url.clone());
                continue;
            };

            debug!("Visit {}", url);
            let html = self
                .fetcher
                .fetch(url, self.crawler.ready_selector())
                .await?;

            let records = {
                let doc = Html::parse_document(&html);
                self.crawler.crawl(&doc)
            };
            info!("[{}] {} problems from {}", year, records.len(), url);
            report.archive.bucket_mut(year).extend(records);
        }
        Ok(report)
    }
}
