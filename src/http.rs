//! [`PageFetcher`] over plain HTTP. Only suits sites that serve finished,
//! pre-rendered HTML and accept a plain form login with `login-id` and
//! `password` fields; pages assembled by JavaScript need
//! [`BrowserFetcher`](crate::browser::BrowserFetcher). The session cookie set
//! by the login response is kept for later requests.

use crate::{CrawlerError, Credentials, FetcherOptions, PageFetcher};
use tracing::{debug, info};

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(options: &FetcherOptions) -> Result<Self, CrawlerError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(options.wait_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn login(
        &mut self,
        credentials: &Credentials,
        login_url: &str,
    ) -> Result<(), CrawlerError> {
        info!("Logging in at {}", login_url);
        let form = [
            ("login-id", credentials.login_id.as_str()),
            ("password", credentials.password.as_str()),
        ];
        self.client
            .post(login_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn fetch(&mut self, url: &str, _ready_selector: &str) -> Result<String, CrawlerError> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }

    async fn close(&mut self) -> Result<(), CrawlerError> {
        Ok(())
    }
}
