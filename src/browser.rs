//! [`PageFetcher`] backed by a Chromium instance driven over CDP.

use crate::{CrawlerError, Credentials, FetcherOptions, PageFetcher};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

const LOGIN_ID: &str = "#login-id";
const PASSWORD: &str = "#password";
const LOGIN_BUTTON: &str = "#login-button";

pub struct BrowserFetcher {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    options: FetcherOptions,
}

impl BrowserFetcher {
    pub async fn launch(options: FetcherOptions) -> Result<Self, CrawlerError> {
        info!("Launching browser (headless: {})", options.headless);

        let mut builder = BrowserConfig::builder();
        builder = if options.headless {
            builder.new_headless_mode()
        } else {
            builder.with_head()
        };
        if let Some(path) = &options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(|e| {
            error!("Invalid browser config: {}", e);
            CrawlerError::Browser(e)
        })?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        debug!("Browser ready");

        Ok(BrowserFetcher {
            browser,
            page,
            handler,
            options,
        })
    }

    /// Polls `condition` until it holds, failing with
    /// [`CrawlerError::WaitTimeout`] once `wait_timeout` has elapsed.
    pub async fn wait_until<F, Fut>(&self, what: &str, mut condition: F) -> Result<(), CrawlerError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = bool> + Send,
    {
        let timeout = self.options.wait_timeout;
        let poll_interval = self.options.poll_interval;
        tokio::time::timeout(timeout, async {
            while !condition().await {
                tokio::time::sleep(poll_interval).await;
            }
        })
        .await
        .map_err(|_| {
            error!("Timed out waiting for {}", what);
            CrawlerError::WaitTimeout {
                what: what.to_string(),
                timeout,
            }
        })
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<(), CrawlerError> {
        let page = &self.page;
        self.wait_until(selector, || async move {
            page.find_element(selector).await.is_ok()
        })
        .await
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), CrawlerError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| CrawlerError::MissingElement(selector.to_string()))?
            .click()
            .await?
            .type_str(text)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PageFetcher for BrowserFetcher {
    async fn login(
        &mut self,
        credentials: &Credentials,
        login_url: &str,
    ) -> Result<(), CrawlerError> {
        info!("Logging in at {}", login_url);
        self.page.goto(login_url).await?;
        self.wait_for_selector(LOGIN_ID).await?;

        self.type_into(LOGIN_ID, &credentials.login_id).await?;
        self.type_into(PASSWORD, &credentials.password).await?;
        self.page
            .find_element(LOGIN_BUTTON)
            .await
            .map_err(|_| CrawlerError::MissingElement(LOGIN_BUTTON.to_string()))?
            .click()
            .await?;

        let page = &self.page;
        self.wait_until("login redirect", || async move {
            matches!(page.url().await, Ok(Some(url)) if !url.starts_with(login_url))
        })
        .await?;
        info!("Logged in as {}", credentials.login_id);
        Ok(())
    }

    async fn fetch(&mut self, url: &str, ready_selector: &str) -> Result<String, CrawlerError> {
        self.page.goto(url).await?;
        let page = &self.page;
        self.wait_until("document ready", || async move {
            let ready = page.evaluate("document.readyState === 'complete'").await;
            matches!(ready.ok().map(|r| r.into_value::<bool>()), Some(Ok(true)))
        })
        .await?;
        self.wait_for_selector(ready_selector).await?;
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) -> Result<(), CrawlerError> {
        debug!("Closing browser");
        self.browser.close().await?;
        self.browser.wait().await?;
        self.handler.abort();
        Ok(())
    }
}
