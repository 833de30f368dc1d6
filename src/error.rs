use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("File error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    #[error("Browser protocol error")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("Timed out after {timeout:?} waiting for {what}")]
    WaitTimeout { what: String, timeout: Duration },
}
