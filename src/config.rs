use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOGIN_URL: &str = "https://login.artofproblemsolving.com/login";
pub const DEFAULT_LINKS_PATH: &str = "links.json";
pub const DEFAULT_ARCHIVE_PATH: &str = "putnam_problems.json";

#[derive(Clone, Default)]
pub struct Credentials {
    pub login_id: String,
    pub password: String,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.login_id.is_empty() || self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login_id", &self.login_id)
            .field("password", &"***")
            .finish()
    }
}

/// Everything a collection run needs, fixed at construction time.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub credentials: Credentials,
    pub login_url: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            credentials: Credentials::default(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            input_path: PathBuf::from(DEFAULT_LINKS_PATH),
            output_path: PathBuf::from(DEFAULT_ARCHIVE_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    /// Upper bound for any single readiness wait.
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        FetcherOptions {
            headless: true,
            chrome_executable: None,
            wait_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(250),
        }
    }
}
