use clap::{Parser, Subcommand, ValueEnum};
use putnam_scraper::aops::AopsCrawler;
use putnam_scraper::browser::BrowserFetcher;
use putnam_scraper::config::{DEFAULT_ARCHIVE_PATH, DEFAULT_LINKS_PATH, DEFAULT_LOGIN_URL};
use putnam_scraper::http::HttpFetcher;
use putnam_scraper::normalize::{self, DEFAULT_BUCKET_THRESHOLD};
use putnam_scraper::{persistent, Collector, CollectorConfig, Credentials, FetcherOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "putnam-scraper", version, about = "Scrape and clean Putnam problem statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in, visit every link and write a fresh archive
    Collect {
        /// JSON array of topic URLs
        #[arg(long, default_value = DEFAULT_LINKS_PATH)]
        links: PathBuf,

        #[arg(long, default_value = DEFAULT_ARCHIVE_PATH)]
        output: PathBuf,

        #[arg(long, env = "LOGIN_ID", default_value = "", hide_env_values = true)]
        login_id: String,

        #[arg(long, env = "PASSWORD", default_value = "", hide_env_values = true)]
        password: String,

        #[arg(long, default_value = DEFAULT_LOGIN_URL)]
        login_url: String,

        #[arg(long, value_enum, default_value_t = FetcherKind::Browser)]
        fetcher: FetcherKind,

        /// Show the browser window
        #[arg(long)]
        headful: bool,

        /// Chromium executable to launch instead of the detected one
        #[arg(long)]
        chrome: Option<PathBuf>,

        #[arg(long, default_value = "20")]
        wait_timeout_secs: u64,
    },

    /// Tighten whitespace between inline math and following punctuation
    FixSpacing {
        #[arg(long, default_value = DEFAULT_ARCHIVE_PATH)]
        archive: PathBuf,
    },

    /// Cut every problem statement at its first "Solution"
    TruncateSolutions {
        #[arg(long, default_value = DEFAULT_ARCHIVE_PATH)]
        archive: PathBuf,
    },

    /// Print the years holding more problems than expected
    Audit {
        #[arg(long, default_value = DEFAULT_ARCHIVE_PATH)]
        archive: PathBuf,

        #[arg(long, default_value_t = DEFAULT_BUCKET_THRESHOLD)]
        threshold: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FetcherKind {
    Browser,
    Http,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info,chromiumoxide=warn"
                    .into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    match Cli::parse().command {
        Command::Collect {
            links,
            output,
            login_id,
            password,
            login_url,
            fetcher,
            headful,
            chrome,
            wait_timeout_secs,
        } => {
            let config = CollectorConfig {
                credentials: Credentials { login_id, password },
                login_url,
                input_path: links,
                output_path: output,
            };
            let options = FetcherOptions {
                headless: !headful,
                chrome_executable: chrome,
                wait_timeout: Duration::from_secs(wait_timeout_secs),
                ..FetcherOptions::default()
            };

            let report = match fetcher {
                FetcherKind::Browser => {
                    let fetcher = BrowserFetcher::launch(options).await?;
                    Collector::new(config, AopsCrawler, fetcher).collect().await?
                }
                FetcherKind::Http => {
                    let fetcher = HttpFetcher::new(&options)?;
                    Collector::new(config, AopsCrawler, fetcher).collect().await?
                }
            };
            if report.archive.is_empty() {
                warn!("No year buckets collected");
            }
            if !report.skipped.is_empty() {
                info!("Skipped {} links without a year", report.skipped.len());
            }
        }

        Command::FixSpacing { archive } => {
            normalize::fix_spacing_file(&archive)?;
            info!("Spaces after inline math and before punctuation have been removed.");
        }

        Command::TruncateSolutions { archive } => {
            let truncated = normalize::truncate_solutions_file(&archive)?;
            info!("Truncated {} problems", truncated.len());
        }

        Command::Audit { archive, threshold } => {
            let archive = persistent::read_archive(&archive)?;
            for year in normalize::oversized_buckets(&archive, threshold) {
                println!("{}", year);
            }
        }
    }

    Ok(())
}
