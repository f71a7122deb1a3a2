//! Page fetching.
//!
//! Listing pages are rendered in a headless Chromium session because the
//! poster grid is filled in by script; film pages are served complete and
//! only need a plain GET. Both paths present a desktop user agent.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use reqwest::header;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::error::ScrapeError;

/// Spoofed desktop user agent sent on every fetch.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Maximum time for one rendered navigation, load event included.
const NAV_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for plain HTTP fetches of film pages.
const STATIC_TIMEOUT: Duration = Duration::from_secs(30);

/// Document source for the ingestion pipeline.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Render a listing page and return the full document text after the
    /// load lifecycle event.
    async fn render_page(&self, url: &str) -> Result<String, ScrapeError>;

    /// Plain GET for pages that need no script execution.
    async fn fetch_static(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Headless-Chromium fetcher with a reqwest client for static pages.
pub struct BrowserFetcher {
    browser: Browser,
    handler_task: JoinHandle<()>,
    http: reqwest::Client,
}

impl BrowserFetcher {
    /// Launch the browser and spawn its event handler loop.
    pub async fn launch() -> Result<Self, ScrapeError> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(ScrapeError::Browser)?;
        let (browser, mut handler) = Browser::launch(config).await?;
        // The handler stream must be polled for the browser to make progress.
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });

        let http = reqwest::Client::builder()
            .timeout(STATIC_TIMEOUT)
            .build()?;

        Ok(Self {
            browser,
            handler_task,
            http,
        })
    }

    /// Shut the browser down and stop the handler loop.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            log::debug!("Browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            log::debug!("Browser wait failed: {e}");
        }
        self.handler_task.abort();
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn render_page(&self, url: &str) -> Result<String, ScrapeError> {
        let page = self.browser.new_page("about:blank").await?;
        page.set_user_agent(USER_AGENT).await?;

        let rendered = tokio::time::timeout(NAV_TIMEOUT, async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            page.content().await
        })
        .await;

        // Close the tab before reporting the outcome; leaked tabs pile up
        // across a long pagination walk.
        if let Err(e) = page.close().await {
            log::debug!("Page close failed for {url}: {e}");
        }

        match rendered {
            Ok(Ok(html)) => Ok(html),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(ScrapeError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    async fn fetch_static(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .http
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.text().await?)
    }
}
