use std::{sync::Arc, time::Duration};

use anyhow::Context;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use log::{debug, info};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use typed_builder::TypedBuilder;
use url::Url;

/// Something that can load a page and hand out its current rendered markup.
pub trait PageSource {
    fn navigate(&mut self, url: &Url) -> anyhow::Result<()>;
    /// Serialized DOM as it is rendered right now.
    fn content(&mut self) -> anyhow::Result<String>;
}

#[serde_as]
#[derive(Clone, Debug, TypedBuilder, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    #[builder(default = true)]
    pub headless: bool,
    /// Chrome refuses to start sandboxed as root inside most containers.
    #[builder(default = true)]
    pub sandbox: bool,
    /// Remote debugging port; picked automatically if unset.
    #[builder(default)]
    pub port: Option<u16>,
    #[builder(default = Duration::from_secs(800))]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub page_load_timeout: Duration,
    /// The browser is shut down after this long without any DevTools event.
    #[builder(default = Duration::from_secs(900))]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub idle_timeout: Duration,
}
impl Default for BrowserOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A Chromium process with the single tab every lookup goes through.
/// The process is terminated when the session is dropped.
pub struct ChromeSession {
    tab: Arc<Tab>,
    // Declared last so that it is dropped after the tab.
    _browser: Browser,
}
impl ChromeSession {
    pub fn launch(options: &BrowserOptions) -> anyhow::Result<Self> {
        let launch_options = LaunchOptionsBuilder::default()
            .headless(options.headless)
            .sandbox(options.sandbox)
            .port(options.port)
            .idle_browser_timeout(options.idle_timeout)
            .build()?;
        let browser =
            Browser::new(launch_options).context("Failed to start the browser session")?;
        let tab = browser.new_tab().context("Failed to open a browser tab")?;
        tab.set_default_timeout(options.page_load_timeout);
        info!(
            "Browser session started (headless: {}, page load timeout: {:?})",
            options.headless, options.page_load_timeout
        );
        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    pub fn close(self) {
        if let Err(e) = self.tab.close(true) {
            debug!("Failed to close the tab cleanly: {e:#}");
        }
        info!("Browser session closed");
    }
}
impl PageSource for ChromeSession {
    fn navigate(&mut self, url: &Url) -> anyhow::Result<()> {
        self.tab
            .navigate_to(url.as_str())?
            .wait_until_navigated()
            .with_context(|| format!("While loading {url}"))?;
        Ok(())
    }

    fn content(&mut self) -> anyhow::Result<String> {
        self.tab.get_content()
    }
}
