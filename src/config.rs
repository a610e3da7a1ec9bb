use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, bail, Context};
use scraper::Selector;
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds, DurationSeconds};
use typed_builder::TypedBuilder;
use url::Url;

use crate::{browser::BrowserOptions, schema::MoleculeId};

pub const ID_PLACEHOLDER: &str = "{id}";
pub const DEFAULT_URL_TEMPLATE: &str = "https://cartblanche22.docking.org/substance/{id}";
pub const LEGACY_URL_TEMPLATE: &str = "https://zinc.docking.org/substances/{id}";

#[serde_as]
#[derive(Clone, Debug, TypedBuilder, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    #[builder(default = DEFAULT_URL_TEMPLATE.to_owned(), setter(into))]
    pub url_template: String,
    #[builder(default = Duration::from_secs(35))]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub ready_timeout: Duration,
    #[builder(default = Duration::from_millis(500))]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub poll_interval: Duration,
    /// Container of the rendered application.
    #[builder(default = "#app".to_owned(), setter(into))]
    pub root_selector: String,
    #[builder(
        default = ".spinner-border, .spinner-grow, .spinner, .loading".to_owned(),
        setter(into)
    )]
    pub spinner_selector: String,
    #[builder(default = PathBuf::from("."), setter(into))]
    pub output_dir: PathBuf,
    #[builder(default)]
    pub browser: BrowserOptions,
}
impl Default for ScraperConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
impl ScraperConfig {
    /// Validates the template and selectors.
    pub fn compile(&self) -> anyhow::Result<LookupSettings> {
        Ok(LookupSettings {
            url_template: self.url_template.parse()?,
            ready_timeout: self.ready_timeout,
            poll_interval: self.poll_interval,
            root: parse_selector(&self.root_selector)?,
            spinner: parse_selector(&self.spinner_selector)?,
        })
    }
}

fn parse_selector(s: &str) -> anyhow::Result<Selector> {
    Selector::parse(s).map_err(|e| anyhow!("Invalid CSS selector {s:?}: {e:?}"))
}

/// Everything a single lookup needs, checked once before the run.
#[derive(Debug)]
pub struct LookupSettings {
    pub url_template: UrlTemplate,
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
    pub root: Selector,
    pub spinner: Selector,
}

/// A URL with an `{id}` placeholder.
#[derive(Clone, Debug)]
pub struct UrlTemplate(String);
impl std::str::FromStr for UrlTemplate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if !s.contains(ID_PLACEHOLDER) {
            bail!("URL template {s:?} does not contain {ID_PLACEHOLDER}");
        }
        let ret = Self(s.to_owned());
        ret.url_for(&"ZINC000000000001".to_owned().into())
            .with_context(|| format!("URL template {s:?} does not yield a valid URL"))?;
        Ok(ret)
    }
}
impl UrlTemplate {
    pub fn url_for(&self, id: &MoleculeId) -> anyhow::Result<Url> {
        let id: &str = id.as_ref();
        let url = self.0.replace(ID_PLACEHOLDER, &urlencoding::encode(id));
        Ok(Url::parse(&url)?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ScraperConfig, UrlTemplate, DEFAULT_URL_TEMPLATE, LEGACY_URL_TEMPLATE};

    #[test]
    fn substitutes_id() {
        let template: UrlTemplate = DEFAULT_URL_TEMPLATE.parse().unwrap();
        let url = template.url_for(&"ZINC001".to_owned().into()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://cartblanche22.docking.org/substance/ZINC001"
        );
        let template: UrlTemplate = LEGACY_URL_TEMPLATE.parse().unwrap();
        let url = template.url_for(&"ZINC 1/2".to_owned().into()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://zinc.docking.org/substances/ZINC%201%2F2"
        );
    }

    #[test]
    fn rejects_bad_templates() {
        assert!("https://example.org/substance/".parse::<UrlTemplate>().is_err());
        assert!("not a url/{id}".parse::<UrlTemplate>().is_err());
    }

    #[test]
    fn defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.ready_timeout, Duration::from_secs(35));
        assert_eq!(config.browser.page_load_timeout, Duration::from_secs(800));
        assert!(config.browser.headless);
        config.compile().unwrap();
    }

    #[test]
    fn from_toml() {
        let config: ScraperConfig = toml::from_str(
            r#"
            url_template = "https://zinc.docking.org/substances/{id}"
            ready_timeout = 10
            poll_interval = 250

            [browser]
            sandbox = false
            "#,
        )
        .unwrap();
        assert_eq!(config.url_template, super::LEGACY_URL_TEMPLATE);
        assert_eq!(config.ready_timeout, Duration::from_secs(10));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.root_selector, "#app");
        assert!(!config.browser.sandbox);
        assert!(config.browser.headless);
    }

    #[test]
    fn invalid_selector() {
        let config = ScraperConfig::builder().spinner_selector("div[").build();
        assert!(config.compile().is_err());
    }
}
