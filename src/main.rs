use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::info;
use zinc_vendors::config::ScraperConfig;
use zinc_vendors_utils::fs_toml_util::read_toml;

/// Collects the vendors and supplier codes of ZINC substances listed in a CSV file.
#[derive(Parser)]
struct Opts {
    /// CSV file whose first column holds the substance identifiers.
    input_csv: PathBuf,
    /// TOML file with scraper settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Substance page URL with an `{id}` placeholder.
    #[arg(long)]
    url_template: Option<String>,
    /// Seconds to wait for the vendor listing of each page.
    #[arg(long)]
    ready_timeout: Option<u64>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Remote debugging port of the browser.
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    no_sandbox: bool,
    /// Show the browser window.
    #[arg(long)]
    headful: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();
    let opts = Opts::parse();

    let mut config = match &opts.config {
        Some(path) => read_toml::<ScraperConfig>(path)?,
        None => ScraperConfig::default(),
    };
    if let Some(url_template) = opts.url_template {
        config.url_template = url_template;
    }
    if let Some(secs) = opts.ready_timeout {
        config.ready_timeout = Duration::from_secs(secs);
    }
    if let Some(output_dir) = opts.output_dir {
        config.output_dir = output_dir;
    }
    if opts.port.is_some() {
        config.browser.port = opts.port;
    }
    if opts.no_sandbox {
        config.browser.sandbox = false;
    }
    if opts.headful {
        config.browser.headless = false;
    }

    let report = zinc_vendors::run(&config, &opts.input_csv)?;
    info!("Done: {}", report.summary);
    println!("{}", report.output.display());
    Ok(())
}
