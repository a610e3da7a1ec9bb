pub mod browser;
pub mod config;
pub mod layout;
pub mod parser;
pub mod schema;
pub mod scrape;
pub mod table;
pub mod text;
pub mod wait;

use std::path::{Path, PathBuf};

use log::info;

use crate::{
    browser::ChromeSession,
    config::ScraperConfig,
    scrape::{scrape_all, ScrapeSummary},
    table::ResultTable,
};

#[derive(Debug)]
pub struct RunReport {
    pub output: PathBuf,
    pub summary: ScrapeSummary,
}

/// Scrapes the vendors of every identifier in `input` and writes them into the
/// configured output directory.  Nothing is written if the browser fails to start.
pub fn run(config: &ScraperConfig, input: &Path) -> anyhow::Result<RunReport> {
    let settings = config.compile()?;
    let output = table::prepare_output(input, &config.output_dir)?;
    let ids = table::read_identifiers(input)?;
    info!("Read {} identifiers from {input:?}", ids.len());

    let mut session = ChromeSession::launch(&config.browser)?;
    let (rows, summary) = scrape_all(&mut session, &settings, &ids);
    session.close();

    ResultTable::from_rows(&rows)
        .deduplicated()
        .write_csv(&output)?;
    info!("Saved results to {output:?}");
    Ok(RunReport { output, summary })
}
