use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use log::trace;
use scraper::{Html, Selector};

use crate::{
    browser::PageSource,
    layout::{self, Layout, PageState},
    scrape::LookupError,
};

/// A page that reached a ready state, with the snapshot that proved it.
#[derive(Debug)]
pub struct ReadyPage {
    pub layout: Layout,
    pub html: Html,
}

/// Polls the current page until one of the ready detectors fires.  The page is
/// inspected at least once, even with a zero timeout.
pub fn wait_until_ready<S: PageSource + ?Sized>(
    source: &mut S,
    spinner: &Selector,
    timeout: Duration,
    interval: Duration,
) -> Result<ReadyPage, LookupError> {
    let deadline = Instant::now() + timeout;
    let mut poll = 0u32;
    loop {
        poll += 1;
        let content = source
            .content()
            .map_err(|e| LookupError::Navigation(format!("{e:#}")))?;
        let html = Html::parse_document(&content);
        let state = layout::detect(&html, spinner);
        trace!("Poll #{poll}: {state}");
        if let PageState::Ready(layout) = state {
            return Ok(ReadyPage { layout, html });
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(LookupError::Timeout(timeout, state));
        }
        sleep(interval.min(deadline - now));
    }
}
