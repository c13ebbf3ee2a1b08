//! Command handlers

pub mod config;
pub mod list;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::Config;
use crate::fetcher::HttpFetcher;
use crate::store::{CountryStore, StoreEvent};
use crate::view::ListView;

/// Build a store over the configured source
pub fn open_store(config: &Config) -> Result<CountryStore<HttpFetcher>> {
    let fetcher = HttpFetcher::new(config.source.timeout())?;
    Ok(CountryStore::new(fetcher, config.source.url.clone()))
}

/// Hand every pending store event to the view
pub fn drain_events(events: &mut UnboundedReceiver<StoreEvent>, view: &mut ListView) {
    while let Ok(event) = events.try_recv() {
        view.apply(event);
    }
}
