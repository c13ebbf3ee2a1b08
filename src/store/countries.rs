//! Fetch lifecycle, cached dataset and search for the country list

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinError, JoinHandle};

use crate::country::{self, Country};
use crate::fetcher::{FetchError, Fetcher};
use crate::store::{event_channel, FetchState, ListHandler, StateHandler, StoreEvent};

/// Outcome of the spawned fetch task
type FetchOutcome = Result<Result<Vec<u8>, FetchError>, JoinError>;

/// Owns the country dataset and the filtered view over it.
///
/// A fetch started by [`load`](Self::load) runs on the tokio runtime, but its
/// result is only applied when the owner calls [`poll`](Self::poll) or
/// [`settle`](Self::settle). All mutation therefore happens on whatever task
/// owns the store.
pub struct CountryStore<F: Fetcher> {
    fetcher: Arc<F>,
    url: String,
    state: FetchState,
    /// Full dataset from the last successful load
    all_countries: Vec<Country>,
    /// Subset of `all_countries` matching the current search
    visible_countries: Vec<Country>,
    /// In-flight fetch, if any
    task: Option<JoinHandle<Result<Vec<u8>, FetchError>>>,
    on_state_change: Option<StateHandler>,
    on_list_change: Option<ListHandler>,
}

impl<F: Fetcher> CountryStore<F> {
    /// Create an idle store that will fetch from `url`
    pub fn new(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            url: url.into(),
            state: FetchState::Idle,
            all_countries: Vec::new(),
            visible_countries: Vec::new(),
            task: None,
            on_state_change: None,
            on_list_change: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn all_countries(&self) -> &[Country] {
        &self.all_countries
    }

    pub fn visible_countries(&self) -> &[Country] {
        &self.visible_countries
    }

    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }

    /// Set the state-change handler, replacing any previous one
    pub fn on_state_change(&mut self, handler: impl FnMut(&FetchState) + Send + 'static) {
        self.on_state_change = Some(Box::new(handler));
    }

    /// Set the list-change handler, replacing any previous one
    pub fn on_list_change(&mut self, handler: impl FnMut(&[Country]) + Send + 'static) {
        self.on_list_change = Some(Box::new(handler));
    }

    /// Route both channels into a single ordered event stream.
    ///
    /// Replaces any handlers set earlier.
    pub fn subscribe(&mut self) -> UnboundedReceiver<StoreEvent> {
        let (on_state, on_list, rx) = event_channel();
        self.on_state_change = Some(on_state);
        self.on_list_change = Some(on_list);
        rx
    }

    /// Start fetching the country list.
    ///
    /// Publishes `Loading` immediately. A fetch that is still in flight is
    /// aborted and its result will never be applied.
    pub fn load(&mut self) {
        if let Some(stale) = self.task.take() {
            tracing::debug!("Aborting in-flight fetch superseded by a new load");
            stale.abort();
        }

        self.set_state(FetchState::Loading);
        tracing::info!("Fetching countries from {}", self.url);

        let fetcher = Arc::clone(&self.fetcher);
        let url = self.url.clone();
        self.task = Some(tokio::spawn(async move { fetcher.get(&url).await }));
    }

    /// Try again after a failure; same as [`load`](Self::load)
    pub fn retry(&mut self) {
        tracing::info!("Retrying country fetch");
        self.load();
    }

    /// Recompute the visible list for a new search query.
    ///
    /// Blank or missing queries show everything. Never fetches and never
    /// touches the full dataset or the fetch state.
    pub fn update_search(&mut self, query: Option<&str>) {
        self.visible_countries = country::filter_countries(&self.all_countries, query);
        tracing::debug!(
            "Search {:?} matched {} of {} countries",
            query,
            self.visible_countries.len(),
            self.all_countries.len()
        );
        self.publish_list();
    }

    /// Apply the in-flight fetch result if it has finished.
    ///
    /// Returns `true` when an outcome was applied. Never blocks.
    pub fn poll(&mut self) -> bool {
        let Some(handle) = self.task.as_mut() else {
            return false;
        };

        if !handle.is_finished() {
            return false;
        }

        match handle.now_or_never() {
            Some(outcome) => {
                self.task = None;
                self.apply_outcome(outcome);
                true
            }
            None => {
                tracing::warn!("Fetch task not ready despite is_finished()");
                false
            }
        }
    }

    /// Wait for the in-flight fetch, if any, and apply its result
    pub async fn settle(&mut self) {
        if let Some(handle) = self.task.take() {
            let outcome = handle.await;
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let decoded = match outcome {
            Ok(Ok(bytes)) => country::decode_countries(&bytes).map_err(|e| e.to_string()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("Fetch task failed: {}", e)),
        };

        match decoded {
            Ok(countries) => {
                tracing::info!("Loaded {} countries", countries.len());
                self.all_countries = countries;
                self.visible_countries = self.all_countries.clone();
                self.set_state(FetchState::Loaded);
            }
            Err(message) => {
                tracing::warn!("Failed to load countries: {}", message);
                self.all_countries.clear();
                self.visible_countries.clear();
                self.set_state(FetchState::Error(message));
            }
        }

        self.publish_list();
    }

    fn set_state(&mut self, state: FetchState) {
        self.state = state;
        if let Some(handler) = self.on_state_change.as_mut() {
            handler(&self.state);
        }
    }

    fn publish_list(&mut self) {
        if let Some(handler) = self.on_list_change.as_mut() {
            handler(&self.visible_countries);
        }
    }
}

impl<F: Fetcher> Drop for CountryStore<F> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
