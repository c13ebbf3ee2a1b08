//! Country store and the events it publishes
//!
//! The store owns the fetch lifecycle and the filtered view of the data.
//! Consumers observe it through two channels: state changes and list changes.

mod countries;

pub use countries::CountryStore;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::country::Country;

/// Lifecycle of the most recent fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl FetchState {
    /// Get a human-readable description of the state
    pub fn description(&self) -> &str {
        match self {
            FetchState::Idle => "Idle",
            FetchState::Loading => "Loading countries...",
            FetchState::Loaded => "Loaded",
            FetchState::Error(message) => message,
        }
    }

    /// Short lowercase name, as used in JSON output
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Loaded => "loaded",
            FetchState::Error(_) => "error",
        }
    }
}

/// A publication from the store, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The fetch state transitioned
    StateChanged(FetchState),

    /// The visible list was replaced
    ListChanged(Vec<Country>),
}

/// Handler for the state-change channel
pub type StateHandler = Box<dyn FnMut(&FetchState) + Send>;

/// Handler for the list-change channel
pub type ListHandler = Box<dyn FnMut(&[Country]) + Send>;

/// Build a handler pair that forwards both channels into one event stream.
///
/// Events arrive in the order the store published them.
pub fn event_channel() -> (StateHandler, ListHandler, UnboundedReceiver<StoreEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let list_tx = tx.clone();

    let on_state: StateHandler = Box::new(move |state| {
        // A dropped receiver just means nobody is watching anymore
        let _ = tx.send(StoreEvent::StateChanged(state.clone()));
    });
    let on_list: ListHandler = Box::new(move |list| {
        let _ = list_tx.send(StoreEvent::ListChanged(list.to_vec()));
    });

    (on_state, on_list, rx)
}
