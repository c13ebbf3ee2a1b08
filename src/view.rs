//! Text rendering of the country list
//!
//! `ListView` is the display side of the store: it keeps the last state and
//! list it was handed and renders them as plain text. List events may arrive
//! without a surrounding state change (search), so the two are tracked
//! independently.

use crate::country::Country;
use crate::store::{FetchState, StoreEvent};

/// Hint shown where a search bar would be
pub const SEARCH_PLACEHOLDER: &str = "Search by name or capital";

/// Renders store publications
#[derive(Debug, Default)]
pub struct ListView {
    state: FetchState,
    items: Vec<Country>,
    show_region: bool,
}

impl ListView {
    pub fn new(show_region: bool) -> Self {
        Self {
            show_region,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn items(&self) -> &[Country] {
        &self.items
    }

    /// Apply one publication
    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::StateChanged(state) => self.state = state,
            StoreEvent::ListChanged(items) => self.items = items,
        }
    }

    /// Render a single row: "Name, Region  CODE" with the capital below
    pub fn render_cell(&self, country: &Country) -> String {
        let title = if self.show_region {
            format!("{}, {}", country.name, country.region)
        } else {
            country.name.clone()
        };
        format!("{:<48} {}\n    {}", title, country.code, country.capital)
    }

    /// Render the current state and list
    pub fn render(&self) -> String {
        match &self.state {
            FetchState::Idle => String::new(),
            FetchState::Loading => self.state.description().to_string(),
            FetchState::Error(message) => format!(
                "Something went wrong\n{}\nType ':retry' to try again.",
                message
            ),
            FetchState::Loaded if self.items.is_empty() => "No matches".to_string(),
            FetchState::Loaded => self
                .items
                .iter()
                .map(|c| self.render_cell(c))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
