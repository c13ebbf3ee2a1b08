//! Fetch, cache and search a remote list of countries.
//!
//! The core is [`store::CountryStore`]: it drives a single [`fetcher::Fetcher`]
//! through the idle/loading/loaded/error lifecycle, keeps the decoded
//! [`country::Country`] list, and publishes state and list changes to its
//! subscribers. [`view::ListView`] and the [`cli`] module are the terminal
//! front end.

pub mod cli;
pub mod config;
pub mod country;
pub mod fetcher;
pub mod store;
pub mod view;
