//! Movie discovery service: a thin JSON API over the TMDB catalog, plus a
//! search-popularity ledger kept in an Appwrite collection that powers the
//! trending shelf.

pub mod appwrite;
pub mod config;
pub mod error;
pub mod genres;
pub mod images;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod tmdb;

use std::sync::Arc;

use crate::{config::Config, images::ImageUrls, ledger::SearchLedger, tmdb::TmdbClient};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: Arc<TmdbClient>,
    pub ledger: Arc<SearchLedger>,
    pub images: ImageUrls,
}
