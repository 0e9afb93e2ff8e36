pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod validator;

use crate::store::Store;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state available to all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub environment: String,
}

impl axum::extract::FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
