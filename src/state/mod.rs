use crate::api::ApiClient;
use crate::models::SessionUser;
use crate::query::PostQuery;
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

/// Explicit app-wide state, provided as Leptos context at the root and
/// consumed with `expect_context`; nothing reads a process-wide store, so
/// tests and shells can construct their own.
///
/// All fields are arena-backed signals, so the whole struct is `Copy` and
/// event handlers can capture it freely.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Session identity; read-only for this crate (the shell writes it).
    pub current_user: RwSignal<Option<SessionUser>>,

    /// The cached "post" query of the detail view.
    pub post_query: PostQuery,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            current_user: RwSignal::new(load_user_from_storage()),
            post_query: PostQuery::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
