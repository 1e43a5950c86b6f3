use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_own_store, list_booksellers, transition_approval};

/// Routes reachable by the bookseller themself.
pub fn init_booksellers_router() -> Router<AppState> {
    Router::new().route("/store", get(get_own_store))
}

/// Admin-only approval workflow routes; the caller nests these behind the
/// admin role layer.
pub fn init_booksellers_admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_booksellers))
        .route("/{id}/approval", post(transition_approval))
}
