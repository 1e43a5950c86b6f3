use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{add_favorite, list_favorites, remove_favorite};

pub fn init_favorites_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{book_id}", delete(remove_favorite))
}
