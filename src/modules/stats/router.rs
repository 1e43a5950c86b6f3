use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{admin_stats, seller_stats};

pub fn init_stats_router() -> Router<AppState> {
    Router::new()
        .route("/seller", get(seller_stats))
        .route("/admin", get(admin_stats))
}
