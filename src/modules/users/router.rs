use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    change_password, deactivate_profile, get_profile, list_users, set_user_status, update_profile,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(deactivate_profile),
        )
        .route("/profile/change-password", post(change_password))
        .route("/{id}/status", patch(set_user_status))
}
