use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{admin_login, login_user, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/admin/login", post(admin_login))
}
