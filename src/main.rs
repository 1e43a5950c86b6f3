use std::net::SocketAddr;

use bookmarket::logging::init_tracing;
use bookmarket::router::init_router;
use bookmarket::state::init_app_state;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;

    sqlx::migrate!()
        .run(&state.db)
        .await
        .expect("Failed to run database migrations");

    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind port 3000");

    info!("Server running on http://localhost:3000");
    info!("Swagger UI available at http://localhost:3000/swagger-ui");
    info!("Scalar UI available at http://localhost:3000/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
