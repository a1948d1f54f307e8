use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::server::{
    controller::verification::{get_verification_context, verify_wallet},
    state::AppState,
};

/// Routes used by the wallet-connection page.
///
/// The page is served from another origin, so CORS is permissive.
pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/verification-context", get(get_verification_context))
        .route("/api/verify-wallet", post(verify_wallet))
        .layer(cors)
}
