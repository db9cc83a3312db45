use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/events", get(handlers::events))
        .route("/api/candles/:index", post(handlers::light_candle))
        .route("/api/balloons/:index", post(handlers::pop_balloon))
        .route("/api/celebrate", post(handlers::celebrate))
        .route("/api/viewport", post(handlers::viewport))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
