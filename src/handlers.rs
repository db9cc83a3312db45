use crate::errors::AppError;
use crate::models::{Snapshot, ViewportRequest};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html,
    },
    Json,
};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.widget().await?.snapshot().await;
    Ok(Html(render_index(&state.config, &snapshot)))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.widget().await?.snapshot().await))
}

/// Streams one `snapshot` event per change, starting with the current one.
/// The stream ends when the card is torn down.
pub async fn events(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let changes = state.widget().await?.subscribe().await;
    let stream = WatchStream::new(changes)
        .map(|snapshot| Event::default().event("snapshot").json_data(snapshot));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub async fn light_candle(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.widget().await?.light_candle(index).await?))
}

pub async fn pop_balloon(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.widget().await?.pop_balloon(index).await?))
}

pub async fn celebrate(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    Ok(Json(state.widget().await?.celebrate().await?))
}

pub async fn viewport(
    State(state): State<AppState>,
    Json(payload): Json<ViewportRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let widget = state.widget().await?;
    Ok(Json(widget.resize(payload.width, payload.height).await))
}

pub async fn reset(State(state): State<AppState>) -> Json<Snapshot> {
    info!("resetting card");
    Json(state.remount().await)
}
