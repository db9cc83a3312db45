use crate::config::CardConfig;
use crate::errors::AppError;
use crate::models::Snapshot;
use crate::widget::Widget;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CardConfig>,
    widget: Arc<RwLock<Option<Widget>>>,
}

impl AppState {
    pub fn new(config: CardConfig) -> Self {
        let widget = Widget::mount(&config);
        Self {
            config: Arc::new(config),
            widget: Arc::new(RwLock::new(Some(widget))),
        }
    }

    pub async fn widget(&self) -> Result<RwLockReadGuard<'_, Widget>, AppError> {
        RwLockReadGuard::try_map(self.widget.read().await, |slot| slot.as_ref())
            .map_err(|_| AppError::unavailable("card is not mounted"))
    }

    pub async fn remount(&self) -> Snapshot {
        let mut slot = self.widget.write().await;
        if let Some(old) = slot.take() {
            old.teardown().await;
        }
        let widget = Widget::mount(&self.config);
        let snapshot = widget.snapshot().await;
        *slot = Some(widget);
        snapshot
    }

    pub async fn unmount(&self) {
        if let Some(widget) = self.widget.write().await.take() {
            widget.teardown().await;
            info!("card unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remount_starts_from_zero() {
        let state = AppState::new(CardConfig::default());
        state.widget().await.unwrap().light_candle(0).await.unwrap();
        assert_eq!(state.widget().await.unwrap().snapshot().await.candles_lit, 1);

        let snapshot = state.remount().await;
        assert_eq!(snapshot.candles_lit, 0);
        assert!(!snapshot.celebrating);
        assert_eq!(state.widget().await.unwrap().snapshot().await.candles_lit, 0);
    }

    #[tokio::test]
    async fn unmounted_card_is_unavailable() {
        let state = AppState::new(CardConfig::default());
        state.unmount().await;
        let err = state.widget().await.err().unwrap();
        assert_eq!(err.status, axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
