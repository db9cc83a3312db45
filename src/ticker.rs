use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// A periodic task that can be stopped from the outside.
///
/// The first tick fires one `period` after spawning. The task ends when the
/// step returns [`ControlFlow::Break`], when [`TickerHandle::cancel`] is
/// called, or when the handle is dropped.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn spawn<F, Fut>(period: Duration, mut step: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if step().await.is_break() {
                    debug!("ticker finished");
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn cancel(&self) {
        if !self.task.is_finished() {
            debug!("ticker cancelled");
        }
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
