use crate::celebration::{CelebrationState, Tick};
use crate::config::{CardConfig, DEFAULT_TICK_MS};
use crate::errors::CelebrationError;
use crate::models::{Snapshot, Viewport};
use crate::ticker::TickerHandle;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

struct Shared {
    state: CelebrationState,
    viewport: Viewport,
    changes: watch::Sender<Snapshot>,
    ticker: Option<TickerHandle>,
}

impl Shared {
    fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.viewport)
    }

    fn publish(&self) {
        self.changes.send_replace(self.snapshot());
    }
}

pub struct Widget {
    shared: Arc<Mutex<Shared>>,
    tick: Duration,
}

impl Widget {
    pub fn mount(config: &CardConfig) -> Self {
        let state = CelebrationState::new(config.total_candles, config.total_balloons);
        let viewport = Viewport::default();
        let (changes, _) = watch::channel(Snapshot::capture(&state, viewport));
        info!(
            candles = config.total_candles,
            balloons = config.total_balloons,
            "card mounted"
        );
        // A zero period would panic inside the ticker task.
        let tick = if config.tick.is_zero() {
            warn!("tick period must be non-zero, using {DEFAULT_TICK_MS}ms");
            Duration::from_millis(DEFAULT_TICK_MS)
        } else {
            config.tick
        };
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state,
                viewport,
                changes,
                ticker: None,
            })),
            tick,
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.shared.lock().await.snapshot()
    }

    pub async fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.lock().await.changes.subscribe()
    }

    pub async fn light_candle(&self, index: usize) -> Result<Snapshot, CelebrationError> {
        let mut shared = self.shared.lock().await;
        match shared.state.light_candle(index) {
            Ok(true) => {
                debug!(index, lit = shared.state.candles_lit(), "candle lit");
                shared.publish();
            }
            Ok(false) => debug!(index, "candle click ignored"),
            Err(err) => {
                warn!("{err}");
                return Err(err);
            }
        }
        Ok(shared.snapshot())
    }

    pub async fn pop_balloon(&self, index: usize) -> Result<Snapshot, CelebrationError> {
        let mut shared = self.shared.lock().await;
        match shared.state.pop_balloon(index) {
            Ok(true) => {
                debug!(index, popped = shared.state.balloons_popped(), "balloon popped");
                shared.publish();
            }
            Ok(false) => debug!(index, "balloon click ignored"),
            Err(err) => {
                warn!("{err}");
                return Err(err);
            }
        }
        Ok(shared.snapshot())
    }

    pub async fn celebrate(&self) -> Result<Snapshot, CelebrationError> {
        let mut shared = self.shared.lock().await;
        if let Err(err) = shared.state.begin_celebration() {
            warn!("{err}");
            return Err(err);
        }
        info!(remaining = shared.state.candles_remaining(), "celebration started");
        shared.publish();

        if shared.state.candles_remaining() > 0 {
            let weak = Arc::downgrade(&self.shared);
            shared.ticker = Some(TickerHandle::spawn(self.tick, move || {
                let weak = weak.clone();
                async move {
                    let Some(inner) = weak.upgrade() else {
                        return ControlFlow::Break(());
                    };
                    let mut shared = inner.lock().await;
                    step(&mut shared)
                }
            }));
        }
        Ok(shared.snapshot())
    }

    pub async fn resize(&self, width: u32, height: u32) -> Snapshot {
        let mut shared = self.shared.lock().await;
        let viewport = Viewport { width, height };
        if shared.viewport != viewport {
            debug!(width, height, "viewport resized");
            shared.viewport = viewport;
            shared.publish();
        }
        shared.snapshot()
    }

    pub async fn is_ticking(&self) -> bool {
        let shared = self.shared.lock().await;
        shared.ticker.as_ref().is_some_and(TickerHandle::is_active)
    }

    /// Unmounts the card. The timer never fires again and subscribers see the
    /// channel close with the last snapshot still readable.
    pub async fn teardown(self) {
        let mut shared = self.shared.lock().await;
        if let Some(ticker) = shared.ticker.take() {
            ticker.cancel();
        }
        info!(
            candles = shared.state.candles_lit(),
            balloons = shared.state.balloons_popped(),
            "card torn down"
        );
    }
}

fn step(shared: &mut Shared) -> ControlFlow<()> {
    match shared.state.tick() {
        Tick::Lit { remaining } => {
            debug!(lit = shared.state.candles_lit(), "candle lit by celebration");
            shared.publish();
            if remaining == 0 {
                info!("every candle is lit");
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
        Tick::Done => ControlFlow::Break(()),
    }
}
