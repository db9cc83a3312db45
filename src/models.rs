use crate::celebration::CelebrationState;
use serde::{Deserialize, Serialize};

pub const CONFETTI_PIECES: u32 = 500;
pub const CONFETTI_COLORS: [&str; 7] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfettiOverlay {
    pub visible: bool,
    pub width: u32,
    pub height: u32,
    pub pieces: u32,
    pub recycle: bool,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub candles_lit: usize,
    pub balloons_popped: usize,
    pub total_candles: usize,
    pub total_balloons: usize,
    pub celebrating: bool,
    pub complete: bool,
    pub candles: Vec<bool>,
    pub balloons: Vec<bool>,
    pub confetti: ConfettiOverlay,
}

impl Snapshot {
    pub fn capture(state: &CelebrationState, viewport: Viewport) -> Self {
        Self {
            candles_lit: state.candles_lit(),
            balloons_popped: state.balloons_popped(),
            total_candles: state.total_candles(),
            total_balloons: state.total_balloons(),
            celebrating: state.is_celebrating(),
            complete: state.is_complete(),
            candles: revealed(state.candles_lit(), state.total_candles()),
            balloons: revealed(state.balloons_popped(), state.total_balloons()),
            confetti: ConfettiOverlay {
                visible: state.confetti_shown(),
                width: viewport.width,
                height: viewport.height,
                pieces: CONFETTI_PIECES,
                recycle: false,
                colors: CONFETTI_COLORS.iter().map(|c| c.to_string()).collect(),
            },
        }
    }
}

// Same rule for manual and automatic lighting: index < count.
fn revealed(count: usize, total: usize) -> Vec<bool> {
    (0..total).map(|index| index < count).collect()
}

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub width: u32,
    pub height: u32,
}
