use crate::errors::{CelebrationError, Item};

pub const DEFAULT_CANDLES: usize = 5;
pub const DEFAULT_BALLOONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Lit { remaining: usize },
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrationState {
    candles_lit: usize,
    balloons_popped: usize,
    total_candles: usize,
    total_balloons: usize,
    celebrating: bool,
    confetti_shown: bool,
}

impl Default for CelebrationState {
    fn default() -> Self {
        Self::new(DEFAULT_CANDLES, DEFAULT_BALLOONS)
    }
}

impl CelebrationState {
    pub fn new(total_candles: usize, total_balloons: usize) -> Self {
        let mut state = Self {
            candles_lit: 0,
            balloons_popped: 0,
            total_candles,
            total_balloons,
            celebrating: false,
            confetti_shown: false,
        };
        state.refresh_confetti();
        state
    }

    pub fn candles_lit(&self) -> usize {
        self.candles_lit
    }

    pub fn balloons_popped(&self) -> usize {
        self.balloons_popped
    }

    pub fn total_candles(&self) -> usize {
        self.total_candles
    }

    pub fn total_balloons(&self) -> usize {
        self.total_balloons
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn confetti_shown(&self) -> bool {
        self.confetti_shown
    }

    pub fn candles_remaining(&self) -> usize {
        self.total_candles - self.candles_lit
    }

    pub fn is_complete(&self) -> bool {
        self.candles_lit == self.total_candles && self.balloons_popped == self.total_balloons
    }

    // Out-of-order clicks are ignored, only the next dark candle counts.
    pub fn light_candle(&mut self, index: usize) -> Result<bool, CelebrationError> {
        let advanced = advance(&mut self.candles_lit, self.total_candles, index, Item::Candle)?;
        self.refresh_confetti();
        Ok(advanced)
    }

    pub fn pop_balloon(&mut self, index: usize) -> Result<bool, CelebrationError> {
        let advanced = advance(
            &mut self.balloons_popped,
            self.total_balloons,
            index,
            Item::Balloon,
        )?;
        self.refresh_confetti();
        Ok(advanced)
    }

    pub fn begin_celebration(&mut self) -> Result<(), CelebrationError> {
        if self.celebrating {
            return Err(CelebrationError::AlreadyCelebrating);
        }
        self.celebrating = true;
        self.confetti_shown = true;
        Ok(())
    }

    pub fn tick(&mut self) -> Tick {
        if self.candles_lit >= self.total_candles {
            return Tick::Done;
        }
        self.candles_lit += 1;
        self.refresh_confetti();
        Tick::Lit {
            remaining: self.candles_remaining(),
        }
    }

    fn refresh_confetti(&mut self) {
        if self.is_complete() {
            self.confetti_shown = true;
        }
    }
}

fn advance(
    count: &mut usize,
    total: usize,
    index: usize,
    item: Item,
) -> Result<bool, CelebrationError> {
    if index >= total {
        return Err(CelebrationError::InvalidIndex { item, index, total });
    }
    if index != *count {
        return Ok(false);
    }
    *count += 1;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipping_a_candle_is_ignored() {
        let mut state = CelebrationState::default();
        assert_eq!(state.light_candle(1), Ok(false));
        assert_eq!(state.light_candle(2), Ok(false));
        assert_eq!(state.candles_lit(), 0);
    }

    #[test]
    fn candles_only_advance_on_the_next_index() {
        let mut state = CelebrationState::default();
        assert_eq!(state.light_candle(0), Ok(true));
        assert_eq!(state.light_candle(0), Ok(false));
        assert_eq!(state.light_candle(3), Ok(false));
        assert_eq!(state.light_candle(1), Ok(true));
        assert_eq!(state.candles_lit(), 2);
    }

    #[test]
    fn balloons_follow_the_same_order() {
        let mut state = CelebrationState::default();
        assert_eq!(state.pop_balloon(2), Ok(false));
        assert_eq!(state.pop_balloon(0), Ok(true));
        assert_eq!(state.pop_balloon(1), Ok(true));
        assert_eq!(state.pop_balloon(1), Ok(false));
        assert_eq!(state.balloons_popped(), 2);
    }

    #[test]
    fn out_of_range_index_is_rejected_without_change() {
        let mut state = CelebrationState::default();
        assert_eq!(
            state.light_candle(5),
            Err(CelebrationError::InvalidIndex {
                item: Item::Candle,
                index: 5,
                total: 5
            })
        );
        assert!(matches!(
            state.pop_balloon(9),
            Err(CelebrationError::InvalidIndex { item: Item::Balloon, .. })
        ));
        assert_eq!(state, CelebrationState::default());
    }

    #[test]
    fn manual_run_completes_after_ten_clicks() {
        let mut state = CelebrationState::default();
        for index in 0..5 {
            state.light_candle(index).unwrap();
            assert!(!state.is_complete());
        }
        for index in 0..4 {
            state.pop_balloon(index).unwrap();
            assert!(!state.is_complete());
            assert!(!state.confetti_shown());
        }
        state.pop_balloon(4).unwrap();
        assert!(state.is_complete());
        assert!(state.confetti_shown());

        for index in 0..5 {
            assert_eq!(state.light_candle(index), Ok(false));
            assert_eq!(state.pop_balloon(index), Ok(false));
        }
        assert!(state.is_complete());
    }

    #[test]
    fn celebrate_only_once() {
        let mut state = CelebrationState::default();
        state.begin_celebration().unwrap();
        assert!(state.is_celebrating());
        assert!(state.confetti_shown());
        assert!(!state.is_complete());

        let before = state.clone();
        assert_eq!(
            state.begin_celebration(),
            Err(CelebrationError::AlreadyCelebrating)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn ticks_light_candles_until_done() {
        let mut state = CelebrationState::default();
        state.light_candle(0).unwrap();
        state.begin_celebration().unwrap();

        assert_eq!(state.tick(), Tick::Lit { remaining: 3 });
        assert_eq!(state.tick(), Tick::Lit { remaining: 2 });
        assert_eq!(state.tick(), Tick::Lit { remaining: 1 });
        assert_eq!(state.tick(), Tick::Lit { remaining: 0 });
        assert_eq!(state.tick(), Tick::Done);
        assert_eq!(state.candles_lit(), 5);
        assert!(state.is_celebrating());
    }

    #[test]
    fn click_after_tick_on_same_index_is_a_no_op() {
        let mut state = CelebrationState::default();
        state.begin_celebration().unwrap();
        state.tick();
        assert_eq!(state.light_candle(0), Ok(false));
        assert_eq!(state.light_candle(1), Ok(true));
        assert_eq!(state.candles_lit(), 2);
    }

    #[test]
    fn empty_card_is_complete_from_the_start() {
        let state = CelebrationState::new(0, 0);
        assert!(state.is_complete());
        assert!(state.confetti_shown());
    }
}
