use serde::{Deserialize, Serialize};

/// Frame rate the reveal pacing is tuned against: a speed of 1.0 reveals
/// about sixty symbols per second of wall-clock time.
const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Reveal counter for grow-over-time playback.
///
/// The sequence is expanded once; playback then walks a growing prefix of
/// it. Each tick the caller advances the counter and re-interprets
/// `sequence[..shown()]` into a cleared sink, which reproduces exactly the
/// commands of a full interpretation truncated at the same point. The
/// counter owns no symbols and no sink; it is bookkeeping only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GrowthPlayback {
    total: usize,
    shown: usize,
    /// Reveal rate multiplier; 1.0 is one symbol per reference frame.
    speed: f32,
}

impl GrowthPlayback {
    /// Starts a playback that reveals `total` symbols at `speed`.
    pub fn new(total: usize, speed: f32) -> Self {
        Self {
            total,
            shown: 0,
            speed,
        }
    }

    /// A playback that is already fully revealed.
    pub fn instant(total: usize) -> Self {
        Self {
            total,
            shown: total,
            speed: 0.0,
        }
    }

    /// Advances by `dt` seconds and returns the new prefix length.
    ///
    /// Progress per call is `ceil(speed * dt * 60)` symbols, saturating at
    /// the total. The ceiling means any positive step reveals at least one
    /// symbol, so playback cannot stall on tiny frame deltas.
    pub fn advance(&mut self, dt: f32) -> usize {
        let step = (self.speed * dt * REFERENCE_FRAME_RATE).ceil() as usize;
        self.shown = self.total.min(self.shown.saturating_add(step));
        self.shown
    }

    /// Current prefix length to interpret.
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.shown == self.total
    }

    /// Rewinds to an empty prefix; total and speed are untouched.
    pub fn reset(&mut self) {
        self.shown = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_reveals_at_least_one_symbol_per_positive_step() {
        let mut playback = GrowthPlayback::new(100, 1.0);
        assert_eq!(playback.advance(0.01), 1);
        // Even a sub-frame delta makes progress thanks to the ceiling.
        assert_eq!(playback.advance(0.001), 2);
    }

    #[test]
    fn advance_scales_with_speed_and_saturates_at_total() {
        let mut playback = GrowthPlayback::new(10, 2.5);
        assert_eq!(playback.advance(0.01), 2);
        assert_eq!(playback.advance(10.0), 10);
        assert!(playback.is_complete());
    }

    #[test]
    fn zero_delta_makes_no_progress() {
        let mut playback = GrowthPlayback::new(5, 3.0);
        assert_eq!(playback.advance(0.0), 0);
        assert!(!playback.is_complete());
    }

    #[test]
    fn instant_playback_is_complete_from_the_start() {
        let mut playback = GrowthPlayback::instant(42);
        assert_eq!(playback.shown(), 42);
        assert!(playback.is_complete());
        assert_eq!(playback.advance(1.0), 42);
    }

    #[test]
    fn reset_rewinds_to_an_empty_prefix() {
        let mut playback = GrowthPlayback::new(8, 4.0);
        playback.advance(1.0);
        assert!(playback.is_complete());

        playback.reset();
        assert_eq!(playback.shown(), 0);
        assert_eq!(playback.total(), 8);
        assert!(!playback.is_complete());
    }

    #[test]
    fn empty_sequence_is_complete_immediately() {
        assert!(GrowthPlayback::new(0, 1.0).is_complete());
    }
}
