//! Play-state flags for sprite-sheet animations.
//!
//! [`PlayState`] mixes two concerns in one bit-set: playback selection
//! (`LOOPED`, `REVERSED`) and visual orientation (`FLIP_X`, `FLIP_Y`).
//! Flags are not mutually exclusive.
//!
//! `DEFAULT` is a placeholder bit. It marks "no special behavior" when passed
//! to [`Animation::play`](crate::components::animation::Animation::play) and
//! carries no meaning of its own; never test against it.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlayState: u8 {
        /// Placeholder, no effect.
        const DEFAULT = 0x01;
        /// Restart from the first frame when the cycle ends.
        const LOOPED = 0x02;
        /// Play frames from last to first.
        const REVERSED = 0x04;
        /// Mirror horizontally.
        const FLIP_X = 0x08;
        /// Mirror vertically.
        const FLIP_Y = 0x10;
    }
}

impl Default for PlayState {
    fn default() -> Self {
        PlayState::DEFAULT
    }
}

impl PlayState {
    pub fn is_looped(&self) -> bool {
        self.contains(PlayState::LOOPED)
    }

    pub fn is_reversed(&self) -> bool {
        self.contains(PlayState::REVERSED)
    }

    /// Sign applied to each scale axis: `-1.0` on flipped axes, `1.0` otherwise.
    pub fn flip_signs(&self) -> (f32, f32) {
        let sx = if self.contains(PlayState::FLIP_X) { -1.0 } else { 1.0 };
        let sy = if self.contains(PlayState::FLIP_Y) { -1.0 } else { 1.0 };
        (sx, sy)
    }

    /// Build a state from the boolean switches used in configuration files.
    pub fn from_switches(looped: bool, reversed: bool, flip_x: bool, flip_y: bool) -> Self {
        let mut state = PlayState::DEFAULT;
        state.set(PlayState::LOOPED, looped);
        state.set(PlayState::REVERSED, reversed);
        state.set(PlayState::FLIP_X, flip_x);
        state.set(PlayState::FLIP_Y, flip_y);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_behavior() {
        let s = PlayState::default();
        assert!(!s.is_looped());
        assert!(!s.is_reversed());
        assert_eq!(s.flip_signs(), (1.0, 1.0));
    }

    #[test]
    fn test_flags_combine() {
        let s = PlayState::LOOPED | PlayState::REVERSED;
        assert!(s.is_looped());
        assert!(s.is_reversed());
        assert_eq!(s.bits(), 0x06);
    }

    #[test]
    fn test_flip_signs() {
        assert_eq!(PlayState::FLIP_X.flip_signs(), (-1.0, 1.0));
        assert_eq!(PlayState::FLIP_Y.flip_signs(), (1.0, -1.0));
        assert_eq!((PlayState::FLIP_X | PlayState::FLIP_Y).flip_signs(), (-1.0, -1.0));
    }

    #[test]
    fn test_from_switches() {
        let s = PlayState::from_switches(true, false, false, true);
        assert!(s.contains(PlayState::LOOPED | PlayState::FLIP_Y));
        assert!(!s.contains(PlayState::REVERSED));
        assert!(!s.contains(PlayState::FLIP_X));
    }
}
