//! Two-key chords such as `gg` and `dd`.

use std::time::{Duration, Instant};

/// Maximum gap between the two presses of a chord.
pub const CHORD_WINDOW: Duration = Duration::from_millis(500);

/// Pending first key of a chord.
///
/// Expiry is checked when the second key arrives; there is no timer.
#[derive(Debug, Clone)]
pub struct ChordTracker {
    window: Duration,
    pending: Option<(char, Instant)>,
}

impl Default for ChordTracker {
    fn default() -> Self {
        Self::new(CHORD_WINDOW)
    }
}

impl ChordTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a press of `key` at `now`.
    ///
    /// Returns `true` when it completes a chord with the pending key.
    /// Otherwise `key` becomes the pending key.
    pub fn press(&mut self, key: char, now: Instant) -> bool {
        match self.pending.take() {
            Some((prev, at)) if prev == key && now.saturating_duration_since(at) < self.window => {
                true
            }
            _ => {
                self.pending = Some((key, now));
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// The pending key, if any.
    pub fn pending(&self) -> Option<char> {
        self.pending.map(|(c, _)| c)
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_press_within_window() {
        let mut chords = ChordTracker::default();
        let t0 = Instant::now();
        assert!(!chords.press('g', t0));
        assert_eq!(chords.pending(), Some('g'));
        assert!(chords.press('g', t0 + Duration::from_millis(200)));
        assert_eq!(chords.pending(), None);
    }

    #[test]
    fn test_expired_press_restarts_chord() {
        let mut chords = ChordTracker::default();
        let t0 = Instant::now();
        chords.press('d', t0);
        let late = t0 + Duration::from_millis(600);
        assert!(!chords.press('d', late));
        assert!(chords.press('d', late + Duration::from_millis(100)));
    }

    #[test]
    fn test_different_key_replaces_pending() {
        let mut chords = ChordTracker::default();
        let t0 = Instant::now();
        chords.press('g', t0);
        assert!(!chords.press('d', t0));
        assert_eq!(chords.pending(), Some('d'));
    }

    #[test]
    fn test_window_is_exclusive_and_configurable() {
        let mut chords = ChordTracker::new(Duration::from_millis(50));
        let t0 = Instant::now();
        chords.press('g', t0);
        assert!(!chords.press('g', t0 + Duration::from_millis(50)));
        assert_eq!(chords.pending(), Some('g'));

        chords.clear();
        chords.press('g', t0);
        assert!(chords.press('g', t0 + Duration::from_millis(49)));

        chords.press('g', t0);
        chords.clear();
        assert!(!chords.press('g', t0));
    }
}
