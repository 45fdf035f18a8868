//! Per-switch debounce state machine

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies one turn-indicator channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelId {
    Left,
    Right,
}

/// How a channel decides that a press qualifies
///
/// `Level` re-fires while the switch is held: any evaluation that sees
/// the raw level high after the window has elapsed accepts another edge.
/// This reproduces the behavior of dashboards that gate on the raw input
/// each poll (a held stalk re-toggles once per window).
///
/// `Edge` latches the previous raw level and only accepts a low-to-high
/// transition, so a held switch fires once per physical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerMode {
    #[default]
    Level,
    Edge,
}

/// Debounce state for a single switch/lamp pair
///
/// Lives for the whole process: created once at startup with the lamp
/// off, mutated only through [`evaluate`](DebounceChannel::evaluate),
/// never destroyed. There is no auto-timeout; a channel stays active
/// until the next accepted edge toggles it back.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceChannel {
    id: ChannelId,
    /// Current toggle state (drives the indicator lamp)
    active: bool,
    /// Timestamp of the last accepted edge (monotonic ms)
    last_trigger_ms: u64,
    /// Raw level seen by the previous evaluation (for `Edge` mode)
    prev_level: bool,
    /// Minimum interval between accepted edges (ms), invariant: > 0
    window_ms: u32,
    trigger: TriggerMode,
}

impl DebounceChannel {
    /// Create a channel in its startup state (inactive, never triggered)
    pub const fn new(id: ChannelId, window_ms: u32, trigger: TriggerMode) -> Self {
        Self {
            id,
            active: false,
            last_trigger_ms: 0,
            prev_level: false,
            window_ms,
            trigger,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Current toggle state
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Timestamp of the last accepted edge (monotonic ms)
    pub fn last_trigger_ms(&self) -> u64 {
        self.last_trigger_ms
    }

    /// Evaluate the raw switch level at time `now_ms`
    ///
    /// Accepts an edge iff the trigger condition holds and strictly more
    /// than `window_ms` has elapsed since the last accepted edge. The
    /// comparison is strict: an evaluation at exactly `window_ms` elapsed
    /// is rejected, favoring suppression over an extra toggle.
    ///
    /// Returns the new active state when an edge was accepted, `None`
    /// otherwise. Total over its input domain; cannot fail.
    pub fn evaluate(&mut self, raw_level: bool, now_ms: u64) -> Option<bool> {
        let rising = raw_level && !self.prev_level;
        self.prev_level = raw_level;

        let qualifies = match self.trigger {
            TriggerMode::Level => raw_level,
            TriggerMode::Edge => rising,
        };

        let elapsed = now_ms.saturating_sub(self.last_trigger_ms);
        if qualifies && elapsed > u64::from(self.window_ms) {
            self.active = !self.active;
            self.last_trigger_ms = now_ms;
            Some(self.active)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: u32 = 500;

    fn level_channel() -> DebounceChannel {
        DebounceChannel::new(ChannelId::Left, WINDOW, TriggerMode::Level)
    }

    #[test]
    fn test_released_switch_never_mutates() {
        let mut ch = level_channel();
        for now in [0, 1, 499, 500, 501, 10_000, u64::MAX] {
            assert_eq!(ch.evaluate(false, now), None);
            assert!(!ch.is_active());
            assert_eq!(ch.last_trigger_ms(), 0);
        }
    }

    #[test]
    fn test_window_boundary_is_strict() {
        let mut ch = level_channel();

        // elapsed == window: rejected
        assert_eq!(ch.evaluate(true, u64::from(WINDOW)), None);
        assert!(!ch.is_active());

        // elapsed == window + 1: accepted
        assert_eq!(ch.evaluate(true, u64::from(WINDOW) + 1), Some(true));
        assert!(ch.is_active());
        assert_eq!(ch.last_trigger_ms(), u64::from(WINDOW) + 1);
    }

    #[test]
    fn test_500ms_window_scenario() {
        // window=500, start {active:false, last_trigger:0}
        let mut ch = level_channel();

        // t=100: 100 - 0 = 100, not > 500 -> unchanged
        assert_eq!(ch.evaluate(true, 100), None);
        assert!(!ch.is_active());
        assert_eq!(ch.last_trigger_ms(), 0);

        // t=600: 600 > 500 -> flips on
        assert_eq!(ch.evaluate(true, 600), Some(true));
        assert!(ch.is_active());
        assert_eq!(ch.last_trigger_ms(), 600);

        // t=1000: 400, not > 500 -> unchanged
        assert_eq!(ch.evaluate(true, 1000), None);
        assert!(ch.is_active());
        assert_eq!(ch.last_trigger_ms(), 600);

        // t=1200: 600 > 500 -> flips off
        assert_eq!(ch.evaluate(true, 1200), Some(false));
        assert!(!ch.is_active());
        assert_eq!(ch.last_trigger_ms(), 1200);
    }

    #[test]
    fn test_repeated_calls_at_same_instant() {
        let mut ch = level_channel();

        // First call at t=600 mutates; identical repeats are rejected
        // by the strict boundary (elapsed == 0).
        assert_eq!(ch.evaluate(true, 600), Some(true));
        assert_eq!(ch.evaluate(true, 600), None);
        assert_eq!(ch.evaluate(true, 600), None);
        assert!(ch.is_active());
        assert_eq!(ch.last_trigger_ms(), 600);
    }

    #[test]
    fn test_level_mode_refires_while_held() {
        let mut ch = level_channel();

        // Held switch, polled every 100 ms: toggles once per window
        let mut toggles = 0;
        for tick in 1..=20u64 {
            if ch.evaluate(true, tick * 100).is_some() {
                toggles += 1;
            }
        }
        // Accepted at t=600, 1200, 1800 (600 ms cadence on a 100 ms poll)
        assert_eq!(toggles, 3);
    }

    #[test]
    fn test_edge_mode_fires_once_per_press() {
        let mut ch = DebounceChannel::new(ChannelId::Left, WINDOW, TriggerMode::Edge);

        // Held switch: only the transition fires
        let mut toggles = 0;
        for tick in 6..=50u64 {
            if ch.evaluate(true, tick * 100).is_some() {
                toggles += 1;
            }
        }
        assert_eq!(toggles, 1);
        assert!(ch.is_active());

        // Release, then press again after the window: second toggle
        assert_eq!(ch.evaluate(false, 5_100), None);
        assert_eq!(ch.evaluate(true, 5_200), Some(false));
    }

    #[test]
    fn test_edge_mode_still_debounces_bounce() {
        let mut ch = DebounceChannel::new(ChannelId::Left, WINDOW, TriggerMode::Edge);

        // Contact bounce: rapid high/low flutter produces transitions,
        // but only the first lands outside the window.
        assert_eq!(ch.evaluate(true, 600), Some(true));
        assert_eq!(ch.evaluate(false, 605), None);
        assert_eq!(ch.evaluate(true, 610), None);
        assert_eq!(ch.evaluate(false, 615), None);
        assert_eq!(ch.evaluate(true, 620), None);
        assert!(ch.is_active());
        assert_eq!(ch.last_trigger_ms(), 600);
    }

    proptest! {
        /// Accepted edges are always spaced strictly more than one
        /// window apart, whatever the input sequence looks like.
        #[test]
        fn prop_accepted_edges_respect_window(
            levels in proptest::collection::vec(any::<bool>(), 1..200),
            deltas in proptest::collection::vec(1u64..300, 1..200),
        ) {
            let mut ch = level_channel();
            let mut now = 0u64;
            let mut last_accept: Option<u64> = None;

            for (level, delta) in levels.iter().zip(deltas.iter()) {
                now += delta;
                if ch.evaluate(*level, now).is_some() {
                    if let Some(prev) = last_accept {
                        prop_assert!(now - prev > u64::from(WINDOW));
                    } else {
                        prop_assert!(now > u64::from(WINDOW));
                    }
                    last_accept = Some(now);
                }
            }
        }

        /// The active state equals the parity of accepted edges.
        #[test]
        fn prop_active_tracks_toggle_parity(
            levels in proptest::collection::vec(any::<bool>(), 1..200),
        ) {
            let mut ch = level_channel();
            let mut accepted = 0u32;

            for (i, level) in levels.iter().enumerate() {
                if ch.evaluate(*level, (i as u64 + 1) * 97).is_some() {
                    accepted += 1;
                }
                prop_assert_eq!(ch.is_active(), accepted % 2 == 1);
            }
        }
    }
}
