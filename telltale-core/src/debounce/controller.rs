//! Debounce controller with side-effect dispatch
//!
//! Owns both indicator channels and, per accepted edge, drives the
//! matching lamp and sounds the confirmation chime - exactly once per
//! qualifying press.

use crate::config::{ChimeConfig, DebounceConfig};
use crate::traits::{IndicatorOutput, Notifier};

use super::channel::{ChannelId, DebounceChannel};

/// Raw switch levels for one evaluation
///
/// `true` means "switch physically pressed". Callers polling active-low
/// inputs invert before constructing this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchLevels {
    pub left: bool,
    pub right: bool,
}

/// Outcome of one controller evaluation
///
/// `Some(state)` per channel whose edge was accepted this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeSummary {
    pub left: Option<bool>,
    pub right: Option<bool>,
}

impl EdgeSummary {
    /// True if either channel toggled
    pub fn any(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// Debounce controller for the two turn-indicator channels
pub struct DebounceController {
    left: DebounceChannel,
    right: DebounceChannel,
    chime: ChimeConfig,
}

impl DebounceController {
    pub fn new(debounce: DebounceConfig, chime: ChimeConfig) -> Self {
        Self {
            left: DebounceChannel::new(ChannelId::Left, debounce.window_ms, debounce.trigger),
            right: DebounceChannel::new(ChannelId::Right, debounce.window_ms, debounce.trigger),
            chime,
        }
    }

    pub fn channel(&self, id: ChannelId) -> &DebounceChannel {
        match id {
            ChannelId::Left => &self.left,
            ChannelId::Right => &self.right,
        }
    }

    /// Evaluate both channels and dispatch side effects
    ///
    /// For each accepted edge: the matching lamp is set to the new state
    /// and one chime is dispatched. Channels are independent; an edge on
    /// one never touches the other's state or lamp.
    pub fn evaluate<L, R, N>(
        &mut self,
        levels: SwitchLevels,
        now_ms: u64,
        left_lamp: &mut L,
        right_lamp: &mut R,
        notifier: &mut N,
    ) -> EdgeSummary
    where
        L: IndicatorOutput,
        R: IndicatorOutput,
        N: Notifier,
    {
        let mut summary = EdgeSummary::default();

        if let Some(on) = self.left.evaluate(levels.left, now_ms) {
            left_lamp.set(on);
            notifier.sound(self.chime.frequency_hz, self.chime.duration_ms);
            summary.left = Some(on);
        }

        if let Some(on) = self.right.evaluate(levels.right, now_ms) {
            right_lamp.set(on);
            notifier.sound(self.chime.frequency_hz, self.chime.duration_ms);
            summary.right = Some(on);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockLamp {
        on: bool,
        sets: u32,
    }

    impl IndicatorOutput for MockLamp {
        fn set(&mut self, on: bool) {
            self.on = on;
            self.sets += 1;
        }

        fn is_on(&self) -> bool {
            self.on
        }
    }

    #[derive(Default)]
    struct MockChime {
        sounds: u32,
        last_tone: Option<(u16, u16)>,
    }

    impl Notifier for MockChime {
        fn sound(&mut self, frequency_hz: u16, duration_ms: u16) {
            self.sounds += 1;
            self.last_tone = Some((frequency_hz, duration_ms));
        }
    }

    fn controller() -> DebounceController {
        DebounceController::new(DebounceConfig::default(), ChimeConfig::default())
    }

    #[test]
    fn test_accepted_edge_dispatches_once() {
        let mut ctl = controller();
        let (mut left, mut right) = (MockLamp::default(), MockLamp::default());
        let mut chime = MockChime::default();

        let pressed = SwitchLevels { left: true, right: false };
        let summary = ctl.evaluate(pressed, 600, &mut left, &mut right, &mut chime);

        assert_eq!(summary.left, Some(true));
        assert_eq!(summary.right, None);
        assert!(left.is_on());
        assert_eq!(left.sets, 1);
        assert_eq!(right.sets, 0);
        assert_eq!(chime.sounds, 1);
        assert_eq!(chime.last_tone, Some((1_000, 100)));
    }

    #[test]
    fn test_suppressed_edge_dispatches_nothing() {
        let mut ctl = controller();
        let (mut left, mut right) = (MockLamp::default(), MockLamp::default());
        let mut chime = MockChime::default();

        // Inside the window: no lamp write, no chime
        let pressed = SwitchLevels { left: true, right: false };
        let summary = ctl.evaluate(pressed, 100, &mut left, &mut right, &mut chime);

        assert!(!summary.any());
        assert_eq!(left.sets, 0);
        assert_eq!(chime.sounds, 0);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut ctl = controller();
        let (mut left, mut right) = (MockLamp::default(), MockLamp::default());
        let mut chime = MockChime::default();

        // Left toggles on; right untouched
        let levels = SwitchLevels { left: true, right: false };
        ctl.evaluate(levels, 600, &mut left, &mut right, &mut chime);
        assert!(ctl.channel(ChannelId::Left).is_active());
        assert!(!ctl.channel(ChannelId::Right).is_active());
        assert_eq!(ctl.channel(ChannelId::Right).last_trigger_ms(), 0);

        // Right toggles on its own schedule, left unchanged
        let levels = SwitchLevels { left: false, right: true };
        let summary = ctl.evaluate(levels, 700, &mut left, &mut right, &mut chime);
        assert_eq!(summary.right, Some(true));
        assert!(ctl.channel(ChannelId::Left).is_active());
        assert_eq!(ctl.channel(ChannelId::Left).last_trigger_ms(), 600);
    }

    #[test]
    fn test_both_channels_same_tick() {
        let mut ctl = controller();
        let (mut left, mut right) = (MockLamp::default(), MockLamp::default());
        let mut chime = MockChime::default();

        let both = SwitchLevels { left: true, right: true };
        let summary = ctl.evaluate(both, 600, &mut left, &mut right, &mut chime);

        assert_eq!(summary.left, Some(true));
        assert_eq!(summary.right, Some(true));
        assert!(left.is_on());
        assert!(right.is_on());
        // One chime per accepted edge
        assert_eq!(chime.sounds, 2);
    }

    #[test]
    fn test_toggle_off_updates_lamp() {
        let mut ctl = controller();
        let (mut left, mut right) = (MockLamp::default(), MockLamp::default());
        let mut chime = MockChime::default();

        let pressed = SwitchLevels { left: true, right: false };
        ctl.evaluate(pressed, 600, &mut left, &mut right, &mut chime);
        assert!(left.is_on());

        // Second accepted press toggles the lamp back off
        ctl.evaluate(pressed, 1_200, &mut left, &mut right, &mut chime);
        assert!(!left.is_on());
        assert_eq!(left.sets, 2);
        assert_eq!(chime.sounds, 2);
    }
}
