//! Raw effect status for crossing from the sample callback to the display.
//!
//! Turning settings into display values (percentages, Hz, ms) is float work.
//! The callback therefore never builds a [`Report`] itself: it copies the
//! integer state into an [`EffectStatus`] and hands that over. The control
//! task loads the status into its own instance of the same effect and
//! renders the report there.

use crate::effect::Effect;
use crate::report::Report;

/// Most features an [`EffectStatus`] carries.
pub const MAX_STATUS_FEATURES: usize = 4;

/// Integer snapshot of one effect: lineup slot, enabled flag, cursor and raw
/// feature values.
///
/// ```rust
/// use chipstomp_core::{Effect, EffectState, EffectStatus, FeatureDescriptor, FeatureInfo};
///
/// const LEVEL: FeatureDescriptor = FeatureDescriptor::amplitude("Level", "level", 256);
///
/// #[derive(Default)]
/// struct Level {
///     state: EffectState,
///     level: i32,
/// }
///
/// impl FeatureInfo for Level {
///     fn feature_count(&self) -> u8 { 1 }
///     fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> { (index == 1).then_some(LEVEL) }
///     fn get_feature(&self, _index: u8) -> i32 { self.level }
///     fn set_feature(&mut self, _index: u8, value: i32) { self.level = LEVEL.clamp(value) }
/// }
///
/// impl Effect for Level {
///     fn name(&self) -> &'static str { "Level" }
///     fn state(&self) -> &EffectState { &self.state }
///     fn state_mut(&mut self) -> &mut EffectState { &mut self.state }
/// }
///
/// let mut live = Level::default();
/// live.set_feature(1, 0xFFFF);
/// let status = EffectStatus::capture(0, &live);
///
/// let mut mirror = Level::default();
/// let report = status.render(&mut mirror);
/// assert_eq!(report.effect, "Level");
/// assert_eq!(mirror.get_feature(1), 0xFFFF);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectStatus {
    /// Index of the effect in its lineup.
    pub slot: usize,
    /// Enabled flag.
    pub enabled: bool,
    /// Selected feature index (0 = guard).
    pub selected: u8,
    values: [i32; MAX_STATUS_FEATURES],
    count: u8,
}

impl EffectStatus {
    /// Copy the integer state of `effect`. No float work, no allocation.
    #[inline]
    pub fn capture<E: Effect + ?Sized>(slot: usize, effect: &E) -> Self {
        let count = effect.feature_count().min(MAX_STATUS_FEATURES as u8);
        let mut values = [0; MAX_STATUS_FEATURES];
        for (index, value) in (1..=count).zip(values.iter_mut()) {
            *value = effect.get_feature(index);
        }
        Self {
            slot,
            enabled: effect.is_enabled(),
            selected: effect.selected_feature(),
            values,
            count,
        }
    }

    /// Raw feature values, feature 1 first.
    pub fn values(&self) -> &[i32] {
        &self.values[..usize::from(self.count)]
    }

    /// Load this status into `effect`: features, enabled flag and cursor.
    ///
    /// Buffers and oscillators are left alone.
    pub fn restore<E: Effect + ?Sized>(&self, effect: &mut E) {
        for (index, &value) in (1..).zip(self.values()) {
            effect.set_feature(index, value);
        }
        let count = effect.feature_count();
        let state = effect.state_mut();
        state.set_enabled(self.enabled);
        state.set_cursor(self.selected, count);
    }

    /// Restore into `effect` and build its [`Report`].
    pub fn render<E: Effect + ?Sized>(&self, effect: &mut E) -> Report {
        self.restore(effect);
        let mut report = Report::new(effect.name(), effect.is_enabled());
        effect.report(&mut report);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectState;
    use crate::feature::{FeatureDescriptor, FeatureInfo};

    const A: FeatureDescriptor = FeatureDescriptor::new("A", "a", 0, 100, 10);
    const B: FeatureDescriptor = FeatureDescriptor::new("B", "b", -50, 50, 0);

    #[derive(Default)]
    struct Pair {
        state: EffectState,
        a: i32,
        b: i32,
    }

    impl FeatureInfo for Pair {
        fn feature_count(&self) -> u8 {
            2
        }

        fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
            match index {
                1 => Some(A),
                2 => Some(B),
                _ => None,
            }
        }

        fn get_feature(&self, index: u8) -> i32 {
            match index {
                1 => self.a,
                2 => self.b,
                _ => 0,
            }
        }

        fn set_feature(&mut self, index: u8, value: i32) {
            match index {
                1 => self.a = A.clamp(value),
                2 => self.b = B.clamp(value),
                _ => {}
            }
        }
    }

    impl Effect for Pair {
        fn name(&self) -> &'static str {
            "Pair"
        }

        fn state(&self) -> &EffectState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut EffectState {
            &mut self.state
        }
    }

    #[test]
    fn test_capture_copies_integer_state() {
        let mut fx = Pair { a: 42, b: -7, ..Pair::default() };
        fx.toggle();
        fx.next_feature();
        fx.next_feature();

        let status = EffectStatus::capture(3, &fx);
        assert_eq!(status.slot, 3);
        assert!(status.enabled);
        assert_eq!(status.selected, 2);
        assert_eq!(status.values(), [42, -7]);
    }

    #[test]
    fn test_render_matches_live_report() {
        let mut live = Pair { a: 99, b: 12, ..Pair::default() };
        live.next_feature();
        let mut expected = Report::new(live.name(), live.is_enabled());
        live.report(&mut expected);

        let mut mirror = Pair::default();
        mirror.toggle();
        let report = EffectStatus::capture(0, &live).render(&mut mirror);
        assert_eq!(report, expected);
        assert!(!mirror.is_enabled());
        assert_eq!(mirror.selected_feature(), 1);
    }

    #[test]
    fn test_no_features() {
        struct Bare(EffectState);
        impl FeatureInfo for Bare {}
        impl Effect for Bare {
            fn name(&self) -> &'static str {
                "Bare"
            }
            fn state(&self) -> &EffectState {
                &self.0
            }
            fn state_mut(&mut self) -> &mut EffectState {
                &mut self.0
            }
        }

        let status = EffectStatus::capture(1, &Bare(EffectState::new()));
        assert!(status.values().is_empty());
        assert!(status.render(&mut Bare(EffectState::new())).is_empty());
    }
}
