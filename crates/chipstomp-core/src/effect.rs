//! Core Effect trait and the shared per-effect control state.
//!
//! The [`Effect`] trait is the capability set every pedal effect exposes:
//! sample processing, feature cycling, feature adjustment, bypass toggling,
//! and status reporting. Every capability has a provided default, so an
//! effect that has nothing to do for one of them (the placeholder
//! `Dummy`, for instance) is simply inert there. No call site ever has to
//! check whether a capability exists.
//!
//! ## Design Decisions
//!
//! - **Integer samples**: [`Sample`] in, [`Sample`] out. All arithmetic on
//!   the sample path is fixed point.
//!
//! - **Control state in one place**: the enabled flag and feature cursor
//!   live in [`EffectState`], which each effect embeds and exposes through
//!   [`Effect::state`]. The cycling and toggle rules are therefore written
//!   once rather than per effect.
//!
//! - **No allocations**: every method can run inside the sample callback.

use crate::feature::FeatureInfo;
use crate::fixed::Sample;
use crate::report::{ReportLine, ReportSink};

/// Enabled flag and selected-feature cursor of one effect.
///
/// An effect starts disabled with the cursor on the guard feature 0. The
/// number of features is not stored here: cursor moves take it from the
/// owning effect's [`FeatureInfo::feature_count`].
///
/// ```rust
/// use chipstomp_core::EffectState;
///
/// let mut state = EffectState::new();
/// assert_eq!(state.feature(), 0);
/// state.next_feature(2);
/// state.next_feature(2);
/// state.next_feature(2);
/// assert_eq!(state.feature(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectState {
    enabled: bool,
    feature: u8,
}

impl EffectState {
    /// Disabled, cursor parked.
    pub const fn new() -> Self {
        Self {
            enabled: false,
            feature: 0,
        }
    }

    /// Whether the effect processes audio.
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Force the enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip the enabled flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Selected feature index (0 = guard).
    #[inline]
    pub const fn feature(&self) -> u8 {
        self.feature
    }

    /// Advance the cursor 1, 2, …, `count`, 1, …
    ///
    /// Does nothing when there is at most one tunable feature, so such an
    /// effect stays on the guard feature.
    pub fn next_feature(&mut self, count: u8) {
        if count <= 1 {
            return;
        }
        if self.feature < count {
            self.feature += 1;
        } else {
            self.feature = 1;
        }
    }

    /// Put the cursor on `index`. Indices above `count` park it.
    pub fn set_cursor(&mut self, index: u8, count: u8) {
        self.feature = if index <= count { index } else { 0 };
    }

    /// Return the cursor to the guard feature.
    pub fn park(&mut self) {
        self.feature = 0;
    }
}

/// Capability set of a pedal effect.
///
/// Implementors supply [`name`](Effect::name), access to their
/// [`EffectState`], and their [`FeatureInfo`]. Everything else has a
/// provided implementation that can be overridden.
///
/// # Example
///
/// ```rust
/// use chipstomp_core::{Effect, EffectState, FeatureInfo, Sample};
///
/// struct Invert {
///     state: EffectState,
/// }
///
/// impl FeatureInfo for Invert {}
///
/// impl Effect for Invert {
///     fn name(&self) -> &'static str { "Invert" }
///     fn state(&self) -> &EffectState { &self.state }
///     fn state_mut(&mut self) -> &mut EffectState { &mut self.state }
///
///     fn process(&mut self, x: Sample) -> Sample {
///         -x
///     }
/// }
///
/// let mut fx = Invert { state: EffectState::new() };
/// assert!(fx.toggle());
/// assert_eq!(fx.process(100), -100);
/// ```
pub trait Effect: FeatureInfo {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Shared control state.
    fn state(&self) -> &EffectState;

    /// Shared control state, mutably.
    fn state_mut(&mut self) -> &mut EffectState;

    /// Transform one sample. O(1), never allocates.
    ///
    /// Default is identity.
    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        x
    }

    /// Clear buffers, accumulators and oscillator phase. Settings and the
    /// control state are left alone.
    fn reset(&mut self) {}

    /// Whether the effect is enabled.
    fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// Flip the enabled flag and return the new value.
    fn toggle(&mut self) -> bool {
        self.state_mut().toggle()
    }

    /// Selected feature index (0 = guard).
    fn selected_feature(&self) -> u8 {
        self.state().feature()
    }

    /// Move the cursor to the next tunable feature.
    fn next_feature(&mut self) {
        let count = self.feature_count();
        self.state_mut().next_feature(count);
    }

    /// Apply an encoder delta to the selected feature. Inert on feature 0.
    fn adjust_feature(&mut self, delta: i16) {
        let index = self.selected_feature();
        if let Some(desc) = self.feature_info(index) {
            let value = desc.adjusted(self.get_feature(index), delta);
            self.set_feature(index, value);
        }
    }

    /// Emit one line per tunable feature, selected one highlighted.
    ///
    /// Effects with extra informational lines override this, call
    /// [`report_features`] and then append their own.
    fn report(&self, sink: &mut dyn ReportSink) {
        report_features(self, sink);
    }
}

/// Push a [`ReportLine`] for every tunable feature of `effect`.
pub fn report_features<E: Effect + ?Sized>(effect: &E, sink: &mut dyn ReportSink) {
    let selected = effect.selected_feature();
    for index in 1..=effect.feature_count() {
        if let Some(desc) = effect.feature_info(index) {
            sink.line(ReportLine {
                label: desc.name,
                value: effect.feature_display(index),
                decimals: desc.decimals,
                unit: desc.unit,
                selected: index == selected,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureDescriptor;
    use crate::report::Report;

    const GAIN: FeatureDescriptor = FeatureDescriptor::new("Gain", "gain", 0, 8, 4);
    const BIAS: FeatureDescriptor = FeatureDescriptor::new("Bias", "bias", -100, 100, 0).with_scale(10);

    struct Scaler {
        state: EffectState,
        gain: i32,
        bias: i32,
    }

    impl Scaler {
        fn new() -> Self {
            Self {
                state: EffectState::new(),
                gain: GAIN.default,
                bias: BIAS.default,
            }
        }
    }

    impl FeatureInfo for Scaler {
        fn feature_count(&self) -> u8 {
            2
        }

        fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
            match index {
                1 => Some(GAIN),
                2 => Some(BIAS),
                _ => None,
            }
        }

        fn get_feature(&self, index: u8) -> i32 {
            match index {
                1 => self.gain,
                2 => self.bias,
                _ => 0,
            }
        }

        fn set_feature(&mut self, index: u8, value: i32) {
            match index {
                1 => self.gain = GAIN.clamp(value),
                2 => self.bias = BIAS.clamp(value),
                _ => {}
            }
        }
    }

    impl Effect for Scaler {
        fn name(&self) -> &'static str {
            "Scaler"
        }

        fn state(&self) -> &EffectState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut EffectState {
            &mut self.state
        }

        fn process(&mut self, x: Sample) -> Sample {
            x * self.gain + self.bias
        }
    }

    #[test]
    fn test_initial_state() {
        let fx = Scaler::new();
        assert!(!fx.is_enabled());
        assert_eq!(fx.selected_feature(), 0);
    }

    #[test]
    fn test_next_feature_cycles_without_guard() {
        let mut fx = Scaler::new();
        let mut seen = [0u8; 6];
        for slot in &mut seen {
            fx.next_feature();
            *slot = fx.selected_feature();
        }
        assert_eq!(seen, [1, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn test_single_feature_never_leaves_guard() {
        let mut state = EffectState::new();
        state.next_feature(1);
        assert_eq!(state.feature(), 0);
        state.next_feature(0);
        assert_eq!(state.feature(), 0);
    }

    #[test]
    fn test_cursor_follows_feature_info_count() {
        // The count lives only in FeatureInfo; growing it widens the cycle.
        struct Wide(Scaler);
        impl FeatureInfo for Wide {
            fn feature_count(&self) -> u8 {
                3
            }
        }
        impl Effect for Wide {
            fn name(&self) -> &'static str {
                "Wide"
            }
            fn state(&self) -> &EffectState {
                self.0.state()
            }
            fn state_mut(&mut self) -> &mut EffectState {
                self.0.state_mut()
            }
        }

        let mut fx = Wide(Scaler::new());
        let mut seen = [0u8; 4];
        for slot in &mut seen {
            fx.next_feature();
            *slot = fx.selected_feature();
        }
        assert_eq!(seen, [1, 2, 3, 1]);
    }

    #[test]
    fn test_set_cursor_bounds() {
        let mut state = EffectState::new();
        state.set_cursor(2, 2);
        assert_eq!(state.feature(), 2);
        state.set_cursor(3, 2);
        assert_eq!(state.feature(), 0);
    }

    #[test]
    fn test_adjust_on_guard_is_inert() {
        let mut fx = Scaler::new();
        fx.adjust_feature(3);
        assert_eq!(fx.gain, 4);
        assert_eq!(fx.bias, 0);
    }

    #[test]
    fn test_adjust_scales_and_clamps() {
        let mut fx = Scaler::new();
        fx.next_feature();
        fx.adjust_feature(3);
        assert_eq!(fx.gain, 7);
        fx.adjust_feature(100);
        assert_eq!(fx.gain, 8);
        fx.next_feature();
        fx.adjust_feature(-2);
        assert_eq!(fx.bias, -20);
        fx.adjust_feature(-100);
        assert_eq!(fx.bias, -100);
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut fx = Scaler::new();
        assert!(fx.toggle());
        assert!(!fx.toggle());
        assert!(!fx.is_enabled());
    }

    #[test]
    fn test_report_highlights_selected() {
        let mut fx = Scaler::new();
        fx.next_feature();
        fx.next_feature();
        let mut report = Report::new(fx.name(), fx.is_enabled());
        fx.report(&mut report);
        assert_eq!(report.len(), 2);
        assert_eq!(report.selected().map(|l| l.label), Some("Bias"));
    }
}
