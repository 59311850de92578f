//! Effect selection and control routing.
//!
//! [`EffectManager`] owns the pedal's fixed lineup of effects and the index
//! of the active one. The sample tick reaches only the active effect; every
//! other effect keeps its settings and buffers untouched until selected
//! again.
//!
//! # Example
//!
//! ```rust
//! use chipstomp_platform::{ControlEvent, EffectManager};
//! use chipstomp_registry::{EffectKind, PedalEffect};
//!
//! let mut pedal = EffectManager::new([
//!     PedalEffect::new(EffectKind::Bitcrush),
//!     PedalEffect::new(EffectKind::Echo),
//! ]);
//!
//! // Disabled effects pass audio through.
//! assert_eq!(pedal.dispatch(1234), 1234);
//!
//! pedal.apply(ControlEvent::SelectNext);
//! assert_eq!(pedal.active_index(), 1);
//! assert!(pedal.forward_toggle());
//! ```

use chipstomp_core::{Effect, EffectStatus, Report, ReportSink, Sample};

use crate::control::ControlEvent;

/// Owns `N` effects and routes samples and control events to the active one.
#[derive(Debug, Clone)]
pub struct EffectManager<E, const N: usize> {
    effects: [E; N],
    active: usize,
}

impl<E: Effect, const N: usize> EffectManager<E, N> {
    /// Create a manager with the first effect active.
    ///
    /// # Panics
    ///
    /// Panics at compile time if `N == 0`.
    pub const fn new(effects: [E; N]) -> Self {
        const { assert!(N > 0, "an effect manager needs at least one effect") };
        Self { effects, active: 0 }
    }

    /// Number of effects in the lineup.
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false: a manager holds at least one effect.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Index of the active effect.
    #[inline]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The active effect.
    #[inline]
    pub fn active(&self) -> &E {
        &self.effects[self.active]
    }

    /// The active effect, mutably.
    #[inline]
    pub fn active_mut(&mut self) -> &mut E {
        &mut self.effects[self.active]
    }

    /// All effects in lineup order.
    pub fn effects(&self) -> &[E; N] {
        &self.effects
    }

    /// All effects, mutably. Used to load presets into inactive effects.
    pub fn effects_mut(&mut self) -> &mut [E; N] {
        &mut self.effects
    }

    /// Run one sample through the active effect.
    ///
    /// A disabled effect returns the input unchanged.
    #[inline]
    pub fn dispatch(&mut self, x: Sample) -> Sample {
        let effect = &mut self.effects[self.active];
        if effect.is_enabled() { effect.process(x) } else { x }
    }

    /// Activate the next effect, wrapping after the last.
    pub fn select_next(&mut self) {
        self.select((self.active + 1) % N);
    }

    /// Activate the previous effect, wrapping before the first.
    pub fn select_previous(&mut self) {
        self.select((self.active + N - 1) % N);
    }

    /// Activate the effect at `index`. Out-of-range indices are ignored.
    ///
    /// The newly active effect's feature cursor is parked on the guard
    /// feature, so a stray encoder turn right after switching changes
    /// nothing.
    pub fn select(&mut self, index: usize) {
        if index >= N {
            return;
        }
        self.active = index;
        self.effects[index].state_mut().park();

        #[cfg(feature = "tracing")]
        tracing::debug!(index, effect = self.effects[index].name(), "select");
    }

    /// Apply an encoder delta to the active effect's selected feature.
    pub fn forward_adjust(&mut self, delta: i16) {
        self.active_mut().adjust_feature(delta);
    }

    /// Move the active effect's cursor to its next feature.
    pub fn forward_next_feature(&mut self) {
        self.active_mut().next_feature();
    }

    /// Toggle the active effect and return its new enabled flag.
    pub fn forward_toggle(&mut self) -> bool {
        let enabled = self.active_mut().toggle();

        #[cfg(feature = "tracing")]
        tracing::debug!(effect = self.active().name(), enabled, "toggle");

        enabled
    }

    /// Emit the active effect's report lines into `sink`.
    pub fn forward_report(&self, sink: &mut dyn ReportSink) {
        self.active().report(sink);
    }

    /// Integer snapshot of the active effect. Safe to take inside the sample
    /// callback.
    #[inline]
    pub fn status(&self) -> EffectStatus {
        EffectStatus::capture(self.active, self.active())
    }

    /// Collect the active effect's report into a fixed-size [`Report`].
    ///
    /// Involves float display math; the sample callback uses
    /// [`status`](Self::status) instead.
    pub fn report(&self) -> Report {
        let effect = self.active();
        let mut report = Report::new(effect.name(), effect.is_enabled());
        effect.report(&mut report);
        report
    }

    /// Route one control event. Returns a status for [`ControlEvent::Report`].
    pub fn apply(&mut self, event: ControlEvent) -> Option<EffectStatus> {
        match event {
            ControlEvent::Adjust(delta) => self.forward_adjust(delta),
            ControlEvent::NextFeature => self.forward_next_feature(),
            ControlEvent::Toggle => {
                self.forward_toggle();
            }
            ControlEvent::SelectNext => self.select_next(),
            ControlEvent::SelectPrevious => self.select_previous(),
            ControlEvent::Report => return Some(self.status()),
        }
        None
    }

    /// Clear every effect's buffers and oscillators. Settings are kept.
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }
}
