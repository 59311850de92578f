//! Tremolo effect.
//!
//! Classic amplitude modulation: the table LFO, scaled by depth, is biased
//! up by half of full scale so the gain never goes negative, then applied as
//! a Q15 multiplier:
//!
//! ```text
//! m    = (lfo × depth) >> 16        // ±32767 at full depth
//! gain = m + 0x8000                 // 1..=65535, unity at 0x8000
//! y    = (x × gain) >> 15
//! ```
//!
//! At full depth the gain swings between almost silence and almost 2×.

use chipstomp_core::{
    Effect, EffectState, FeatureDescriptor, FeatureInfo, FeatureUnit, SAMPLE_RATE, Sample,
    TableLfo, percentage, scale_u16, step_to_hz,
};

const FEATURE_DEPTH: u8 = 1;
const FEATURE_RATE: u8 = 2;

const DEPTH: FeatureDescriptor = FeatureDescriptor::amplitude("Depth", "depth", 255);
const RATE: FeatureDescriptor = FeatureDescriptor::new("Rate", "rate", 1, 0x3FF, 55)
    .with_unit(FeatureUnit::Hertz)
    .with_decimals(2);

/// Sine tremolo.
///
/// ## Features
///
/// | Index | Name | Range | Default | Per detent |
/// |-------|------|-------|---------|------------|
/// | 1 | Depth | 0–0xFFFF | 0x7FFF | 255 |
/// | 2 | Rate | 1–0x3FF (LFO step) | 55 (≈ 9.25 Hz) | 1 |
///
/// # Example
///
/// ```rust
/// use chipstomp_effects::Tremolo;
/// use chipstomp_core::Effect;
///
/// let mut tremolo = Tremolo::new();
/// tremolo.set_depth(0);
/// assert_eq!(tremolo.process(1000), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct Tremolo {
    state: EffectState,
    depth: u16,
    lfo: TableLfo,
}

impl Tremolo {
    /// Create a tremolo at half depth and the default rate.
    pub const fn new() -> Self {
        Self {
            state: EffectState::new(),
            depth: DEPTH.default as u16,
            lfo: TableLfo::new(RATE.default as u16),
        }
    }

    /// Set modulation depth (fraction of 65536).
    pub fn set_depth(&mut self, depth: u16) {
        self.depth = depth;
    }

    /// Current depth.
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Set the LFO step, clamped to 1–0x3FF.
    pub fn set_rate(&mut self, step: u16) {
        self.lfo.set_step(RATE.clamp(i32::from(step)) as u16);
    }

    /// Current LFO step.
    pub fn rate(&self) -> u16 {
        self.lfo.step()
    }

    /// Current LFO frequency in Hz.
    pub fn rate_hz(&self) -> f32 {
        step_to_hz(self.lfo.step(), SAMPLE_RATE)
    }
}

impl Default for Tremolo {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureInfo for Tremolo {
    fn feature_count(&self) -> u8 {
        2
    }

    fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
        match index {
            FEATURE_DEPTH => Some(DEPTH),
            FEATURE_RATE => Some(RATE),
            _ => None,
        }
    }

    fn get_feature(&self, index: u8) -> i32 {
        match index {
            FEATURE_DEPTH => i32::from(self.depth),
            FEATURE_RATE => i32::from(self.lfo.step()),
            _ => 0,
        }
    }

    fn set_feature(&mut self, index: u8, value: i32) {
        match index {
            FEATURE_DEPTH => self.depth = DEPTH.clamp(value) as u16,
            FEATURE_RATE => self.lfo.set_step(RATE.clamp(value) as u16),
            _ => {}
        }
    }

    fn feature_display(&self, index: u8) -> f32 {
        match index {
            FEATURE_DEPTH => percentage(i32::from(self.depth), DEPTH.min, DEPTH.max),
            FEATURE_RATE => self.rate_hz(),
            _ => 0.0,
        }
    }
}

impl Effect for Tremolo {
    fn name(&self) -> &'static str {
        "Tremolo"
    }

    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        let m = scale_u16(self.lfo.advance(), self.depth);
        let gain = i64::from(m + 0x8000);
        ((i64::from(x) * gain) >> 15) as Sample
    }

    fn reset(&mut self) {
        self.lfo.reset();
    }
}
