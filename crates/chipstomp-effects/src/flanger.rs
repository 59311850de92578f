//! Flanger: a sine-swept delay read from the middle of a raw sample buffer.
//!
//! Each tick the table LFO is scaled by the depth setting into an 8.8
//! fixed-point offset `m`. The read head sits half the buffer (1000 samples)
//! behind the write head and moves by `m >> 8` whole samples; the low byte
//! of `m` interpolates between that sample and the next.
//!
//! With depth at full scale the offset spans ±128 samples (≈ ±2.9 ms) around
//! the ~22.7 ms centre.

use chipstomp_core::{
    Effect, EffectState, FeatureDescriptor, FeatureInfo, FeatureUnit, SAMPLE_RATE, Sample,
    SampleRing, TableLfo, lerp_frac8, percentage, scale_u16, step_to_hz,
};

/// Delay buffer capacity in samples.
pub const BUFFER_LEN: usize = 2000;
const CENTRE: isize = (BUFFER_LEN / 2) as isize;

const FEATURE_DEPTH: u8 = 1;
const FEATURE_RATE: u8 = 2;

const DEPTH: FeatureDescriptor = FeatureDescriptor::amplitude("Depth", "depth", 255);
const RATE: FeatureDescriptor = FeatureDescriptor::new("Rate", "rate", 1, 0x3FF, 55)
    .with_unit(FeatureUnit::Hertz)
    .with_decimals(2);

/// Sine-modulated flanger.
///
/// ## Features
///
/// | Index | Name | Range | Default | Per detent |
/// |-------|------|-------|---------|------------|
/// | 1 | Depth | 0–0xFFFF | 0x7FFF | 255 |
/// | 2 | Rate | 1–0x3FF (LFO step) | 55 (≈ 9.25 Hz) | 1 |
///
/// # Output is wet only
///
/// There is no dry/wet mix control: the output is the delayed signal alone.
/// Blend with the dry signal downstream if a classic flange is wanted.
///
/// # Example
///
/// ```rust
/// use chipstomp_effects::Flanger;
/// use chipstomp_core::Effect;
///
/// let mut flanger = Flanger::new();
/// // The buffer starts silent, so early output is silence.
/// assert_eq!(flanger.process(10_000), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Flanger {
    state: EffectState,
    depth: u16,
    lfo: TableLfo,
    buffer: SampleRing<BUFFER_LEN>,
}

impl Flanger {
    /// Create a flanger at half depth and the default rate.
    pub const fn new() -> Self {
        Self {
            state: EffectState::new(),
            depth: DEPTH.default as u16,
            lfo: TableLfo::new(RATE.default as u16),
            buffer: SampleRing::new(),
        }
    }

    /// Set the sweep depth (fraction of 65536).
    pub fn set_depth(&mut self, depth: u16) {
        self.depth = depth;
    }

    /// Current sweep depth.
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

impl Default for Flanger {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureInfo for Flanger {
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

impl Effect for Flanger {
    fn name(&self) -> &'static str {
        "Flanger"
    }

    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        let offset = scale_u16(self.lfo.advance(), self.depth);
        self.buffer.push(x);

        // Offsets are relative to the oldest slot, i.e. the new write head.
        let whole = CENTRE + (offset >> 8) as isize;
        let a = self.buffer.relative(whole);
        let b = self.buffer.relative(whole + 1);
        lerp_frac8(a, b, (offset & 0xFF) as u8)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.lfo.reset();
    }
}
