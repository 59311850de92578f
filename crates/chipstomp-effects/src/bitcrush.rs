//! Bitcrush effect: sample rate reduction and bit depth quantization.
//!
//! # Theory
//!
//! Two independent mechanisms produce the lo-fi character.
//!
//! ## Sample Rate Reduction (Averaging Hold)
//!
//! Every `ratio` ticks the mean of the last `ratio` inputs is latched and
//! then held for the following `ratio` output samples. The mean acts as a
//! crude box-car low-pass before the hold; the hold itself is a zero-order
//! hold and produces the characteristic aliasing staircase. The effective
//! output rate is `44100 / ratio` Hz.
//!
//! ## Bit Depth Reduction (Quantization)
//!
//! With `B` bits of a 16-bit sample kept, the low `16 − B` bits are cleared
//! by an arithmetic shift right followed by a shift left:
//!
//! ```text
//! y = (x >> (16 − B)) << (16 − B)
//! ```
//!
//! The shift floors toward negative infinity, so the sign is kept and the
//! amplitude is roughly preserved while resolution is discarded.

use chipstomp_core::{
    Effect, EffectState, FeatureDescriptor, FeatureInfo, FeatureUnit, ReportLine, ReportSink,
    SAMPLE_RATE, Sample, report_features,
};

const FEATURE_BITS: u8 = 1;
const FEATURE_RATIO: u8 = 2;

const BITS: FeatureDescriptor = FeatureDescriptor::new("Bits", "bits", 1, 16, 16).with_unit(FeatureUnit::Bits);
// Clockwise lowers the ratio, which raises the output rate.
const RATIO: FeatureDescriptor = FeatureDescriptor::new("Ratio", "ratio", 1, 64, 1)
    .with_unit(FeatureUnit::Ratio)
    .with_scale(-1);

/// Bit depth and sample rate reducer.
///
/// ## Features
///
/// | Index | Name | Range | Default | Per detent |
/// |-------|------|-------|---------|------------|
/// | 1 | Bits | 1–16 | 16 | +1 |
/// | 2 | Ratio | 1–64 | 1 | −1 (inverted) |
///
/// The report adds an informational `Rate <44100/ratio>Hz` line.
///
/// # Example
///
/// ```rust
/// use chipstomp_effects::Bitcrush;
/// use chipstomp_core::Effect;
///
/// let mut crusher = Bitcrush::new();
/// crusher.set_bits(4);
/// assert_eq!(crusher.process(0x1234), 0x1000);
/// ```
#[derive(Debug, Clone)]
pub struct Bitcrush {
    state: EffectState,
    bits: u8,
    ratio: u8,
    /// Position within the current decimation window.
    step: u8,
    /// Sum of the inputs seen in the current window.
    accumulator: Sample,
    /// Latched window mean.
    held: Sample,
}

impl Bitcrush {
    /// Create a transparent bitcrusher (16 bits, ratio 1).
    pub const fn new() -> Self {
        Self {
            state: EffectState::new(),
            bits: BITS.default as u8,
            ratio: RATIO.default as u8,
            step: 0,
            accumulator: 0,
            held: 0,
        }
    }

    /// Set the kept bit depth, clamped to 1–16.
    pub fn set_bits(&mut self, bits: u8) {
        self.bits = bits.clamp(1, 16);
    }

    /// Current bit depth.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Set the decimation ratio, clamped to 1–64.
    pub fn set_ratio(&mut self, ratio: u8) {
        self.ratio = ratio.clamp(1, 64);
    }

    /// Current decimation ratio.
    pub fn ratio(&self) -> u8 {
        self.ratio
    }

    /// Effective output sample rate in Hz.
    pub fn output_rate_hz(&self) -> u32 {
        SAMPLE_RATE / u32::from(self.ratio)
    }
}

impl Default for Bitcrush {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureInfo for Bitcrush {
    fn feature_count(&self) -> u8 {
        2
    }

    fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
        match index {
            FEATURE_BITS => Some(BITS),
            FEATURE_RATIO => Some(RATIO),
            _ => None,
        }
    }

    fn get_feature(&self, index: u8) -> i32 {
        match index {
            FEATURE_BITS => i32::from(self.bits),
            FEATURE_RATIO => i32::from(self.ratio),
            _ => 0,
        }
    }

    fn set_feature(&mut self, index: u8, value: i32) {
        match index {
            FEATURE_BITS => self.bits = BITS.clamp(value) as u8,
            FEATURE_RATIO => self.ratio = RATIO.clamp(value) as u8,
            _ => {}
        }
    }
}

impl Effect for Bitcrush {
    fn name(&self) -> &'static str {
        "Bitcrush"
    }

    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        self.accumulator += x;
        if self.step == 0 {
            self.held = self.accumulator / Sample::from(self.ratio);
            self.accumulator = 0;
        }
        self.step += 1;
        if self.step >= self.ratio {
            self.step = 0;
        }

        let shift = 16 - u32::from(self.bits);
        (self.held >> shift) << shift
    }

    fn reset(&mut self) {
        self.step = 0;
        self.accumulator = 0;
        self.held = 0;
    }

    fn report(&self, sink: &mut dyn ReportSink) {
        report_features(self, sink);
        sink.line(ReportLine::info(
            "Rate",
            self.output_rate_hz() as f32,
            FeatureUnit::Hertz,
        ));
    }
}
