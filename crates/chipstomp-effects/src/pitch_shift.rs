//! Pitch shifter: a short grain buffer read at a different rate than written.
//!
//! The write head advances exactly one slot per tick. The read head is a
//! 24.8 fixed-point cursor advancing by `step` per tick, where `0x100` is
//! unity rate; slower reading lowers the pitch, faster raises it. It starts
//! half a buffer away from the write head, so at unity the output is the
//! input delayed by 256 samples.
//!
//! When the read head is about to be lapped (it sits fewer than
//! `W = 2^WRAP_SHIFT` slots ahead of the write head), the read sample is
//! cross-faded toward the newest input, weighted by the distance, to hide
//! the discontinuity:
//!
//! ```text
//! s' = (s·d + newest·(W − d)) >> WRAP_SHIFT
//! ```

use chipstomp_core::{
    Effect, EffectState, FeatureDescriptor, FeatureInfo, Sample, SampleRing, percentage, scale_u16,
};

/// Grain buffer capacity in samples.
pub const BUFFER_LEN: usize = 512;
/// Cross-fade window as a power of two.
pub const WRAP_SHIFT: u32 = 4;
const WRAP_LEN: usize = 1 << WRAP_SHIFT;
/// Read step for unity rate.
pub const UNITY_STEP: u16 = 0x100;
const READ_MASK: u32 = ((BUFFER_LEN as u32) << 8) - 1;
const READ_START: u32 = ((BUFFER_LEN / 2) as u32) << 8;

const FEATURE_MIX: u8 = 1;
const FEATURE_BEND: u8 = 2;

const MIX: FeatureDescriptor = FeatureDescriptor::amplitude("Mix", "mix", 512);
// Signed offset from unity; the read step is `0x100 + bend`, 0..=0x1FF.
const BEND: FeatureDescriptor = FeatureDescriptor::new("Bend", "bend", -256, 255, 0);

/// Granular pitch shifter.
///
/// ## Features
///
/// | Index | Name | Range | Default | Per detent |
/// |-------|------|-------|---------|------------|
/// | 1 | Mix | 0–0xFFFF | 0x7FFF | 512 |
/// | 2 | Bend | −256–255 | 0 (unity) | 1 |
///
/// The output is the shifted signal scaled by Mix; the dry signal is not
/// added back.
///
/// # Example
///
/// ```rust
/// use chipstomp_effects::PitchShift;
/// use chipstomp_core::Effect;
///
/// let mut shifter = PitchShift::new();
/// shifter.set_bend(12);
/// assert_eq!(shifter.step(), 0x10C);
/// assert_eq!(shifter.process(1000), 0);
/// ```
#[derive(Debug, Clone)]
pub struct PitchShift {
    state: EffectState,
    mix: u16,
    step: u16,
    /// 24.8 read cursor.
    read_pos: u32,
    buffer: SampleRing<BUFFER_LEN>,
}

impl PitchShift {
    /// Create a unity-rate shifter at half mix.
    pub const fn new() -> Self {
        Self {
            state: EffectState::new(),
            mix: MIX.default as u16,
            step: UNITY_STEP,
            read_pos: READ_START,
            buffer: SampleRing::new(),
        }
    }

    /// Set the output level (fraction of 65536).
    pub fn set_mix(&mut self, mix: u16) {
        self.mix = mix;
    }

    /// Current output level.
    pub fn mix(&self) -> u16 {
        self.mix
    }

    /// Set the bend offset from unity, clamped to −256–255.
    pub fn set_bend(&mut self, bend: i32) {
        self.step = (i32::from(UNITY_STEP) + BEND.clamp(bend)) as u16;
    }

    /// Current bend offset from unity.
    pub fn bend(&self) -> i32 {
        i32::from(self.step) - i32::from(UNITY_STEP)
    }

    /// Current read step (`0x100` = unity).
    pub fn step(&self) -> u16 {
        self.step
    }
}

impl Default for PitchShift {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureInfo for PitchShift {
    fn feature_count(&self) -> u8 {
        2
    }

    fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
        match index {
            FEATURE_MIX => Some(MIX),
            FEATURE_BEND => Some(BEND),
            _ => None,
        }
    }

    fn get_feature(&self, index: u8) -> i32 {
        match index {
            FEATURE_MIX => i32::from(self.mix),
            FEATURE_BEND => self.bend(),
            _ => 0,
        }
    }

    fn set_feature(&mut self, index: u8, value: i32) {
        match index {
            FEATURE_MIX => self.mix = MIX.clamp(value) as u16,
            FEATURE_BEND => self.set_bend(value),
            _ => {}
        }
    }

    fn feature_display(&self, index: u8) -> f32 {
        match index {
            FEATURE_MIX => percentage(i32::from(self.mix), MIX.min, MIX.max),
            FEATURE_BEND => self.bend() as f32,
            _ => 0.0,
        }
    }
}

impl Effect for PitchShift {
    fn name(&self) -> &'static str {
        "PitchShift"
    }

    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        self.buffer.push(x);
        let write = (self.buffer.write_pos() + BUFFER_LEN - 1) % BUFFER_LEN;

        let read = (self.read_pos >> 8) as usize;
        self.read_pos = (self.read_pos + u32::from(self.step)) & READ_MASK;

        let mut sample = self.buffer.get(read);
        let diff = (read + BUFFER_LEN - write) % BUFFER_LEN;
        if diff < WRAP_LEN {
            let newest = self.buffer.get(write);
            sample = (sample * diff as Sample + newest * (WRAP_LEN - diff) as Sample) >> WRAP_SHIFT;
        }

        scale_u16(sample, self.mix)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.read_pos = READ_START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipstomp_core::{Report, TableLfo};

    #[test]
    fn test_unity_is_fixed_delay() {
        let mut shifter = PitchShift::new();
        shifter.set_mix(0xFFFF);
        let mut lfo = TableLfo::new(2600);
        let input: Vec<Sample> = (0..2000).map(|_| lfo.advance() * 2 / 3).collect();
        let output: Vec<Sample> = input.iter().map(|&x| shifter.process(x)).collect();

        let delay = BUFFER_LEN / 2;
        assert!(output[..delay].iter().all(|&y| y == 0));
        for t in delay..input.len() {
            let diff = (output[t] - input[t - delay]).abs();
            assert!(diff <= 1, "t={t}: got {} want {}", output[t], input[t - delay]);
        }
    }

    #[test]
    fn test_crossfade_when_write_head_laps() {
        let mut shifter = PitchShift::new();
        shifter.set_mix(0xFFFF);
        shifter.set_bend(-256);
        assert_eq!(shifter.step(), 0);

        // Read head frozen on slot 256; constant input approaches it.
        let out: Vec<Sample> = (0..300).map(|_| shifter.process(1000)).collect();
        assert!(out[..241].iter().all(|&y| y == 0));
        assert_eq!(out[241], scale_u16(1000 >> 4, 0xFFFF));
        assert_eq!(out[248], scale_u16(500, 0xFFFF));
        assert_eq!(out[256], scale_u16(1000, 0xFFFF));
        for pair in out[241..=256].windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_bend_clamps() {
        let mut shifter = PitchShift::new();
        shifter.next_feature();
        shifter.next_feature();
        shifter.adjust_feature(1000);
        assert_eq!(shifter.step(), 0x1FF);
        shifter.adjust_feature(-1000);
        assert_eq!(shifter.step(), 0);
    }

    #[test]
    fn test_mix_scales_output() {
        let mut shifter = PitchShift::new();
        shifter.set_mix(0);
        for _ in 0..600 {
            assert_eq!(shifter.process(20_000), 0);
        }
    }

    #[test]
    fn test_report_lines() {
        let mut shifter = PitchShift::new();
        shifter.set_bend(-3);
        let mut report = Report::new(shifter.name(), shifter.is_enabled());
        shifter.report(&mut report);
        let lines: Vec<String> = report.lines().map(ToString::to_string).collect();
        assert_eq!(lines, ["Mix 50.00%", "Bend -3"]);
    }

    #[test]
    fn test_reset_restores_read_offset() {
        let mut shifter = PitchShift::new();
        shifter.set_bend(100);
        for _ in 0..1000 {
            shifter.process(5000);
        }
        shifter.reset();
        assert_eq!(shifter.read_pos, READ_START);
        assert_eq!(shifter.process(5000), 0);
    }
}
