//! Echo: a decimated tape delay with interpolated playback.
//!
//! # Signal Flow
//!
//! ```text
//!            ┌──────────────┐  every 8th tick  ┌─────────────────┐
//! x ──┬────► │ 8-tap average│ ───────────────► │ tape (4096 slots)│
//!     │      └──────────────┘                  └────────┬────────┘
//!     │                                  read slot = write − delay
//!     │                                  lerp(slot, slot+1, phase/8)
//!     │                                                 │ × amp >> 16
//!     └───────────────────────────► (+) ◄───────────────┘
//!                                    │
//!                                    y
//! ```
//!
//! The tape runs at 1/8 of the sample rate, so 4096 slots cover ~743 ms.
//! Writing the mean of the last eight raw inputs is the anti-alias step
//! before decimation; reading two neighbouring slots and interpolating by
//! the sub-slot phase (`tick mod 8`) smooths the playback back up to the
//! full rate. Unlike the flanger and pitch shifter, the echo mixes the dry
//! signal in itself.

use chipstomp_core::{
    Effect, EffectState, FeatureDescriptor, FeatureInfo, FeatureUnit, SAMPLE_RATE, Sample,
    SampleRing, lerp_shift, percentage, scale_u16,
};

/// Tape capacity in slots.
pub const TAPE_LEN: usize = 4096;
/// Raw samples per tape slot.
pub const DECIMATION: usize = 8;
const DECIMATION_SHIFT: u32 = 3;
/// Shortest delay in tape slots.
pub const DELAY_SLOTS_MIN: u32 = 1;
/// Longest delay in tape slots.
pub const DELAY_SLOTS_MAX: u32 = (TAPE_LEN - DECIMATION - 1) as u32;
/// Top of the user-facing delay range.
pub const DELAY_RANGE: i32 = 200;

const FEATURE_AMPLITUDE: u8 = 1;
const FEATURE_DELAY: u8 = 2;

const AMPLITUDE: FeatureDescriptor = FeatureDescriptor::amplitude("Amp", "amplitude", 512);
const DELAY: FeatureDescriptor =
    FeatureDescriptor::new("Delay", "delay", 0, DELAY_RANGE, 100).with_unit(FeatureUnit::Milliseconds);

/// Maps the user delay (0–200) onto tape slots (1–4087).
pub const fn delay_slots(user: i32) -> u32 {
    let user = if user < 0 {
        0
    } else if user > DELAY_RANGE {
        DELAY_RANGE
    } else {
        user
    };
    DELAY_SLOTS_MIN + (user as u32) * (DELAY_SLOTS_MAX - DELAY_SLOTS_MIN) / DELAY_RANGE as u32
}

/// Decimated tape echo.
///
/// ## Features
///
/// | Index | Name | Range | Default | Per detent |
/// |-------|------|-------|---------|------------|
/// | 1 | Amp | 0–0xFFFF | 0x7FFF | 512 |
/// | 2 | Delay | 0–200 | 100 | 1 |
///
/// Delay is reported in milliseconds: `delay_slots × 8 / 44.1 kHz`.
///
/// # Example
///
/// ```rust
/// use chipstomp_effects::Echo;
/// use chipstomp_core::Effect;
///
/// let mut echo = Echo::new();
/// // Silence in, silence out; the dry path is untouched.
/// assert_eq!(echo.process(0), 0);
/// assert_eq!(echo.process(1000), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct Echo {
    state: EffectState,
    amplitude: u16,
    delay: i32,
    delay_slots: u32,
    tape: SampleRing<TAPE_LEN>,
    /// Last eight raw inputs, indexed by sub-slot phase.
    lpf: [Sample; DECIMATION],
    /// Raw tick position over the tape, `0..TAPE_LEN * DECIMATION`.
    position: usize,
}

impl Echo {
    /// Create an echo at half amplitude and mid delay.
    pub const fn new() -> Self {
        Self {
            state: EffectState::new(),
            amplitude: AMPLITUDE.default as u16,
            delay: DELAY.default,
            delay_slots: delay_slots(DELAY.default),
            tape: SampleRing::new(),
            lpf: [0; DECIMATION],
            position: 0,
        }
    }

    /// Set the wet amplitude (fraction of 65536).
    pub fn set_amplitude(&mut self, amplitude: u16) {
        self.amplitude = amplitude;
    }

    /// Current wet amplitude.
    pub fn amplitude(&self) -> u16 {
        self.amplitude
    }

    /// Set the user delay (0–200), clamped.
    pub fn set_delay(&mut self, delay: i32) {
        self.delay = DELAY.clamp(delay);
        self.delay_slots = delay_slots(self.delay);
    }

    /// Current user delay.
    pub fn delay(&self) -> i32 {
        self.delay
    }

    /// Current delay in tape slots.
    pub fn delay_slots(&self) -> u32 {
        self.delay_slots
    }

    /// Current delay in milliseconds.
    pub fn delay_ms(&self) -> f32 {
        (self.delay_slots as usize * DECIMATION) as f32 * 1000.0 / SAMPLE_RATE as f32
    }
}

impl Default for Echo {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureInfo for Echo {
    fn feature_count(&self) -> u8 {
        2
    }

    fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
        match index {
            FEATURE_AMPLITUDE => Some(AMPLITUDE),
            FEATURE_DELAY => Some(DELAY),
            _ => None,
        }
    }

    fn get_feature(&self, index: u8) -> i32 {
        match index {
            FEATURE_AMPLITUDE => i32::from(self.amplitude),
            FEATURE_DELAY => self.delay,
            _ => 0,
        }
    }

    fn set_feature(&mut self, index: u8, value: i32) {
        match index {
            FEATURE_AMPLITUDE => self.amplitude = AMPLITUDE.clamp(value) as u16,
            FEATURE_DELAY => self.set_delay(value),
            _ => {}
        }
    }

    fn feature_display(&self, index: u8) -> f32 {
        match index {
            FEATURE_AMPLITUDE => percentage(i32::from(self.amplitude), AMPLITUDE.min, AMPLITUDE.max),
            FEATURE_DELAY => self.delay_ms(),
            _ => 0.0,
        }
    }
}

impl Effect for Echo {
    fn name(&self) -> &'static str {
        "Echo"
    }

    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    #[inline]
    fn process(&mut self, x: Sample) -> Sample {
        let phase = self.position & (DECIMATION - 1);
        let slot = self.position >> DECIMATION_SHIFT;
        self.position += 1;
        if self.position >= TAPE_LEN * DECIMATION {
            self.position = 0;
        }

        self.lpf[phase] = x;
        if phase == 0 {
            let sum: Sample = self.lpf.iter().sum();
            self.tape.set(slot, sum >> DECIMATION_SHIFT);
        }

        let read = (slot + TAPE_LEN - self.delay_slots as usize) % TAPE_LEN;
        let tap = lerp_shift(
            self.tape.get(read),
            self.tape.get(read + 1),
            phase as u32,
            DECIMATION_SHIFT,
        );

        x + scale_u16(tap, self.amplitude)
    }

    fn reset(&mut self) {
        self.tape.clear();
        self.lpf = [0; DECIMATION];
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipstomp_core::Report;

    #[test]
    fn test_delay_mapping() {
        assert_eq!(delay_slots(0), 1);
        assert_eq!(delay_slots(200), DELAY_SLOTS_MAX);
        assert_eq!(delay_slots(100), 1 + 100 * 4086 / 200);
        assert_eq!(delay_slots(-7), 1);
        assert_eq!(delay_slots(999), DELAY_SLOTS_MAX);
    }

    #[test]
    fn test_dry_path_passes_through() {
        let mut echo = Echo::new();
        echo.set_amplitude(0);
        for x in [100, -2000, 32767, -32767] {
            assert_eq!(echo.process(x), x);
        }
    }

    #[test]
    fn test_impulse_peaks_one_slot_later() {
        let mut echo = Echo::new();
        echo.set_delay(0);
        echo.set_amplitude(0xFFFF);
        let mut out = [0; 24];
        out[0] = echo.process(8000);
        for y in out.iter_mut().skip(1) {
            *y = echo.process(0);
        }
        // tape[0] = 8000 / 8; the tap ramps in over slot 0's phase, peaks at
        // the next slot boundary and ramps out.
        assert_eq!(out[0], 8000);
        assert_eq!(out[4], scale_u16(500, 0xFFFF));
        assert_eq!(out[8], scale_u16(1000, 0xFFFF));
        assert_eq!(out[12], scale_u16(500, 0xFFFF));
        assert!(out[16..].iter().all(|&y| y == 0));
    }

    #[test]
    fn test_tap_follows_delay_setting() {
        let mut echo = Echo::new();
        echo.set_delay(10);
        echo.set_amplitude(0x8000);
        let slots = echo.delay_slots() as usize;
        let mut peak = (0usize, 0);
        for t in 0..(slots + 4) * DECIMATION {
            let x = if (1..=DECIMATION).contains(&t) { 16000 } else { 0 };
            let y = echo.process(x);
            if t > DECIMATION && y > peak.1 {
                peak = (t, y);
            }
        }
        // Ticks 1..=8 average into slot 1, which reads back `slots` slots later.
        assert_eq!(peak.0, (slots + 1) * DECIMATION);
        assert_eq!(peak.1, 8000);
    }

    #[test]
    fn test_amplitude_encoder_scale() {
        let mut echo = Echo::new();
        echo.next_feature();
        echo.adjust_feature(2);
        assert_eq!(echo.amplitude(), 0x7FFF + 1024);
        echo.adjust_feature(i16::MAX);
        assert_eq!(echo.amplitude(), 0xFFFF);
        echo.adjust_feature(i16::MIN);
        assert_eq!(echo.amplitude(), 0);
    }

    #[test]
    fn test_delay_encoder_clamps() {
        let mut echo = Echo::new();
        echo.next_feature();
        echo.next_feature();
        echo.adjust_feature(500);
        assert_eq!(echo.delay(), 200);
        assert_eq!(echo.delay_slots(), DELAY_SLOTS_MAX);
        echo.adjust_feature(-500);
        assert_eq!(echo.delay(), 0);
        assert_eq!(echo.delay_slots(), DELAY_SLOTS_MIN);
    }

    #[test]
    fn test_report_lines() {
        let mut echo = Echo::new();
        echo.set_delay(0);
        echo.next_feature();
        let mut report = Report::new(echo.name(), echo.is_enabled());
        echo.report(&mut report);
        let lines: Vec<String> = report.lines().map(ToString::to_string).collect();
        assert_eq!(lines, ["Amp 50.00%", "Delay 0mS"]);
        assert_eq!(report.selected().map(|l| l.label), Some("Amp"));
    }

    #[test]
    fn test_reset_clears_tape() {
        let mut echo = Echo::new();
        echo.set_delay(0);
        echo.set_amplitude(0xFFFF);
        for _ in 0..8 {
            echo.process(20000);
        }
        echo.reset();
        for _ in 0..32 {
            assert_eq!(echo.process(0), 0);
        }
    }
}
