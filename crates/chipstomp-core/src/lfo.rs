//! Table-driven low frequency oscillator.
//!
//! Provides the periodic modulation used by the flanger and tremolo. The
//! oscillator walks [`SINE_TABLE`](crate::SINE_TABLE) with a 24.8 fixed-point
//! phase accumulator: the upper 24 bits index the table, the low byte is the
//! interpolation fraction between neighbouring entries.
//!
//! # Frequency
//!
//! Each tick the phase advances by `step` (in 256ths of a table entry), so
//!
//! ```text
//! f = step / 256 × sample_rate / TABLE_LEN
//! ```
//!
//! At 44.1 kHz a `step` of 256 gives ≈ 43.07 Hz and the default 55 gives
//! ≈ 9.25 Hz.

use crate::waveform::{TABLE_LEN, sine_at};

/// Phase accumulator wraps at one table period in 24.8 fixed point.
const PHASE_MASK: u32 = ((TABLE_LEN as u32) << 8) - 1;

/// Sine LFO over the shared lookup table.
///
/// # Example
///
/// ```rust
/// use chipstomp_core::TableLfo;
///
/// let mut lfo = TableLfo::new(256);
/// let value = lfo.advance();
/// assert!((-32767..=32767).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct TableLfo {
    /// Table position, 24-bit index + 8-bit fraction.
    phase: u32,
    /// Phase increment per tick (256 = one table entry).
    step: u16,
}

impl TableLfo {
    /// Create an LFO at phase 0 advancing `step` per tick.
    pub const fn new(step: u16) -> Self {
        Self { phase: 0, step }
    }

    /// Set the phase increment per tick.
    #[inline]
    pub fn set_step(&mut self, step: u16) {
        self.step = step;
    }

    /// Current phase increment per tick.
    #[inline]
    pub const fn step(&self) -> u16 {
        self.step
    }

    /// Current 24.8 phase.
    #[inline]
    pub const fn phase(&self) -> u32 {
        self.phase
    }

    /// Return to phase 0.
    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Advance one tick and return the interpolated sine value (±32767).
    #[inline]
    pub fn advance(&mut self) -> i32 {
        self.phase = self.phase.wrapping_add(u32::from(self.step)) & PHASE_MASK;
        sine_at(self.phase)
    }

    /// Oscillator frequency in Hz for the given sample rate.
    pub fn frequency_hz(&self, sample_rate: u32) -> f32 {
        step_to_hz(self.step, sample_rate)
    }
}

/// Converts an LFO step to Hz: `step / 256 × sample_rate / TABLE_LEN`.
pub fn step_to_hz(step: u16, sample_rate: u32) -> f32 {
    f32::from(step) * sample_rate as f32 / (256.0 * TABLE_LEN as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Count samples between the first and last upward zero crossing over
    /// `ticks` and return the mean period.
    fn measured_period(lfo: &mut TableLfo, ticks: usize) -> f32 {
        let mut prev = lfo.advance();
        let mut first = None;
        let mut last = 0usize;
        let mut crossings = 0usize;
        for t in 1..ticks {
            let v = lfo.advance();
            if prev < 0 && v >= 0 {
                if first.is_none() {
                    first = Some(t);
                }
                last = t;
                crossings += 1;
            }
            prev = v;
        }
        let first = first.unwrap();
        (last - first) as f32 / (crossings - 1) as f32
    }

    #[test]
    fn test_lfo_period_matches_step() {
        for step in [55u16, 256, 700, 1023] {
            let mut lfo = TableLfo::new(step);
            let expected = (TABLE_LEN as f32 * 256.0) / f32::from(step);
            let period = measured_period(&mut lfo, 200_000);
            assert!(
                (period - expected).abs() < 1.0,
                "step {step}: period {period}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_lfo_output_range() {
        let mut lfo = TableLfo::new(1023);
        for _ in 0..10_000 {
            let v = lfo.advance();
            assert!((-32767..=32767).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_lfo_phase_wraps() {
        let mut lfo = TableLfo::new(0x3FF);
        for _ in 0..100_000 {
            lfo.advance();
            assert!(lfo.phase() <= PHASE_MASK);
        }
    }

    #[test]
    fn test_step_to_hz() {
        let hz = step_to_hz(256, 44_100);
        assert!((hz - 43.066).abs() < 0.01, "got {hz}");
        let lfo = TableLfo::new(55);
        assert!((lfo.frequency_hz(44_100) - 9.2525).abs() < 0.01);
    }

    #[test]
    fn test_lfo_reset() {
        let mut lfo = TableLfo::new(300);
        let first = lfo.advance();
        for _ in 0..50 {
            lfo.advance();
        }
        lfo.reset();
        assert_eq!(lfo.advance(), first);
    }
}
