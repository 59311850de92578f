//! Fixed-capacity circular sample buffer.
//!
//! The building block for every time-based effect on the pedal. Storage is a
//! plain `[i16; N]` embedded in the owning effect, so the buffer lives
//! wherever the effect lives (a `static` on the target, the stack in tests)
//! and never allocates.
//!
//! # Use Cases
//!
//! | Effect | Capacity | Writes | Reads |
//! |--------|----------|--------|-------|
//! | Echo | 4096 | every 8th tick (decimated) | two slots, interpolated |
//! | Flanger | 2000 | every tick | LFO-offset pair, interpolated |
//! | PitchShift | 512 | every tick | fractional-rate read head |
//!
//! Indices always wrap modulo `N`; no read or write can go out of bounds.

use crate::fixed::{Sample, to_i16};

/// Circular buffer of `N` 16-bit samples with a single write cursor.
///
/// # Example
///
/// ```rust
/// use chipstomp_core::SampleRing;
///
/// let mut ring: SampleRing<8> = SampleRing::new();
/// ring.push(100);
/// ring.push(200);
/// assert_eq!(ring.newest(), 200);
/// assert_eq!(ring.delayed(1), 100);
/// ```
#[derive(Debug, Clone)]
pub struct SampleRing<const N: usize> {
    buffer: [i16; N],
    write_pos: usize,
}

impl<const N: usize> SampleRing<N> {
    /// Create a silent buffer with the cursor at slot 0.
    pub const fn new() -> Self {
        assert!(N > 0, "ring capacity must be > 0");
        Self {
            buffer: [0; N],
            write_pos: 0,
        }
    }

    /// Buffer capacity in samples.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Slot the next [`push`](Self::push) will write.
    #[inline]
    pub const fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Store `sample` at the cursor (saturated to 16 bits) and advance it.
    #[inline]
    pub fn push(&mut self, sample: Sample) {
        self.buffer[self.write_pos] = to_i16(sample);
        self.write_pos += 1;
        if self.write_pos >= N {
            self.write_pos = 0;
        }
    }

    /// Overwrite an absolute slot without moving the cursor.
    #[inline]
    pub fn set(&mut self, index: usize, sample: Sample) {
        self.buffer[index % N] = to_i16(sample);
    }

    /// Read an absolute slot (wrapped).
    #[inline]
    pub fn get(&self, index: usize) -> Sample {
        Sample::from(self.buffer[index % N])
    }

    /// Read relative to the cursor. Offset 0 is the oldest sample (the slot
    /// about to be overwritten), offset `-1` the newest.
    #[inline]
    pub fn relative(&self, offset: isize) -> Sample {
        let index = (self.write_pos as isize + offset).rem_euclid(N as isize) as usize;
        Sample::from(self.buffer[index])
    }

    /// The most recently pushed sample.
    #[inline]
    pub fn newest(&self) -> Sample {
        self.relative(-1)
    }

    /// The sample pushed `delay` ticks before the newest one.
    #[inline]
    pub fn delayed(&self, delay: usize) -> Sample {
        self.relative(-1 - (delay % N) as isize)
    }

    /// Silence the buffer and return the cursor to slot 0.
    pub fn clear(&mut self) {
        self.buffer = [0; N];
        self.write_pos = 0;
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_delayed() {
        let mut ring: SampleRing<128> = SampleRing::new();
        ring.push(1000);
        for _ in 0..50 {
            ring.push(0);
        }
        assert_eq!(ring.delayed(50), 1000);
        assert_eq!(ring.delayed(49), 0);
    }

    #[test]
    fn test_wraparound() {
        let mut ring: SampleRing<4> = SampleRing::new();
        for v in 1..=5 {
            ring.push(v);
        }
        // Slot 0 now holds 5, cursor at 1.
        assert_eq!(ring.write_pos(), 1);
        assert_eq!(ring.newest(), 5);
        assert_eq!(ring.relative(0), 2);
        assert_eq!(ring.delayed(3), 2);
    }

    #[test]
    fn test_relative_negative_offsets_wrap() {
        let mut ring: SampleRing<4> = SampleRing::new();
        ring.push(7);
        assert_eq!(ring.relative(-1), 7);
        assert_eq!(ring.relative(-5), 7);
        assert_eq!(ring.relative(3), 7);
    }

    #[test]
    fn test_push_saturates() {
        let mut ring: SampleRing<2> = SampleRing::new();
        ring.push(100_000);
        ring.push(-100_000);
        assert_eq!(ring.get(0), 32767);
        assert_eq!(ring.get(1), -32767);
    }

    #[test]
    fn test_set_get_absolute() {
        let mut ring: SampleRing<16> = SampleRing::new();
        ring.set(3, -42);
        assert_eq!(ring.get(3), -42);
        assert_eq!(ring.get(19), -42);
        assert_eq!(ring.write_pos(), 0);
    }

    #[test]
    fn test_clear() {
        let mut ring: SampleRing<8> = SampleRing::new();
        for v in 0..12 {
            ring.push(v);
        }
        ring.clear();
        assert_eq!(ring.write_pos(), 0);
        for i in 0..8 {
            assert_eq!(ring.get(i), 0);
        }
    }
}
