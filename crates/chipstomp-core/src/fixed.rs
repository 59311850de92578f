//! Fixed-point sample arithmetic.
//!
//! Samples are 16-bit PCM values carried in an `i32` so that sums and
//! shifts have headroom. Products against 16-bit coefficients widen to
//! `i64` before shifting back down, so no input in the `i32` domain can
//! overflow an intermediate.
//!
//! Coefficient conventions used throughout the effects:
//!
//! | Form | Meaning | Helper |
//! |------|---------|--------|
//! | `u16` amplitude | fraction `k / 65536` | [`scale_u16`] |
//! | `u8` fraction | interpolation weight `f / 256` | [`lerp_frac8`] |
//! | shift `s` | fraction `f / 2^s` | [`lerp_shift`] |

/// One audio sample: a 16-bit signed PCM value widened to 32 bits.
pub type Sample = i32;

/// Largest magnitude the output boundary will pass through (DAC full scale).
pub const CLIP_HARD: Sample = 32_767;

/// Magnitude at which the clip indicator lights.
pub const CLIP_LEVEL: Sample = 31_000;

/// Multiplies `x` by the unsigned 16-bit fraction `k / 65536`.
///
/// `k = 0xFFFF` is one LSB short of unity; the result is floored
/// (arithmetic shift), so negative inputs round away from zero.
#[inline]
pub const fn scale_u16(x: Sample, k: u16) -> Sample {
    ((x as i64 * k as i64) >> 16) as Sample
}

/// Linear interpolation between `a` and `b` with an 8-bit fractional weight.
///
/// `frac = 0` returns `a`; `frac = 255` returns `b` less one 256th of the step.
#[inline]
pub const fn lerp_frac8(a: Sample, b: Sample, frac: u8) -> Sample {
    let f = frac as i64;
    ((a as i64 * (256 - f) + b as i64 * f) >> 8) as Sample
}

/// Linear interpolation between `a` and `b` with weight `frac / 2^shift`.
///
/// `frac` must be in `0..=1 << shift`.
#[inline]
pub const fn lerp_shift(a: Sample, b: Sample, frac: u32, shift: u32) -> Sample {
    let f = frac as i64;
    let one = 1i64 << shift;
    ((a as i64 * (one - f) + b as i64 * f) >> shift) as Sample
}

/// Saturates a sample to the signed 16-bit range accepted by the DAC.
#[inline]
pub const fn saturate(x: Sample) -> Sample {
    if x > CLIP_HARD {
        CLIP_HARD
    } else if x < -CLIP_HARD {
        -CLIP_HARD
    } else {
        x
    }
}

/// Narrows a sample to `i16` for buffer storage, saturating first.
#[inline]
pub const fn to_i16(x: Sample) -> i16 {
    saturate(x) as i16
}

/// Returns true if the sample is loud enough to light the clip indicator.
#[inline]
pub const fn is_clipping(x: Sample) -> bool {
    x >= CLIP_LEVEL || x <= -CLIP_LEVEL
}

/// Adds `delta` to `current` and clamps the result to `[min, max]`.
///
/// Computed in `i64`, so an oversized delta pins to a bound instead of
/// wrapping.
#[inline]
pub fn clamp_adjust(current: i32, delta: i32, min: i32, max: i32) -> i32 {
    (i64::from(current) + i64::from(delta)).clamp(i64::from(min), i64::from(max)) as i32
}

/// Expresses `value` as a percentage of the span `[min, max]`.
pub fn percentage(value: i32, min: i32, max: i32) -> f32 {
    if max <= min {
        return 0.0;
    }
    (value - min) as f32 * 100.0 / (max - min) as f32
}
