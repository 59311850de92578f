//! Property-based tests for chipstomp effects.
//!
//! Uses proptest to verify the behavioural guarantees every effect must
//! satisfy: bitcrush transparency and quantization, clamp idempotence for
//! every feature, bounded output, and cursor cycling.

use chipstomp_core::{Effect, Sample};
use chipstomp_effects::{Bitcrush, Dummy, Echo, Flanger, PitchShift, Tremolo};
use proptest::prelude::*;

/// One fresh instance of every effect.
fn all_effects() -> Vec<Box<dyn Effect>> {
    vec![
        Box::new(Bitcrush::new()),
        Box::new(Echo::new()),
        Box::new(Flanger::new()),
        Box::new(PitchShift::new()),
        Box::new(Tremolo::new()),
        Box::new(Dummy::new()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Bitcrush at 16 bits and ratio 1 is a pure pass-through.
    #[test]
    fn bitcrush_transparent_at_defaults(
        input in prop::collection::vec(-32768i32..=32767, 1..256),
    ) {
        let mut crusher = Bitcrush::new();
        for &x in &input {
            prop_assert_eq!(crusher.process(x), x);
        }
    }

    /// With `bits = b` the low `16 − b` bits of every output are zero,
    /// whatever the ratio.
    #[test]
    fn bitcrush_clears_low_bits(
        bits in 1u8..=16,
        ratio in 1u8..=64,
        input in prop::collection::vec(-32768i32..=32767, 1..256),
    ) {
        let mut crusher = Bitcrush::new();
        crusher.set_bits(bits);
        crusher.set_ratio(ratio);
        let mask: Sample = (1 << (16 - u32::from(bits))) - 1;
        for &x in &input {
            let y = crusher.process(x);
            prop_assert_eq!(y & mask, 0, "bits={} ratio={} x={} y={}", bits, ratio, x, y);
        }
    }

    /// An oversized delta pins a feature at its bound, and applying it again
    /// leaves it there.
    #[test]
    fn clamp_idempotence_all_effects(
        delta in prop_oneof![
            (1000i16..=i16::MAX),
            (i16::MIN..=-1000i16),
        ],
    ) {
        for mut effect in all_effects() {
            for _ in 0..effect.feature_count() {
                effect.next_feature();
                let index = effect.selected_feature();
                let desc = effect.feature_info(index).unwrap();
                effect.adjust_feature(delta);
                let once = effect.get_feature(index);
                prop_assert!(once == desc.min || once == desc.max,
                    "{} feature {} not pinned: {}", effect.name(), index, once);
                effect.adjust_feature(delta);
                prop_assert_eq!(effect.get_feature(index), once);
            }
        }
    }

    /// Cursor cycling never lands on the guard feature after the first call.
    #[test]
    fn next_feature_skips_guard(presses in 1usize..50) {
        for mut effect in all_effects() {
            let count = effect.feature_count();
            for _ in 0..presses {
                effect.next_feature();
                let f = effect.selected_feature();
                if count <= 1 {
                    prop_assert_eq!(f, 0);
                } else {
                    prop_assert!((1..=count).contains(&f));
                }
            }
        }
    }

    /// Random feature values never drive any effect out of range.
    #[test]
    fn bounded_output_random_features(
        values in prop::array::uniform4(any::<i32>()),
        input in prop::collection::vec(-32768i32..=32767, 64..512),
    ) {
        for mut effect in all_effects() {
            for i in 1..=effect.feature_count() {
                effect.set_feature(i, values[usize::from(i - 1) % 4]);
            }
            for &x in &input {
                let y = effect.process(x);
                prop_assert!(y.abs() <= 2 * 32_768, "{}: {} -> {}", effect.name(), x, y);
            }
        }
    }
}
