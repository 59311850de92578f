//! Tunable feature introspection.
//!
//! Every effect exposes a small, fixed set of integer settings ("features")
//! that the pedal's single encoder steps through. This module provides the
//! [`FeatureInfo`] trait and [`FeatureDescriptor`] metadata that let the
//! control path, presets, and the CLI discover and adjust those settings
//! without knowing the concrete effect.
//!
//! # Indexing
//!
//! Feature indices are 1-based. Index 0 is reserved as the inert guard
//! feature: it has no descriptor and adjusting it does nothing. An effect
//! with `feature_count() == 2` therefore has features 1 and 2.
//!
//! # Example
//!
//! ```rust
//! use chipstomp_core::{FeatureDescriptor, FeatureInfo, FeatureUnit};
//!
//! struct Level {
//!     level: i32,
//! }
//!
//! impl FeatureInfo for Level {
//!     fn feature_count(&self) -> u8 { 1 }
//!
//!     fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
//!         match index {
//!             1 => Some(FeatureDescriptor::new("Level", "level", 0, 100, 50)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_feature(&self, index: u8) -> i32 {
//!         match index {
//!             1 => self.level,
//!             _ => 0,
//!         }
//!     }
//!
//!     fn set_feature(&mut self, index: u8, value: i32) {
//!         if index == 1 {
//!             self.level = value.clamp(0, 100);
//!         }
//!     }
//! }
//!
//! let mut level = Level { level: 50 };
//! let desc = level.feature_info(1).unwrap();
//! level.set_feature(1, desc.adjusted(level.get_feature(1), 80));
//! assert_eq!(level.get_feature(1), 100);
//! ```

use crate::fixed::clamp_adjust;

/// Display unit for a feature or report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureUnit {
    /// Hertz - LFO rates and effective sample rates.
    Hertz,
    /// Milliseconds - delay times.
    Milliseconds,
    /// Percentage of full scale - amplitudes and mix levels.
    Percent,
    /// Ratio (n:1) - decimation ratios.
    Ratio,
    /// Bits - quantisation depth.
    Bits,
    /// No unit.
    #[default]
    None,
}

impl FeatureUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use chipstomp_core::FeatureUnit;
    ///
    /// assert_eq!(FeatureUnit::Hertz.suffix(), "Hz");
    /// assert_eq!(FeatureUnit::Ratio.suffix(), ":1");
    /// assert_eq!(FeatureUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            FeatureUnit::Hertz => "Hz",
            FeatureUnit::Milliseconds => "mS",
            FeatureUnit::Percent => "%",
            FeatureUnit::Ratio => ":1",
            FeatureUnit::Bits => "",
            FeatureUnit::None => "",
        }
    }
}

/// Metadata for one tunable feature.
///
/// `min`/`max`/`default` are in the feature's raw integer domain (the value
/// the effect actually stores). `scale` multiplies each encoder delta before
/// it is applied; a negative scale inverts the encoder direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureDescriptor {
    /// Label shown on the display (e.g. `"Amp"`).
    pub name: &'static str,
    /// Stable lowercase key for presets and the CLI (e.g. `"amplitude"`).
    pub key: &'static str,
    /// Unit the reported value is expressed in.
    pub unit: FeatureUnit,
    /// Smallest raw value.
    pub min: i32,
    /// Largest raw value.
    pub max: i32,
    /// Raw value at power-up.
    pub default: i32,
    /// Raw units per encoder detent.
    pub scale: i32,
    /// Decimal places used when reporting the display value.
    pub decimals: u8,
}

impl FeatureDescriptor {
    /// Create a descriptor with unit scale, no unit, and integer display.
    pub const fn new(
        name: &'static str,
        key: &'static str,
        min: i32,
        max: i32,
        default: i32,
    ) -> Self {
        Self {
            name,
            key,
            unit: FeatureUnit::None,
            min,
            max,
            default,
            scale: 1,
            decimals: 0,
        }
    }

    /// A full-scale `u16` amplitude reported as a percentage.
    pub const fn amplitude(name: &'static str, key: &'static str, scale: i32) -> Self {
        Self {
            unit: FeatureUnit::Percent,
            scale,
            decimals: 2,
            ..Self::new(name, key, 0, 0xFFFF, 0x7FFF)
        }
    }

    /// Set the display unit.
    pub const fn with_unit(mut self, unit: FeatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the encoder scale.
    pub const fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the number of reported decimal places.
    pub const fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    /// Clamp a raw value into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Apply an encoder delta to `current`: scale it, add it, clamp it.
    #[inline]
    pub fn adjusted(&self, current: i32, delta: i16) -> i32 {
        let step = i32::from(delta).saturating_mul(self.scale);
        clamp_adjust(current, step, self.min, self.max)
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Introspection over an effect's tunable features.
///
/// Indices are 1-based (see the module docs). All methods have inert
/// defaults so an effect with no features need not implement anything.
pub trait FeatureInfo {
    /// Number of tunable features, excluding the guard feature 0.
    fn feature_count(&self) -> u8 {
        0
    }

    /// Descriptor for feature `index`, or `None` for 0 / out of range.
    fn feature_info(&self, _index: u8) -> Option<FeatureDescriptor> {
        None
    }

    /// Current raw value of feature `index`.
    fn get_feature(&self, _index: u8) -> i32 {
        0
    }

    /// Set feature `index` to a raw value. Implementations clamp.
    fn set_feature(&mut self, _index: u8, _value: i32) {}

    /// Value to show on the display for feature `index`, in its unit.
    ///
    /// Defaults to the raw value; amplitudes override this with a
    /// percentage, rates with Hz, and so on.
    fn feature_display(&self, index: u8) -> f32 {
        self.get_feature(index) as f32
    }

    /// Find a feature index by its key (case-insensitive).
    fn feature_index(&self, key: &str) -> Option<u8> {
        (1..=self.feature_count()).find(|&i| {
            self.feature_info(i)
                .is_some_and(|d| d.key.eq_ignore_ascii_case(key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoKnobs {
        a: i32,
        b: i32,
    }

    impl FeatureInfo for TwoKnobs {
        fn feature_count(&self) -> u8 {
            2
        }

        fn feature_info(&self, index: u8) -> Option<FeatureDescriptor> {
            match index {
                1 => Some(FeatureDescriptor::amplitude("Amp", "amplitude", 512)),
                2 => Some(FeatureDescriptor::new("Ratio", "ratio", 1, 64, 1).with_scale(-1)),
                _ => None,
            }
        }

        fn get_feature(&self, index: u8) -> i32 {
            match index {
                1 => self.a,
                2 => self.b,
                _ => 0,
            }
        }

        fn set_feature(&mut self, index: u8, value: i32) {
            match index {
                1 => self.a = value,
                2 => self.b = value,
                _ => {}
            }
        }
    }

    #[test]
    fn test_guard_feature_has_no_descriptor() {
        let k = TwoKnobs { a: 0, b: 1 };
        assert!(k.feature_info(0).is_none());
        assert!(k.feature_info(3).is_none());
    }

    #[test]
    fn test_adjusted_scales_and_clamps() {
        let d = FeatureDescriptor::amplitude("Amp", "amplitude", 512);
        assert_eq!(d.adjusted(0x7FFF, 1), 0x7FFF + 512);
        assert_eq!(d.adjusted(0x7FFF, 1000), 0xFFFF);
        assert_eq!(d.adjusted(0x7FFF, -1000), 0);
    }

    #[test]
    fn test_negative_scale_inverts_direction() {
        let d = FeatureDescriptor::new("Ratio", "ratio", 1, 64, 1).with_scale(-1);
        assert_eq!(d.adjusted(10, 3), 7);
        assert_eq!(d.adjusted(10, -3), 13);
    }

    #[test]
    fn test_adjusted_extreme_delta_saturates() {
        let d = FeatureDescriptor::new("X", "x", -5, 5, 0).with_scale(i32::MAX);
        assert_eq!(d.adjusted(0, i16::MAX), 5);
        assert_eq!(d.adjusted(0, i16::MIN), -5);
    }

    #[test]
    fn test_feature_index_lookup() {
        let k = TwoKnobs { a: 0, b: 1 };
        assert_eq!(k.feature_index("amplitude"), Some(1));
        assert_eq!(k.feature_index("RATIO"), Some(2));
        assert_eq!(k.feature_index("bogus"), None);
    }

    #[test]
    fn test_unit_suffix() {
        assert_eq!(FeatureUnit::Percent.suffix(), "%");
        assert_eq!(FeatureUnit::Milliseconds.suffix(), "mS");
    }
}
