//! Effect configuration types.

use std::collections::BTreeMap;

use chipstomp_core::FeatureDescriptor;
use serde::{Deserialize, Serialize};

/// Configuration for one effect slot in a preset.
///
/// Feature values are the raw fixed-point settings the effect stores, keyed
/// by [`FeatureDescriptor::key`] (`"amplitude"`, `"delay"`, `"bits"`, ...).
///
/// # Example
///
/// ```rust
/// use chipstomp_config::EffectConfig;
///
/// let config = EffectConfig::new("echo")
///     .with_enabled(true)
///     .with_feature("delay", 20);
///
/// assert_eq!(config.effect_type, "echo");
/// assert_eq!(config.get_feature("delay"), Some(20));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectConfig {
    /// Effect id (e.g. "echo", "bitcrush").
    #[serde(rename = "type")]
    pub effect_type: String,

    /// Whether the effect processes audio.
    #[serde(default)]
    pub enabled: bool,

    /// Feature values by key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, i32>,
}

impl EffectConfig {
    /// A disabled effect with every feature at its default.
    pub fn new(effect_type: impl Into<String>) -> Self {
        Self {
            effect_type: effect_type.into(),
            enabled: false,
            features: BTreeMap::new(),
        }
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Add a feature value.
    pub fn with_feature(mut self, key: impl Into<String>, value: i32) -> Self {
        self.features.insert(key.into(), value);
        self
    }

    /// Get a feature value.
    pub fn get_feature(&self, key: &str) -> Option<i32> {
        self.features.get(key).copied()
    }

    /// Set a feature value.
    pub fn set_feature(&mut self, key: impl Into<String>, value: i32) {
        self.features.insert(key.into(), value);
    }
}

/// Parse a feature value typed by a person.
///
/// Supports:
/// - Plain integers: `"20"`, `"-64"`
/// - Hexadecimal: `"0x7FFF"`
/// - Percent of the feature's span: `"50%"` maps to `min + (max - min) / 2`
///
/// The result is not range-checked; see
/// [`validate_feature_value`](crate::validation::EffectValidator::validate_feature_value).
///
/// ```rust
/// use chipstomp_config::parse_feature_value;
/// use chipstomp_core::FeatureDescriptor;
///
/// let amp = FeatureDescriptor::amplitude("Amp", "amplitude", 512);
/// assert_eq!(parse_feature_value("0x8000", &amp), Some(0x8000));
/// assert_eq!(parse_feature_value("100%", &amp), Some(0xFFFF));
/// assert_eq!(parse_feature_value("loud", &amp), None);
/// ```
pub fn parse_feature_value(value: &str, desc: &FeatureDescriptor) -> Option<i32> {
    let value = value.trim();

    if let Some(pct) = value.strip_suffix('%') {
        let pct = pct.trim().parse::<f32>().ok()?;
        let span = (desc.max - desc.min) as f32;
        return Some(desc.min + (span * pct / 100.0).round() as i32);
    }

    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        return i32::from_str_radix(hex, 16).ok();
    }

    value.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEND: FeatureDescriptor = FeatureDescriptor::new("Bend", "bend", -256, 255, 0);

    #[test]
    fn test_effect_config_new() {
        let config = EffectConfig::new("flanger");
        assert_eq!(config.effect_type, "flanger");
        assert!(!config.enabled);
        assert!(config.features.is_empty());
    }

    #[test]
    fn test_effect_config_features() {
        let mut config = EffectConfig::new("bitcrush").with_feature("bits", 6);
        config.set_feature("ratio", 4);
        config.set_feature("bits", 8);
        assert_eq!(config.get_feature("bits"), Some(8));
        assert_eq!(config.get_feature("ratio"), Some(4));
        assert_eq!(config.get_feature("nonexistent"), None);
    }

    #[test]
    fn test_parse_plain_and_negative() {
        assert_eq!(parse_feature_value("12", &BEND), Some(12));
        assert_eq!(parse_feature_value(" -64 ", &BEND), Some(-64));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_feature_value("0xff", &BEND), Some(255));
        assert_eq!(parse_feature_value("0X1F", &BEND), Some(31));
        assert_eq!(parse_feature_value("0xZZ", &BEND), None);
    }

    #[test]
    fn test_parse_percent_of_span() {
        assert_eq!(parse_feature_value("0%", &BEND), Some(-256));
        assert_eq!(parse_feature_value("100%", &BEND), Some(255));
        // 511 * 0.5 = 255.5 rounds away from zero
        assert_eq!(parse_feature_value("50%", &BEND), Some(0));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_feature_value("", &BEND), None);
        assert_eq!(parse_feature_value("fast", &BEND), None);
        assert_eq!(parse_feature_value("%", &BEND), None);
    }
}
