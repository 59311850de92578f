//! Effect and preset validation.
//!
//! Checks preset contents against the effect catalogue: effect ids must
//! exist, feature keys must match a [`FeatureDescriptor::key`] of that
//! effect, and values must lie within the descriptor's `[min, max]`.
//!
//! # Example
//!
//! ```rust
//! use chipstomp_config::{EffectValidator, validate_effect};
//!
//! validate_effect("echo").expect("echo should exist");
//!
//! let validator = EffectValidator::new();
//! assert!(validator.validate_feature_value("bitcrush", "bits", 8).is_ok());
//! assert!(validator.validate_feature_value("bitcrush", "bits", 17).is_err());
//! ```

use chipstomp_core::{FeatureDescriptor, FeatureInfo};
use chipstomp_registry::{EffectKind, EffectRegistry, PedalEffect};
use thiserror::Error;

use crate::effect_config::{EffectConfig, parse_feature_value};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown effect id.
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    /// Unknown feature key.
    #[error("unknown feature '{feature}' for effect '{effect}'")]
    UnknownFeature {
        /// Effect id.
        effect: String,
        /// The unrecognized key.
        feature: String,
    },

    /// Feature value out of range.
    #[error("feature '{feature}' of '{effect}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Effect id.
        effect: String,
        /// Feature key.
        feature: String,
        /// The offending value.
        value: i32,
        /// Minimum allowed value.
        min: i32,
        /// Maximum allowed value.
        max: i32,
    },

    /// Feature value that is not a number.
    #[error("invalid format for feature '{feature}': {reason}")]
    InvalidFormat {
        /// Feature key.
        feature: String,
        /// Description of the format error.
        reason: String,
    },

    /// The same effect configured twice in one preset.
    #[error("effect '{0}' appears more than once")]
    DuplicateEffect(String),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validator for effects and their features.
///
/// Feature descriptors come straight from a fresh instance of each effect,
/// so the validator can never drift from what the effects accept.
#[derive(Debug, Default, Clone, Copy)]
pub struct EffectValidator {
    registry: EffectRegistry,
}

impl EffectValidator {
    /// Create a new effect validator.
    pub const fn new() -> Self {
        Self {
            registry: EffectRegistry::new(),
        }
    }

    /// Resolve an effect id.
    pub fn validate_effect(&self, effect_type: &str) -> ValidationResult<EffectKind> {
        self.registry
            .get(effect_type)
            .map(|desc| desc.kind)
            .ok_or_else(|| ValidationError::UnknownEffect(effect_type.to_string()))
    }

    /// Resolve a feature key to its index and descriptor.
    pub fn feature(&self, effect_type: &str, key: &str) -> ValidationResult<(u8, FeatureDescriptor)> {
        let effect = PedalEffect::new(self.validate_effect(effect_type)?);
        effect
            .feature_index(key)
            .and_then(|index| Some((index, effect.feature_info(index)?)))
            .ok_or_else(|| ValidationError::UnknownFeature {
                effect: effect_type.to_string(),
                feature: key.to_string(),
            })
    }

    /// All feature descriptors of an effect, in cursor order.
    pub fn features(&self, effect_type: &str) -> ValidationResult<Vec<FeatureDescriptor>> {
        let effect = PedalEffect::new(self.validate_effect(effect_type)?);
        Ok((1..=effect.feature_count())
            .filter_map(|index| effect.feature_info(index))
            .collect())
    }

    /// Check that `value` is in range for the feature.
    pub fn validate_feature_value(&self, effect_type: &str, key: &str, value: i32) -> ValidationResult<()> {
        let (_, desc) = self.feature(effect_type, key)?;
        if desc.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                effect: effect_type.to_string(),
                feature: key.to_string(),
                value,
                min: desc.min,
                max: desc.max,
            })
        }
    }

    /// Parse a textual value (`"20"`, `"0x7FFF"`, `"50%"`) and range-check it.
    pub fn parse_feature_value(&self, effect_type: &str, key: &str, text: &str) -> ValidationResult<i32> {
        let (_, desc) = self.feature(effect_type, key)?;
        let value = parse_feature_value(text, &desc).ok_or_else(|| ValidationError::InvalidFormat {
            feature: key.to_string(),
            reason: format!("cannot parse '{text}'"),
        })?;
        self.validate_feature_value(effect_type, key, value)?;
        Ok(value)
    }

    /// Validate one effect slot, collecting every problem.
    pub fn validate_effect_config(&self, config: &EffectConfig) -> Vec<ValidationError> {
        if let Err(e) = self.validate_effect(&config.effect_type) {
            return vec![e];
        }
        config
            .features
            .iter()
            .filter_map(|(key, &value)| {
                self.validate_feature_value(&config.effect_type, key, value)
                    .err()
            })
            .collect()
    }

    /// Returns all registered effect ids.
    pub fn effect_ids(&self) -> Vec<&'static str> {
        self.registry.all_effects().map(|d| d.id).collect()
    }
}

/// Fold a list of problems into one result.
fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validate that an effect id exists.
pub fn validate_effect(effect_type: &str) -> ValidationResult<()> {
    EffectValidator::new().validate_effect(effect_type).map(|_| ())
}

/// Validate one effect slot.
pub fn validate_effect_config(config: &EffectConfig) -> ValidationResult<()> {
    collect(EffectValidator::new().validate_effect_config(config))
}

/// Validate a whole preset: every slot, duplicates, and the active effect.
pub fn validate_preset(preset: &crate::Preset) -> ValidationResult<()> {
    let validator = EffectValidator::new();
    let mut errors = Vec::new();
    let mut seen: Vec<EffectKind> = Vec::new();

    for config in &preset.effects {
        errors.extend(validator.validate_effect_config(config));
        if let Ok(kind) = validator.validate_effect(&config.effect_type) {
            if seen.contains(&kind) {
                errors.push(ValidationError::DuplicateEffect(config.effect_type.clone()));
            }
            seen.push(kind);
        }
    }

    if let Some(active) = &preset.active
        && let Err(e) = validator.validate_effect(active)
    {
        errors.push(e);
    }

    collect(errors)
}
