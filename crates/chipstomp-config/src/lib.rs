//! Preset management for ChipStomp pedals.
//!
//! A preset is a TOML snapshot of the pedal: which effects are enabled,
//! their raw feature values, and which effect is selected. This crate
//! loads, validates, saves and applies presets to an
//! [`EffectManager`](chipstomp_platform::EffectManager).
//!
//! # Features
//!
//! - **Presets**: Load and save TOML files, snapshot a running pedal
//! - **Validation**: Effect ids, feature keys and value ranges
//! - **Paths**: The user presets directory
//! - **Factory Presets**: Built-in presets, one per effect plus `init`
//!
//! # Example
//!
//! ```rust
//! use chipstomp_config::{EffectConfig, Preset};
//! use chipstomp_platform::standard_pedal;
//!
//! let preset = Preset::new("Slapback")
//!     .with_active("echo")
//!     .with_effect(
//!         EffectConfig::new("echo")
//!             .with_enabled(true)
//!             .with_feature("amplitude", 40000)
//!             .with_feature("delay", 20),
//!     );
//!
//! let mut pedal = standard_pedal();
//! preset.apply(&mut pedal).unwrap();
//! assert_eq!(pedal.active_index(), 1);
//! ```

mod effect_config;
mod error;
mod preset;

/// The user presets directory.
pub mod paths;

/// Effect and preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use effect_config::{EffectConfig, parse_feature_value};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{ensure_user_presets_dir, find_preset, list_user_presets, user_presets_dir};
pub use preset::Preset;
pub use validation::{
    EffectValidator, ValidationError, ValidationResult, validate_effect, validate_effect_config,
    validate_preset,
};

/// Re-export commonly used types from chipstomp-registry
pub use chipstomp_registry::{EffectCategory, EffectDescriptor, EffectKind, EffectRegistry};

/// Resolve a preset argument: a file path, a user preset name, or a factory
/// preset name, in that order.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(path) = find_preset(name) {
        return Preset::load(path);
    }
    get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}
