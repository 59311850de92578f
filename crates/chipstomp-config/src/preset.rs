//! Preset file format and operations.

use std::path::Path;

use chipstomp_core::{Effect, FeatureInfo};
use chipstomp_platform::EffectManager;
use chipstomp_registry::{EffectKind, PedalEffect};
use serde::{Deserialize, Serialize};

use crate::effect_config::EffectConfig;
use crate::error::ConfigError;
use crate::validation::validate_preset;

/// A saved pedal state: which effects are on, their feature values, and
/// which effect the encoder is steering.
///
/// # TOML Format
///
/// ```toml
/// name = "Slapback"
/// description = "Short, bright single repeat"
/// active = "echo"
///
/// [[effects]]
/// type = "echo"
/// enabled = true
/// [effects.features]
/// amplitude = 40000
/// delay = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Id of the effect selected after loading. `None` keeps the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,

    /// Configured effect slots.
    #[serde(default)]
    pub effects: Vec<EffectConfig>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            active: None,
            effects: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the effect selected after loading.
    pub fn with_active(mut self, effect_type: impl Into<String>) -> Self {
        self.active = Some(effect_type.into());
        self
    }

    /// Add an effect slot.
    pub fn with_effect(mut self, effect: EffectConfig) -> Self {
        self.effects.push(effect);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;

        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of configured effect slots.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the preset configures no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// The slot for an effect id, if configured.
    pub fn effect(&self, effect_type: &str) -> Option<&EffectConfig> {
        self.effects
            .iter()
            .find(|e| e.effect_type.eq_ignore_ascii_case(effect_type))
    }

    /// Load this preset into a pedal.
    ///
    /// The whole lineup is replaced: effects the preset does not mention come
    /// back disabled, at their defaults, with cleared buffers. Nothing is
    /// touched if validation fails.
    pub fn apply<const N: usize>(&self, pedal: &mut EffectManager<PedalEffect, N>) -> Result<(), ConfigError> {
        validate_preset(self)?;

        let slot_of = |kind: EffectKind, pedal: &EffectManager<PedalEffect, N>| {
            pedal.effects().iter().position(|e| e.kind() == kind)
        };

        // Resolve every slot before mutating anything.
        let mut targets = Vec::with_capacity(self.effects.len());
        for config in &self.effects {
            let kind = EffectKind::from_id(&config.effect_type)
                .ok_or_else(|| ConfigError::UnknownEffect(config.effect_type.clone()))?;
            let slot = slot_of(kind, pedal).ok_or_else(|| ConfigError::NotInLineup(config.effect_type.clone()))?;
            targets.push((slot, config));
        }
        let active = match &self.active {
            Some(id) => {
                let kind = EffectKind::from_id(id).ok_or_else(|| ConfigError::UnknownEffect(id.clone()))?;
                slot_of(kind, pedal).ok_or_else(|| ConfigError::NotInLineup(id.clone()))?
            }
            None => 0,
        };

        for effect in pedal.effects_mut() {
            *effect = PedalEffect::new(effect.kind());
        }
        for (slot, config) in targets {
            let effect = &mut pedal.effects_mut()[slot];
            effect.state_mut().set_enabled(config.enabled);
            for (key, &value) in &config.features {
                if let Some(index) = effect.feature_index(key) {
                    effect.set_feature(index, value);
                }
            }
        }
        pedal.select(active);

        tracing::info!(preset = %self.name, active = pedal.active().name(), "applied preset");
        Ok(())
    }

    /// Snapshot a pedal into a preset.
    ///
    /// Every effect is recorded with all of its feature values, so applying
    /// the result reproduces the pedal's settings exactly.
    pub fn capture<const N: usize>(name: impl Into<String>, pedal: &EffectManager<PedalEffect, N>) -> Self {
        let mut preset = Self::new(name).with_active(pedal.active().kind().id());
        for effect in pedal.effects() {
            let mut config = EffectConfig::new(effect.kind().id()).with_enabled(effect.is_enabled());
            for index in 1..=effect.feature_count() {
                if let Some(desc) = effect.feature_info(index) {
                    config.set_feature(desc.key, effect.get_feature(index));
                }
            }
            preset.effects.push(config);
        }
        preset
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipstomp_platform::standard_pedal;

    #[test]
    fn test_preset_new() {
        let preset = Preset::new("Test Preset");
        assert_eq!(preset.name, "Test Preset");
        assert!(preset.description.is_none());
        assert!(preset.active.is_none());
        assert!(preset.is_empty());
    }

    #[test]
    fn test_preset_from_toml() {
        let toml = r#"
name = "Slapback"
description = "Short, bright single repeat"
active = "echo"

[[effects]]
type = "echo"
enabled = true
[effects.features]
amplitude = 40000
delay = 20

[[effects]]
type = "bitcrush"
"#;

        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Slapback");
        assert_eq!(preset.active.as_deref(), Some("echo"));
        assert_eq!(preset.len(), 2);

        let echo = preset.effect("echo").unwrap();
        assert!(echo.enabled);
        assert_eq!(echo.get_feature("amplitude"), Some(40000));
        assert_eq!(echo.get_feature("delay"), Some(20));

        let crush = preset.effect("bitcrush").unwrap();
        assert!(!crush.enabled);
        assert!(crush.features.is_empty());
    }

    #[test]
    fn test_preset_rejects_fractional_feature() {
        let toml = r#"
name = "Bad"
[[effects]]
type = "echo"
[effects.features]
delay = 0.5
"#;
        assert!(matches!(Preset::from_toml(toml), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_preset_to_toml() {
        let preset = Preset::new("Test")
            .with_active("tremolo")
            .with_effect(EffectConfig::new("tremolo").with_enabled(true).with_feature("rate", 300));

        let toml = preset.to_toml().unwrap();
        assert!(toml.contains("name = \"Test\""));
        assert!(toml.contains("active = \"tremolo\""));
        assert!(toml.contains("type = \"tremolo\""));
        assert!(toml.contains("rate = 300"));
        assert_eq!(Preset::from_toml(&toml).unwrap(), preset);
    }

    #[test]
    fn test_apply_sets_state_and_selection() {
        let preset = Preset::new("Lo-fi")
            .with_active("bitcrush")
            .with_effect(
                EffectConfig::new("bitcrush")
                    .with_enabled(true)
                    .with_feature("bits", 6)
                    .with_feature("ratio", 4),
            )
            .with_effect(EffectConfig::new("echo").with_feature("delay", 0));

        let mut pedal = standard_pedal();
        pedal.select(4);
        pedal.effects_mut()[5].toggle();
        preset.apply(&mut pedal).unwrap();

        assert_eq!(pedal.active().kind(), EffectKind::Bitcrush);
        assert!(pedal.active().is_enabled());
        assert_eq!(pedal.active().selected_feature(), 0);
        let bits = pedal.active().feature_index("bits").unwrap();
        assert_eq!(pedal.active().get_feature(bits), 6);

        let echo = pedal.effects().iter().find(|e| e.kind() == EffectKind::Echo).unwrap();
        assert!(!echo.is_enabled());
        assert_eq!(echo.get_feature(echo.feature_index("delay").unwrap()), 0);

        // Unmentioned effects come back disabled.
        assert!(!pedal.effects()[5].is_enabled());
    }

    #[test]
    fn test_apply_invalid_leaves_pedal_untouched() {
        let preset = Preset::new("Bad").with_effect(EffectConfig::new("echo").with_enabled(true).with_feature("delay", 999));
        let mut pedal = standard_pedal();
        pedal.select(2);

        let err = preset.apply(&mut pedal).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(pedal.active_index(), 2);
        assert!(pedal.effects().iter().all(|e| !e.is_enabled()));
    }

    #[test]
    fn test_apply_missing_from_lineup() {
        use chipstomp_platform::EffectManager;

        let preset = Preset::new("Wobble").with_effect(EffectConfig::new("flanger").with_enabled(true));
        let mut pedal = EffectManager::new([PedalEffect::new(EffectKind::Echo)]);
        assert!(matches!(preset.apply(&mut pedal), Err(ConfigError::NotInLineup(id)) if id == "flanger"));
    }

    #[test]
    fn test_capture_then_apply_reproduces_settings() {
        let mut pedal = standard_pedal();
        pedal.select(3);
        pedal.forward_toggle();
        pedal.forward_next_feature();
        pedal.forward_next_feature();
        pedal.forward_adjust(40);

        let preset = Preset::capture("Snapshot", &pedal);
        assert_eq!(preset.active.as_deref(), Some(pedal.active().kind().id()));
        assert_eq!(preset.len(), 6);

        let mut restored = standard_pedal();
        preset.apply(&mut restored).unwrap();
        assert_eq!(restored.active_index(), 3);
        for (a, b) in pedal.effects().iter().zip(restored.effects()) {
            assert_eq!(a.is_enabled(), b.is_enabled());
            for index in 1..=a.feature_count() {
                assert_eq!(a.get_feature(index), b.get_feature(index), "{} #{index}", a.name());
            }
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("wobble.toml");
        let preset = Preset::new("Wobble")
            .with_description("Slow deep tremolo")
            .with_effect(EffectConfig::new("tremolo").with_enabled(true).with_feature("depth", 0xFFFF));

        preset.save(&path).unwrap();
        assert_eq!(Preset::load(&path).unwrap(), preset);
        assert!(matches!(
            Preset::load(dir.path().join("missing.toml")),
            Err(ConfigError::ReadFile { .. })
        ));
    }
}
