//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use chipstomp_config::{EffectConfig, EffectValidator, Preset, resolve_preset};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.trim().to_string(), value.trim().to_string())),
        _ => Err(format!("invalid setting '{s}' (expected key=value)")),
    }
}

/// Load a preset by file path, user preset name, or factory preset name.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    resolve_preset(name).with_context(|| {
        format!("could not load preset '{name}'. Use 'chipstomp presets list' to see available presets")
    })
}

/// Fold `--effect` and `--set` options into a preset.
///
/// With `effect` given, that effect is enabled and made active; otherwise
/// settings go to the preset's active effect. Values accept the same forms
/// as [`EffectValidator::parse_feature_value`].
pub fn apply_overrides(
    preset: &mut Preset,
    effect: Option<&str>,
    settings: &[(String, String)],
) -> anyhow::Result<()> {
    let validator = EffectValidator::new();

    if effect.is_none() && settings.is_empty() {
        return Ok(());
    }
    let effect_id = match (effect, preset.active.as_deref()) {
        (Some(id), _) | (None, Some(id)) => id.to_ascii_lowercase(),
        (None, None) => anyhow::bail!("--set needs --effect or a preset with an active effect"),
    };
    validator.validate_effect(&effect_id)?;

    let slot = match preset
        .effects
        .iter()
        .position(|e| e.effect_type.eq_ignore_ascii_case(&effect_id))
    {
        Some(slot) => slot,
        None => {
            preset.effects.push(EffectConfig::new(effect_id.clone()));
            preset.effects.len() - 1
        }
    };

    let config = &mut preset.effects[slot];
    if effect.is_some() {
        config.enabled = true;
    }
    for (key, text) in settings {
        let value = validator
            .parse_feature_value(&effect_id, key, text)
            .with_context(|| format!("bad setting {key}={text} for {effect_id}"))?;
        let (_, desc) = validator.feature(&effect_id, key)?;
        config.set_feature(desc.key, value);
    }
    preset.active = Some(effect_id);
    Ok(())
}
