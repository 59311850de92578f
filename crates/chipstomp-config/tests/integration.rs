//! Integration tests for chipstomp-config.
//!
//! Presets are applied to a real pedal and audio is run through it, so these
//! tests cover the path from TOML text to processed samples.

use chipstomp_config::{
    ConfigError, EffectConfig, Preset, factory_presets, get_factory_preset, resolve_preset,
};
use chipstomp_core::Effect;
use chipstomp_platform::{AudioEngine, Meters, OfflineClock, SampleClock, standard_pedal};
use tempfile::TempDir;

/// ~441 Hz square-ish test tone at half scale.
fn test_signal(len: usize) -> Vec<i16> {
    (0..len)
        .map(|n| if (n / 50) % 2 == 0 { 12_000 } else { -12_000 })
        .collect()
}

fn render(preset: &Preset, input: &[i16]) -> Vec<i16> {
    let mut pedal = standard_pedal();
    preset.apply(&mut pedal).expect("preset should apply");

    let meters = Meters::new();
    let mut engine = AudioEngine::new(pedal, (), (), &meters);
    let mut output = vec![0i16; input.len()];
    OfflineClock::new(input, &mut output).run(&mut engine);
    output
}

#[test]
fn test_factory_presets_change_the_signal() {
    let input = test_signal(8192);
    for preset in factory_presets() {
        let output = render(&preset, &input);
        if preset.name == "Init" {
            assert_eq!(output, input, "init must be transparent");
        } else {
            assert_ne!(output, input, "preset '{}' left the signal untouched", preset.name);
        }
    }
}

#[test]
fn test_lofi_preset_quantizes() {
    let preset = get_factory_preset("lofi").expect("lofi should exist");
    let output = render(&preset, &test_signal(4096));
    // 6 bits: the low 10 bits are always clear.
    assert!(output.iter().all(|&y| y & 0x3FF == 0));
}

#[test]
fn test_saved_preset_renders_identically() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("wobble.toml");

    let original = Preset::new("Wobble")
        .with_active("tremolo")
        .with_effect(
            EffectConfig::new("tremolo")
                .with_enabled(true)
                .with_feature("depth", 50_000)
                .with_feature("rate", 120),
        );
    original.save(&path).expect("should save");
    let loaded = Preset::load(&path).expect("should load");
    assert_eq!(loaded, original);

    let input = test_signal(10_000);
    assert_eq!(render(&original, &input), render(&loaded, &input));
}

#[test]
fn test_resolve_preset_prefers_files_then_factory() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("custom.toml");
    Preset::new("Custom").save(&path).unwrap();

    assert_eq!(resolve_preset(path.to_str().unwrap()).unwrap().name, "Custom");
    assert_eq!(resolve_preset("jet").unwrap().name, "Jet");
    assert!(matches!(
        resolve_preset("no_such_preset_anywhere"),
        Err(ConfigError::PresetNotFound(_))
    ));
}

#[test]
fn test_unknown_effect_rejected() {
    let preset = Preset::new("Bad").with_effect(EffectConfig::new("nonexistent_effect"));
    let mut pedal = standard_pedal();
    assert!(matches!(preset.apply(&mut pedal), Err(ConfigError::Validation(_))));
    assert!(!pedal.active().is_enabled());
}

#[test]
fn test_capture_from_controls_round_trips_through_toml() {
    let mut pedal = standard_pedal();
    pedal.select_previous();
    pedal.select_previous();
    pedal.forward_toggle();
    pedal.forward_next_feature();
    pedal.forward_adjust(-20);

    let toml = Preset::capture("Live", &pedal).to_toml().unwrap();
    let mut restored = standard_pedal();
    Preset::from_toml(&toml).unwrap().apply(&mut restored).unwrap();

    assert_eq!(restored.active_index(), pedal.active_index());
    // Loading parks the cursor, so compare values rather than highlights.
    let values = |report: chipstomp_core::Report| report.lines().map(|l| l.value).collect::<Vec<_>>();
    assert_eq!(values(restored.report()), values(pedal.report()));
    assert!(restored.active().is_enabled());
}
