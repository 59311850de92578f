//! Preset demo: factory presets, validation, and a capture round trip.
//!
//! Run with: cargo run -p chipstomp-config --example preset_demo

use chipstomp_config::{
    EffectConfig, EffectValidator, Preset, factory_presets, get_factory_preset,
};
use chipstomp_core::Effect;
use chipstomp_platform::standard_pedal;

fn main() {
    println!("=== Factory Presets ===\n");
    for preset in factory_presets() {
        println!(
            "{:<12} active={:<11} {}",
            preset.name,
            preset.active.as_deref().unwrap_or("-"),
            preset.description.as_deref().unwrap_or("")
        );
    }

    println!("\n=== Applying 'slapback' ===\n");
    let mut pedal = standard_pedal();
    if let Some(preset) = get_factory_preset("slapback") {
        match preset.apply(&mut pedal) {
            Ok(()) => {
                let report = pedal.report();
                println!("{} ({})", report.effect, if report.enabled { "on" } else { "off" });
                for line in report.lines() {
                    println!("  {line}");
                }
            }
            Err(e) => println!("failed: {e}"),
        }
    }

    println!("\n=== Validation ===\n");
    let validator = EffectValidator::new();
    for (effect, key, text) in [
        ("echo", "delay", "50%"),
        ("bitcrush", "bits", "0x08"),
        ("tremolo", "rate", "5000"),
        ("flanger", "mix", "10"),
    ] {
        match validator.parse_feature_value(effect, key, text) {
            Ok(value) => println!("{effect}.{key} = {text:<6} -> {value}"),
            Err(e) => println!("{effect}.{key} = {text:<6} -> error: {e}"),
        }
    }

    println!("\n=== Capture ===\n");
    let broken = Preset::new("Broken").with_effect(EffectConfig::new("fuzz"));
    if let Err(e) = broken.apply(&mut pedal) {
        println!("rejected: {e}");
    }

    pedal.forward_next_feature();
    pedal.forward_adjust(-10);
    let snapshot = Preset::capture("My Slapback", &pedal);
    match snapshot.to_toml() {
        Ok(toml) => println!("{toml}"),
        Err(e) => println!("serialize failed: {e}"),
    }
    println!("active effect enabled: {}", pedal.active().is_enabled());
}
