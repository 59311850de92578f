//! Effect listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use chipstomp_config::{EffectRegistry, EffectValidator};
use chipstomp_core::FeatureUnit;
use clap::Args;

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,

    /// Show example commands
    #[arg(long)]
    examples: bool,
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    let Some(effect_id) = &args.effect else {
        println!("Available Effects");
        println!("=================");
        println!();

        for desc in registry.all_effects() {
            println!("  {:12} {:10} - {}", desc.id, desc.name, desc.description);
        }

        println!();
        println!("Use 'chipstomp effects <id>' for feature ranges and defaults.");

        if args.examples {
            print_examples();
        }
        return Ok(());
    };

    let desc = registry
        .get(effect_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown effect: {effect_id}"))?;
    let features = EffectValidator::new().features(desc.id)?;

    println!("{} ({})", desc.name, desc.id);
    println!("{}", "=".repeat(desc.name.len() + desc.id.len() + 3));
    println!();
    println!("{}", desc.description);
    println!("Category: {}", desc.category.name());
    println!();

    if features.is_empty() {
        println!("No tunable features.");
        println!();
        println!("Example usage:");
        println!();
        println!("  chipstomp process input.wav output.wav --effect {}", desc.id);
        return Ok(());
    }

    println!("Features:");
    println!();
    println!(
        "  {:10}  {:8}  {:>8}  {:>16}  {:>6}  {}",
        "Key", "Label", "Default", "Range", "Step", "Unit"
    );
    println!(
        "  {:10}  {:8}  {:>8}  {:>16}  {:>6}  {}",
        "---", "-----", "-------", "-----", "----", "----"
    );
    for feature in &features {
        println!(
            "  {:10}  {:8}  {:>8}  {:>16}  {:>6}  {}",
            feature.key,
            feature.name,
            feature.default,
            format!("{}..={}", feature.min, feature.max),
            feature.scale,
            unit_label(feature.unit)
        );
    }

    println!();
    println!("Values are raw settings. --set also accepts hex (0x7FFF) and");
    println!("a percentage of the range (50%).");
    println!();
    println!("Example usage:");
    println!();
    let settings: Vec<String> = features
        .iter()
        .map(|f| format!("{}={}", f.key, f.default))
        .collect();
    println!(
        "  chipstomp process input.wav output.wav --effect {} --set {}",
        desc.id,
        settings.join(" --set ")
    );

    Ok(())
}

fn unit_label(unit: FeatureUnit) -> &'static str {
    match unit {
        FeatureUnit::Hertz => "Hz",
        FeatureUnit::Milliseconds => "ms",
        FeatureUnit::Percent => "%",
        FeatureUnit::Ratio => "ratio",
        FeatureUnit::Bits => "bits",
        FeatureUnit::None => "-",
    }
}

fn print_examples() {
    println!();
    println!("Example Commands");
    println!("----------------");
    println!();
    println!("  # Crush a file down to 4 bits");
    println!("  chipstomp process input.wav output.wav --effect bitcrush --set bits=4");
    println!();
    println!("  # Use a factory preset, nudging one feature");
    println!("  chipstomp process input.wav output.wav --preset slapback --set delay=40");
    println!();
    println!("  # Save a user preset");
    println!("  chipstomp presets save wobble --effect tremolo --set depth=75% --set rate=120");
}
