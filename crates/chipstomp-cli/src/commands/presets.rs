//! Preset management commands.
//!
//! Lists, shows, saves and deletes pedal presets.

use super::common::{apply_overrides, load_preset, parse_key_val};
use chipstomp_config::{
    Preset, ensure_user_presets_dir, factory_presets, is_factory_preset, list_user_presets,
    paths::preset_name_from_path, user_presets_dir, validate_preset,
};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Start from an existing preset
        #[arg(long)]
        from: Option<String>,

        /// Effect to enable and select
        #[arg(short, long)]
        effect: Option<String>,

        /// Feature settings (e.g. "rate=120")
        #[arg(short, long = "set", value_parser = parse_key_val, number_of_values = 1)]
        settings: Vec<(String, String)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show the user presets directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            from,
            effect,
            settings,
            description,
            force,
        } => save_preset(
            &name,
            from.as_deref(),
            effect.as_deref(),
            &settings,
            description,
            force,
        ),
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:12} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create one with: chipstomp presets save <name> --effect <id> --set key=value");
        }
        for path in user_presets {
            let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match Preset::load(&path) {
                Ok(preset) => {
                    println!("  {:12} - {}", name, preset.description.as_deref().unwrap_or(""));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable preset");
                    println!("  {name:12} - (error loading)");
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
    }
    println!("Active:      {}", preset.active.as_deref().unwrap_or("(first effect)"));
    println!();

    if preset.is_empty() {
        println!("No effects configured; every effect loads disabled at its defaults.");
        return Ok(());
    }

    println!("Effects ({}):", preset.len());
    for effect in &preset.effects {
        let state = if effect.enabled { "on" } else { "off" };
        println!("  {} [{state}]", effect.effect_type);
        for (key, value) in &effect.features {
            println!("      {key} = {value}");
        }
    }

    Ok(())
}

fn save_preset(
    name: &str,
    from: Option<&str>,
    effect: Option<&str>,
    settings: &[(String, String)],
    description: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!("'{name}' is a factory preset name. Choose a different name.");
    }

    let mut preset = match from {
        Some(source) => load_preset(source)?,
        None if effect.is_some() => Preset::new(name),
        None => anyhow::bail!("Nothing to save. Use --from, --effect or both"),
    };
    preset.name = name.to_string();
    if description.is_some() {
        preset.description = description;
    }
    apply_overrides(&mut preset, effect, settings)?;
    validate_preset(&preset)?;

    let preset_path = ensure_user_presets_dir()?.join(format!("{name}.toml"));
    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }
    preset.save(&preset_path)?;

    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    let preset_path = user_presets_dir().join(format!("{name}.toml"));
    if !preset_path.is_file() {
        if is_factory_preset(name) {
            anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
        }
        anyhow::bail!("User preset '{name}' not found.");
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&preset_path)?;
    println!("Deleted preset '{name}'.");
    Ok(())
}
