//! Factory presets bundled with the library.
//!
//! These are embedded at compile time and always available, one per effect
//! plus a clean `init` state.

use crate::Preset;

/// Internal names of the factory presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "lofi",
    "slapback",
    "jet",
    "octave_up",
    "seasick",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("lofi", LOFI_PRESET),
    ("slapback", SLAPBACK_PRESET),
    ("jet", JET_PRESET),
    ("octave_up", OCTAVE_UP_PRESET),
    ("seasick", SEASICK_PRESET),
];

/// Power-on state: everything disabled at defaults.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Power-on state - every effect disabled at its defaults"
"#;

const LOFI_PRESET: &str = r#"
name = "Lo-Fi"
description = "6-bit samples at a quarter of the sample rate"
active = "bitcrush"

[[effects]]
type = "bitcrush"
enabled = true
[effects.features]
bits = 6
ratio = 4
"#;

const SLAPBACK_PRESET: &str = r#"
name = "Slapback"
description = "One short bright repeat, rockabilly style"
active = "echo"

[[effects]]
type = "echo"
enabled = true
[effects.features]
amplitude = 40000
delay = 20
"#;

const JET_PRESET: &str = r#"
name = "Jet"
description = "Full-depth slow flanger sweep"
active = "flanger"

[[effects]]
type = "flanger"
enabled = true
[effects.features]
depth = 65535
rate = 20
"#;

const OCTAVE_UP_PRESET: &str = r#"
name = "Octave Up"
description = "Pitch shifter one octave up at full level"
active = "pitchshift"

[[effects]]
type = "pitchshift"
enabled = true
[effects.features]
mix = 65535
bend = 255
"#;

const SEASICK_PRESET: &str = r#"
name = "Seasick"
description = "Deep, quick tremolo"
active = "tremolo"

[[effects]]
type = "tremolo"
enabled = true
[effects.features]
depth = 60000
rate = 300
"#;

/// All factory presets.
///
/// ```rust
/// use chipstomp_config::factory_presets;
///
/// let presets = factory_presets();
/// assert!(presets.iter().any(|p| p.name == "Slapback"));
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal name or display name (case-insensitive).
///
/// ```rust
/// use chipstomp_config::get_factory_preset;
///
/// assert_eq!(get_factory_preset("octave_up").unwrap().name, "Octave Up");
/// assert_eq!(get_factory_preset("lo-fi").unwrap().name, "Lo-Fi");
/// assert!(get_factory_preset("fuzz").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Returns true if `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
