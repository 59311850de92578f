//! Where user presets live on disk.
//!
//! User presets are plain TOML files in `<config dir>/chipstomp/presets/`
//! (`~/.config/chipstomp/presets/` on Linux,
//! `~/Library/Application Support/chipstomp/presets/` on macOS,
//! `%APPDATA%\chipstomp\presets\` on Windows).
//!
//! ```rust,no_run
//! use chipstomp_config::paths;
//!
//! if let Some(path) = paths::find_preset("slapback_tweaked") {
//!     println!("found {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

const APP_NAME: &str = "chipstomp";
const PRESETS_SUBDIR: &str = "presets";

/// The user presets directory. Falls back to `./chipstomp/presets` when
/// the platform config directory is unknown.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

/// Resolve a preset argument to a file.
///
/// `name` may be a path to an existing file, or a preset name (with or
/// without `.toml`) looked up in [`user_presets_dir`].
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let candidate = if name.ends_with(".toml") {
        dir.join(name)
    } else {
        dir.join(format!("{name}.toml"))
    };
    candidate.is_file().then_some(candidate)
}

/// All `.toml` files in the user presets directory, sorted by path.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in(&user_presets_dir())
}

fn list_presets_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Preset name of a file: its stem.
///
/// ```rust
/// use chipstomp_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// assert_eq!(preset_name_from_path(Path::new("/tmp/jet_fast.toml")), Some("jet_fast".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
