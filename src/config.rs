use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GqlfmtError, Result};
use crate::mode::Mode;

/// File names recognized as gqlfmt configuration.
const CONFIG_FILE_NAMES: &[&str] = &["gqlfmt.toml", ".gqlfmt.toml"];

/// The subset of Mode that may be set from a config file.
/// Unknown keys are a hard error so typos do not silently do nothing.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    exclude: Option<Vec<String>>,
}

/// Load gqlfmt configuration for the given input paths.
///
/// With an explicit `--config` path, that file must exist. Otherwise the
/// common parent directories of the inputs are searched (most specific
/// first), then the user config directory (`<config dir>/gqlfmt/gqlfmt.toml`).
/// No config file at all is fine and yields the defaults.
pub fn load_config(files: &[PathBuf], config_path: Option<&Path>) -> Result<Mode> {
    let config_file = match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(GqlfmtError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => find_config_file(files),
    };

    let mut mode = Mode::default();
    if let Some(path) = config_file {
        apply_config_file(&mut mode, &path)?;
    }
    Ok(mode)
}

/// Search the common parent directories of the inputs, then the user config
/// directory, for a config file.
fn find_config_file(files: &[PathBuf]) -> Option<PathBuf> {
    for parent in get_common_parents(files) {
        for name in CONFIG_FILE_NAMES {
            let candidate = parent.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    let user_config = dirs::config_dir()?.join("gqlfmt").join("gqlfmt.toml");
    user_config.is_file().then_some(user_config)
}

/// Parent directories of the given paths, ordered from most specific to
/// least specific, walking each input up to the filesystem root.
fn get_common_parents(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut parents = Vec::new();

    for file in files {
        let start = if file.is_dir() {
            file.clone()
        } else {
            file.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let mut current = Some(start.as_path());
        while let Some(dir) = current {
            let dir_buf = dir.to_path_buf();
            if !parents.contains(&dir_buf) {
                parents.push(dir_buf);
            }
            current = dir.parent();
        }
    }

    parents
}

fn apply_config_file(mode: &mut Mode, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    let parsed: FileConfig = toml::from_str(&content).map_err(|e| {
        GqlfmtError::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    if let Some(exclude) = parsed.exclude {
        mode.exclude = exclude;
    }
    Ok(())
}
