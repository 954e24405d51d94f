//! Centralized viewer options with TOML preset support.
//!
//! All sub-structs use `#[serde(default)]` so partial TOML files (e.g.
//! only overriding `[viewport]`) work correctly.

mod camera;
mod viewport;

use std::path::Path;

pub use camera::CameraOptions;
use serde::{Deserialize, Serialize};
pub use viewport::{Msaa, ViewportOptions};

pub use crate::input::KeyBindings;
use crate::error::GantryError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Viewport surface configuration.
    pub viewport: ViewportOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Keyboard binding map.
    pub keybindings: KeyBindings,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GantryError> {
        let content = std::fs::read_to_string(path).map_err(GantryError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| GantryError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GantryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GantryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GantryError::Io)?;
        }
        std::fs::write(path, content).map_err(GantryError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Options =
            toml::from_str("[viewport]\ndepth_buffer = false\n").unwrap();
        assert!(!parsed.viewport.depth_buffer);
        assert_eq!(parsed.viewport.antialiasing, Msaa::X4);
        assert_eq!(parsed.camera, CameraOptions::default());
    }

    #[test]
    fn custom_keybinding_survives_round_trip() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        assert!(toml_str.contains("KeyZ"));
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert!(parsed.keybindings.lookup("KeyZ").is_some());
    }
}
