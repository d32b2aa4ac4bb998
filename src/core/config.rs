//! Static configuration for which input families a tap may use
//!
//! Runtime feature detection decides what the environment *supports*; this
//! configuration decides what the application *wants*. A family only gets
//! listeners when both agree.

use crate::core::family::InputFamily;
use serde::{Deserialize, Serialize};

/// Per-family enablement flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapConfig {
    /// Listen for `touchstart`/`touchmove`/`touchend`
    pub enable_touch: bool,
    /// Listen for `mousedown`/`mousemove`/`mouseup`
    pub enable_mouse: bool,
    /// Listen for `pointerdown`/`pointermove`/`pointerup`
    pub enable_pointer: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            enable_touch: true,
            enable_mouse: true,
            enable_pointer: true,
        }
    }
}

impl TapConfig {
    /// All families enabled
    pub fn all() -> Self {
        Self::default()
    }

    /// Checks whether a family is enabled by this configuration
    pub fn is_enabled(&self, family: InputFamily) -> bool {
        match family {
            InputFamily::Touch => self.enable_touch,
            InputFamily::Mouse => self.enable_mouse,
            InputFamily::Pointer => self.enable_pointer,
        }
    }

    pub fn without_touch(mut self) -> Self {
        self.enable_touch = false;
        self
    }

    pub fn without_mouse(mut self) -> Self {
        self.enable_mouse = false;
        self
    }

    pub fn without_pointer(mut self) -> Self {
        self.enable_pointer = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = TapConfig::default();
        assert!(config.is_enabled(InputFamily::Touch));
        assert!(config.is_enabled(InputFamily::Mouse));
        assert!(config.is_enabled(InputFamily::Pointer));
    }

    #[test]
    fn test_builder_helpers() {
        let config = TapConfig::all().without_touch().without_pointer();
        assert!(!config.is_enabled(InputFamily::Touch));
        assert!(config.is_enabled(InputFamily::Mouse));
        assert!(!config.is_enabled(InputFamily::Pointer));
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = TapConfig::all().without_mouse();
        let json = serde_json::to_string(&config).unwrap();
        let back: TapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
