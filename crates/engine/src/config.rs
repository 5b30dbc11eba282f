//! Engine configuration from environment variables.

use std::env;

use crate::core::PressPolicy;
use crate::types::{DEFAULT_HEIGHT, DEFAULT_KEY_RELEASE_TIMEOUT_MS, DEFAULT_WIDTH};

pub const DEFAULT_APP_NAME: &str = "default";

/// Engine configuration.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | `WCE_WIDTH` | 80 | Console width in cells |
/// | `WCE_HEIGHT` | 40 | Console height in cells |
/// | `WCE_APP_NAME` | `default` | Name shown in the title |
/// | `WCE_PRESS_POLICY` | `edge` | `edge` or `carry-held` |
/// | `WCE_KEY_RELEASE_TIMEOUT_MS` | 150 | Key release fallback timeout |
///
/// Values that fail to parse fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    pub app_name: String,
    pub press_policy: PressPolicy,
    pub key_release_timeout_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            app_name: DEFAULT_APP_NAME.to_string(),
            press_policy: PressPolicy::default(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = lookup("WCE_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = lookup("WCE_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);

        let app_name = lookup("WCE_APP_NAME")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .unwrap_or(defaults.app_name);

        let press_policy = lookup("WCE_PRESS_POLICY")
            .and_then(|s| PressPolicy::from_str(&s))
            .unwrap_or(defaults.press_policy);

        let key_release_timeout_ms = lookup("WCE_KEY_RELEASE_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.key_release_timeout_ms);

        Self {
            width,
            height,
            app_name,
            press_policy,
            key_release_timeout_ms,
        }
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
