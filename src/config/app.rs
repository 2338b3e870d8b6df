//! Shell-level configuration.
//!
//! Contains settings that affect the window coordinator:
//! - Application name (tray tooltip, notification source)
//! - Tray tooltip refresh cadence
//! - Startup paint delay before the engine's startup routine runs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TubeDeckResult;

/// Label of the main webview window.
pub const MAIN_WINDOW_LABEL: &str = "main";

/// Coordinator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellConfig {
    /// Display name used as the initial tray tooltip.
    pub app_name: String,

    /// Label of the window whose close is gated.
    pub main_window_label: String,

    /// How often the tray tooltip is refreshed (250-60000 ms).
    pub tray_refresh_interval_ms: u64,

    /// Delay before startup begins so the window can paint (0-1000 ms).
    pub startup_paint_delay_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_name: "TubeDeck".to_string(),
            main_window_label: MAIN_WINDOW_LABEL.to_string(),
            tray_refresh_interval_ms: 1000,
            startup_paint_delay_ms: 50,
        }
    }
}

impl ShellConfig {
    /// Parse a JSON config blob (from the frontend or a host app) and clamp it.
    pub fn from_json(raw: &str) -> TubeDeckResult<Self> {
        let mut config: ShellConfig = serde_json::from_str(raw)?;
        config.validate();
        log::debug!("[CONFIG] loaded shell config: {:?}", config);
        Ok(config)
    }

    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        self.tray_refresh_interval_ms = self.tray_refresh_interval_ms.clamp(250, 60_000);
        self.startup_paint_delay_ms = self.startup_paint_delay_ms.min(1000);
        if self.app_name.trim().is_empty() {
            self.app_name = Self::default().app_name;
        }
        if self.main_window_label.trim().is_empty() {
            self.main_window_label = MAIN_WINDOW_LABEL.to_string();
        }
    }

    pub fn tray_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.tray_refresh_interval_ms)
    }

    pub fn startup_paint_delay(&self) -> Duration {
        Duration::from_millis(self.startup_paint_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.tray_refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.startup_paint_delay(), Duration::from_millis(50));
        assert_eq!(config.main_window_label, "main");
    }

    #[test]
    fn test_validate_clamps_ranges() {
        let mut config = ShellConfig {
            tray_refresh_interval_ms: 5,
            startup_paint_delay_ms: 10_000,
            ..ShellConfig::default()
        };
        config.validate();
        assert_eq!(config.tray_refresh_interval_ms, 250);
        assert_eq!(config.startup_paint_delay_ms, 1000);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = ShellConfig::from_json(r#"{"appName":"Grabber","trayRefreshIntervalMs":2000}"#)
            .unwrap();
        assert_eq!(config.app_name, "Grabber");
        assert_eq!(config.tray_refresh_interval_ms, 2000);
        assert_eq!(config.startup_paint_delay_ms, 50);
    }

    #[test]
    fn test_from_json_blank_name_falls_back() {
        let config = ShellConfig::from_json(r#"{"appName":"  "}"#).unwrap();
        assert_eq!(config.app_name, "TubeDeck");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ShellConfig::from_json("{not json").is_err());
    }
}
