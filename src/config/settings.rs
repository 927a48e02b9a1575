//! User settings and preferences for the PDI editor
//!
//! This module defines the `Settings` struct that holds all configurable
//! options, including the backend account the plan is synced to, with serde
//! support for JSON persistence.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Cycle Light → Dark → System → Light.
    pub fn next(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }

    /// Get an icon for the theme toggle button.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "☀",
            Theme::Dark => "🌙",
            Theme::System => "💻",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rich Text View Mode
// ─────────────────────────────────────────────────────────────────────────────

/// How rich-text editors open by default.
///
/// - `Raw`: Markdown source with the formatting toolbar
/// - `Rendered`: formatted preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Raw,
    Rendered,
}

impl ViewMode {
    /// Toggle between Raw and Rendered modes.
    pub fn toggle(&self) -> Self {
        match self {
            ViewMode::Raw => ViewMode::Rendered,
            ViewMode::Rendered => ViewMode::Raw,
        }
    }

    /// Label for the button that switches *to* the other mode.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ViewMode::Raw => "👁 Visualizar",
            ViewMode::Rendered => "📝 Editar",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 850.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Account
// ─────────────────────────────────────────────────────────────────────────────

/// The hosted store and the single account the plan belongs to.
///
/// Credentials are compiled in as defaults; there is no sign-up flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the project (without `/rest/v1`)
    pub url: String,
    /// Public anon key sent as the `apikey` header
    pub anon_key: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:54321"),
            anon_key: String::new(),
            email: String::from("pdi@localhost"),
            password: String::from("pdi-password"),
            timeout_secs: 15,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// Serialized to JSON in the user's config directory. Every field has a
/// default via `#[serde(default)]`, so partial files load fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Base font size (in points)
    pub font_size: f32,

    /// Default mode for rich-text editors
    pub rich_text_mode: ViewMode,

    /// Window size and position
    pub window_size: WindowSize,

    /// Quiet period after the last edit before the document is saved
    pub save_debounce_ms: u64,

    /// Hosted store and account
    pub backend: BackendSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: 14.0,
            rich_text_mode: ViewMode::default(),
            window_size: WindowSize::default(),
            save_debounce_ms: 1000,
            backend: BackendSettings::default(),
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 32.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Shortest allowed save debounce.
    pub const MIN_SAVE_DEBOUNCE_MS: u64 = 100;
    /// Longest allowed save debounce.
    pub const MAX_SAVE_DEBOUNCE_MS: u64 = 10_000;
    /// Shortest allowed request timeout.
    pub const MIN_TIMEOUT_SECS: u64 = 1;
    /// Longest allowed request timeout.
    pub const MAX_TIMEOUT_SECS: u64 = 120;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// Applied after loading, since the file may have been edited by hand.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.save_debounce_ms = self
            .save_debounce_ms
            .clamp(Self::MIN_SAVE_DEBOUNCE_MS, Self::MAX_SAVE_DEBOUNCE_MS);

        self.backend.timeout_secs = self
            .backend
            .timeout_secs
            .clamp(Self::MIN_TIMEOUT_SECS, Self::MAX_TIMEOUT_SECS);

        // Trailing slashes would double up when joining endpoint paths
        let trimmed_len = self.backend.url.trim_end_matches('/').len();
        self.backend.url.truncate(trimmed_len);
    }

    /// Deserialize and then sanitize.
    #[cfg(test)]
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// The save debounce as a `Duration`.
    pub fn save_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.save_debounce_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.save_debounce_ms, 1000);
        assert_eq!(settings.rich_text_mode, ViewMode::Raw);
        assert_eq!(settings.backend.timeout_secs, 15);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_theme_cycle_visits_every_variant() {
        let start = Theme::Light;
        assert_eq!(start.next(), Theme::Dark);
        assert_eq!(start.next().next(), Theme::System);
        assert_eq!(start.next().next().next(), Theme::Light);
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Raw.toggle(), ViewMode::Rendered);
        assert_eq!(ViewMode::Rendered.toggle(), ViewMode::Raw);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"theme": "dark", "backend": {"url": "https://example.test"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.backend.url, "https://example.test");
        // Missing nested fields fall back to defaults
        assert_eq!(settings.backend.email, BackendSettings::default().email);
        assert_eq!(settings.save_debounce_ms, 1000);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitize_clamps_debounce() {
        let mut settings = Settings::default();
        settings.save_debounce_ms = 0;
        settings.sanitize();
        assert_eq!(settings.save_debounce_ms, Settings::MIN_SAVE_DEBOUNCE_MS);

        settings.save_debounce_ms = 60_000;
        settings.sanitize();
        assert_eq!(settings.save_debounce_ms, Settings::MAX_SAVE_DEBOUNCE_MS);
    }

    #[test]
    fn test_sanitize_font_size() {
        let mut settings = Settings::default();
        settings.font_size = 2.0;
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
    }

    #[test]
    fn test_sanitize_strips_trailing_slashes() {
        let mut settings = Settings::default();
        settings.backend.url = "https://project.example//".to_string();
        settings.sanitize();
        assert_eq!(settings.backend.url, "https://project.example");
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"font_size": 100.0, "backend": {"timeout_secs": 0}}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
        assert_eq!(settings.backend.timeout_secs, Settings::MIN_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_debounce_duration() {
        let settings = Settings::default();
        assert_eq!(settings.save_debounce(), std::time::Duration::from_secs(1));
    }
}
