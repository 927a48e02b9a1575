//! Theme Manager
//!
//! Tracks the selected theme and pushes the matching visuals into egui,
//! re-applying only when the selection or the system preference changes.

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::{dark, light, ThemeColors};
use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Manages theme state and applies themes to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Current theme setting (Light, Dark, or System)
    current_theme: Theme,
    /// Visuals for the current theme
    cached_visuals: Option<Visuals>,
    needs_apply: bool,
    /// Last detected system dark mode state (for System theme)
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            cached_visuals: None,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the theme; it takes effect on the next `apply_if_needed`.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.cached_visuals = None;
            self.needs_apply = true;
        }
    }

    /// Move to the next theme (Light → Dark → System) and return it.
    pub fn cycle(&mut self) -> Theme {
        let next = self.current_theme.next();
        self.set_theme(next);
        next
    }

    #[cfg(test)]
    pub fn needs_apply(&self) -> bool {
        self.needs_apply
    }

    /// Apply the theme if it changed, or if the system preference flipped
    /// while following it. Returns `true` if visuals were set.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.current_theme == Theme::System {
            let system_dark = ctx.style().visuals.dark_mode;
            if self.last_system_dark_mode != Some(system_dark) {
                self.last_system_dark_mode = Some(system_dark);
                self.cached_visuals = None;
                self.needs_apply = true;
                debug!("System dark mode changed to: {}", system_dark);
            }
        }

        if !self.needs_apply {
            return false;
        }
        let visuals = self.visuals(ctx);
        ctx.set_visuals(visuals);
        self.needs_apply = false;
        debug!("Applied theme: {:?}", self.current_theme);
        true
    }

    fn visuals(&mut self, ctx: &Context) -> Visuals {
        if let Some(ref visuals) = self.cached_visuals {
            return visuals.clone();
        }

        let dark_mode = match self.current_theme {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => ctx.style().visuals.dark_mode,
        };
        let visuals = if dark_mode {
            dark::create_dark_visuals()
        } else {
            light::create_light_visuals()
        };

        self.cached_visuals = Some(visuals.clone());
        visuals
    }

    /// Colors for the effective theme.
    pub fn colors(&self, ctx: &Context) -> ThemeColors {
        ThemeColors::from_theme(self.current_theme, &ctx.style().visuals)
    }

    /// Tooltip for the theme button.
    pub fn tooltip(&self) -> &'static str {
        match self.current_theme {
            Theme::Light => "Tema claro",
            Theme::Dark => "Tema escuro",
            Theme::System => "Tema do sistema",
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_manager_new() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.needs_apply());
    }

    #[test]
    fn test_theme_manager_set_same_theme() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.needs_apply = false;

        manager.set_theme(Theme::Light);
        assert!(!manager.needs_apply());
    }

    #[test]
    fn test_theme_manager_cycle() {
        let mut manager = ThemeManager::default();
        assert_eq!(manager.cycle(), Theme::Dark);
        assert_eq!(manager.cycle(), Theme::System);
        assert_eq!(manager.cycle(), Theme::Light);
        assert_eq!(manager.tooltip(), "Tema claro");
    }

    #[test]
    fn test_apply_if_needed_applies_once() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);

        assert!(manager.apply_if_needed(&ctx));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_if_needed(&ctx));

        manager.set_theme(Theme::Light);
        assert!(manager.apply_if_needed(&ctx));
        assert!(!ctx.style().visuals.dark_mode);
    }
}
