//! Theme System
//!
//! Colors and spacing for the plan window. The `Theme` setting in
//! `config::settings` (Light/Dark/System) selects which palette is used at
//! runtime; both palettes share the plan's slate brand colour for the
//! header band, section titles and primary buttons.
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::ThemeColors;
//!
//! let colors = ThemeColors::from_theme(settings.theme, &ctx.style().visuals);
//! ui.label(RichText::new("Metas").color(colors.brand.primary));
//! ```

pub mod dark;
pub mod light;
pub mod manager;

pub use manager::ThemeManager;

use crate::config::Theme;
use crate::content::{TaskPriority, TaskStatus};
use eframe::egui::{epaint::Shadow, vec2, Color32, CursorIcon, Rounding, Stroke, Visuals};

/// The plan's slate brand colour, `#303845`.
pub const BRAND: Color32 = Color32::from_rgb(0x30, 0x38, 0x45);

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// All colors needed by the UI for one palette.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub base: BaseColors,
    pub text: TextColors,
    pub brand: BrandColors,
    pub ui: UiColors,
}

impl ThemeColors {
    /// Colors for the given theme setting, resolving `System` through the
    /// current egui visuals.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::System => Self::from_visuals(visuals),
        }
    }

    /// Colors matching whatever visuals are active.
    pub fn from_visuals(visuals: &Visuals) -> Self {
        if visuals.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn light() -> Self {
        light::colors()
    }

    pub fn dark() -> Self {
        dark::colors()
    }

    /// Dark themes have darker backgrounds.
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    pub fn task_status(&self, status: TaskStatus) -> Color32 {
        match status {
            TaskStatus::Pending => self.ui.warning,
            TaskStatus::Completed => self.ui.success,
            TaskStatus::Delayed => self.ui.error,
        }
    }

    pub fn task_priority(&self, priority: TaskPriority) -> Color32 {
        match priority {
            TaskPriority::Low => self.ui.info,
            TaskPriority::Medium => self.ui.warning,
            TaskPriority::High => self.ui.error,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Palette Parts
// ─────────────────────────────────────────────────────────────────────────────

/// Backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Window background
    pub background: Color32,
    /// Section cards
    pub card: Color32,
    /// Inputs, table headers, code
    pub background_tertiary: Color32,
    pub border: Color32,
    pub border_subtle: Color32,
    pub hover: Color32,
    pub selected: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    /// Hints and placeholders
    pub muted: Color32,
    pub link: Color32,
}

/// Brand band and primary actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandColors {
    /// Header band, section titles, primary buttons
    pub primary: Color32,
    /// Text drawn on top of `primary`
    pub on_primary: Color32,
    /// Drop-target highlight while dragging a section
    pub drop_target: Color32,
}

/// Feedback colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Spacing
// ─────────────────────────────────────────────────────────────────────────────

/// Spacing scale in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSpacing {
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
}

impl Default for ThemeSpacing {
    fn default() -> Self {
        Self {
            sm: 4.0,
            md: 8.0,
            lg: 16.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visuals
// ─────────────────────────────────────────────────────────────────────────────

/// Restyle egui's stock visuals with a palette.
///
/// `shadow_alpha` sets how dark window and popup shadows are.
fn styled_visuals(mut visuals: Visuals, colors: &ThemeColors, shadow_alpha: u8) -> Visuals {
    let spacing = ThemeSpacing::default();

    visuals.panel_fill = colors.base.background;
    visuals.window_fill = colors.base.card;
    visuals.extreme_bg_color = colors.base.background_tertiary;
    visuals.faint_bg_color = colors.base.card;
    visuals.code_bg_color = colors.base.background_tertiary;

    visuals.override_text_color = None;
    visuals.warn_fg_color = colors.ui.warning;
    visuals.error_fg_color = colors.ui.error;
    visuals.hyperlink_color = colors.text.link;

    visuals.selection.bg_fill = colors.base.selected;
    visuals.selection.stroke = Stroke::new(1.0, colors.ui.accent);

    let rounding = Rounding::same(spacing.sm);
    let widgets = &mut visuals.widgets;

    widgets.noninteractive.bg_fill = colors.base.card;
    widgets.noninteractive.weak_bg_fill = colors.base.background_tertiary;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.base.border_subtle);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text.primary);
    widgets.noninteractive.rounding = rounding;

    widgets.inactive.bg_fill = colors.base.card;
    widgets.inactive.weak_bg_fill = colors.base.background_tertiary;
    widgets.inactive.bg_stroke = Stroke::new(1.0, colors.base.border);
    widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text.secondary);
    widgets.inactive.rounding = rounding;

    widgets.hovered.bg_fill = colors.base.hover;
    widgets.hovered.weak_bg_fill = colors.base.hover;
    widgets.hovered.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    widgets.hovered.fg_stroke = Stroke::new(1.5, colors.text.primary);
    widgets.hovered.rounding = rounding;

    widgets.active.bg_fill = colors.brand.primary;
    widgets.active.weak_bg_fill = colors.base.selected;
    widgets.active.bg_stroke = Stroke::new(1.0, colors.ui.accent_hover);
    widgets.active.fg_stroke = Stroke::new(2.0, colors.brand.on_primary);
    widgets.active.rounding = rounding;

    widgets.open.bg_fill = colors.base.selected;
    widgets.open.weak_bg_fill = colors.base.selected;
    widgets.open.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    widgets.open.fg_stroke = Stroke::new(1.0, colors.text.primary);
    widgets.open.rounding = rounding;

    let shadow = |offset: f32, blur: f32, alpha: u8| Shadow {
        offset: vec2(0.0, offset),
        blur,
        spread: 0.0,
        color: Color32::from_black_alpha(alpha),
    };
    visuals.window_rounding = Rounding::same(spacing.md);
    visuals.window_shadow = shadow(4.0, 16.0, shadow_alpha);
    visuals.window_stroke = Stroke::new(1.0, colors.base.border);
    visuals.popup_shadow = shadow(6.0, 20.0, shadow_alpha.saturating_add(20));
    visuals.menu_rounding = rounding;

    visuals.collapsing_header_frame = false;
    visuals.striped = true;
    visuals.interact_cursor = Some(CursorIcon::PointingHand);

    visuals
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
