//! Dark Theme Configuration
//!
//! Charcoal page with slightly raised cards; the header band keeps the
//! brand slate, lifted a shade so it stays visible against the background.

use eframe::egui::{Color32, Visuals};

use super::{styled_visuals, BaseColors, BrandColors, TextColors, ThemeColors, UiColors};

/// The dark palette.
pub fn colors() -> ThemeColors {
    ThemeColors {
        base: BaseColors {
            background: Color32::from_rgb(24, 26, 31),
            card: Color32::from_rgb(34, 37, 44),
            background_tertiary: Color32::from_rgb(44, 48, 56),
            border: Color32::from_rgb(62, 67, 78),
            border_subtle: Color32::from_rgb(50, 54, 63),
            hover: Color32::from_rgb(52, 57, 67),
            selected: Color32::from_rgb(58, 68, 86),
        },
        text: TextColors {
            primary: Color32::from_rgb(226, 228, 233),
            secondary: Color32::from_rgb(180, 184, 192),
            muted: Color32::from_rgb(128, 134, 145),
            link: Color32::from_rgb(100, 180, 255),
        },
        brand: BrandColors {
            primary: Color32::from_rgb(0x4a, 0x55, 0x68),
            on_primary: Color32::WHITE,
            drop_target: Color32::from_rgba_unmultiplied(140, 160, 190, 40),
        },
        ui: UiColors {
            accent: Color32::from_rgb(120, 140, 170),
            accent_hover: Color32::from_rgb(150, 170, 200),
            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),
            info: Color32::from_rgb(96, 165, 250),
        },
    }
}

/// Create egui Visuals configured for the dark theme.
pub fn create_dark_visuals() -> Visuals {
    let mut visuals = styled_visuals(Visuals::dark(), &colors(), 80);
    visuals.dark_mode = true;
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_visuals_has_dark_background() {
        let visuals = create_dark_visuals();
        assert!(visuals.dark_mode);
        assert!(visuals.panel_fill.r() < 50);
        assert!(visuals.panel_fill.g() < 50);
        assert!(visuals.panel_fill.b() < 50);
    }

    #[test]
    fn test_dark_visuals_selection_visible() {
        let visuals = create_dark_visuals();
        assert_ne!(visuals.selection.bg_fill, visuals.panel_fill);
    }

    #[test]
    fn test_dark_visuals_shadows_more_pronounced() {
        let dark_visuals = create_dark_visuals();
        let light_visuals = super::super::light::create_light_visuals();
        assert!(dark_visuals.window_shadow.color.a() > light_visuals.window_shadow.color.a());
    }
}
