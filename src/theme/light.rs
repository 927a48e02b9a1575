//! Light Theme Configuration
//!
//! White cards on a cool grey page, with the slate brand colour for the
//! header band and primary actions.

use eframe::egui::{Color32, Visuals};

use super::{styled_visuals, BaseColors, BrandColors, TextColors, ThemeColors, UiColors, BRAND};

/// The light palette.
pub fn colors() -> ThemeColors {
    ThemeColors {
        base: BaseColors {
            background: Color32::from_rgb(243, 244, 246),
            card: Color32::WHITE,
            background_tertiary: Color32::from_rgb(240, 242, 245),
            border: Color32::from_rgb(209, 213, 219),
            border_subtle: Color32::from_rgb(229, 231, 235),
            hover: Color32::from_rgb(236, 238, 242),
            selected: Color32::from_rgb(214, 222, 235),
        },
        text: TextColors {
            primary: Color32::from_rgb(31, 41, 55),
            secondary: Color32::from_rgb(75, 85, 99),
            muted: Color32::from_rgb(140, 146, 156),
            link: Color32::from_rgb(0, 100, 180),
        },
        brand: BrandColors {
            primary: BRAND,
            on_primary: Color32::WHITE,
            drop_target: Color32::from_rgba_unmultiplied(0x30, 0x38, 0x45, 40),
        },
        ui: UiColors {
            accent: Color32::from_rgb(71, 85, 105),
            accent_hover: BRAND,
            success: Color32::from_rgb(22, 163, 74),
            warning: Color32::from_rgb(202, 138, 4),
            error: Color32::from_rgb(220, 38, 38),
            info: Color32::from_rgb(37, 99, 235),
        },
    }
}

/// Create egui Visuals configured for the light theme.
pub fn create_light_visuals() -> Visuals {
    let mut visuals = styled_visuals(Visuals::light(), &colors(), 25);
    visuals.dark_mode = false;
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_visuals_is_light_mode() {
        let visuals = create_light_visuals();
        assert!(!visuals.dark_mode);
        assert!(visuals.panel_fill.r() > 200);
    }

    #[test]
    fn test_light_visuals_text_contrast() {
        let visuals = create_light_visuals();
        assert!(visuals.widgets.noninteractive.fg_stroke.color.r() < 100);
        assert_eq!(
            visuals.widgets.noninteractive.fg_stroke.color,
            colors().text.primary
        );
    }

    #[test]
    fn test_pressed_buttons_use_brand() {
        assert_eq!(create_light_visuals().widgets.active.bg_fill, BRAND);
    }
}
