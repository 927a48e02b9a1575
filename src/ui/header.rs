//! Header band and status footer.

use crate::theme::{ThemeColors, ThemeSpacing};
use eframe::egui::{self, RichText, Ui};

pub const PLAN_TITLE: &str = "Plano de Desenvolvimento Individual";
pub const OWNER_NAME: &str = "Elisrayane Barbosa";
pub const OWNER_ROLE: &str = "Estagiária Auxiliar de Marketing";
pub const SIGNATURE: &str = "Com amor, seu, Adis.";

/// Actions that can be triggered from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    ToggleNotes,
    CycleTheme,
}

/// Draw the brand band. `theme_icon` and `theme_tooltip` describe the
/// current theme.
pub fn show_header(
    ui: &mut Ui,
    colors: &ThemeColors,
    theme_icon: &str,
    theme_tooltip: &str,
    notes_open: bool,
) -> Option<HeaderAction> {
    let spacing = ThemeSpacing::default();
    let mut action = None;

    egui::Frame::none()
        .fill(colors.brand.primary)
        .inner_margin(egui::Margin::symmetric(spacing.lg * 2.0, spacing.lg))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(PLAN_TITLE)
                            .size(24.0)
                            .strong()
                            .color(colors.brand.on_primary),
                    );
                    ui.add_space(spacing.sm);
                    ui.label(
                        RichText::new(OWNER_NAME)
                            .size(16.0)
                            .color(colors.brand.on_primary),
                    );
                    ui.label(
                        RichText::new(OWNER_ROLE)
                            .color(colors.brand.on_primary.gamma_multiply(0.8)),
                    );
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme = ui
                        .button(RichText::new(theme_icon).size(16.0))
                        .on_hover_text(theme_tooltip);
                    if theme.clicked() {
                        action = Some(HeaderAction::CycleTheme);
                    }

                    let notes = ui
                        .selectable_label(notes_open, RichText::new("📝 Anotações").size(14.0))
                        .on_hover_text("Abrir anotações");
                    if notes.clicked() {
                        action = Some(HeaderAction::ToggleNotes);
                    }
                });
            });
        });

    action
}

/// Where the document's writes are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing loaded yet
    Idle,
    Pending,
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "",
            SaveStatus::Pending => "Salvando…",
            SaveStatus::Saved => "Alterações salvas",
            SaveStatus::Failed(_) => "Falha ao salvar",
        }
    }
}

/// Draw the footer: signature, toast and save status.
pub fn show_footer(ui: &mut Ui, colors: &ThemeColors, toast: Option<&str>, status: &SaveStatus) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(SIGNATURE).italics().color(colors.text.secondary));

        if let Some(toast) = toast {
            ui.separator();
            ui.label(RichText::new(toast).italics().color(colors.ui.info));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let color = match status {
                SaveStatus::Failed(_) => colors.ui.error,
                SaveStatus::Pending => colors.ui.warning,
                _ => colors.text.muted,
            };
            let label = ui.label(RichText::new(status.label()).small().color(color));
            if let SaveStatus::Failed(message) = status {
                label.on_hover_text(message);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_status_labels() {
        assert_eq!(SaveStatus::Idle.label(), "");
        assert_eq!(SaveStatus::Pending.label(), "Salvando…");
        assert_eq!(SaveStatus::Failed("x".to_string()).label(), "Falha ao salvar");
    }

    #[test]
    fn test_header_idle_frame() {
        let ctx = egui::Context::default();
        let colors = ThemeColors::light();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert_eq!(show_header(ui, &colors, "☀", "Tema claro", false), None);
                show_footer(ui, &colors, Some("Plano criado"), &SaveStatus::Saved);
            });
        });
    }
}
