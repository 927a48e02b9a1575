//! Placeholder shown until the document has loaded.

use crate::sync::LoadPhase;
use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, Ui};

/// Text describing a load phase.
pub fn phase_text(phase: &LoadPhase) -> &str {
    match phase {
        LoadPhase::Loading => "Conectando…",
        LoadPhase::Authenticated => "Carregando plano…",
        LoadPhase::DataLoaded => "Plano carregado",
        LoadPhase::DataCreated => "Plano criado",
        LoadPhase::Failed(message) => message,
    }
}

/// Draw the loading or failure screen. Returns `true` when retry was
/// clicked.
pub fn show_load_status(ui: &mut Ui, phase: &LoadPhase, colors: &ThemeColors) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        if phase.is_failed() {
            ui.label(
                RichText::new("Não foi possível carregar o plano")
                    .size(18.0)
                    .strong()
                    .color(colors.ui.error),
            );
            ui.add_space(8.0);
            ui.label(RichText::new(phase_text(phase)).color(colors.text.secondary));
            ui.add_space(16.0);
            retry = ui.button("Tentar novamente").clicked();
        } else {
            ui.add(egui::Spinner::new().size(32.0));
            ui.add_space(8.0);
            ui.label(RichText::new(phase_text(phase)).color(colors.text.secondary));
        }
    });
    retry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_phase_shows_message() {
        let phase = LoadPhase::Failed("Credenciais inválidas".to_string());
        assert_eq!(phase_text(&phase), "Credenciais inválidas");
        assert_eq!(phase_text(&LoadPhase::Authenticated), "Carregando plano…");
    }
}
