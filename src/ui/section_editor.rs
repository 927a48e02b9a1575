//! Modal editor for a custom section's content.

use super::rich_text::RichTextEditor;
use crate::state::SectionEditor;
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, Key, RichText};

/// Result of showing the editor for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEditorOutput {
    Open,
    Save,
    Cancel,
}

/// Draw the editor over a dimmed backdrop.
pub fn show_section_editor(
    ctx: &egui::Context,
    editor: &mut SectionEditor,
    colors: &ThemeColors,
    font_size: f32,
) -> SectionEditorOutput {
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return SectionEditorOutput::Cancel;
    }
    let mut output = SectionEditorOutput::Open;

    // Backdrop
    egui::Area::new(egui::Id::new("section_editor_overlay"))
        .order(egui::Order::Middle)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let screen = ctx.screen_rect();
            ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(120));
        });

    egui::Window::new(format!("✏ {}", editor.title))
        .id(egui::Id::new("section_editor"))
        .collapsible(false)
        .resizable(true)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([640.0, 480.0])
        .show(ctx, |ui| {
            let id = ("section_editor", &editor.section_id);
            RichTextEditor::new(id, &mut editor.draft, &mut editor.mode, colors)
                .font_size(font_size)
                .min_rows(14)
                .show(ui);

            if editor.draft.trim().is_empty() {
                ui.label(
                    RichText::new("Conteúdo vazio não será salvo.")
                        .small()
                        .color(colors.ui.warning),
                );
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Salvar").clicked() {
                        output = SectionEditorOutput::Save;
                    }
                    if ui.button("Cancelar").clicked() {
                        output = SectionEditorOutput::Cancel;
                    }
                });
            });
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewMode;

    #[test]
    fn test_idle_frame_stays_open() {
        let ctx = egui::Context::default();
        let colors = ThemeColors::light();
        let mut editor = SectionEditor {
            section_id: "custom-1".to_string(),
            title: "Leituras".to_string(),
            draft: "# Livros".to_string(),
            mode: ViewMode::Raw,
        };
        let mut output = SectionEditorOutput::Cancel;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            output = show_section_editor(ctx, &mut editor, &colors, 14.0);
        });
        assert_eq!(output, SectionEditorOutput::Open);
        assert_eq!(editor.draft, "# Livros");
    }
}
