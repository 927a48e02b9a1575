//! Notes window opened from the header.

use super::rich_text::RichTextEditor;
use crate::config::ViewMode;
use crate::content::NoteBook;
use crate::theme::ThemeColors;
use chrono::Utc;
use eframe::egui::{self, Key, RichText};
use log::debug;

/// Draw the notes window while `open` is set. Closing the window clears it.
pub fn show_notes_window(
    ctx: &egui::Context,
    open: &mut bool,
    notes: &mut NoteBook,
    new_title: &mut String,
    default_mode: ViewMode,
    colors: &ThemeColors,
) {
    if !*open {
        return;
    }
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        *open = false;
        return;
    }

    egui::Window::new("📝 Anotações")
        .open(open)
        .collapsible(false)
        .resizable(true)
        .default_size([520.0, 480.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(new_title)
                        .hint_text("Título da nova anotação")
                        .desired_width(ui.available_width() - 90.0),
                );
                let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                let clicked = ui
                    .add_enabled(!new_title.trim().is_empty(), egui::Button::new("Adicionar"))
                    .clicked();
                if (submitted || clicked) && notes.add(new_title, Utc::now().timestamp_millis()).is_some() {
                    new_title.clear();
                }
            });
            ui.separator();

            if notes.is_empty() {
                ui.label(RichText::new("Nenhuma anotação ainda.").color(colors.text.muted));
                return;
            }

            let entries: Vec<(String, String)> = notes
                .notes()
                .iter()
                .map(|n| (n.id.clone(), n.title.clone()))
                .collect();
            let mut removed = None;

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (id, title) in entries {
                    egui::CollapsingHeader::new(RichText::new(&title).strong())
                        .id_source(("note", &id))
                        .default_open(true)
                        .show(ui, |ui| {
                            let mode_id = ui.make_persistent_id(("note_mode", &id));
                            let mut mode = ui
                                .data_mut(|d| d.get_temp::<ViewMode>(mode_id))
                                .unwrap_or(default_mode);
                            if let Some(note) = notes.note_mut(&id) {
                                RichTextEditor::new(("note_editor", &id), &mut note.content, &mut mode, colors)
                                    .min_rows(4)
                                    .show(ui);
                            }
                            ui.data_mut(|d| d.insert_temp(mode_id, mode));

                            if ui.small_button("🗑 Remover").clicked() {
                                removed = Some(id.clone());
                            }
                        });
                }
            });

            if let Some(id) = removed {
                if notes.remove(&id) {
                    debug!("Removed note {}", id);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_window_draws_nothing() {
        let ctx = egui::Context::default();
        let colors = ThemeColors::light();
        let mut notes = NoteBook::default();
        notes.add("Ideias", 1);
        let mut open = false;
        let mut title = String::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            show_notes_window(ctx, &mut open, &mut notes, &mut title, ViewMode::Raw, &colors);
        });
        assert!(!open);
        assert_eq!(notes.notes().len(), 1);
    }

    #[test]
    fn test_open_window_keeps_notes() {
        let ctx = egui::Context::default();
        let colors = ThemeColors::dark();
        let mut notes = NoteBook::default();
        notes.add("Ideias", 1);
        let mut open = true;
        let mut title = String::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            show_notes_window(ctx, &mut open, &mut notes, &mut title, ViewMode::Rendered, &colors);
        });
        assert!(open);
        assert_eq!(notes.notes()[0].title, "Ideias");
    }
}
