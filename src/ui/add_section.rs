//! "Add section" box under the section list.

use crate::theme::ThemeColors;
use eframe::egui::{self, Key, RichText, Ui};

/// Draw the box. Returns `true` when the user asked to add a section titled
/// `title`.
pub fn show_add_section(ui: &mut Ui, title: &mut String, colors: &ThemeColors) -> bool {
    let mut submit = false;
    egui::Frame::group(ui.style())
        .fill(colors.base.card)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Nova seção").strong().color(colors.brand.primary));
            ui.horizontal(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(title)
                        .hint_text("Título da seção")
                        .desired_width(ui.available_width() - 120.0),
                );
                let entered = input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                let blank = title.trim().is_empty();
                let clicked = ui
                    .add_enabled(!blank, egui::Button::new("+ Adicionar seção"))
                    .clicked();
                submit = !blank && (entered || clicked);
            });
        });
    submit
}
