//! Markdown editor with a formatting toolbar and a preview switch.
//!
//! Used by the custom section dialog and the notes window. Toolbar buttons
//! and keyboard shortcuts run [`apply_raw_format`] on the current selection
//! and put the resulting selection back into the text edit.

use crate::config::ViewMode;
use crate::markdown::{
    apply_raw_format, detect_raw_formatting_state, HeadingLevel, MarkdownFormatCommand,
    MarkdownPreview,
};
use crate::string_utils::{byte_index_to_char_index, char_range_to_byte_range};
use crate::theme::ThemeColors;
use eframe::egui::{self, Key, Modifiers, Response, RichText, TextEdit, Ui, Vec2};
use log::debug;

const BUTTON_SIZE: Vec2 = Vec2::new(28.0, 24.0);

/// Map a key press to a formatting command.
pub fn shortcut_for(modifiers: Modifiers, key: Key) -> Option<MarkdownFormatCommand> {
    if !modifiers.command {
        return None;
    }
    let command = if modifiers.shift {
        match key {
            Key::S => MarkdownFormatCommand::Strikethrough,
            Key::B => MarkdownFormatCommand::BulletList,
            Key::N => MarkdownFormatCommand::NumberedList,
            Key::T => MarkdownFormatCommand::TaskList,
            _ => return None,
        }
    } else {
        match key {
            Key::B => MarkdownFormatCommand::Bold,
            Key::I => MarkdownFormatCommand::Italic,
            Key::Backtick => MarkdownFormatCommand::InlineCode,
            Key::Num1 => MarkdownFormatCommand::Heading(HeadingLevel::H1),
            Key::Num2 => MarkdownFormatCommand::Heading(HeadingLevel::H2),
            Key::Q => MarkdownFormatCommand::Blockquote,
            Key::K => MarkdownFormatCommand::Link,
            _ => return None,
        }
    };
    Some(command)
}

/// Apply `command` to `text` at the char selection `selection`.
///
/// Returns the new char selection when the text changed.
pub fn format_text(
    text: &mut String,
    selection: (usize, usize),
    command: MarkdownFormatCommand,
) -> Option<(usize, usize)> {
    let bytes = char_range_to_byte_range(text, selection);
    let result = apply_raw_format(text, Some(bytes), command);
    if result.text == *text {
        return None;
    }
    let (start, end) = result.selection.unwrap_or((result.cursor, result.cursor));
    let chars = (
        byte_index_to_char_index(&result.text, start),
        byte_index_to_char_index(&result.text, end),
    );
    *text = result.text;
    Some(chars)
}

/// Output of [`RichTextEditor::show`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTextOutput {
    pub changed: bool,
}

pub struct RichTextEditor<'a> {
    id_salt: egui::Id,
    text: &'a mut String,
    mode: &'a mut ViewMode,
    colors: &'a ThemeColors,
    font_size: f32,
    min_rows: usize,
}

impl<'a> RichTextEditor<'a> {
    pub fn new(
        id_salt: impl std::hash::Hash,
        text: &'a mut String,
        mode: &'a mut ViewMode,
        colors: &'a ThemeColors,
    ) -> Self {
        Self {
            id_salt: egui::Id::new(id_salt),
            text,
            mode,
            colors,
            font_size: 14.0,
            min_rows: 8,
        }
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows;
        self
    }

    pub fn show(self, ui: &mut Ui) -> RichTextOutput {
        let id = ui.make_persistent_id(self.id_salt);
        let edit_id = id.with("edit");
        let selection_id = id.with("selection");
        let mut output = RichTextOutput::default();

        // Last known char selection; survives the text edit losing focus to
        // a toolbar click.
        let mut selection: (usize, usize) = ui.data_mut(|d| {
            d.get_temp(selection_id)
                .unwrap_or_else(|| {
                    let end = self.text.chars().count();
                    (end, end)
                })
        });

        let raw = *self.mode == ViewMode::Raw;
        let cursor_byte = char_range_to_byte_range(self.text, selection).1;
        let state = detect_raw_formatting_state(self.text, cursor_byte);
        let mut command = None;

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            for cmd in MarkdownFormatCommand::TOOLBAR {
                let active = raw && state.is_active(cmd);
                if toolbar_button(ui, self.colors, cmd, raw, active).clicked() {
                    command = Some(cmd);
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(self.mode.toggle_label()).clicked() {
                    *self.mode = self.mode.toggle();
                }
            });
        });
        ui.separator();

        if !raw {
            egui::Frame::none()
                .fill(self.colors.base.background_tertiary)
                .rounding(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    MarkdownPreview::new(self.text)
                        .font_size(self.font_size)
                        .empty_text("Nada para visualizar.")
                        .show(ui);
                });
            return output;
        }

        let text_output = TextEdit::multiline(self.text)
            .id(edit_id)
            .font(egui::FontId::monospace(self.font_size))
            .desired_rows(self.min_rows)
            .desired_width(f32::INFINITY)
            .show(ui);
        output.changed = text_output.response.changed();

        if let Some(range) = text_output.cursor_range {
            selection = (range.primary.ccursor.index, range.secondary.ccursor.index);
        }

        if text_output.response.has_focus() {
            let pressed = ui.input(|i| {
                i.events.iter().find_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => shortcut_for(*modifiers, *key),
                    _ => None,
                })
            });
            command = command.or(pressed);
        }

        if let Some(cmd) = command {
            if let Some(next) = format_text(self.text, selection, cmd) {
                debug!("Applied formatting {:?}, selection {:?}", cmd, next);
                selection = next;
                output.changed = true;
                restore_selection(ui.ctx(), edit_id, next);
            }
            text_output.response.request_focus();
        }

        ui.data_mut(|d| d.insert_temp(selection_id, selection));
        output
    }
}

/// Put a char selection back into a text edit's stored state.
fn restore_selection(ctx: &egui::Context, edit_id: egui::Id, (start, end): (usize, usize)) {
    use egui::text::{CCursor, CCursorRange};

    let mut state = TextEdit::load_state(ctx, edit_id).unwrap_or_default();
    state
        .cursor
        .set_char_range(Some(CCursorRange::two(CCursor::new(start), CCursor::new(end))));
    state.store(ctx, edit_id);
}

fn toolbar_button(
    ui: &mut Ui,
    colors: &ThemeColors,
    command: MarkdownFormatCommand,
    enabled: bool,
    active: bool,
) -> Response {
    let mut text = RichText::new(command.icon()).size(12.0);
    text = match command {
        MarkdownFormatCommand::Bold => text.strong(),
        MarkdownFormatCommand::Italic => text.italics(),
        _ => text,
    };
    let button = egui::Button::new(text)
        .min_size(BUTTON_SIZE)
        .frame(active)
        .fill(colors.base.selected);
    ui.add_enabled(enabled, button)
        .on_hover_text(command.tooltip())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
