//! In-place text field with commit-on-blur.
//!
//! The widget keeps a draft of the external value in egui's temporary
//! memory. The caller only hears about an edit when focus leaves the field
//! (or Enter is pressed in a single-line field) and the text actually
//! changed. Escape throws the draft away.

use eframe::egui::{self, Key, TextEdit, Ui};

/// Tooltips show the full value of single-line fields longer than this.
const SINGLE_LINE_TOOLTIP_CHARS: usize = 30;
/// Tooltips show the full value of multi-line fields longer than this.
const MULTI_LINE_TOOLTIP_CHARS: usize = 100;
/// Multi-line fields never shrink below this many rows.
const MIN_ROWS: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Draft State
// ─────────────────────────────────────────────────────────────────────────────

/// Draft copy of an external value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDraft {
    draft: String,
    /// The last value committed or received from outside
    committed: String,
    editing: bool,
}

impl FieldDraft {
    pub fn new(value: &str) -> Self {
        Self {
            draft: value.to_string(),
            committed: value.to_string(),
            editing: false,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Follow the external value while the field is not being edited.
    pub fn sync_external(&mut self, value: &str) {
        if !self.editing && self.committed != value {
            self.committed = value.to_string();
            self.draft = value.to_string();
        }
    }

    /// Finish editing. Returns the new value if it differs from the last
    /// committed one.
    pub fn commit(&mut self) -> Option<String> {
        self.editing = false;
        if self.draft == self.committed {
            return None;
        }
        self.committed = self.draft.clone();
        Some(self.draft.clone())
    }

    /// Finish editing and restore the last committed value.
    pub fn revert(&mut self) {
        self.editing = false;
        self.draft = self.committed.clone();
    }
}

/// Number of rows a multi-line field needs for `text`.
pub fn rows_for(text: &str) -> usize {
    text.lines().count().max(MIN_ROWS)
}

/// Whether hovering should show the full value.
fn wants_tooltip(text: &str, multiline: bool) -> bool {
    let limit = if multiline {
        MULTI_LINE_TOOLTIP_CHARS
    } else {
        SINGLE_LINE_TOOLTIP_CHARS
    };
    text.chars().count() > limit
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Editable text field.
///
/// ```ignore
/// if let Some(text) = EditableField::new("overview", &doc.overview).multiline().show(ui) {
///     actions.push(DocumentAction::SetOverview(text));
/// }
/// ```
pub struct EditableField<'a> {
    id_salt: egui::Id,
    value: &'a str,
    multiline: bool,
    hint: &'a str,
    desired_width: Option<f32>,
    font_size: Option<f32>,
}

impl<'a> EditableField<'a> {
    pub fn new(id_salt: impl std::hash::Hash, value: &'a str) -> Self {
        Self {
            id_salt: egui::Id::new(id_salt),
            value,
            multiline: false,
            hint: "",
            desired_width: None,
            font_size: None,
        }
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn multiline_if(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = hint;
        self
    }

    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Draw the field. Returns the committed text when an edit finished
    /// with a change.
    pub fn show(self, ui: &mut Ui) -> Option<String> {
        let id = ui.make_persistent_id(self.id_salt);
        let mut state = ui
            .data_mut(|d| d.get_temp::<FieldDraft>(id))
            .unwrap_or_else(|| FieldDraft::new(self.value));
        state.sync_external(self.value);

        let mut text = state.draft().to_string();
        let width = self.desired_width.unwrap_or_else(|| ui.available_width());
        let mut edit = if self.multiline {
            TextEdit::multiline(&mut text).desired_rows(rows_for(state.draft()))
        } else {
            TextEdit::singleline(&mut text)
        }
        .id(id.with("edit"))
        .hint_text(self.hint)
        .desired_width(width);
        if let Some(size) = self.font_size {
            edit = edit.font(egui::FontId::proportional(size));
        }

        let response = ui.add(edit);

        if response.gained_focus() {
            state.begin_edit();
        }
        if response.changed() {
            state.begin_edit();
            state.set_draft(text);
        }

        let mut committed = None;
        if response.lost_focus() {
            if ui.input(|i| i.key_pressed(Key::Escape)) {
                state.revert();
            } else {
                committed = state.commit();
            }
        }

        if !state.is_editing() && wants_tooltip(self.value, self.multiline) {
            response.on_hover_text(self.value);
        }

        ui.data_mut(|d| d.insert_temp(id, state));
        committed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_without_change_never_commits() {
        let mut field = FieldDraft::new("Meta");
        field.begin_edit();
        assert_eq!(field.commit(), None);
        assert!(!field.is_editing());
    }

    #[test]
    fn test_blur_with_change_commits_once() {
        let mut field = FieldDraft::new("Meta");
        field.begin_edit();
        field.set_draft("Meta nova");
        assert_eq!(field.commit(), Some("Meta nova".to_string()));

        field.begin_edit();
        assert_eq!(field.commit(), None);
    }

    #[test]
    fn test_typing_back_to_original_does_not_commit() {
        let mut field = FieldDraft::new("abc");
        field.begin_edit();
        field.set_draft("abcd");
        field.set_draft("abc");
        assert_eq!(field.commit(), None);
    }

    #[test]
    fn test_escape_reverts_without_commit() {
        let mut field = FieldDraft::new("Meta");
        field.begin_edit();
        field.set_draft("rascunho");
        field.revert();
        assert_eq!(field.draft(), "Meta");
        assert!(!field.is_editing());

        field.begin_edit();
        assert_eq!(field.commit(), None);
    }

    #[test]
    fn test_draft_follows_external_value_when_idle() {
        let mut field = FieldDraft::new("antes");
        field.sync_external("depois");
        assert_eq!(field.draft(), "depois");

        field.begin_edit();
        field.set_draft("digitando");
        field.sync_external("remoto");
        assert_eq!(field.draft(), "digitando");
    }

    #[test]
    fn test_rows_grow_with_content() {
        assert_eq!(rows_for(""), 3);
        assert_eq!(rows_for("a\nb"), 3);
        assert_eq!(rows_for("a\nb\nc\nd\ne"), 5);
    }

    #[test]
    fn test_tooltip_thresholds() {
        let short = "x".repeat(30);
        let long = "x".repeat(31);
        assert!(!wants_tooltip(&short, false));
        assert!(wants_tooltip(&long, false));
        assert!(!wants_tooltip(&long, true));
        assert!(wants_tooltip(&"ç".repeat(101), true));
    }

    #[test]
    fn test_widget_reports_nothing_without_interaction() {
        let ctx = egui::Context::default();
        let mut committed = Some(String::new());
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                committed = EditableField::new("field", "valor").multiline().show(ui);
            });
        });
        assert_eq!(committed, None);
    }

    #[test]
    fn test_long_value_renders_with_tooltip() {
        let long = "Produzir conteúdo semanal para redes sociais com métricas";
        let ctx = egui::Context::default();
        let mut committed = Some(String::new());
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    committed = EditableField::new("meta", long).show(ui);
                });
            });
        }
        assert_eq!(committed, None);
        assert!(wants_tooltip(long, false));
    }
}
