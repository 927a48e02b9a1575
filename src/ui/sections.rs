//! Section renderer.
//!
//! Every section kind maps to one view. Saved fields (overview text, main
//! objective, custom content) are reported back as [`ViewAction`]s; the
//! session-only content of the built-in sections is edited in place.

use super::activities::show_activities;
use super::field::EditableField;
use super::sortable::SectionCard;
use super::table::{show_read_only_table, show_table_set};
use super::tasks::show_tasks;
use super::ViewAction;
use crate::backend::Activity;
use crate::content::{SectionContent, OVERVIEW_SUMMARY, ACTIVITY_HEADERS};
use crate::document::{Document, DocumentAction, SectionKind, SectionRef};
use crate::state::UiState;
use crate::theme::{ThemeColors, ThemeSpacing};
use eframe::egui::{self, RichText, Ui};

/// Everything a section view reads or edits during one frame.
pub struct SectionView<'a> {
    pub document: &'a Document,
    pub activities: &'a [Activity],
    pub content: &'a mut SectionContent,
    pub ui_state: &'a mut UiState,
    pub colors: &'a ThemeColors,
    pub font_size: f32,
    pub actions: Vec<ViewAction>,
}

impl SectionCard for SectionView<'_> {
    fn header(&mut self, ui: &mut Ui, section: &SectionRef) {
        ui.label(
            RichText::new(&section.title)
                .size(self.font_size + 6.0)
                .strong()
                .color(self.colors.brand.primary),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if section.removable
                && ui
                    .small_button("🗑")
                    .on_hover_text("Remover seção")
                    .clicked()
            {
                self.actions
                    .push(ViewAction::Document(DocumentAction::RemoveSection {
                        id: section.id.clone(),
                    }));
            }
            if section.kind.is_custom()
                && ui
                    .small_button("✏")
                    .on_hover_text("Editar conteúdo")
                    .clicked()
            {
                self.actions.push(ViewAction::EditSection(section.id.clone()));
            }
        });
    }

    fn body(&mut self, ui: &mut Ui, section: &SectionRef) {
        match section.kind {
            SectionKind::Overview => self.overview(ui),
            SectionKind::Objectives => self.objectives(ui),
            SectionKind::ActionPlan => {
                show_table_set(ui, "action_plan", &mut self.content.action_plan, self.colors);
            }
            SectionKind::Activities => {
                show_activities(ui, self.activities, self.colors, &mut self.actions);
            }
            SectionKind::Metrics => {
                show_table_set(ui, "metrics", &mut self.content.metrics, self.colors);
            }
            SectionKind::Monitoring => {
                show_table_set(ui, "monitoring", &mut self.content.monitoring, self.colors);
            }
            SectionKind::Tasks => show_tasks(
                ui,
                &mut self.content.tasks,
                &mut self.ui_state.task_form,
                &mut self.ui_state.show_task_filters,
                self.colors,
            ),
            SectionKind::Custom => self.custom(ui, &section.id),
        }
    }
}

impl SectionView<'_> {
    fn overview(&mut self, ui: &mut Ui) {
        let spacing = ThemeSpacing::default();

        if let Some(text) = EditableField::new("overview", &self.document.overview)
            .multiline()
            .font_size(self.font_size)
            .show(ui)
        {
            self.actions
                .push(ViewAction::Document(DocumentAction::SetOverview(text)));
        }
        ui.add_space(spacing.md);

        ui.columns(self.content.highlights.len().max(1), |columns| {
            for (column, highlight) in columns.iter_mut().zip(self.content.highlights.iter_mut()) {
                egui::Frame::group(column.style())
                    .fill(self.colors.base.background_tertiary)
                    .show(column, |ui| {
                        ui.label(
                            RichText::new(format!("{} {}", highlight.icon, highlight.label))
                                .small()
                                .color(self.colors.text.secondary),
                        );
                        if let Some(value) = EditableField::new(("highlight", highlight.label), &highlight.value)
                            .show(ui)
                        {
                            highlight.value = value;
                        }
                    });
            }
        });
        ui.add_space(spacing.lg);

        ui.label(
            RichText::new("Resumo das atividades planejadas")
                .strong()
                .color(self.colors.text.primary),
        );
        ui.add_space(spacing.sm);
        let rows: Vec<[&str; 3]> = OVERVIEW_SUMMARY
            .iter()
            .map(|(activity, description, result)| [*activity, *description, *result])
            .collect();
        show_read_only_table(
            ui,
            "overview_summary",
            [ACTIVITY_HEADERS[0], ACTIVITY_HEADERS[1], ACTIVITY_HEADERS[2]],
            &rows,
        );
    }

    fn objectives(&mut self, ui: &mut Ui) {
        let spacing = ThemeSpacing::default();

        ui.label(RichText::new("Objetivo principal").strong());
        if let Some(text) = EditableField::new("main_objective", &self.document.main_objective)
            .multiline()
            .font_size(self.font_size)
            .show(ui)
        {
            self.actions
                .push(ViewAction::Document(DocumentAction::SetMainObjective(text)));
        }
        ui.add_space(spacing.lg);

        for group in &mut self.content.objective_groups {
            ui.label(
                RichText::new(format!("{} {}", group.icon, group.title))
                    .strong()
                    .color(self.colors.brand.primary),
            );
            ui.add_space(spacing.sm);
            for (index, item) in group.items.iter_mut().enumerate() {
                ui.horizontal_top(|ui| {
                    ui.label(RichText::new("•").color(self.colors.text.muted));
                    if let Some(text) = EditableField::new((group.title, index), item.as_str())
                        .multiline()
                        .show(ui)
                    {
                        *item = text;
                    }
                });
            }
            ui.add_space(spacing.md);
        }
    }

    fn custom(&mut self, ui: &mut Ui, id: &str) {
        let content = self.document.custom_content(id).unwrap_or_default();
        if let Some(text) = EditableField::new(("custom", id), content)
            .multiline()
            .font_size(self.font_size)
            .show(ui)
        {
            self.actions
                .push(ViewAction::Document(DocumentAction::SetCustomContent {
                    id: id.to_string(),
                    content: text,
                }));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_section_renders_without_actions() {
        let mut document = Document::default();
        document = document.apply(DocumentAction::AddSection {
            id: "custom-1".to_string(),
            title: "Leituras".to_string(),
        });
        let mut content = SectionContent::default();
        let mut ui_state = UiState::default();
        let colors = ThemeColors::light();

        let mut view = SectionView {
            document: &document,
            activities: &[],
            content: &mut content,
            ui_state: &mut ui_state,
            colors: &colors,
            font_size: 14.0,
            actions: Vec::new(),
        };

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                for section in &document.section_order {
                    ui.push_id(&section.id, |ui| {
                        view.header(ui, section);
                        view.body(ui, section);
                    });
                }
            });
        });

        assert!(view.actions.is_empty());
    }

    /// Render one section body. `blur` drops focus from that widget first.
    fn render_body(
        ctx: &egui::Context,
        input: egui::RawInput,
        view: &mut SectionView<'_>,
        section: &SectionRef,
        blur: Option<egui::Id>,
    ) -> egui::Id {
        let mut edit_id = egui::Id::NULL;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(id) = blur {
                    ui.memory_mut(|m| m.surrender_focus(id));
                }
                ui.push_id(&section.id, |ui| {
                    view.body(ui, section);
                    edit_id = ui
                        .make_persistent_id(egui::Id::new(("custom", section.id.as_str())))
                        .with("edit");
                });
            });
        });
        edit_id
    }

    #[test]
    fn test_custom_section_content_is_edited_in_place() {
        let document = Document::default().apply(DocumentAction::AddSection {
            id: "custom-1".to_string(),
            title: "Leituras".to_string(),
        });
        let section = document.section_order.last().unwrap().clone();
        let mut content = SectionContent::default();
        let mut ui_state = UiState::default();
        let colors = ThemeColors::light();
        let mut view = SectionView {
            document: &document,
            activities: &[],
            content: &mut content,
            ui_state: &mut ui_state,
            colors: &colors,
            font_size: 14.0,
            actions: Vec::new(),
        };

        let ctx = egui::Context::default();
        let edit_id = render_body(&ctx, egui::RawInput::default(), &mut view, &section, None);
        ctx.memory_mut(|m| m.request_focus(edit_id));

        let typing = egui::RawInput {
            events: vec![egui::Event::Text("!".to_string())],
            ..Default::default()
        };
        render_body(&ctx, typing, &mut view, &section, None);
        assert!(view.actions.is_empty());

        render_body(&ctx, egui::RawInput::default(), &mut view, &section, Some(edit_id));
        match view.actions.as_slice() {
            [ViewAction::Document(DocumentAction::SetCustomContent { id, content })] => {
                assert_eq!(id, "custom-1");
                assert!(content.contains('!'));
            }
            other => panic!("expected one content edit, got {:?}", other),
        }
    }
}
