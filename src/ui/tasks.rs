//! Task manager section.

use crate::content::{format_deadline, Filter, Task, TaskBoard, TaskDraft, TaskPriority, TaskStatus};
use crate::theme::{ThemeColors, ThemeSpacing};
use chrono::Utc;
use eframe::egui::{self, RichText, Ui};
use log::debug;

/// A change requested while drawing the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TaskEdit {
    Toggle(String),
    Remove(String),
}

/// Label for a filter value.
fn filter_text<T>(filter: &Filter<T>, label: impl Fn(&T) -> &'static str, all: &'static str) -> &'static str {
    match filter {
        Filter::All => all,
        Filter::Only(value) => label(value),
    }
}

/// Draw the task manager. `form` is the open "new task" form, if any.
pub fn show_tasks(
    ui: &mut Ui,
    board: &mut TaskBoard,
    form: &mut Option<TaskDraft>,
    show_filters: &mut bool,
    colors: &ThemeColors,
) {
    let spacing = ThemeSpacing::default();

    ui.horizontal(|ui| {
        if form.is_none() && ui.button("+ Nova tarefa").clicked() {
            *form = Some(TaskDraft::default());
        }
        let filter_label = if *show_filters {
            "Ocultar filtros"
        } else {
            "Filtros"
        };
        if ui.button(filter_label).clicked() {
            *show_filters = !*show_filters;
        }
    });

    if *show_filters {
        show_filters_row(ui, board);
    }

    if let Some(draft) = form.as_mut() {
        ui.add_space(spacing.sm);
        match show_form(ui, draft, colors) {
            FormOutcome::Submit => {
                if board.add(draft, Utc::now().timestamp_millis()).is_some() {
                    *form = None;
                }
            }
            FormOutcome::Cancel => *form = None,
            FormOutcome::Editing => {}
        }
    }

    ui.add_space(spacing.md);
    let mut edits = Vec::new();
    let visible = board.filtered();
    if visible.is_empty() {
        let text = if board.tasks().is_empty() {
            "Nenhuma tarefa ainda."
        } else {
            "Nenhuma tarefa corresponde aos filtros."
        };
        ui.label(RichText::new(text).color(colors.text.muted));
    }
    for task in visible {
        show_task(ui, task, colors, &mut edits);
        ui.add_space(spacing.sm);
    }

    for edit in edits {
        match edit {
            TaskEdit::Toggle(id) => board.toggle(&id),
            TaskEdit::Remove(id) => {
                if board.remove(&id) {
                    debug!("Removed task {}", id);
                }
            }
        }
    }
}

fn show_filters_row(ui: &mut Ui, board: &mut TaskBoard) {
    ui.horizontal(|ui| {
        ui.label("Status:");
        egui::ComboBox::from_id_source("task_status_filter")
            .selected_text(filter_text(&board.status_filter, TaskStatus::filter_label, "Todas"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut board.status_filter, Filter::All, "Todas");
                for status in TaskStatus::ALL {
                    ui.selectable_value(
                        &mut board.status_filter,
                        Filter::Only(status),
                        status.filter_label(),
                    );
                }
            });

        ui.label("Prioridade:");
        egui::ComboBox::from_id_source("task_priority_filter")
            .selected_text(filter_text(&board.priority_filter, TaskPriority::label, "Todas"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut board.priority_filter, Filter::All, "Todas");
                for priority in TaskPriority::ALL {
                    ui.selectable_value(
                        &mut board.priority_filter,
                        Filter::Only(priority),
                        priority.label(),
                    );
                }
            });
    });
}

enum FormOutcome {
    Editing,
    Submit,
    Cancel,
}

fn show_form(ui: &mut Ui, draft: &mut TaskDraft, colors: &ThemeColors) -> FormOutcome {
    let mut outcome = FormOutcome::Editing;

    egui::Frame::group(ui.style())
        .fill(colors.base.background_tertiary)
        .show(ui, |ui| {
            egui::Grid::new("task_form")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Título");
                    ui.text_edit_singleline(&mut draft.title);
                    ui.end_row();

                    ui.label("Descrição");
                    ui.add(egui::TextEdit::multiline(&mut draft.description).desired_rows(2));
                    ui.end_row();

                    ui.label("Prazo");
                    ui.add(egui::TextEdit::singleline(&mut draft.deadline).hint_text("AAAA-MM-DD"));
                    ui.end_row();

                    ui.label("Prioridade");
                    egui::ComboBox::from_id_source("task_form_priority")
                        .selected_text(draft.priority.label())
                        .show_ui(ui, |ui| {
                            for priority in TaskPriority::ALL {
                                ui.selectable_value(&mut draft.priority, priority, priority.label());
                            }
                        });
                    ui.end_row();
                });

            if !draft.deadline.trim().is_empty() && draft.parsed_deadline().is_none() {
                ui.colored_label(colors.ui.error, "Data inválida, use AAAA-MM-DD.");
            }

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(draft.is_complete(), egui::Button::new("Adicionar"))
                    .clicked()
                {
                    outcome = FormOutcome::Submit;
                }
                if ui.button("Cancelar").clicked() {
                    outcome = FormOutcome::Cancel;
                }
            });
        });

    outcome
}

fn show_task(ui: &mut Ui, task: &Task, colors: &ThemeColors, edits: &mut Vec<TaskEdit>) {
    let status_color = colors.task_status(task.status);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            let toggle = ui
                .add(egui::Button::new(RichText::new(task.status.icon()).color(status_color)).frame(false))
                .on_hover_text(task.status.label());
            if toggle.clicked() {
                edits.push(TaskEdit::Toggle(task.id.clone()));
            }

            let mut title = RichText::new(&task.title).strong();
            if task.status == TaskStatus::Completed {
                title = title.strikethrough().color(colors.text.muted);
            }
            ui.label(title);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗑").on_hover_text("Remover tarefa").clicked() {
                    edits.push(TaskEdit::Remove(task.id.clone()));
                }
                ui.label(
                    RichText::new(task.priority.label())
                        .small()
                        .color(colors.task_priority(task.priority)),
                );
                ui.label(
                    RichText::new(format!("📅 {}", format_deadline(task.deadline)))
                        .small()
                        .color(colors.text.secondary),
                );
            });
        });
        if !task.description.is_empty() {
            ui.label(RichText::new(&task.description).color(colors.text.secondary));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_text() {
        assert_eq!(filter_text(&Filter::All, TaskStatus::filter_label, "Todas"), "Todas");
        assert_eq!(
            filter_text(&Filter::Only(TaskStatus::Delayed), TaskStatus::filter_label, "Todas"),
            "Atrasadas"
        );
        assert_eq!(
            filter_text(&Filter::Only(TaskPriority::High), TaskPriority::label, "Todas"),
            "Alta"
        );
    }

    #[test]
    fn test_idle_frame_keeps_board() {
        let mut board = TaskBoard::default();
        let draft = TaskDraft {
            title: "Roteiro".to_string(),
            deadline: "2025-03-05".to_string(),
            ..TaskDraft::default()
        };
        board.add(&draft, 1).unwrap();

        let mut form = Some(TaskDraft::default());
        let mut show_filters = true;
        let colors = ThemeColors::light();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                show_tasks(ui, &mut board, &mut form, &mut show_filters, &colors);
            });
        });

        assert_eq!(board.tasks().len(), 1);
        assert!(form.is_some());
    }
}
