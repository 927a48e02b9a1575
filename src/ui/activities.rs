//! The stored activity table.
//!
//! Rows come from the store. Every edit becomes a [`SyncCommand`]; the list
//! only changes once the worker reports the write back.

use super::field::EditableField;
use super::table::column_width;
use super::ViewAction;
use crate::backend::{Activity, ActivityField};
use crate::content::ACTIVITY_HEADERS;
use crate::sync::SyncCommand;
use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, Ui};

pub fn show_activities(
    ui: &mut Ui,
    activities: &[Activity],
    colors: &ThemeColors,
    actions: &mut Vec<ViewAction>,
) {
    if activities.is_empty() {
        ui.label(RichText::new("Nenhuma atividade cadastrada.").color(colors.text.muted));
    } else {
        let width = column_width(ui.available_width(), ActivityField::ALL.len());
        egui::ScrollArea::horizontal()
            .id_source("activities_scroll")
            .show(ui, |ui| {
                egui::Grid::new("activities_grid")
                    .striped(true)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for header in ACTIVITY_HEADERS {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.label("");
                        ui.end_row();

                        for activity in activities {
                            show_row(ui, activity, width, actions);
                            ui.end_row();
                        }
                    });
            });
    }

    if ui.button("+ Adicionar atividade").clicked() {
        actions.push(ViewAction::Sync(SyncCommand::InsertActivity));
    }
}

fn show_row(ui: &mut Ui, activity: &Activity, width: f32, actions: &mut Vec<ViewAction>) {
    for field in ActivityField::ALL {
        let committed = EditableField::new(("activity", &activity.id, field.column()), activity.value(field))
            .multiline_if(field.is_multiline())
            .hint(if field == ActivityField::Deadline {
                "AAAA-MM-DD"
            } else {
                ""
            })
            .desired_width(width)
            .show(ui);
        if let Some(value) = committed {
            actions.push(ViewAction::Sync(SyncCommand::UpdateActivity {
                id: activity.id.clone(),
                field,
                value,
            }));
        }
    }

    if ui
        .small_button("🗑")
        .on_hover_text("Remover atividade")
        .clicked()
    {
        actions.push(ViewAction::Sync(SyncCommand::DeleteActivity {
            id: activity.id.clone(),
        }));
    }
}
