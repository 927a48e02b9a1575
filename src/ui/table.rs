//! Collapsible editable tables.

use super::field::EditableField;
use crate::content::TableSet;
use crate::theme::ThemeColors;
use chrono::Utc;
use eframe::egui::{self, RichText, Ui};
use log::debug;

/// Narrowest a column gets before the grid scrolls sideways.
const MIN_COLUMN_WIDTH: f32 = 120.0;
/// Room left for the row delete button.
const ACTION_COLUMN_WIDTH: f32 = 32.0;

/// A change requested while drawing a table set.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TableEdit {
    Toggle(String),
    AddRow(String),
    RemoveRow { table: String, row: String },
    Cell {
        table: String,
        row: String,
        header: String,
        value: String,
    },
}

/// Width of each data column when `columns` share `available` points.
pub fn column_width(available: f32, columns: usize) -> f32 {
    if columns == 0 {
        return available;
    }
    ((available - ACTION_COLUMN_WIDTH) / columns as f32).max(MIN_COLUMN_WIDTH)
}

/// Draw every table of `set`. Returns `true` if anything changed.
pub fn show_table_set(ui: &mut Ui, id_salt: &str, set: &mut TableSet, colors: &ThemeColors) -> bool {
    let mut edits = Vec::new();

    for table in &set.tables {
        ui.push_id((id_salt, &table.id), |ui| {
            let arrow = if table.expanded { "▼" } else { "▶" };
            let header = ui.add(
                egui::Button::new(
                    RichText::new(format!("{} {}", arrow, table.title))
                        .strong()
                        .color(colors.brand.primary),
                )
                .frame(false),
            );
            if header.clicked() {
                edits.push(TableEdit::Toggle(table.id.clone()));
            }
            if !table.expanded {
                return;
            }

            let width = column_width(ui.available_width(), table.headers.len());
            egui::ScrollArea::horizontal()
                .id_source("scroll")
                .show(ui, |ui| {
                    egui::Grid::new("grid")
                        .striped(true)
                        .min_col_width(MIN_COLUMN_WIDTH)
                        .spacing([8.0, 6.0])
                        .show(ui, |ui| {
                            for header in &table.headers {
                                ui.label(RichText::new(header).strong());
                            }
                            ui.label("");
                            ui.end_row();

                            for row in &table.rows {
                                for header in &table.headers {
                                    let multiline = table.multiline.contains(header);
                                    let committed =
                                        EditableField::new((&row.id, header), row.cell(header))
                                            .multiline_if(multiline)
                                            .desired_width(width)
                                            .show(ui);
                                    if let Some(value) = committed {
                                        edits.push(TableEdit::Cell {
                                            table: table.id.clone(),
                                            row: row.id.clone(),
                                            header: header.clone(),
                                            value,
                                        });
                                    }
                                }
                                let remove = ui
                                    .small_button("🗑")
                                    .on_hover_text("Remover linha");
                                if remove.clicked() {
                                    edits.push(TableEdit::RemoveRow {
                                        table: table.id.clone(),
                                        row: row.id.clone(),
                                    });
                                }
                                ui.end_row();
                            }
                        });
                });

            if ui.button("+ Adicionar linha").clicked() {
                edits.push(TableEdit::AddRow(table.id.clone()));
            }
            ui.add_space(8.0);
        });
    }

    let changed = !edits.is_empty();
    for edit in edits {
        apply_edit(set, edit);
    }
    changed
}

fn apply_edit(set: &mut TableSet, edit: TableEdit) {
    match edit {
        TableEdit::Toggle(table) => set.toggle(&table),
        TableEdit::AddRow(table) => {
            set.add_row(&table, Utc::now().timestamp_millis());
        }
        TableEdit::RemoveRow { table, row } => {
            if set.remove_row(&table, &row) {
                debug!("Removed row {} from table {}", row, table);
            }
        }
        TableEdit::Cell {
            table,
            row,
            header,
            value,
        } => {
            set.update_cell(&table, &row, &header, value);
        }
    }
}

/// Draw a read-only grid.
pub fn show_read_only_table<const N: usize>(
    ui: &mut Ui,
    id_salt: &str,
    headers: [&str; N],
    rows: &[[&str; N]],
) {
    let width = column_width(ui.available_width(), N);
    egui::Grid::new(id_salt)
        .striped(true)
        .min_col_width(MIN_COLUMN_WIDTH)
        .max_col_width(width)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            for header in headers {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();
            for row in rows {
                for cell in row {
                    ui.label(*cell);
                }
                ui.end_row();
            }
        });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_metrics;

    #[test]
    fn test_column_width_has_floor() {
        assert_eq!(column_width(1000.0, 0), 1000.0);
        assert_eq!(column_width(632.0, 4), 150.0);
        assert_eq!(column_width(300.0, 5), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_apply_edits() {
        let mut set = default_metrics();
        let table = set.tables[0].id.clone();
        let header = set.tables[0].headers[0].clone();
        let rows = set.tables[0].rows.len();

        apply_edit(&mut set, TableEdit::AddRow(table.clone()));
        assert_eq!(set.tables[0].rows.len(), rows + 1);
        let row = set.tables[0].rows[rows].id.clone();

        apply_edit(
            &mut set,
            TableEdit::Cell {
                table: table.clone(),
                row: row.clone(),
                header: header.clone(),
                value: "Reels".to_string(),
            },
        );
        assert_eq!(set.tables[0].rows[rows].cell(&header), "Reels");

        apply_edit(&mut set, TableEdit::RemoveRow { table, row });
        assert_eq!(set.tables[0].rows.len(), rows);
    }

    #[test]
    fn test_toggle_edit_collapses() {
        let mut set = default_metrics();
        let table = set.tables[0].id.clone();
        let expanded = set.tables[0].expanded;
        apply_edit(&mut set, TableEdit::Toggle(table));
        assert_eq!(set.tables[0].expanded, !expanded);
    }

    #[test]
    fn test_unchanged_frame_reports_no_change() {
        let ctx = egui::Context::default();
        let colors = ThemeColors::light();
        let mut set = default_metrics();
        let before = set.clone();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert!(!show_table_set(ui, "metrics", &mut set, &colors));
            });
        });
        assert_eq!(set, before);
    }
}
