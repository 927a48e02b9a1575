//! Vertically sortable section cards.
//!
//! Each card has a grip handle. Dragging the grip picks the section up in
//! the [`DragController`]; a half-transparent, read-only copy of the whole
//! card follows the pointer, and the card whose centre is nearest the pointer is
//! outlined as the drop target. Releasing the pointer yields the
//! `MoveSection` action for the caller to dispatch.

use crate::document::reorder::{closest_center, DragController};
use crate::document::{DocumentAction, SectionRef};
use crate::theme::{ThemeColors, ThemeSpacing};
use eframe::egui::{self, CursorIcon, Key, Order, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

/// Opacity of the floating copy of the dragged card.
pub const PROXY_OPACITY: f32 = 0.5;
const PROXY_OFFSET: Vec2 = Vec2::new(12.0, 8.0);
const CARD_ROUNDING: f32 = 8.0;

/// Content drawn inside each card.
pub trait SectionCard {
    /// Title row, drawn to the right of the grip.
    fn header(&mut self, ui: &mut Ui, section: &SectionRef);
    fn body(&mut self, ui: &mut Ui, section: &SectionRef);
}

/// End a drag at `pointer` over the cards laid out at `targets`.
pub fn finish_drag(
    drag: &mut DragController,
    pointer: Option<Pos2>,
    targets: &[(String, Rect)],
) -> Option<DocumentAction> {
    let over = pointer.and_then(|p| closest_center(p, targets));
    drag.drop_on(over)
}

pub struct SortableList<'a> {
    drag: &'a mut DragController,
    colors: &'a ThemeColors,
}

impl<'a> SortableList<'a> {
    pub fn new(drag: &'a mut DragController, colors: &'a ThemeColors) -> Self {
        Self { drag, colors }
    }

    /// Draw `sections` in order. Returns the reorder to apply, if a drop
    /// happened this frame.
    pub fn show(
        self,
        ui: &mut Ui,
        sections: &[SectionRef],
        card: &mut impl SectionCard,
    ) -> Option<DocumentAction> {
        let spacing = ThemeSpacing::default();
        let mut targets: Vec<(String, Rect)> = Vec::with_capacity(sections.len());

        for section in sections {
            let is_active = self.drag.active_id() == Some(section.id.as_str());
            let stroke = if is_active {
                Stroke::new(1.0, self.colors.base.border_subtle)
            } else {
                Stroke::new(1.0, self.colors.base.border)
            };

            let frame = egui::Frame::none()
                .fill(self.colors.base.card)
                .stroke(stroke)
                .rounding(CARD_ROUNDING)
                .inner_margin(spacing.lg)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.push_id(&section.id, |ui| {
                        ui.horizontal(|ui| {
                            let grip = ui
                                .add(
                                    egui::Label::new(
                                        RichText::new("⠿").size(18.0).color(self.colors.text.muted),
                                    )
                                    .sense(Sense::drag()),
                                )
                                .on_hover_cursor(CursorIcon::Grab)
                                .on_hover_text("Arraste para reordenar");
                            if grip.drag_started() {
                                self.drag.pick_up(section.id.clone());
                            }
                            card.header(ui, section);
                        });
                        ui.add_space(spacing.md);
                        card.body(ui, section);
                    });
                });
            targets.push((section.id.clone(), frame.response.rect));
            ui.add_space(spacing.md);
        }

        if !self.drag.is_dragging() {
            return None;
        }

        let ctx = ui.ctx().clone();
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.drag.cancel();
            return None;
        }

        let (pointer, released) = ctx.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
        if released {
            return finish_drag(self.drag, pointer, &targets);
        }

        ctx.set_cursor_icon(CursorIcon::Grabbing);
        if let Some(pos) = pointer {
            if let Some(over) = closest_center(pos, &targets) {
                if let Some((_, rect)) = targets.iter().find(|(id, _)| id == over) {
                    ui.painter().rect_stroke(
                        rect.expand(2.0),
                        CARD_ROUNDING,
                        Stroke::new(2.0, self.colors.brand.drop_target),
                    );
                }
            }
            let active = self.drag.active_id().and_then(|id| {
                let section = sections.iter().find(|s| s.id == id)?;
                let (_, rect) = targets.iter().find(|(target, _)| target == id)?;
                Some((section, rect.width()))
            });
            if let Some((section, width)) = active {
                show_proxy(&ctx, self.colors, pos + PROXY_OFFSET, width, section, card);
            }
        }
        None
    }
}

/// Floating copy of the dragged card, drawn disabled so it takes no input.
fn show_proxy(
    ctx: &egui::Context,
    colors: &ThemeColors,
    pos: Pos2,
    width: f32,
    section: &SectionRef,
    card: &mut impl SectionCard,
) {
    let spacing = ThemeSpacing::default();
    egui::Area::new(egui::Id::new("section_drag_proxy"))
        .order(Order::Tooltip)
        .fixed_pos(pos)
        .interactable(false)
        .show(ctx, |ui| {
            ui.set_opacity(PROXY_OPACITY);
            ui.add_enabled_ui(false, |ui| {
                egui::Frame::none()
                    .fill(colors.base.card)
                    .stroke(Stroke::new(1.0, colors.brand.drop_target))
                    .rounding(CARD_ROUNDING)
                    .inner_margin(spacing.lg)
                    .show(ui, |ui| {
                        ui.set_width((width - 2.0 * spacing.lg).max(0.0));
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("⠿").size(18.0).color(colors.text.muted));
                            card.header(ui, section);
                        });
                        ui.add_space(spacing.md);
                        card.body(ui, section);
                    });
            });
        });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn targets() -> Vec<(String, Rect)> {
        ["overview", "objectives", "tasks"]
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let top = i as f32 * 100.0;
                (
                    id.to_string(),
                    Rect::from_min_size(pos2(0.0, top), vec2(400.0, 90.0)),
                )
            })
            .collect()
    }

    #[test]
    fn test_drop_on_nearest_card() {
        let mut drag = DragController::new();
        drag.pick_up("tasks");
        let action = finish_drag(&mut drag, Some(pos2(200.0, 30.0)), &targets());
        assert_eq!(
            action,
            Some(DocumentAction::MoveSection {
                active: "tasks".to_string(),
                over: "overview".to_string(),
            })
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_on_itself_or_nowhere() {
        let mut drag = DragController::new();
        drag.pick_up("tasks");
        assert_eq!(finish_drag(&mut drag, Some(pos2(10.0, 260.0)), &targets()), None);
        assert!(!drag.is_dragging());

        drag.pick_up("tasks");
        assert_eq!(finish_drag(&mut drag, None, &targets()), None);
        assert!(!drag.is_dragging());
    }

    struct Titles(Vec<String>);

    impl SectionCard for Titles {
        fn header(&mut self, ui: &mut Ui, section: &SectionRef) {
            ui.label(&section.title);
        }

        fn body(&mut self, _ui: &mut Ui, section: &SectionRef) {
            self.0.push(section.id.clone());
        }
    }

    #[test]
    fn test_dragged_card_body_follows_pointer() {
        let sections = crate::document::Document::default().section_order;
        let colors = ThemeColors::light();
        let mut drag = DragController::new();
        drag.pick_up("tasks");
        let mut card = Titles(Vec::new());

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events: vec![egui::Event::PointerMoved(pos2(120.0, 80.0))],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let action = SortableList::new(&mut drag, &colors).show(ui, &sections, &mut card);
                assert_eq!(action, None);
            });
        });

        assert!(drag.is_dragging());
        assert_eq!(card.0.len(), sections.len() + 1);
        assert_eq!(card.0.last().map(String::as_str), Some("tasks"));
    }

    #[test]
    fn test_list_draws_every_section_in_order() {
        let sections = crate::document::Document::default().section_order;
        let colors = ThemeColors::light();
        let mut drag = DragController::new();
        let mut card = Titles(Vec::new());

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let action = SortableList::new(&mut drag, &colors).show(ui, &sections, &mut card);
                assert_eq!(action, None);
            });
        });

        let ids: Vec<String> = sections.iter().map(|s| s.id.clone()).collect();
        assert_eq!(card.0, ids);
    }
}
