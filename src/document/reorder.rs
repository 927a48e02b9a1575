//! Drag-to-reorder for the section list.
//!
//! The pointer handling lives in the UI; this module owns the gesture state
//! and the index arithmetic so both can be tested without a frame.

use super::DocumentAction;
use egui::{Pos2, Rect};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Index Arithmetic
// ─────────────────────────────────────────────────────────────────────────────

/// Remove the element at `from` and reinsert it at `to`.
///
/// Out-of-range indices leave the slice unchanged.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() || to >= out.len() || from == to {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

/// Move the element identified by `active` to the index held by `over`.
///
/// Unknown ids and `active == over` leave the order unchanged.
pub fn reorder<T, F>(items: &[T], active: &str, over: &str, id_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if active == over {
        return items.to_vec();
    }
    let from = items.iter().position(|item| id_of(item) == active);
    let to = items.iter().position(|item| id_of(item) == over);
    match (from, to) {
        (Some(from), Some(to)) => move_item(items, from, to),
        _ => {
            debug!("Reorder ignored: '{}' -> '{}' not both present", active, over);
            items.to_vec()
        }
    }
}

/// The drop target whose centre is nearest to `point`.
pub fn closest_center<'a>(point: Pos2, targets: &'a [(String, Rect)]) -> Option<&'a str> {
    targets
        .iter()
        .map(|(id, rect)| (id, rect.center().distance_sq(point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id.as_str())
}

// ─────────────────────────────────────────────────────────────────────────────
// Gesture State
// ─────────────────────────────────────────────────────────────────────────────

/// Where the drag gesture is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { active: String },
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Id of the section being dragged, if any.
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active } => Some(active),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging `id`.
    pub fn pick_up(&mut self, id: impl Into<String>) {
        let active = id.into();
        debug!("Drag started: {}", active);
        self.state = DragState::Dragging { active };
    }

    /// Finish the gesture over `over` (or over nothing).
    ///
    /// Always returns to `Idle`. Yields the move to apply when the drop lands
    /// on a different section.
    pub fn drop_on(&mut self, over: Option<&str>) -> Option<DocumentAction> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging { active } = state else {
            return None;
        };
        match over {
            Some(over) if over != active => {
                debug!("Drag ended: {} over {}", active, over);
                Some(DocumentAction::MoveSection {
                    active,
                    over: over.to_string(),
                })
            }
            _ => {
                debug!("Drag ended without a new position for {}", active);
                None
            }
        }
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
