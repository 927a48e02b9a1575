//! The plan document: overview text, main objective, section order and the
//! contents of user-created sections.
//!
//! The document is the unit of persistence. It is replaced wholesale on every
//! save, so every mutation goes through [`Document::apply`], which returns a
//! fresh snapshot and leaves the original untouched.

mod defaults;
pub mod reorder;

pub use defaults::{DEFAULT_MAIN_OBJECTIVE, DEFAULT_OVERVIEW, PLACEHOLDER_CONTENT};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Prefix of every user-created section id.
pub const CUSTOM_ID_PREFIX: &str = "custom-";

// ─────────────────────────────────────────────────────────────────────────────
// Section Types
// ─────────────────────────────────────────────────────────────────────────────

/// The closed set of section variants a document can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Overview,
    Objectives,
    ActionPlan,
    Activities,
    Metrics,
    Monitoring,
    Tasks,
    Custom,
}

impl SectionKind {
    /// Every built-in variant, in default document order.
    pub const FIXED: [SectionKind; 7] = [
        SectionKind::Overview,
        SectionKind::Objectives,
        SectionKind::ActionPlan,
        SectionKind::Activities,
        SectionKind::Metrics,
        SectionKind::Monitoring,
        SectionKind::Tasks,
    ];

    /// Stable id used for the built-in section of this kind.
    ///
    /// Returns `None` for `Custom`, whose ids are generated.
    pub fn fixed_id(&self) -> Option<&'static str> {
        match self {
            SectionKind::Overview => Some("overview"),
            SectionKind::Objectives => Some("objectives"),
            SectionKind::ActionPlan => Some("actionPlan"),
            SectionKind::Activities => Some("activities"),
            SectionKind::Metrics => Some("metrics"),
            SectionKind::Monitoring => Some("monitoring"),
            SectionKind::Tasks => Some("tasks"),
            SectionKind::Custom => None,
        }
    }

    /// Default heading for the built-in section of this kind.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::Overview => "Visão Geral",
            SectionKind::Objectives => "Objetivos",
            SectionKind::ActionPlan => "Plano de Ação",
            SectionKind::Activities => "Resumo do Plano de Ação",
            SectionKind::Metrics => "Metas e Indicadores",
            SectionKind::Monitoring => "Acompanhamento e Revisão",
            SectionKind::Tasks => "Gerenciamento de Tarefas",
            SectionKind::Custom => "Nova Seção",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SectionKind::Custom)
    }
}

/// One entry of the section order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub removable: bool,
}

impl SectionRef {
    /// The built-in section of `kind`. Only the overview is pinned.
    pub fn fixed(kind: SectionKind) -> Self {
        Self {
            id: kind.fixed_id().unwrap_or_default().to_string(),
            title: kind.default_title().to_string(),
            kind,
            removable: kind != SectionKind::Overview,
        }
    }

    /// A user-created section.
    pub fn custom(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: SectionKind::Custom,
            removable: true,
        }
    }
}

/// Generate the id of a custom section created at `now_millis` (unix time).
pub fn custom_section_id(now_millis: i64) -> String {
    format!("{}{}", CUSTOM_ID_PREFIX, now_millis)
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Every mutation the document supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAction {
    SetOverview(String),
    SetMainObjective(String),
    /// Append a custom section. The title is trimmed; blank titles are rejected.
    AddSection { id: String, title: String },
    /// Remove a removable section and its custom content.
    RemoveSection { id: String },
    /// Replace the text of a custom section.
    SetCustomContent { id: String, content: String },
    /// Move the section `active` to the position currently held by `over`.
    MoveSection { active: String, over: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The complete saved state of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub overview: String,
    pub main_objective: String,
    pub section_order: Vec<SectionRef>,
    pub custom_sections: BTreeMap<String, String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            overview: DEFAULT_OVERVIEW.to_string(),
            main_objective: DEFAULT_MAIN_OBJECTIVE.to_string(),
            section_order: SectionKind::FIXED
                .iter()
                .map(|kind| SectionRef::fixed(*kind))
                .collect(),
            custom_sections: BTreeMap::new(),
        }
    }
}

impl Document {
    /// Id for a custom section created at `now_millis`, bumped past any id
    /// already in use.
    pub fn unused_custom_section_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        while self.section(&custom_section_id(candidate)).is_some()
            || self.custom_sections.contains_key(&custom_section_id(candidate))
        {
            candidate += 1;
        }
        custom_section_id(candidate)
    }

    /// Find a section by id.
    pub fn section(&self, id: &str) -> Option<&SectionRef> {
        self.section_order.iter().find(|s| s.id == id)
    }

    /// Position of a section in the order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.section_order.iter().position(|s| s.id == id)
    }

    /// Text of a custom section.
    pub fn custom_content(&self, id: &str) -> Option<&str> {
        self.custom_sections.get(id).map(String::as_str)
    }

    #[cfg(test)]
    pub fn section_ids(&self) -> Vec<String> {
        self.section_order.iter().map(|s| s.id.clone()).collect()
    }

    /// Apply `action` and return the resulting snapshot.
    ///
    /// Actions that do not apply (unknown ids, pinned sections, blank titles)
    /// return an unchanged copy, so callers can compare with `==` to decide
    /// whether a save is needed.
    pub fn apply(&self, action: DocumentAction) -> Document {
        let mut next = self.clone();
        match action {
            DocumentAction::SetOverview(text) => next.overview = text,
            DocumentAction::SetMainObjective(text) => next.main_objective = text,
            DocumentAction::AddSection { id, title } => {
                let title = title.trim();
                if title.is_empty() {
                    debug!("Ignoring section with a blank title");
                } else if next.section(&id).is_some() {
                    warn!("Section id '{}' already exists, not adding", id);
                } else {
                    next.section_order.push(SectionRef::custom(id.clone(), title));
                    next.custom_sections
                        .insert(id, PLACEHOLDER_CONTENT.to_string());
                }
            }
            DocumentAction::RemoveSection { id } => match next.position(&id) {
                Some(index) if next.section_order[index].removable => {
                    next.section_order.remove(index);
                    next.custom_sections.remove(&id);
                }
                Some(_) => debug!("Section '{}' is not removable", id),
                None => debug!("No section '{}' to remove", id),
            },
            DocumentAction::SetCustomContent { id, content } => {
                if let Some(slot) = next.custom_sections.get_mut(&id) {
                    *slot = content;
                } else {
                    debug!("No custom section '{}' to edit", id);
                }
            }
            DocumentAction::MoveSection { active, over } => {
                next.section_order = reorder::reorder(&next.section_order, &active, &over, |s| {
                    s.id.as_str()
                });
            }
        }
        next
    }

    /// Repair a document that breaks the structural rules.
    ///
    /// Duplicate ids are dropped (first occurrence wins), the overview is
    /// pinned, and `custom_sections` is reconciled with the custom entries of
    /// the order. Returns `true` if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let before = self.clone();

        let mut seen = HashSet::new();
        self.section_order.retain(|s| seen.insert(s.id.clone()));

        for section in &mut self.section_order {
            if section.kind == SectionKind::Overview {
                section.removable = false;
            }
        }

        let custom_ids: HashSet<&str> = self
            .section_order
            .iter()
            .filter(|s| s.kind.is_custom())
            .map(|s| s.id.as_str())
            .collect();

        self.custom_sections
            .retain(|id, _| custom_ids.contains(id.as_str()));
        for id in custom_ids {
            self.custom_sections
                .entry(id.to_string())
                .or_insert_with(|| PLACEHOLDER_CONTENT.to_string());
        }

        let changed = *self != before;
        if changed {
            warn!("Loaded document was inconsistent and has been repaired");
        }
        changed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
