//! Hosted store access.
//!
//! The plan lives in two tables of a PostgREST service: `pdi_data` holds one
//! document row per account, `pdi_activities` holds the activity rows. The
//! [`Backend`] trait is the seam between the sync worker and the transport;
//! [`SupabaseBackend`] talks HTTP, tests use an in-memory double.

#[cfg(test)]
pub mod memory;
mod rest;
mod session;

pub use rest::SupabaseBackend;
pub use session::{Session, SessionCache};

use crate::document::{Document, SectionRef};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Table holding the plan document.
pub const DOCUMENT_TABLE: &str = "pdi_data";
/// Table holding the activity rows.
pub const ACTIVITY_TABLE: &str = "pdi_activities";

// ─────────────────────────────────────────────────────────────────────────────
// Rows
// ─────────────────────────────────────────────────────────────────────────────

/// A `pdi_data` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    /// Account id
    pub id: String,
    pub overview: String,
    pub main_objective: String,
    pub section_order: Vec<SectionRef>,
    pub custom_sections: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentRow {
    /// The row written for `document` on behalf of `user_id`.
    pub fn from_document(user_id: &str, document: &Document, now: DateTime<Utc>) -> Self {
        Self {
            id: user_id.to_string(),
            overview: document.overview.clone(),
            main_objective: document.main_objective.clone(),
            section_order: document.section_order.clone(),
            custom_sections: document.custom_sections.clone(),
            updated_at: Some(now),
        }
    }

    pub fn into_document(self) -> Document {
        Document {
            overview: self.overview,
            main_objective: self.main_objective,
            section_order: self.section_order,
            custom_sections: self.custom_sections,
        }
    }
}

/// A `pdi_activities` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub activity: String,
    pub description: String,
    pub expected_result: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub observation: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    /// Current text of `field`; missing optional values read as empty.
    pub fn value(&self, field: ActivityField) -> &str {
        match field {
            ActivityField::Activity => &self.activity,
            ActivityField::Description => &self.description,
            ActivityField::ExpectedResult => &self.expected_result,
            ActivityField::Deadline => self.deadline.as_deref().unwrap_or(""),
            ActivityField::Observation => self.observation.as_deref().unwrap_or(""),
        }
    }

    pub fn set(&mut self, field: ActivityField, value: String) {
        match field {
            ActivityField::Activity => self.activity = value,
            ActivityField::Description => self.description = value,
            ActivityField::ExpectedResult => self.expected_result = value,
            ActivityField::Deadline => self.deadline = Some(value),
            ActivityField::Observation => self.observation = Some(value),
        }
    }
}

/// Insert payload for a blank activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivity {
    pub activity: String,
    pub description: String,
    pub expected_result: String,
    pub user_id: String,
}

impl NewActivity {
    pub fn blank(user_id: &str) -> Self {
        Self {
            activity: String::new(),
            description: String::new(),
            expected_result: String::new(),
            user_id: user_id.to_string(),
        }
    }
}

/// Editable columns of an activity row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityField {
    Activity,
    Description,
    ExpectedResult,
    Deadline,
    Observation,
}

impl ActivityField {
    /// Display order of the activity table.
    pub const ALL: [ActivityField; 5] = [
        ActivityField::Activity,
        ActivityField::Description,
        ActivityField::ExpectedResult,
        ActivityField::Deadline,
        ActivityField::Observation,
    ];

    /// Column name in `pdi_activities`.
    pub fn column(&self) -> &'static str {
        match self {
            ActivityField::Activity => "activity",
            ActivityField::Description => "description",
            ActivityField::ExpectedResult => "expected_result",
            ActivityField::Deadline => "deadline",
            ActivityField::Observation => "observation",
        }
    }

    /// The deadline is a short single-line value; the rest are prose.
    pub fn is_multiline(&self) -> bool {
        !matches!(self, ActivityField::Deadline)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Operations the sync worker needs from the store.
///
/// Implementations are owned by the worker thread, hence `Send`.
pub trait Backend: Send {
    /// Sign in with email and password. The returned session is also
    /// installed for subsequent requests.
    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session>;

    /// Install a previously obtained session.
    fn restore_session(&mut self, session: Session);

    /// Fetch the document row of `user_id`.
    ///
    /// A missing row is `Error::NotFound`.
    fn fetch_document(&mut self, user_id: &str) -> Result<DocumentRow>;

    /// Insert or overwrite the document row.
    fn upsert_document(&mut self, row: &DocumentRow) -> Result<()>;

    /// All activities, oldest first.
    fn list_activities(&mut self) -> Result<Vec<Activity>>;

    /// Insert a row and return it as stored.
    fn insert_activity(&mut self, activity: &NewActivity) -> Result<Activity>;

    /// Set a single column of one activity.
    fn update_activity(&mut self, id: &str, field: ActivityField, value: &str) -> Result<()>;

    fn delete_activity(&mut self, id: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
