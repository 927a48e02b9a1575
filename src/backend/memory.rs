//! In-memory store used by the sync tests.

use super::{
    Activity, ActivityField, Backend, DocumentRow, NewActivity, Session, ACTIVITY_TABLE,
    DOCUMENT_TABLE,
};
use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub documents: HashMap<String, DocumentRow>,
    pub activities: Vec<Activity>,
    pub session: Option<Session>,
    /// Reject every sign-in
    pub reject_sign_in: bool,
    /// Fail every call after sign-in with a backend error
    pub fail_requests: bool,
    /// Treat this access token as revoked
    pub reject_token: Option<String>,
    pub sign_in_calls: usize,
    pub upsert_calls: usize,
    next_id: u64,
}

impl MemoryBackend {
    pub const USER_ID: &'static str = "user-1";

    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<&Session> {
        if self.fail_requests {
            return Err(Error::Backend {
                status: 500,
                code: None,
                message: "unavailable".to_string(),
            });
        }
        match &self.session {
            None => Err(Error::Auth("not signed in".to_string())),
            Some(session) if self.reject_token.as_ref() == Some(&session.access_token) => {
                Err(Error::Auth("JWT expired".to_string()))
            }
            Some(session) => Ok(session),
        }
    }
}

impl Backend for MemoryBackend {
    fn sign_in(&mut self, _email: &str, _password: &str) -> Result<Session> {
        self.sign_in_calls += 1;
        if self.reject_sign_in {
            return Err(Error::Auth("Invalid login credentials".to_string()));
        }
        let token = format!("token-{}", self.sign_in_calls);
        let session = Session::new(token, Self::USER_ID, 3600, Utc::now());
        self.session = Some(session.clone());
        Ok(session)
    }

    fn restore_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    fn fetch_document(&mut self, user_id: &str) -> Result<DocumentRow> {
        self.guard()?;
        self.documents
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                table: DOCUMENT_TABLE.to_string(),
            })
    }

    fn upsert_document(&mut self, row: &DocumentRow) -> Result<()> {
        self.guard()?;
        self.upsert_calls += 1;
        self.documents.insert(row.id.clone(), row.clone());
        Ok(())
    }

    fn list_activities(&mut self) -> Result<Vec<Activity>> {
        self.guard()?;
        let mut rows = self.activities.clone();
        rows.sort_by_key(|a| a.created_at);
        Ok(rows)
    }

    fn insert_activity(&mut self, activity: &NewActivity) -> Result<Activity> {
        self.guard()?;
        self.next_id += 1;
        let now = Utc::now() + Duration::milliseconds(self.next_id as i64);
        let row = Activity {
            id: format!("act-{}", self.next_id),
            activity: activity.activity.clone(),
            description: activity.description.clone(),
            expected_result: activity.expected_result.clone(),
            deadline: None,
            observation: None,
            user_id: activity.user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.activities.push(row.clone());
        Ok(row)
    }

    fn update_activity(&mut self, id: &str, field: ActivityField, value: &str) -> Result<()> {
        self.guard()?;
        let row = self
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound {
                table: ACTIVITY_TABLE.to_string(),
            })?;
        row.set(field, value.to_string());
        Ok(())
    }

    fn delete_activity(&mut self, id: &str) -> Result<()> {
        self.guard()?;
        self.activities.retain(|a| a.id != id);
        Ok(())
    }
}
