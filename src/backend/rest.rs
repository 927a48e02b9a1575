//! HTTP client for a Supabase project (GoTrue auth + PostgREST tables).

use super::{
    Activity, ActivityField, Backend, DocumentRow, NewActivity, Session, ACTIVITY_TABLE,
    DOCUMENT_TABLE,
};
use crate::config::BackendSettings;
use crate::error::{Error, Result, NOT_FOUND_CODE};
use chrono::Utc;
use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// `Accept` value asking PostgREST for a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    // GoTrue spells its messages differently
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl ErrorBody {
    fn text(self, fallback: &str) -> String {
        self.message
            .or(self.error_description)
            .or(self.msg)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Blocking client bound to one project and, after sign-in, one session.
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    anon_key: String,
    session: Option<Session>,
}

impl SupabaseBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
            session: None,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Attach the project key and the session token.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| Error::Auth("not signed in".to_string()))?;
        Ok(request
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token))
    }

    /// Turn an error status into an `Error`, passing successful responses through.
    fn check(response: Response, table: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();

        if parsed.code.as_deref() == Some(NOT_FOUND_CODE) {
            return Err(Error::NotFound {
                table: table.to_string(),
            });
        }

        let reason = status.canonical_reason().unwrap_or("request failed");
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Auth(parsed.text(reason)));
        }

        let code = parsed.code.clone();
        Err(Error::Backend {
            status: status.as_u16(),
            code,
            message: parsed.text(reason),
        })
    }
}

impl Backend for SupabaseBackend {
    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().unwrap_or_default();
            return Err(Error::Auth(body.text(&status.to_string())));
        }

        let token: TokenResponse = response.json()?;
        let session = Session::new(token.access_token, token.user.id, token.expires_in, Utc::now());
        info!("Signed in as {}", session.user_id);
        self.session = Some(session.clone());
        Ok(session)
    }

    fn restore_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    fn fetch_document(&mut self, user_id: &str) -> Result<DocumentRow> {
        let request = self
            .client
            .get(self.table_url(DOCUMENT_TABLE))
            .query(&[("id", format!("eq.{}", user_id)), ("select", "*".to_string())])
            .header("Accept", SINGLE_OBJECT);
        let response = Self::check(self.authorized(request)?.send()?, DOCUMENT_TABLE)?;
        Ok(response.json()?)
    }

    fn upsert_document(&mut self, row: &DocumentRow) -> Result<()> {
        let request = self
            .client
            .post(self.table_url(DOCUMENT_TABLE))
            .header("Prefer", "resolution=merge-duplicates")
            .json(row);
        Self::check(self.authorized(request)?.send()?, DOCUMENT_TABLE)?;
        debug!("Upserted document row {}", row.id);
        Ok(())
    }

    fn list_activities(&mut self) -> Result<Vec<Activity>> {
        let request = self
            .client
            .get(self.table_url(ACTIVITY_TABLE))
            .query(&[("select", "*"), ("order", "created_at.asc")]);
        let response = Self::check(self.authorized(request)?.send()?, ACTIVITY_TABLE)?;
        Ok(response.json()?)
    }

    fn insert_activity(&mut self, activity: &NewActivity) -> Result<Activity> {
        let request = self
            .client
            .post(self.table_url(ACTIVITY_TABLE))
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(activity);
        let response = Self::check(self.authorized(request)?.send()?, ACTIVITY_TABLE)?;
        Ok(response.json()?)
    }

    fn update_activity(&mut self, id: &str, field: ActivityField, value: &str) -> Result<()> {
        let mut body = serde_json::Map::new();
        body.insert(field.column().to_string(), value.into());
        let request = self
            .client
            .patch(self.table_url(ACTIVITY_TABLE))
            .query(&[("id", format!("eq.{}", id))])
            .json(&body);
        Self::check(self.authorized(request)?.send()?, ACTIVITY_TABLE)?;
        Ok(())
    }

    fn delete_activity(&mut self, id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.table_url(ACTIVITY_TABLE))
            .query(&[("id", format!("eq.{}", id))]);
        Self::check(self.authorized(request)?.send()?, ACTIVITY_TABLE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_joins_without_double_slash() {
        let mut settings = BackendSettings::default();
        settings.url = "https://project.example/".to_string();
        let backend = SupabaseBackend::new(&settings).unwrap();
        assert_eq!(
            backend.table_url(DOCUMENT_TABLE),
            "https://project.example/rest/v1/pdi_data"
        );
    }

    #[test]
    fn test_requests_require_session() {
        let backend = SupabaseBackend::new(&BackendSettings::default()).unwrap();
        let request = backend.client.get("http://localhost/");
        assert!(matches!(backend.authorized(request), Err(Error::Auth(_))));
    }

    #[test]
    fn test_error_body_prefers_postgrest_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"PGRST116","message":"0 rows","details":null}"#)
                .unwrap();
        assert_eq!(body.code.as_deref(), Some(NOT_FOUND_CODE));
        assert_eq!(body.text("x"), "0 rows");
    }

    #[test]
    fn test_error_body_reads_gotrue_fields() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(body.text("x"), "Invalid login credentials");
        assert_eq!(ErrorBody::default().text("fallback"), "fallback");
    }
}
