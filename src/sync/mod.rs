//! Background synchronization with the hosted store.
//!
//! All network I/O runs on one worker thread. The UI sends [`SyncCommand`]s
//! and polls [`SyncEvent`]s each frame. Commands run strictly in order, so
//! two writes to the same row are never in flight together.

mod debounce;

pub use debounce::SaveDebouncer;

use crate::backend::{
    Activity, ActivityField, Backend, DocumentRow, NewActivity, Session, SessionCache,
};
use crate::config::BackendSettings;
use crate::document::Document;
use crate::error::{Error, Result, ResultExt};
use chrono::Utc;
use log::{debug, error, info, warn};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::JoinHandle;

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// Work for the sync thread.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncCommand {
    /// Authenticate and load the document and activities
    Load,
    /// Overwrite the stored document
    SaveDocument(Document),
    /// Create a blank activity
    InsertActivity,
    UpdateActivity {
        id: String,
        field: ActivityField,
        value: String,
    },
    DeleteActivity {
        id: String,
    },
    /// Stop the thread after the commands already queued
    Shutdown,
}

/// Progress of the startup load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Authenticated,
    /// An existing document was loaded
    DataLoaded,
    /// No document existed; the default one was stored
    DataCreated,
    Failed(String),
}

impl LoadPhase {
    /// Whether the document is ready to show and edit.
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadPhase::DataLoaded | LoadPhase::DataCreated)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadPhase::Failed(_))
    }
}

/// Results reported back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Phase(LoadPhase),
    /// Load finished. `created` is set when the default document was stored.
    Loaded {
        document: Document,
        activities: Vec<Activity>,
        created: bool,
    },
    Saved,
    ActivityInserted(Activity),
    ActivityUpdated {
        id: String,
        field: ActivityField,
        value: String,
    },
    ActivityDeleted {
        id: String,
    },
    /// A save or activity write failed; the local state was left as is
    WriteFailed(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Processing
// ─────────────────────────────────────────────────────────────────────────────

/// Account credentials used when no cached session is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl From<&BackendSettings> for Credentials {
    fn from(settings: &BackendSettings) -> Self {
        Self {
            email: settings.email.clone(),
            password: settings.password.clone(),
        }
    }
}

/// State owned by the sync thread.
pub struct SyncContext<B: Backend> {
    backend: B,
    credentials: Credentials,
    cache: SessionCache,
    session: Option<Session>,
}

impl<B: Backend> SyncContext<B> {
    pub fn new(backend: B, credentials: Credentials, cache: SessionCache) -> Self {
        Self {
            backend,
            credentials,
            cache,
            session: None,
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Run one command and collect the events it produces.
    pub fn handle(&mut self, command: SyncCommand) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        match command {
            SyncCommand::Load => {
                events.push(SyncEvent::Phase(LoadPhase::Loading));
                if let Err(e) = self.load(&mut events) {
                    error!("Loading the plan failed: {}", e);
                    events.push(SyncEvent::Phase(LoadPhase::Failed(e.to_string())));
                }
            }
            SyncCommand::SaveDocument(document) => {
                events.push(match self.save(&document) {
                    Ok(()) => SyncEvent::Saved,
                    Err(e) => {
                        warn!("Failed to save document: {}", e);
                        SyncEvent::WriteFailed(e.to_string())
                    }
                });
            }
            SyncCommand::InsertActivity => {
                let result = self.with_session(|backend, user_id| {
                    backend.insert_activity(&NewActivity::blank(user_id))
                });
                events.push(match result {
                    Ok(activity) => {
                        debug!("Inserted activity {}", activity.id);
                        SyncEvent::ActivityInserted(activity)
                    }
                    Err(e) => {
                        warn!("Failed to add activity: {}", e);
                        SyncEvent::WriteFailed(e.to_string())
                    }
                });
            }
            SyncCommand::UpdateActivity { id, field, value } => {
                let result =
                    self.with_session(|backend, _| backend.update_activity(&id, field, &value));
                events.push(match result {
                    Ok(()) => SyncEvent::ActivityUpdated { id, field, value },
                    Err(e) => {
                        warn!("Failed to update activity {}: {}", id, e);
                        SyncEvent::WriteFailed(e.to_string())
                    }
                });
            }
            SyncCommand::DeleteActivity { id } => {
                events.push(match self.with_session(|backend, _| backend.delete_activity(&id)) {
                    Ok(()) => SyncEvent::ActivityDeleted { id },
                    Err(e) => {
                        warn!("Failed to remove activity {}: {}", id, e);
                        SyncEvent::WriteFailed(e.to_string())
                    }
                });
            }
            SyncCommand::Shutdown => {}
        }
        events
    }

    /// Run a write with the current session.
    ///
    /// An expired session is renewed first. If the store still rejects the
    /// token, the session is renewed and the write retried once.
    fn with_session<T>(&mut self, mut op: impl FnMut(&mut B, &str) -> Result<T>) -> Result<T> {
        let mut session = self
            .session
            .clone()
            .ok_or_else(|| Error::Auth("not signed in".to_string()))?;
        if !session.is_valid_at(Utc::now()) {
            info!("Session expired, signing in again");
            session = self.renew_session()?;
        }
        match op(&mut self.backend, &session.user_id) {
            Err(Error::Auth(reason)) => {
                info!("Session rejected ({}), signing in again", reason);
                let session = self.renew_session()?;
                op(&mut self.backend, &session.user_id)
            }
            result => result,
        }
    }

    /// Drop the cached session and sign in with the configured credentials.
    fn renew_session(&mut self) -> Result<Session> {
        self.cache.clear().ok_or_warn("Failed to clear cached session");
        let session = self.sign_in()?;
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Cached session if still valid, otherwise a fresh sign-in.
    ///
    /// The flag is `true` when the session came from the cache.
    fn authenticate(&mut self) -> Result<(Session, bool)> {
        if let Some(session) = self.cache.load_valid(Utc::now()) {
            self.backend.restore_session(session.clone());
            return Ok((session, true));
        }
        Ok((self.sign_in()?, false))
    }

    fn sign_in(&mut self) -> Result<Session> {
        let session = self
            .backend
            .sign_in(&self.credentials.email, &self.credentials.password)?;
        self.cache
            .store(&session)
            .ok_or_warn("Failed to cache session");
        Ok(session)
    }

    fn load(&mut self, events: &mut Vec<SyncEvent>) -> Result<()> {
        let (mut session, restored) = self.authenticate()?;
        self.session = Some(session.clone());
        events.push(SyncEvent::Phase(LoadPhase::Authenticated));
        info!("Authenticated as {}", session.user_id);

        let mut fetched = self.backend.fetch_document(&session.user_id);
        if restored && matches!(fetched, Err(Error::Auth(_))) {
            info!("Cached session rejected, signing in again");
            session = self.renew_session()?;
            fetched = self.backend.fetch_document(&session.user_id);
        }

        let (document, created) = match fetched {
            Ok(row) => {
                let mut document = row.into_document();
                document.sanitize();
                (document, false)
            }
            Err(e) if e.is_not_found() => {
                info!("No stored plan yet, creating the default one");
                let document = Document::default();
                let row = DocumentRow::from_document(&session.user_id, &document, Utc::now());
                self.backend.upsert_document(&row)?;
                (document, true)
            }
            Err(e) => return Err(e),
        };

        let activities = self
            .backend
            .list_activities()
            .unwrap_or_warn_default(Vec::new(), "Failed to load activities");

        let phase = if created {
            LoadPhase::DataCreated
        } else {
            LoadPhase::DataLoaded
        };
        info!(
            "Plan ready ({:?}): {} sections, {} activities",
            phase,
            document.section_order.len(),
            activities.len()
        );
        events.push(SyncEvent::Loaded {
            document,
            activities,
            created,
        });
        events.push(SyncEvent::Phase(phase));
        Ok(())
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        self.with_session(|backend, user_id| {
            backend.upsert_document(&DocumentRow::from_document(user_id, document, Utc::now()))
        })?;
        debug!("Document saved");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Worker Thread
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to the sync thread.
pub struct SyncWorker {
    commands: Sender<SyncCommand>,
    events: Receiver<SyncEvent>,
    handle: Option<JoinHandle<()>>,
}

impl SyncWorker {
    /// Start the thread. `notify` is called after each batch of events,
    /// typically to request a repaint.
    pub fn spawn<B, F>(mut context: SyncContext<B>, notify: F) -> Result<Self>
    where
        B: Backend + 'static,
        F: Fn() + Send + 'static,
    {
        let (command_tx, command_rx) = channel::<SyncCommand>();
        let (event_tx, event_rx) = channel();

        let handle = std::thread::Builder::new()
            .name("pdi-sync".to_string())
            .spawn(move || {
                debug!("Sync thread started");
                for command in command_rx {
                    if command == SyncCommand::Shutdown {
                        break;
                    }
                    for event in context.handle(command) {
                        if event_tx.send(event).is_err() {
                            debug!("Event receiver dropped, stopping sync thread");
                            return;
                        }
                    }
                    notify();
                }
                debug!("Sync thread stopped");
            })?;

        Ok(Self {
            commands: command_tx,
            events: event_rx,
            handle: Some(handle),
        })
    }

    /// Queue a command. Returns `false` if the thread is gone.
    pub fn send(&self, command: SyncCommand) -> bool {
        match self.commands.send(command) {
            Ok(()) => true,
            Err(_) => {
                warn!("Sync thread unavailable, command dropped");
                false
            }
        }
    }

    /// Drain events without blocking.
    pub fn poll_events(&self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Let queued commands finish, then stop and join the thread.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.commands.send(SyncCommand::Shutdown);
            if handle.join().is_err() {
                error!("Sync thread panicked");
            }
            info!("Sync worker shut down");
        }
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::document::DocumentAction;
    use tempfile::TempDir;

    fn credentials() -> Credentials {
        Credentials {
            email: "pdi@localhost".to_string(),
            password: "secret".to_string(),
        }
    }

    fn context(backend: MemoryBackend) -> SyncContext<MemoryBackend> {
        SyncContext::new(backend, credentials(), SessionCache::disabled())
    }

    fn phases(events: &[SyncEvent]) -> Vec<LoadPhase> {
        events
            .iter()
            .filter_map(|e| match e {
                SyncEvent::Phase(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_load_creates_default_document() {
        let mut ctx = context(MemoryBackend::new());
        let events = ctx.handle(SyncCommand::Load);

        assert_eq!(
            phases(&events),
            vec![LoadPhase::Loading, LoadPhase::Authenticated, LoadPhase::DataCreated]
        );
        let stored = ctx.backend().documents.get(MemoryBackend::USER_ID).unwrap();
        assert_eq!(stored.clone().into_document(), Document::default());
        assert!(events.iter().any(|e| matches!(e, SyncEvent::Loaded { created: true, .. })));
    }

    #[test]
    fn test_existing_document_is_loaded() {
        let mut backend = MemoryBackend::new();
        let doc = Document::default().apply(DocumentAction::SetOverview("salvo".to_string()));
        backend.documents.insert(
            MemoryBackend::USER_ID.to_string(),
            DocumentRow::from_document(MemoryBackend::USER_ID, &doc, Utc::now()),
        );

        let mut ctx = context(backend);
        let events = ctx.handle(SyncCommand::Load);

        assert_eq!(phases(&events).last(), Some(&LoadPhase::DataLoaded));
        let loaded = events.iter().find_map(|e| match e {
            SyncEvent::Loaded { document, .. } => Some(document.clone()),
            _ => None,
        });
        assert_eq!(loaded, Some(doc));
        assert_eq!(ctx.backend().upsert_calls, 0);
    }

    #[test]
    fn test_rejected_sign_in_fails_load() {
        let mut backend = MemoryBackend::new();
        backend.reject_sign_in = true;
        let mut ctx = context(backend);
        let events = ctx.handle(SyncCommand::Load);

        let last = phases(&events).pop().unwrap();
        assert!(last.is_failed());
        assert!(!events.iter().any(|e| matches!(e, SyncEvent::Loaded { .. })));
    }

    #[test]
    fn test_backend_error_fails_load() {
        let mut backend = MemoryBackend::new();
        backend.fail_requests = true;
        let mut ctx = context(backend);
        let events = ctx.handle(SyncCommand::Load);
        assert!(phases(&events).pop().unwrap().is_failed());
    }

    #[test]
    fn test_cached_session_skips_sign_in() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::at(dir.path());
        cache
            .store(&Session::new("cached", MemoryBackend::USER_ID, 3600, Utc::now()))
            .unwrap();

        let mut ctx = SyncContext::new(MemoryBackend::new(), credentials(), cache);
        let events = ctx.handle(SyncCommand::Load);

        assert_eq!(ctx.backend().sign_in_calls, 0);
        assert_eq!(ctx.backend().session.as_ref().unwrap().access_token, "cached");
        assert_eq!(phases(&events).last(), Some(&LoadPhase::DataCreated));
    }

    #[test]
    fn test_sign_in_caches_session() {
        let dir = TempDir::new().unwrap();
        let mut ctx = SyncContext::new(
            MemoryBackend::new(),
            credentials(),
            SessionCache::at(dir.path()),
        );
        ctx.handle(SyncCommand::Load);
        assert_eq!(ctx.backend().sign_in_calls, 1);
        assert!(SessionCache::at(dir.path()).load_valid(Utc::now()).is_some());
    }

    #[test]
    fn test_rejected_cached_session_signs_in_again() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::at(dir.path());
        cache
            .store(&Session::new("stale", MemoryBackend::USER_ID, 3600, Utc::now()))
            .unwrap();
        let mut backend = MemoryBackend::new();
        backend.reject_token = Some("stale".to_string());

        let mut ctx = SyncContext::new(backend, credentials(), cache);
        let events = ctx.handle(SyncCommand::Load);

        assert_eq!(ctx.backend().sign_in_calls, 1);
        assert_eq!(phases(&events).last(), Some(&LoadPhase::DataCreated));
        let cached = SessionCache::at(dir.path()).load_valid(Utc::now()).unwrap();
        assert_eq!(cached.access_token, "token-1");
    }

    #[test]
    fn test_save_signs_in_again_when_session_rejected() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);
        // Server-side expiry: the store no longer knows the token
        ctx.backend_mut().session = None;

        for i in 0..3 {
            let doc = Document::default().apply(DocumentAction::SetOverview(format!("v{}", i)));
            assert_eq!(ctx.handle(SyncCommand::SaveDocument(doc)), vec![SyncEvent::Saved]);
        }
        assert_eq!(ctx.backend().sign_in_calls, 2);
        // One upsert from first load plus three saves
        assert_eq!(ctx.backend().upsert_calls, 4);
        let stored = ctx.backend().documents[MemoryBackend::USER_ID].clone();
        assert_eq!(stored.overview, "v2");
    }

    #[test]
    fn test_activity_write_signs_in_again_when_token_revoked() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);
        ctx.backend_mut().reject_token = Some("token-1".to_string());

        let events = ctx.handle(SyncCommand::InsertActivity);
        assert!(matches!(events.as_slice(), [SyncEvent::ActivityInserted(_)]));
        assert_eq!(ctx.backend().sign_in_calls, 2);
    }

    #[test]
    fn test_expired_session_is_renewed_before_write() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);
        if let Some(session) = ctx.session.as_mut() {
            session.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }

        let events = ctx.handle(SyncCommand::SaveDocument(Document::default()));
        assert_eq!(events, vec![SyncEvent::Saved]);
        assert_eq!(ctx.backend().sign_in_calls, 2);
        assert!(ctx.session.as_ref().unwrap().is_valid_at(Utc::now()));
    }

    #[test]
    fn test_failed_sign_in_during_write_is_reported() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);
        ctx.backend_mut().session = None;
        ctx.backend_mut().reject_sign_in = true;

        let events = ctx.handle(SyncCommand::SaveDocument(Document::default()));
        assert!(matches!(events.as_slice(), [SyncEvent::WriteFailed(_)]));
    }

    #[test]
    fn test_save_before_load_is_reported() {
        let mut ctx = context(MemoryBackend::new());
        let events = ctx.handle(SyncCommand::SaveDocument(Document::default()));
        assert!(matches!(events.as_slice(), [SyncEvent::WriteFailed(_)]));
        assert_eq!(ctx.backend().upsert_calls, 0);
    }

    #[test]
    fn test_save_overwrites_row() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);

        let doc = Document::default().apply(DocumentAction::SetMainObjective("novo".to_string()));
        let events = ctx.handle(SyncCommand::SaveDocument(doc.clone()));

        assert_eq!(events, vec![SyncEvent::Saved]);
        let stored = ctx.backend().documents[MemoryBackend::USER_ID].clone();
        assert_eq!(stored.into_document(), doc);
    }

    #[test]
    fn test_activity_crud() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);

        let events = ctx.handle(SyncCommand::InsertActivity);
        let SyncEvent::ActivityInserted(activity) = &events[0] else {
            panic!("expected insert, got {:?}", events);
        };
        assert_eq!(activity.user_id, MemoryBackend::USER_ID);
        assert_eq!(activity.activity, "");

        let events = ctx.handle(SyncCommand::UpdateActivity {
            id: activity.id.clone(),
            field: ActivityField::Deadline,
            value: "30 dias".to_string(),
        });
        assert!(matches!(events[0], SyncEvent::ActivityUpdated { .. }));
        assert_eq!(ctx.backend().activities[0].deadline.as_deref(), Some("30 dias"));

        let events = ctx.handle(SyncCommand::DeleteActivity {
            id: activity.id.clone(),
        });
        assert!(matches!(events[0], SyncEvent::ActivityDeleted { .. }));
        assert!(ctx.backend().activities.is_empty());
    }

    #[test]
    fn test_failed_activity_write_reports_failure() {
        let mut ctx = context(MemoryBackend::new());
        ctx.handle(SyncCommand::Load);
        ctx.backend_mut().fail_requests = true;

        let events = ctx.handle(SyncCommand::UpdateActivity {
            id: "missing".to_string(),
            field: ActivityField::Activity,
            value: "x".to_string(),
        });
        assert!(matches!(events.as_slice(), [SyncEvent::WriteFailed(_)]));
    }

    #[test]
    fn test_worker_processes_in_order_and_joins() {
        let ctx = context(MemoryBackend::new());
        let mut worker = SyncWorker::spawn(ctx, || {}).unwrap();

        assert!(worker.send(SyncCommand::Load));
        assert!(worker.send(SyncCommand::SaveDocument(Document::default())));
        worker.shutdown();

        let events = worker.poll_events();
        let ready = events
            .iter()
            .position(|e| *e == SyncEvent::Phase(LoadPhase::DataCreated))
            .unwrap();
        let saved = events.iter().position(|e| *e == SyncEvent::Saved).unwrap();
        assert!(ready < saved);

        // Thread is gone; sending fails quietly
        assert!(!worker.send(SyncCommand::Load));
    }
}
