//! Application state management for the PDI editor
//!
//! This module defines the central `AppState` struct: the loaded document,
//! the load lifecycle, the pending save timer, the activity rows, and the
//! session-only content and UI flags. Document mutations go through
//! [`AppState::dispatch`], which swaps in the new snapshot and restarts the
//! save timer.

use crate::backend::Activity;
use crate::config::{load_config, save_config_silent, Settings, ViewMode};
use crate::content::{SectionContent, TaskDraft};
use crate::document::reorder::DragController;
use crate::document::{Document, DocumentAction, SectionKind};
use crate::sync::{LoadPhase, SaveDebouncer, SyncCommand, SyncEvent};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// How long a toast stays visible, in seconds.
const TOAST_DURATION: f64 = 4.0;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// The rich-text dialog for a custom section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEditor {
    pub section_id: String,
    pub title: String,
    pub draft: String,
    pub mode: ViewMode,
}

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the notes window is open
    pub show_notes: bool,
    /// Title typed into the "add section" box
    pub new_section_title: String,
    /// Title typed into the "new note" box
    pub new_note_title: String,
    /// Open custom section editor
    pub section_editor: Option<SectionEditor>,
    /// Open "new task" form
    pub task_form: Option<TaskDraft>,
    /// Whether the task filters are shown
    pub show_task_filters: bool,
    /// Temporary toast message
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
}

/// Split borrows of the state the plan view draws from.
pub struct PlanParts<'a> {
    pub document: &'a Document,
    pub activities: &'a [Activity],
    pub content: &'a mut SectionContent,
    pub ui: &'a mut UiState,
    pub drag: &'a mut DragController,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
#[derive(Debug)]
pub struct AppState {
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
    /// Current document snapshot
    document: Document,
    /// Where the startup load is
    phase: LoadPhase,
    /// Pending document save
    debouncer: SaveDebouncer,
    /// Activity rows as confirmed by the store
    activities: Vec<Activity>,
    /// Section drag gesture
    pub drag: DragController,
    /// Session-only content of the built-in sections
    pub content: SectionContent,
    /// Result of the most recent write
    pub last_write_error: Option<String>,
}

impl AppState {
    /// Create a new AppState with settings loaded from config.
    pub fn new() -> Self {
        let settings = load_config();
        info!("AppState initialized with settings");
        debug!(
            "Theme: {:?}, save debounce: {} ms",
            settings.theme, settings.save_debounce_ms
        );
        Self::with_settings(settings)
    }

    /// Create AppState with custom settings (useful for testing).
    pub fn with_settings(settings: Settings) -> Self {
        let debouncer = SaveDebouncer::new(settings.save_debounce());
        Self {
            settings,
            ui: UiState::default(),
            settings_dirty: false,
            document: Document::default(),
            phase: LoadPhase::Loading,
            debouncer,
            activities: Vec::new(),
            drag: DragController::new(),
            content: SectionContent::default(),
            last_write_error: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document
    // ─────────────────────────────────────────────────────────────────────────

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    #[cfg(test)]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time left before the pending save is due.
    pub fn save_due_in(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    pub fn plan_parts(&mut self) -> PlanParts<'_> {
        PlanParts {
            document: &self.document,
            activities: &self.activities,
            content: &mut self.content,
            ui: &mut self.ui,
            drag: &mut self.drag,
        }
    }

    /// Apply a document action.
    ///
    /// Returns `true` if the document changed. Changes made after the load
    /// completed restart the save timer.
    pub fn dispatch(&mut self, action: DocumentAction, now: Instant) -> bool {
        let next = self.document.apply(action);
        if next == self.document {
            return false;
        }
        self.document = next;
        if self.phase.is_ready() {
            self.debouncer.schedule(now);
        } else {
            warn!("Document edited before load completed; not saving");
        }
        true
    }

    /// Add a custom section titled with the "add section" box.
    ///
    /// Clears the box on success.
    pub fn add_section_from_input(&mut self, now: Instant) -> bool {
        let title = self.ui.new_section_title.clone();
        let added = self.dispatch(
            DocumentAction::AddSection {
                id: self
                    .document
                    .unused_custom_section_id(chrono::Utc::now().timestamp_millis()),
                title,
            },
            now,
        );
        if added {
            self.ui.new_section_title.clear();
        }
        added
    }

    /// The document to write, once the quiet period has elapsed.
    pub fn take_due_save(&mut self, now: Instant) -> Option<Document> {
        self.debouncer
            .poll(now)
            .then(|| self.document.clone())
    }

    /// The document to write immediately, if a save is pending.
    pub fn flush_pending_save(&mut self) -> Option<Document> {
        self.debouncer.flush().then(|| self.document.clone())
    }

    /// Start (or restart) the load lifecycle.
    pub fn begin_load(&mut self) -> SyncCommand {
        self.phase = LoadPhase::Loading;
        self.debouncer.cancel();
        SyncCommand::Load
    }

    /// Apply an event from the sync worker.
    ///
    /// `now_secs` is the frame time, used for toasts.
    pub fn apply_event(&mut self, event: SyncEvent, now_secs: f64) {
        match event {
            SyncEvent::Phase(phase) => {
                debug!("Load phase: {:?}", phase);
                self.phase = phase;
            }
            SyncEvent::Loaded {
                document,
                activities,
                created,
            } => {
                self.document = document;
                self.activities = activities;
                self.debouncer.cancel();
                if created {
                    self.show_toast("Plano criado", now_secs);
                }
            }
            SyncEvent::Saved => {
                self.last_write_error = None;
            }
            SyncEvent::ActivityInserted(activity) => {
                self.activities.push(activity);
            }
            SyncEvent::ActivityUpdated { id, field, value } => {
                if let Some(activity) = self.activities.iter_mut().find(|a| a.id == id) {
                    activity.set(field, value);
                }
            }
            SyncEvent::ActivityDeleted { id } => {
                self.activities.retain(|a| a.id != id);
            }
            SyncEvent::WriteFailed(message) => {
                self.show_toast("Falha ao salvar alterações", now_secs);
                self.last_write_error = Some(message);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Custom Section Editor
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the rich-text editor for a custom section.
    pub fn open_section_editor(&mut self, section_id: &str) {
        let Some(section) = self.document.section(section_id) else {
            return;
        };
        if section.kind != SectionKind::Custom {
            return;
        }
        self.ui.section_editor = Some(SectionEditor {
            section_id: section.id.clone(),
            title: section.title.clone(),
            draft: self
                .document
                .custom_content(section_id)
                .unwrap_or_default()
                .to_string(),
            mode: self.settings.rich_text_mode,
        });
    }

    /// Close the editor, keeping its draft when it is not blank.
    pub fn save_section_editor(&mut self, now: Instant) -> bool {
        let Some(editor) = self.ui.section_editor.take() else {
            return false;
        };
        if editor.draft.trim().is_empty() {
            debug!("Discarding blank content for {}", editor.section_id);
            return false;
        }
        self.dispatch(
            DocumentAction::SetCustomContent {
                id: editor.section_id,
                content: editor.draft,
            },
            now,
        )
    }

    pub fn cancel_section_editor(&mut self) {
        self.ui.section_editor = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.debouncer.set_delay(self.settings.save_debounce());
        self.settings_dirty = true;
    }

    /// Save settings to config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Prepare state for application shutdown.
    pub fn shutdown(&mut self) {
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_notes(&mut self) {
        self.ui.show_notes = !self.ui.show_notes;
    }

    /// Show a temporary toast message.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + TOAST_DURATION);
    }

    /// Clear expired toasts. Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
