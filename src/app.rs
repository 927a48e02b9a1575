//! Main application module for the PDI editor
//!
//! This module contains the eframe App implementation: it owns the state,
//! the theme manager and the sync worker, draws the plan each frame, and
//! turns view actions into document changes and store writes.

use crate::backend::{SessionCache, SupabaseBackend};
use crate::config::{Settings, WindowSize};
use crate::error::Result;
use crate::state::AppState;
use crate::sync::{Credentials, LoadPhase, SyncCommand, SyncContext, SyncEvent, SyncWorker};
use crate::theme::{ThemeColors, ThemeManager, ThemeSpacing};
use crate::ui::{
    show_add_section, show_footer, show_header, show_load_status, show_notes_window,
    show_section_editor, HeaderAction, SaveStatus, SectionEditorOutput, SectionView,
    SortableList, ViewAction,
};
use eframe::egui;
use log::{debug, info, warn};
use std::time::Instant;

/// Widest the plan column grows on large windows.
const MAX_CONTENT_WIDTH: f32 = 1100.0;

/// Main application struct.
pub struct PdiApp {
    /// Central application state
    state: AppState,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// Background sync thread, if it could be started
    worker: Option<SyncWorker>,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Application start time for timing toast messages
    start_time: Instant,
}

/// Start the sync thread against the configured store.
fn spawn_worker(ctx: &egui::Context, settings: &Settings) -> Result<SyncWorker> {
    let backend = SupabaseBackend::new(&settings.backend)?;
    let context = SyncContext::new(
        backend,
        Credentials::from(&settings.backend),
        SessionCache::in_config_dir(),
    );
    let ctx = ctx.clone();
    SyncWorker::spawn(context, move || ctx.request_repaint())
}

/// Scale egui's text styles to the configured body size.
fn apply_font_size(ctx: &egui::Context, size: f32) {
    use egui::{FontFamily, FontId, TextStyle};

    ctx.style_mut(|style| {
        style.text_styles = [
            (TextStyle::Heading, FontId::new(size + 6.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(size, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(size, FontFamily::Monospace)),
            (TextStyle::Button, FontId::new(size, FontFamily::Proportional)),
            (TextStyle::Small, FontId::new(size * 0.75, FontFamily::Proportional)),
        ]
        .into();
    });
}

impl PdiApp {
    /// Create a new PdiApp instance.
    ///
    /// Loads settings, applies the saved theme and starts loading the plan.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing PDI editor");

        let state = AppState::new();
        let mut theme_manager = ThemeManager::new(state.settings.theme);
        theme_manager.apply_if_needed(&cc.egui_ctx);
        apply_font_size(&cc.egui_ctx, state.settings.font_size);

        let mut app = Self {
            state,
            theme_manager,
            worker: None,
            last_window_size: None,
            last_window_pos: None,
            start_time: Instant::now(),
        };
        app.start_load(&cc.egui_ctx);
        app
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Send a command to the worker. Returns `false` if there is none.
    fn send(&self, command: SyncCommand) -> bool {
        match &self.worker {
            Some(worker) => worker.send(command),
            None => {
                warn!("No sync worker; dropping {:?}", command);
                false
            }
        }
    }

    /// (Re)start the load lifecycle, starting the worker first if needed.
    fn start_load(&mut self, ctx: &egui::Context) {
        let command = self.state.begin_load();
        if self.worker.is_none() {
            match spawn_worker(ctx, &self.state.settings) {
                Ok(worker) => self.worker = Some(worker),
                Err(e) => warn!("Failed to start sync worker: {}", e),
            }
        }
        if !self.send(command) {
            let time = self.get_app_time();
            self.state.apply_event(
                SyncEvent::Phase(LoadPhase::Failed(
                    "Não foi possível iniciar a sincronização".to_string(),
                )),
                time,
            );
        }
    }

    /// Apply everything the worker reported since the last frame.
    fn poll_sync_events(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        let events = worker.poll_events();
        let time = self.get_app_time();
        for event in events {
            self.state.apply_event(event, time);
        }
    }

    /// Write the document once its quiet period is over, and wake up again
    /// when the pending one is due.
    fn send_due_save(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(document) = self.state.take_due_save(now) {
            debug!("Debounced save due");
            self.send(SyncCommand::SaveDocument(document));
        }
        if let Some(remaining) = self.state.save_due_in(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn save_status(&self) -> SaveStatus {
        if !self.state.phase().is_ready() {
            SaveStatus::Idle
        } else if let Some(error) = &self.state.last_write_error {
            SaveStatus::Failed(error.clone())
        } else if self.state.has_pending_save() {
            SaveStatus::Pending
        } else {
            SaveStatus::Saved
        }
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let Some(rect) = ctx.input(|i| i.viewport().outer_rect) else {
            return false;
        };
        let size = rect.size();
        let pos = rect.min;

        let size_changed = self
            .last_window_size
            .map(|s| (s - size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = self
            .last_window_pos
            .map(|p| (p - pos).length() > 1.0)
            .unwrap_or(true);
        if !size_changed && !pos_changed {
            return false;
        }

        self.last_window_size = Some(size);
        self.last_window_pos = Some(pos);
        let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));
        self.state.update_settings(|s| {
            s.window_size = WindowSize {
                width: size.x,
                height: size.y,
                x: Some(pos.x),
                y: Some(pos.y),
                maximized,
            }
        });
        debug!(
            "Window state updated: {}x{} at ({}, {}), maximized: {}",
            size.x, size.y, pos.x, pos.y, maximized
        );
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_header_action(&mut self, action: HeaderAction) {
        match action {
            HeaderAction::ToggleNotes => self.state.toggle_notes(),
            HeaderAction::CycleTheme => {
                let theme = self.theme_manager.cycle();
                self.state.update_settings(|s| s.theme = theme);
                info!("Theme cycled to: {:?}", theme);
            }
        }
    }

    fn handle_view_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::Document(action) => {
                self.state.dispatch(action, Instant::now());
            }
            ViewAction::Sync(command) => {
                if !self.send(command) {
                    let time = self.get_app_time();
                    self.state.show_toast("Sincronização indisponível", time);
                }
            }
            ViewAction::EditSection(id) => self.state.open_section_editor(&id),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the main UI content.
    fn render_ui(&mut self, ctx: &egui::Context) {
        let colors = self.theme_manager.colors(ctx);
        let spacing = ThemeSpacing::default();

        let header_action = egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                show_header(
                    ui,
                    &colors,
                    self.theme_manager.current_theme().icon(),
                    self.theme_manager.tooltip(),
                    self.state.ui.show_notes,
                )
            })
            .inner;
        if let Some(action) = header_action {
            self.handle_header_action(action);
        }

        let status = self.save_status();
        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(spacing.lg, spacing.sm)),
            )
            .show(ctx, |ui| {
                show_footer(ui, &colors, self.state.ui.toast_message.as_deref(), &status);
            });

        let mut retry = false;
        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.phase().is_ready() {
                retry = show_load_status(ui, self.state.phase(), &colors);
                return;
            }
            actions = self.render_plan(ui, &colors);
        });

        if retry {
            info!("Retrying load");
            self.start_load(ctx);
        }
        for action in actions {
            self.handle_view_action(action);
        }

        self.render_dialogs(ctx, &colors);
    }

    /// Draw the section list and the "add section" box.
    fn render_plan(&mut self, ui: &mut egui::Ui, colors: &ThemeColors) -> Vec<ViewAction> {
        let spacing = ThemeSpacing::default();
        let font_size = self.state.settings.font_size;
        let mut add_section = false;

        let actions = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let width = ui.available_width().min(MAX_CONTENT_WIDTH);
                let margin = ((ui.available_width() - width) / 2.0).max(0.0);

                ui.horizontal(|ui| {
                    ui.add_space(margin);
                    ui.vertical(|ui| {
                        ui.set_width(width);
                        ui.add_space(spacing.lg);

                        let parts = self.state.plan_parts();
                        let sections = parts.document.section_order.clone();
                        let mut view = SectionView {
                            document: parts.document,
                            activities: parts.activities,
                            content: parts.content,
                            ui_state: parts.ui,
                            colors,
                            font_size,
                            actions: Vec::new(),
                        };
                        let reorder = SortableList::new(parts.drag, colors).show(ui, &sections, &mut view);

                        add_section =
                            show_add_section(ui, &mut view.ui_state.new_section_title, colors);
                        ui.add_space(spacing.lg);

                        let mut actions = view.actions;
                        if let Some(action) = reorder {
                            actions.push(ViewAction::Document(action));
                        }
                        actions
                    })
                    .inner
                })
                .inner
            })
            .inner;

        if add_section {
            self.state.add_section_from_input(Instant::now());
        }
        actions
    }

    /// Render modal windows (section editor, notes).
    fn render_dialogs(&mut self, ctx: &egui::Context, colors: &ThemeColors) {
        let font_size = self.state.settings.font_size;
        if let Some(editor) = self.state.ui.section_editor.as_mut() {
            match show_section_editor(ctx, editor, colors, font_size) {
                SectionEditorOutput::Open => {}
                SectionEditorOutput::Save => {
                    self.state.save_section_editor(Instant::now());
                }
                SectionEditorOutput::Cancel => self.state.cancel_section_editor(),
            }
        }

        let default_mode = self.state.settings.rich_text_mode;
        let ui_state = &mut self.state.ui;
        show_notes_window(
            ctx,
            &mut ui_state.show_notes,
            &mut self.state.content.notes,
            &mut ui_state.new_note_title,
            default_mode,
            colors,
        );
    }
}

impl eframe::App for PdiApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme if needed (handles System theme changes)
        self.theme_manager.apply_if_needed(ctx);

        self.poll_sync_events();

        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);
        if let Some(expires_at) = self.state.ui.toast_expires_at {
            let remaining = (expires_at - current_time).max(0.0);
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(remaining));
        }

        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        self.render_ui(ctx);

        self.send_due_save(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        if let Some(document) = self.state.flush_pending_save() {
            info!("Flushing pending save");
            self.send(SyncCommand::SaveDocument(document));
        }
        if let Some(worker) = self.worker.as_mut() {
            worker.shutdown();
        }
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}
