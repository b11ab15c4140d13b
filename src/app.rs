//! VESTAL window: the egui/eframe application.
//!
//! # Architecture
//!
//! [`VestalApp`] is the top-level [`eframe::App`].  It owns the editable
//! text, the reading preferences, the active [`ReadingSession`] (if any) and
//! two channel endpoints to the search worker:
//!
//! * `search_tx` — sends [`SearchCommand`]s.
//! * `search_rx` — receives [`SearchResult`]s.
//!
//! # Views
//!
//! | View | Contents |
//! |------|----------|
//! | `Setup` | search box + language, text editor, rate / chunk / font sliders, start button |
//! | `Reading` | fitted chunk display, rate / chunk / font / position sliders, play-pause, stop |
//!
//! Keyboard in the reading view: Space toggles, Escape stops, Left/Right
//! step one chunk.

use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::{AppConfig, Language};
use crate::reader::{
    ChunkSize, FontFit, FontSize, MeasureSurface, PacerState, ReadingSession, SessionReport, Wpm,
};
use crate::source::{read_clipboard_text, SearchCommand, SearchResult};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
const ERROR: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
const DIM: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
const CHUNK_COLOR: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);

// ---------------------------------------------------------------------------
// AppView
// ---------------------------------------------------------------------------

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Setup,
    Reading,
}

/// Reading shortcuts pressed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ReadingKeys {
    toggle: bool,
    stop: bool,
    back: bool,
    forward: bool,
}

// ---------------------------------------------------------------------------
// EguiSurface
// ---------------------------------------------------------------------------

/// Measures chunk text with egui's font system.
struct EguiSurface<'a> {
    ctx: &'a egui::Context,
    container_width: f32,
}

impl MeasureSurface for EguiSurface<'_> {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(
                    text.to_owned(),
                    egui::FontId::proportional(font_size),
                    CHUNK_COLOR,
                )
                .size()
                .x
        })
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }
}

// ---------------------------------------------------------------------------
// VestalApp
// ---------------------------------------------------------------------------

/// eframe application with a setup screen and a reading screen.
pub struct VestalApp {
    // ── View state ───────────────────────────────────────────────────────
    view: AppView,
    /// Text being edited / read.
    text: String,
    /// Running session while in the reading view.
    session: Option<ReadingSession>,
    /// Cached font-fit pass for the chunk display.
    font_fit: FontFit,
    /// Summary of the last stopped session, shown on the setup screen.
    last_report: Option<SessionReport>,

    // ── Search ───────────────────────────────────────────────────────────
    search_query: String,
    is_loading: bool,
    /// Last fetch or clipboard error, shown under the search box.
    error_message: Option<String>,

    // ── Runtime / channels ───────────────────────────────────────────────
    runtime: Handle,
    search_tx: mpsc::Sender<SearchCommand>,
    search_rx: mpsc::Receiver<SearchResult>,

    // ── Configuration ────────────────────────────────────────────────────
    /// Preferences; the reading section tracks the sliders and is saved on
    /// exit.
    config: AppConfig,
}

impl VestalApp {
    /// Create the app.
    ///
    /// * `runtime`   — tokio handle used for tick timers.
    /// * `search_tx` — sender end of the search command channel.
    /// * `search_rx` — receiver end of the search result channel.
    /// * `config`    — loaded configuration.
    pub fn new(
        runtime: Handle,
        search_tx: mpsc::Sender<SearchCommand>,
        search_rx: mpsc::Receiver<SearchResult>,
        config: AppConfig,
    ) -> Self {
        Self {
            view: AppView::Setup,
            text: config.ui.initial_text.clone(),
            session: None,
            font_fit: FontFit::new(),
            last_report: None,
            search_query: String::new(),
            is_loading: false,
            error_message: None,
            runtime,
            search_tx,
            search_rx,
            config,
        }
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain finished searches (non-blocking).
    fn poll_search(&mut self) {
        while let Ok(result) = self.search_rx.try_recv() {
            self.is_loading = false;
            match result {
                SearchResult::Loaded { text, .. } => {
                    self.text = text;
                    self.error_message = None;
                }
                SearchResult::Failed { message } => {
                    self.error_message = Some(message);
                }
            }
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    fn submit_search(&mut self) {
        if self.is_loading {
            return;
        }
        let Some(command) = SearchCommand::fetch(&self.search_query, self.config.search.language)
        else {
            return;
        };

        match self.search_tx.try_send(command) {
            Ok(()) => {
                self.is_loading = true;
                self.error_message = None;
            }
            Err(e) => {
                log::warn!("search worker unavailable: {e}");
                self.error_message = Some("Search is unavailable right now.".into());
            }
        }
    }

    fn paste_clipboard(&mut self) {
        match read_clipboard_text() {
            Ok(text) => {
                self.text = text;
                self.error_message = None;
            }
            Err(e) => {
                log::warn!("clipboard: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn start_reading(&mut self, ctx: &egui::Context) {
        if self.text.trim().is_empty() {
            return;
        }

        let repaint_ctx = ctx.clone();
        let mut session = ReadingSession::new(
            self.runtime.clone(),
            self.text.clone(),
            self.config.reading.wpm,
            self.config.reading.chunk_size,
        )
        .with_waker(Arc::new(move || repaint_ctx.request_repaint()));

        session.start();
        self.session = Some(session);
        self.font_fit.invalidate();
        self.view = AppView::Reading;
    }

    fn stop_reading(&mut self) {
        if let Some(session) = self.session.take() {
            self.last_report = Some(session.stop());
        }
        self.view = AppView::Setup;
    }

    // ── Setup view ───────────────────────────────────────────────────────

    fn draw_setup(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("VESTAL").size(40.0).strong().color(ACCENT));
            ui.label(
                egui::RichText::new("Visual Efficiency & Speed Training at Lightspeed").color(DIM),
            );
        });
        ui.add_space(12.0);

        self.draw_search_row(ui);

        if let Some(msg) = &self.error_message {
            ui.colored_label(ERROR, msg);
        }
        if let Some(report) = &self.last_report {
            ui.label(
                egui::RichText::new(format!(
                    "Last session: {} words, chunk {}/{}{}",
                    report.words_read,
                    report.index + 1,
                    report.chunks,
                    if report.finished { " (finished)" } else { "" }
                ))
                .color(DIM)
                .size(12.0),
            );
        }
        ui.add_space(8.0);

        // Reserve room below the editor for the sliders and start button.
        let editor_height = (ui.available_height() - 120.0).max(80.0);
        egui::ScrollArea::vertical()
            .max_height(editor_height)
            .show(ui, |ui| {
                let width = ui.available_width();
                ui.add_sized(
                    [width, editor_height],
                    egui::TextEdit::multiline(&mut self.text)
                        .hint_text("Or paste your text here..."),
                );
            });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            self.draw_wpm_slider(ui);
            self.draw_chunk_size_slider(ui);
            self.draw_font_size_slider(ui);
        });
        ui.add_space(8.0);

        let can_start = !self.text.trim().is_empty() && !self.is_loading;
        ui.vertical_centered_justified(|ui| {
            let button = egui::Button::new(egui::RichText::new("Start Reading").size(18.0));
            if ui.add_enabled(can_start, button).clicked() {
                self.start_reading(ctx);
            }
        });
    }

    fn draw_search_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let query_width = (ui.available_width() - 320.0).max(120.0);
            let query = ui.add_enabled(
                !self.is_loading,
                egui::TextEdit::singleline(&mut self.search_query)
                    .hint_text("Fetch article from Wikipedia...")
                    .desired_width(query_width),
            );
            if query.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit_search();
            }

            ui.add_enabled_ui(!self.is_loading, |ui| {
                let language = &mut self.config.search.language;
                egui::ComboBox::from_id_salt("search-language")
                    .selected_text(language.native_name())
                    .show_ui(ui, |ui| {
                        for lang in Language::ALL {
                            ui.selectable_value(language, lang, lang.native_name());
                        }
                    });
            });

            let can_search = !self.is_loading && !self.search_query.trim().is_empty();
            let label = if self.is_loading { "Searching..." } else { "Search" };
            if ui.add_enabled(can_search, egui::Button::new(label)).clicked() {
                self.submit_search();
            }
            if self.is_loading {
                ui.spinner();
            }

            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Paste"))
                .on_hover_text("Replace the text with the clipboard contents")
                .clicked()
            {
                self.paste_clipboard();
            }
        });
    }

    // ── Sliders ──────────────────────────────────────────────────────────

    fn draw_wpm_slider(&mut self, ui: &mut egui::Ui) {
        let mut wpm = self.config.reading.wpm.get();
        let slider = egui::Slider::new(&mut wpm, Wpm::MIN..=Wpm::MAX)
            .step_by(f64::from(Wpm::STEP))
            .suffix(" WPM")
            .text("Rate");
        if ui.add(slider).changed() {
            let wpm = Wpm::new(wpm);
            self.config.reading.wpm = wpm;
            if let Some(session) = &mut self.session {
                session.set_wpm(wpm);
            }
        }
    }

    fn draw_chunk_size_slider(&mut self, ui: &mut egui::Ui) {
        let mut size = self.config.reading.chunk_size.get();
        let slider = egui::Slider::new(&mut size, ChunkSize::MIN..=ChunkSize::MAX).text("Chunk");
        if ui.add(slider).changed() {
            let size = ChunkSize::new(size);
            self.config.reading.chunk_size = size;
            if let Some(session) = &mut self.session {
                session.set_chunk_size(size);
            }
        }
    }

    fn draw_font_size_slider(&mut self, ui: &mut egui::Ui) {
        let mut size = self.config.reading.font_size.get();
        let slider = egui::Slider::new(&mut size, FontSize::MIN..=FontSize::MAX)
            .suffix("px")
            .text("Font");
        if ui.add(slider).changed() {
            self.config.reading.font_size = FontSize::new(size);
        }
    }

    fn draw_position_slider(&mut self, ui: &mut egui::Ui) {
        let Some(session) = &mut self.session else {
            return;
        };
        let pacer = session.pacer();
        let last = pacer.len().saturating_sub(1);
        let percent = pacer.progress_percent().round();

        let mut index = session.index();
        let slider = egui::Slider::new(&mut index, 0..=last)
            .show_value(false)
            .text(format!("Position {percent:.0}%"));
        let response = ui.add_enabled(!session.pacer().is_empty(), slider);
        if response.changed() {
            session.seek(index);
        }
    }

    // ── Reading view ─────────────────────────────────────────────────────

    /// Apply the reading shortcuts.  Returns `false` once Escape has ended
    /// the session.
    fn handle_reading_keys(&mut self, ctx: &egui::Context) -> bool {
        // Consumed so a focused button or slider does not react as well.
        let keys = ctx.input_mut(|i| {
            let none = egui::Modifiers::NONE;
            ReadingKeys {
                toggle: i.consume_key(none, egui::Key::Space),
                stop: i.consume_key(none, egui::Key::Escape),
                back: i.consume_key(none, egui::Key::ArrowLeft),
                forward: i.consume_key(none, egui::Key::ArrowRight),
            }
        });
        self.apply_reading_keys(keys)
    }

    fn apply_reading_keys(&mut self, keys: ReadingKeys) -> bool {
        if keys.stop {
            self.stop_reading();
            return false;
        }
        let Some(session) = &mut self.session else {
            self.view = AppView::Setup;
            return false;
        };
        if keys.toggle {
            session.toggle();
        }
        if keys.back {
            session.step(-1);
        }
        if keys.forward {
            session.step(1);
        }
        true
    }

    fn draw_reading_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            self.draw_wpm_slider(ui);
            self.draw_chunk_size_slider(ui);
            self.draw_font_size_slider(ui);
            self.draw_position_slider(ui);
        });
        ui.separator();

        let state = self.session.as_ref().map(ReadingSession::state);
        ui.horizontal(|ui| {
            let toggle_label = if state.is_some_and(|s| s.is_running()) {
                "Pause"
            } else {
                "Play"
            };
            if ui
                .button(egui::RichText::new(toggle_label).size(16.0))
                .on_hover_text("Space")
                .clicked()
            {
                if let Some(session) = &mut self.session {
                    session.toggle();
                }
            }
            if ui
                .button(egui::RichText::new("Stop").size(16.0).color(ERROR))
                .on_hover_text("Escape")
                .clicked()
            {
                self.stop_reading();
            }
            if let Some(state) = state {
                ui.label(egui::RichText::new(state.label()).color(DIM));
            }
        });
        ui.add_space(6.0);
    }

    fn draw_chunk(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(session) = &self.session else {
            return;
        };
        let text = session.display_text().to_owned();
        let color = if session.state() == PacerState::Finished {
            DIM
        } else {
            CHUNK_COLOR
        };

        let surface = EguiSurface {
            ctx,
            container_width: ui.available_width(),
        };
        let size = self
            .font_fit
            .refit(&text, self.config.reading.font_size.points(), &surface);

        ui.centered_and_justified(|ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(text).size(size).strong().color(color))
                    .wrap_mode(egui::TextWrapMode::Extend)
                    .selectable(false),
            );
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for VestalApp {
    /// Called every frame by eframe.  Polls channels and ticks, then renders
    /// the current view.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Poll non-blocking channels ------------------------------------
        self.poll_search();
        if let Some(session) = &mut self.session {
            session.poll();
        }

        // Escape falls straight through to the setup view this frame.
        let reading = self.view == AppView::Reading && self.handle_reading_keys(ctx);

        if reading {
            egui::TopBottomPanel::bottom("reading-controls").show(ctx, |ui| {
                self.draw_reading_controls(ui);
            });
            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(egui::Color32::BLACK))
                .show(ctx, |ui| {
                    self.draw_chunk(ui, ctx);
                });
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_setup(ui, ctx);
            });
        }

        // --- Wake up for the next tick ------------------------------------
        if let Some(remaining) = self.session.as_ref().and_then(ReadingSession::time_until_tick) {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Save preferences on exit (best-effort).
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(session) = self.session.take() {
            session.stop();
        }
        if let Err(e) = self.config.save() {
            log::warn!("failed to save settings: {e}");
        }
        log::info!("VESTAL closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
