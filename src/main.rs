//! Application entry point.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Create search channels (`command`, `result`).
//! 5. Run [`eframe::run_native`].  The app creator spawns the search worker
//!    once the egui context exists so results can wake the UI.  Blocks the
//!    main thread until the window is closed.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;
use vestal::{
    app::VestalApp,
    config::AppConfig,
    source::{run_search_worker, ArticleSource, SearchCommand, SearchResult, WikipediaSource},
};

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("VESTAL")
        .with_inner_size([width, height])
        .with_min_inner_size([480.0, 360.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("VESTAL starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (tick timers + one search worker)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<SearchCommand>(4);
    let (result_tx, result_rx) = mpsc::channel::<SearchResult>(4);

    let source: Arc<dyn ArticleSource> = Arc::new(WikipediaSource::from_config(&config.search));
    let handle = rt.handle().clone();
    let options = native_options(&config);
    let app = VestalApp::new(handle.clone(), command_tx, result_rx, config);

    // 5. Run the window (blocks until closed)
    eframe::run_native(
        "VESTAL",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            handle.spawn(run_search_worker(
                source,
                command_rx,
                result_tx,
                Some(Arc::new(move || ctx.request_repaint())),
            ));
            Ok(Box::new(app))
        }),
    )
}
