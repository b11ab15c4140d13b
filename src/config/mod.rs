//! Configuration module for VESTAL.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for reading,
//! search and window preferences, `AppPaths` for the platform config
//! directory, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, Language, ReadingConfig, SearchConfig, UiConfig, WELCOME_TEXT};
