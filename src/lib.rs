//! VESTAL, a speed-reading trainer.
//!
//! Text is split into fixed-size word chunks and flashed one chunk at a time
//! at a user-chosen rate.
//!
//! * [`reader`] — chunker, pacer state machine, tick timers, font fitting.
//! * [`source`] — Wikipedia article search and clipboard paste.
//! * [`config`] — persisted preferences.
//! * [`app`]    — the egui window.

pub mod app;
pub mod config;
pub mod reader;
pub mod source;
