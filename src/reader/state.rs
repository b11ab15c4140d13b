//! Run state of the reading pacer.
//!
//! ```text
//! Idle ──start──▶ Running ──tick at last chunk──▶ Finished
//!                  │   ▲                            │
//!            toggle│   │toggle                      │toggle (index ← 0)
//!                  ▼   │                            │
//!                 Paused ◀──────────────────────────┘ (seek off the end)
//! ```

/// States of the reading pacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacerState {
    /// Session created, reading not yet started.
    #[default]
    Idle,

    /// Chunks advance on every tick.
    Running,

    /// Advancing is suspended; the current chunk stays on screen.
    Paused,

    /// The last chunk has been shown and advancing has stopped.  The reading
    /// view stays open until the caller stops the session.
    Finished,
}

impl PacerState {
    /// Returns `true` while ticks are being scheduled.
    ///
    /// ```
    /// use vestal::reader::PacerState;
    ///
    /// assert!(PacerState::Running.is_running());
    /// assert!(!PacerState::Paused.is_running());
    /// assert!(!PacerState::Finished.is_running());
    /// ```
    pub fn is_running(&self) -> bool {
        matches!(self, PacerState::Running)
    }

    /// A short label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            PacerState::Idle => "Ready",
            PacerState::Running => "Reading",
            PacerState::Paused => "Paused",
            PacerState::Finished => "Finished",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
