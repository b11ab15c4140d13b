//! Chunking and pacing engine behind the reading view.
//!
//! # Architecture
//!
//! ```text
//! text ──chunk_text(size)──▶ ChunkSequence
//!                                 │
//!                                 ▼
//!                    Pacer (index, PacerState, Wpm, ChunkSize)
//!                                 │ current_duration()
//!                                 ▼
//!        ReadingSession ──arm──▶ TickTimer (tokio task) ──Tick──▶ poll()
//!                                 │
//!                                 ▼
//!        display_text() ──FontFit::refit(MeasureSurface)──▶ painted chunk
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use vestal::reader::{ChunkSize, ReadingSession, Wpm};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut session = ReadingSession::new(
//!         tokio::runtime::Handle::current(),
//!         "Paste your text here.",
//!         Wpm::new(300),
//!         ChunkSize::new(2),
//!     );
//!     session.start();
//!     while session.next_tick().await.is_some() {
//!         println!("{}", session.display_text());
//!     }
//! }
//! ```

pub mod chunker;
pub mod controls;
pub mod fit;
pub mod pacer;
pub mod pacing;
pub mod session;
pub mod state;
pub mod timer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use chunker::{chunk_text, Chunk, ChunkSequence};
pub use controls::{ChunkSize, FontSize, Wpm};
pub use fit::{fit_font_size, FontFit, MeasureSurface};
pub use pacer::{Pacer, TickOutcome, FINISHED_PLACEHOLDER};
pub use pacing::chunk_duration;
pub use session::{ReadingSession, SessionReport};
pub use state::PacerState;
pub use timer::{Tick, TickTimer, Waker};
