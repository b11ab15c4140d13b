//! The reading state machine.
//!
//! [`Pacer`] knows which chunk is on screen, whether reading is advancing,
//! and how long the current chunk should stay up.  It has no notion of
//! wall-clock time: [`ReadingSession`](crate::reader::ReadingSession) owns
//! the timer and calls [`Pacer::tick`] when it fires.
//!
//! All inputs are normalised rather than rejected, so no method here can
//! fail.

use std::time::Duration;

use super::chunker::{chunk_text, index_for_word, word_offset, Chunk, ChunkSequence};
use super::controls::{ChunkSize, Wpm};
use super::pacing::chunk_duration;
use super::state::PacerState;

/// Shown in place of a chunk when the text produced no chunks at all.
pub const FINISHED_PLACEHOLDER: &str = "Finished";

/// Result of applying one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved to the next chunk; reading continues.
    Advanced,
    /// The last chunk was on screen; the pacer is now `Finished`.
    Finished,
    /// The pacer was not running, nothing changed.
    Ignored,
}

/// Reading position, run state and pacing parameters for one text.
#[derive(Debug, Clone)]
pub struct Pacer {
    text: String,
    chunks: ChunkSequence,
    index: usize,
    state: PacerState,
    wpm: Wpm,
    chunk_size: ChunkSize,
}

impl Pacer {
    /// Chunk `text` and park at the first chunk in [`PacerState::Idle`].
    pub fn new(text: impl Into<String>, wpm: Wpm, chunk_size: ChunkSize) -> Self {
        let text = text.into();
        let chunks = chunk_text(&text, chunk_size.get());
        Self {
            text,
            chunks,
            index: 0,
            state: PacerState::Idle,
            wpm,
            chunk_size,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Begin reading from the first chunk.
    pub fn start(&mut self) {
        self.index = 0;
        self.state = if self.chunks.is_empty() {
            PacerState::Finished
        } else {
            PacerState::Running
        };
        log::debug!("pacer: start → {:?} ({} chunks)", self.state, self.chunks.len());
    }

    /// Advance past the chunk currently on screen.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }

        match self.chunks.last_index() {
            Some(last) if self.index < last => {
                self.index += 1;
                TickOutcome::Advanced
            }
            _ => {
                self.state = PacerState::Finished;
                log::debug!("pacer: reached last chunk → Finished");
                TickOutcome::Finished
            }
        }
    }

    /// Play/pause.  Resuming from `Finished` replays from the first chunk;
    /// toggling an `Idle` pacer starts it.
    pub fn toggle(&mut self) {
        match self.state {
            PacerState::Running => self.state = PacerState::Paused,
            PacerState::Paused => self.state = PacerState::Running,
            PacerState::Idle | PacerState::Finished => self.start(),
        }
        log::debug!("pacer: toggle → {:?} at {}", self.state, self.index);
    }

    /// Jump to `index`, clamped to the last chunk.  The run state is kept.
    ///
    /// Returns the index actually selected.
    pub fn seek(&mut self, index: usize) -> usize {
        if index >= self.chunks.len() && !self.chunks.is_empty() {
            log::debug!(
                "pacer: seek {index} out of range, clamping to {}",
                self.chunks.len() - 1
            );
        }
        self.index = self.chunks.clamp_index(index);
        self.settle_finished();
        self.index
    }

    pub fn set_wpm(&mut self, wpm: Wpm) {
        self.wpm = wpm;
    }

    /// Re-chunk with `chunk_size`, keeping the reading position by word
    /// offset rather than by chunk index.
    pub fn set_chunk_size(&mut self, chunk_size: ChunkSize) {
        if chunk_size == self.chunk_size {
            return;
        }

        let offset = word_offset(self.index, self.chunk_size.get());
        self.chunk_size = chunk_size;
        self.chunks = chunk_text(&self.text, chunk_size.get());
        self.index = self
            .chunks
            .clamp_index(index_for_word(offset, chunk_size.get()));
        self.settle_finished();

        log::debug!(
            "pacer: chunk size → {} (word {offset} → chunk {})",
            chunk_size.get(),
            self.index
        );
    }

    /// Replace the text, regenerating chunks and clamping the index.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.chunks = chunk_text(&self.text, self.chunk_size.get());
        self.index = self.chunks.clamp_index(self.index);
        if self.chunks.is_empty() && self.state.is_running() {
            self.state = PacerState::Finished;
        }
        self.settle_finished();
    }

    /// `Finished` means "stopped on the last chunk".  Once the position moves
    /// elsewhere the pacer is simply paused.
    fn settle_finished(&mut self) {
        if self.state == PacerState::Finished && Some(self.index) != self.chunks.last_index() {
            self.state = PacerState::Paused;
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// How long until the next tick should fire, `None` when no tick is due
    /// (not running, nothing to read, or an unbounded duration).
    pub fn current_duration(&self) -> Option<Duration> {
        if !self.state.is_running() {
            return None;
        }
        chunk_duration(self.current_chunk()?, self.wpm.get())
    }

    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.chunks.get(self.index)
    }

    /// Text for the display surface.
    pub fn display_text(&self) -> &str {
        match self.current_chunk() {
            Some(chunk) => chunk.text(),
            None => FINISHED_PLACEHOLDER,
        }
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &ChunkSequence {
        &self.chunks
    }

    pub fn wpm(&self) -> Wpm {
        self.wpm
    }

    pub fn chunk_size(&self) -> ChunkSize {
        self.chunk_size
    }

    /// Position through the text as shown on the position slider label.
    pub fn progress_percent(&self) -> f32 {
        if self.chunks.is_empty() {
            return 100.0;
        }
        (self.index + 1) as f32 / self.chunks.len() as f32 * 100.0
    }

    /// Words up to and including the chunk on screen.
    pub fn words_read(&self) -> usize {
        if self.chunks.is_empty() {
            return 0;
        }
        self.chunks
            .iter()
            .take(self.index + 1)
            .map(Chunk::word_count)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "one two three four five six seven eight nine ten";

    fn pacer(text: &str, chunk_size: usize) -> Pacer {
        Pacer::new(text, Wpm::new(300), ChunkSize::new(chunk_size))
    }

    #[test]
    fn new_pacer_is_idle_at_first_chunk() {
        let p = pacer(TEXT, 1);
        assert_eq!(p.state(), PacerState::Idle);
        assert_eq!(p.index(), 0);
        assert_eq!(p.len(), 10);
        assert_eq!(p.display_text(), "one");
        assert_eq!(p.current_duration(), None);
    }

    #[test]
    fn start_runs_from_zero() {
        let mut p = pacer(TEXT, 1);
        p.seek(4);
        p.start();
        assert_eq!(p.state(), PacerState::Running);
        assert_eq!(p.index(), 0);
        assert_eq!(p.current_duration(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn ticks_advance_then_finish() {
        let mut p = pacer("a b c", 1);
        p.start();
        assert_eq!(p.tick(), TickOutcome::Advanced);
        assert_eq!(p.tick(), TickOutcome::Advanced);
        assert_eq!(p.index(), 2);
        assert_eq!(p.tick(), TickOutcome::Finished);
        assert_eq!(p.state(), PacerState::Finished);
        assert_eq!(p.index(), 2);
        assert_eq!(p.display_text(), "c");
        // No further ticking once finished.
        assert_eq!(p.tick(), TickOutcome::Ignored);
        assert_eq!(p.current_duration(), None);
    }

    #[test]
    fn toggle_pauses_and_resumes_in_place() {
        let mut p = pacer(TEXT, 1);
        p.start();
        p.tick();
        p.toggle();
        assert_eq!(p.state(), PacerState::Paused);
        assert_eq!(p.tick(), TickOutcome::Ignored);
        p.toggle();
        assert_eq!(p.state(), PacerState::Running);
        assert_eq!(p.index(), 1);
    }

    #[test]
    fn toggle_from_finished_restarts_at_zero() {
        let mut p = pacer("a b", 1);
        p.start();
        p.tick();
        p.tick();
        assert_eq!(p.state(), PacerState::Finished);
        p.toggle();
        assert_eq!(p.state(), PacerState::Running);
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn toggle_from_idle_starts() {
        let mut p = pacer(TEXT, 1);
        p.toggle();
        assert_eq!(p.state(), PacerState::Running);
    }

    #[test]
    fn seek_keeps_run_state() {
        let mut p = pacer(TEXT, 1);
        p.start();
        assert_eq!(p.seek(7), 7);
        assert_eq!(p.state(), PacerState::Running);

        p.toggle();
        assert_eq!(p.seek(2), 2);
        assert_eq!(p.state(), PacerState::Paused);
    }

    #[test]
    fn seek_past_end_clamps_to_last() {
        let mut p = pacer(TEXT, 1);
        assert_eq!(p.seek(10), 9);
        assert_eq!(p.seek(usize::MAX), 9);
        assert_eq!(p.display_text(), "ten");
    }

    #[test]
    fn seeking_off_the_end_while_finished_pauses() {
        let mut p = pacer("a b c", 1);
        p.start();
        p.seek(2);
        p.tick();
        assert_eq!(p.state(), PacerState::Finished);

        p.seek(0);
        assert_eq!(p.state(), PacerState::Paused);
        p.toggle();
        assert_eq!(p.state(), PacerState::Running);
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn chunk_size_change_preserves_word_position() {
        let mut p = pacer(TEXT, 2);
        p.seek(3);
        assert_eq!(p.display_text(), "seven eight");

        p.set_chunk_size(ChunkSize::new(1));
        assert_eq!(p.index(), 6);
        assert_eq!(p.display_text(), "seven");

        p.set_chunk_size(ChunkSize::new(4));
        assert_eq!(p.index(), 1);
        assert_eq!(p.display_text(), "five six seven eight");
    }

    #[test]
    fn chunk_size_change_clamps_to_new_length() {
        // Word offset 9 at size 1; with size 7 there are only 2 chunks.
        let mut p = pacer(TEXT, 1);
        p.seek(9);
        p.set_chunk_size(ChunkSize::new(7));
        assert_eq!(p.len(), 2);
        assert_eq!(p.index(), 1);
    }

    #[test]
    fn same_chunk_size_is_a_no_op() {
        let mut p = pacer(TEXT, 3);
        p.seek(2);
        p.set_chunk_size(ChunkSize::new(3));
        assert_eq!(p.index(), 2);
    }

    #[test]
    fn wpm_change_updates_duration() {
        let mut p = pacer(TEXT, 1);
        p.start();
        p.set_wpm(Wpm::new(600));
        assert_eq!(p.current_duration(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn empty_text_shows_placeholder_and_never_runs() {
        let mut p = pacer("   ", 1);
        assert!(p.is_empty());
        assert_eq!(p.display_text(), FINISHED_PLACEHOLDER);
        p.start();
        assert_eq!(p.state(), PacerState::Finished);
        assert_eq!(p.tick(), TickOutcome::Ignored);
        p.toggle();
        assert_eq!(p.state(), PacerState::Finished);
        assert_eq!(p.seek(3), 0);
        assert_eq!(p.current_duration(), None);
        assert!((p.progress_percent() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn set_text_clamps_index() {
        let mut p = pacer(TEXT, 1);
        p.seek(8);
        p.set_text("short text");
        assert_eq!(p.index(), 1);
        assert_eq!(p.display_text(), "text");
    }

    #[test]
    fn progress_and_words_read() {
        let mut p = pacer(TEXT, 3);
        assert_eq!(p.len(), 4);
        p.seek(1);
        assert!((p.progress_percent() - 50.0).abs() < f32::EPSILON);
        assert_eq!(p.words_read(), 6);
        p.seek(3);
        assert_eq!(p.words_read(), 10);
    }
}
