//! Per-chunk display duration.
//!
//! The base duration spreads one minute over `wpm` words and multiplies by
//! the chunk's word count.  A chunk ending in a comma or a sentence terminator
//! stays on screen a little longer.

use std::time::Duration;

use super::chunker::Chunk;

/// Extra time on screen for a chunk ending in `,`.
pub const COMMA_PAUSE: Duration = Duration::from_millis(150);

/// Extra time on screen for a chunk ending in `.`, `?` or `!`.
pub const SENTENCE_PAUSE: Duration = Duration::from_millis(250);

const MICROS_PER_MINUTE: u64 = 60_000_000;

/// Pause bonus for the chunk's trailing character.
pub fn punctuation_pause(last: Option<char>) -> Duration {
    match last {
        Some(',') => COMMA_PAUSE,
        Some('.' | '?' | '!') => SENTENCE_PAUSE,
        _ => Duration::ZERO,
    }
}

/// How long `chunk` stays on screen at `wpm`.
///
/// Returns `None` for a rate of zero: the chunk is held indefinitely and the
/// pacer never ticks.
pub fn chunk_duration(chunk: &Chunk, wpm: u32) -> Option<Duration> {
    if wpm == 0 {
        return None;
    }
    let words = chunk.word_count() as u64;
    let base = Duration::from_micros(MICROS_PER_MINUTE * words / u64::from(wpm));
    Some(base + punctuation_pause(chunk.last_char()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::chunker::chunk_text;

    fn duration_of(text: &str, chunk_size: usize, wpm: u32) -> Option<Duration> {
        let seq = chunk_text(text, chunk_size);
        let chunk = seq.get(0).expect("at least one chunk");
        chunk_duration(chunk, wpm)
    }

    #[test]
    fn plain_word_at_300_wpm_is_200ms() {
        assert_eq!(duration_of("hello", 1, 300), Some(Duration::from_millis(200)));
    }

    #[test]
    fn comma_adds_150ms() {
        assert_eq!(duration_of("hello,", 1, 300), Some(Duration::from_millis(350)));
    }

    #[test]
    fn sentence_end_adds_250ms() {
        assert_eq!(duration_of("Hello.", 1, 300), Some(Duration::from_millis(450)));
        assert_eq!(duration_of("Really?", 1, 300), Some(Duration::from_millis(450)));
        assert_eq!(duration_of("Stop!", 1, 300), Some(Duration::from_millis(450)));
    }

    #[test]
    fn other_punctuation_gets_no_bonus() {
        assert_eq!(duration_of("wait;", 1, 300), Some(Duration::from_millis(200)));
        assert_eq!(duration_of("(aside)", 1, 300), Some(Duration::from_millis(200)));
    }

    #[test]
    fn zero_wpm_is_unbounded() {
        assert_eq!(duration_of("hello", 1, 0), None);
    }

    #[test]
    fn duration_scales_with_word_count() {
        // Three words at 600 wpm: 3 * 100 ms.
        assert_eq!(
            duration_of("one two three", 3, 600),
            Some(Duration::from_millis(300))
        );
    }

    #[test]
    fn only_last_char_of_chunk_counts() {
        // The comma sits mid-chunk, the chunk ends in a plain word.
        assert_eq!(
            duration_of("first, second", 2, 300),
            Some(Duration::from_millis(400))
        );
    }

    #[test]
    fn fractional_milliseconds_are_kept() {
        // 60 000 / 350 = 171.428... ms
        let d = duration_of("word", 1, 350).expect("bounded");
        assert_eq!(d, Duration::from_micros(171_428));
    }
}
