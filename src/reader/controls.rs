//! Bounded control values for the reading view.
//!
//! Every slider in the UI writes through one of these newtypes, so a value
//! outside its range can never reach the pacer.  Constructors clamp rather
//! than fail: a config file holding `wpm = 5000` loads as 1500.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wpm
// ---------------------------------------------------------------------------

/// Reading rate in words per minute, clamped to `50..=1500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Wpm(u32);

impl Wpm {
    pub const MIN: u32 = 50;
    pub const MAX: u32 = 1500;
    /// Slider granularity.
    pub const STEP: u32 = 10;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Wpm {
    fn default() -> Self {
        Self(300)
    }
}

impl From<u32> for Wpm {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Wpm> for u32 {
    fn from(value: Wpm) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// ChunkSize
// ---------------------------------------------------------------------------

/// Number of words shown at once, clamped to `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub const MIN: usize = 1;
    pub const MAX: usize = 7;

    pub fn new(value: usize) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(1)
    }
}

impl From<usize> for ChunkSize {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<ChunkSize> for usize {
    fn from(value: ChunkSize) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// FontSize
// ---------------------------------------------------------------------------

/// User-configured display font size in points, clamped to `24..=144`.
///
/// This is the size the user asked for.  The size actually painted may be
/// smaller after [`FontFit`](crate::reader::FontFit) shrinks an overflowing
/// chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    pub const MIN: u32 = 24;
    pub const MAX: u32 = 144;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn points(self) -> f32 {
        self.0 as f32
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(72)
    }
}

impl From<u32> for FontSize {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<FontSize> for u32 {
    fn from(value: FontSize) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
