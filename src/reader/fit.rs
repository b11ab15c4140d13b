//! Font-fit pass for the chunk display.
//!
//! A long chunk at a large font can be wider than the reading area.  After
//! layout, and before the frame is painted, [`FontFit::refit`] measures the
//! chunk at the user's full font size and shrinks it just enough to fit.
//! Measuring always starts from the full size, so consecutive chunks never
//! shrink cumulatively.
//!
//! The measurement itself goes through [`MeasureSurface`] so the pass can be
//! tested without a window.

/// Smallest size the fit pass will shrink to.
pub const MIN_FIT_SIZE: f32 = 12.0;

/// Fraction of the exact fitting size actually used, leaving a little slack.
pub const FIT_MARGIN: f32 = 0.95;

/// Read-only measurements from the display surface.
pub trait MeasureSurface {
    /// Width of `text` laid out on one line at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Width available to the chunk display.
    fn container_width(&self) -> f32;
}

/// Size to paint at, given the width measured at `user_size`.
pub fn fit_font_size(user_size: f32, text_width: f32, container_width: f32) -> f32 {
    if text_width <= container_width || text_width <= 0.0 {
        return user_size;
    }
    let scaled = container_width / text_width * user_size;
    (scaled * FIT_MARGIN).max(MIN_FIT_SIZE)
}

#[derive(Debug, Clone, PartialEq)]
struct FitKey {
    text: String,
    user_size: f32,
    container_width: f32,
}

/// Cached result of the last fit pass.
///
/// The pass re-runs whenever the chunk text, the user font size or the
/// container width (viewport resize) changes.
#[derive(Debug, Clone, Default)]
pub struct FontFit {
    key: Option<FitKey>,
    size: f32,
}

impl FontFit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font size to paint `text` at.
    pub fn refit(&mut self, text: &str, user_size: f32, surface: &impl MeasureSurface) -> f32 {
        let container_width = surface.container_width();

        if let Some(key) = &self.key {
            if key.text == text
                && key.user_size == user_size
                && key.container_width == container_width
            {
                return self.size;
            }
        }

        let measured = surface.text_width(text, user_size);
        self.size = fit_font_size(user_size, measured, container_width);
        self.key = Some(FitKey {
            text: text.to_owned(),
            user_size,
            container_width,
        });

        if self.size < user_size {
            log::debug!(
                "fit: {measured:.0}px chunk in {container_width:.0}px → {:.1}pt",
                self.size
            );
        }
        self.size
    }

    /// Forget the cached measurement so the next pass measures again.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
