//! Interfaces to the terminal core and renderer
//!
//! The accessibility layer never touches the character grid or the paint
//! pipeline directly; it reads line text and scroll state through
//! [`TerminalView`] and cell metrics through [`RendererMetrics`]. The host
//! emulator implements both over its real screen model; tests use the
//! in-memory doubles in [`crate::memory`].

/// Read-mostly view of the terminal state.
///
/// Absolute line indices are 0-based and span the full history: index 0 is
/// the oldest scrollback line, `total_lines() - 1` the bottom screen line.
pub trait TerminalView {
    /// Current column count
    fn cols(&self) -> usize;

    /// Current row count
    fn rows(&self) -> usize;

    /// Absolute line index of the viewport's top row.
    ///
    /// Zero when scrolled to the very top of history;
    /// `total_lines() - rows()` when pinned to the live screen.
    fn scroll_offset(&self) -> usize;

    /// Total line count across scrollback and screen
    fn total_lines(&self) -> usize;

    /// Materialize the text of an absolute line.
    ///
    /// With `trim` set, trailing blank cells are dropped. Out-of-range
    /// indices yield an empty string.
    fn line_text(&self, index: usize, trim: bool) -> String;

    /// Scroll the viewport by a signed number of lines.
    ///
    /// Negative is toward history, positive toward the live screen. The
    /// implementation clamps to the available range.
    fn scroll_lines(&mut self, delta: isize);
}

/// Cell metrics exposed by the renderer.
pub trait RendererMetrics {
    /// Actual cell height in pixels, or a non-positive value while the
    /// renderer has not measured a font yet.
    fn cell_height(&self) -> f32;
}
