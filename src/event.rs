//! Terminal events consumed by the accessibility layer
//!
//! The host emulator owns the actual event sources (terminal data stream,
//! renderer, window system) and forwards each occurrence as a value of
//! [`TerminalEvent`]. Events are delivered in host order; every event is
//! routed to exactly one component by the manager.

/// Events the accessibility layer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalEvent {
    /// Terminal grid was resized to the given dimensions
    Resize { cols: usize, rows: usize },
    /// An inclusive range of viewport rows changed and needs re-rendering
    Refresh { start: usize, end: usize },
    /// The viewport scrolled; every visible row may have changed
    Scroll,
    /// A printable character was written to the data stream
    Char(char),
    /// A line feed was written to the data stream
    LineFeed,
    /// A tab advanced the cursor by the given number of cells
    Tab(usize),
    /// The user pressed a key producing the given character
    KeyPress(char),
    /// The terminal lost input focus
    Blur,
    /// The device pixel ratio changed
    DpiChange,
    /// The renderer re-measured its cell dimensions
    RendererResize,
    /// The host window was resized
    WindowResize,
}
