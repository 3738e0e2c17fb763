//! Boundary focus handling
//!
//! When AT navigation walks off the edge of the visible window, the window
//! shifts one line into history (or back toward the live screen) and focus
//! is re-homed, so an unbounded scrollback reads like one continuous
//! document. A crossing is detected from where focus landed and where it
//! came from; at the true edge of all available data the crossing is a
//! silent no-op.

use crate::surface::{AccessibleSurface, NodeId};
use crate::term::TerminalView;
use crate::window::RowWindow;

/// Where the last focus event landed relative to the window edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryHit {
    /// Focus is somewhere inside the window, or entered from outside
    #[default]
    Middle,
    /// Focus reached the top boundary node coming from below
    TopEdge,
    /// Focus reached the bottom boundary node coming from above
    BottomEdge,
}

/// Detects boundary crossings and performs the one-line window shift.
#[derive(Debug, Default)]
pub struct BoundaryFocusController {
    state: BoundaryHit,
}

impl BoundaryFocusController {
    pub fn new() -> Self {
        Self { state: BoundaryHit::Middle }
    }

    /// Edge classification of the most recent focus event
    pub fn state(&self) -> BoundaryHit {
        self.state
    }

    /// Process a focus event on `target`, arriving from `related`.
    ///
    /// Returns `true` when a window shift was performed and the host must
    /// suppress its default focus-traversal behavior; `false` for ordinary
    /// focus moves and for guarded crossings at the true data edge.
    pub fn handle_focus<S, T>(
        &mut self,
        surface: &mut S,
        term: &mut T,
        window: &mut RowWindow,
        target: NodeId,
        related: Option<NodeId>,
    ) -> bool
    where
        S: AccessibleSurface,
        T: TerminalView,
    {
        self.state = Self::classify(window, target, related);
        match self.state {
            BoundaryHit::Middle => false,
            BoundaryHit::TopEdge => self.cross_top(surface, term, window),
            BoundaryHit::BottomEdge => self.cross_bottom(surface, term, window),
        }
    }

    /// A top-edge hit is the top node receiving focus from the node at
    /// index 1 (backward navigation); bottom-edge is the mirror. A one-row
    /// window has no interior node to arrive from, so it never crosses.
    fn classify(window: &RowWindow, target: NodeId, related: Option<NodeId>) -> BoundaryHit {
        if window.len() < 2 {
            return BoundaryHit::Middle;
        }
        let last = window.len() - 1;
        if Some(target) == window.node_at(0) && related == window.node_at(1) {
            BoundaryHit::TopEdge
        } else if Some(target) == window.node_at(last) && related == window.node_at(last - 1) {
            BoundaryHit::BottomEdge
        } else {
            BoundaryHit::Middle
        }
    }

    fn cross_top<S, T>(&self, surface: &mut S, term: &mut T, window: &mut RowWindow) -> bool
    where
        S: AccessibleSurface,
        T: TerminalView,
    {
        // Already at line 1: the genuine top of all available data
        if term.scroll_offset() == 0 {
            return false;
        }
        log::debug!("boundary crossing: one line into history");

        if window.shift_up(surface).is_none() {
            return false;
        }
        term.scroll_lines(-1);

        // The node the user was on is now one step in from the boundary;
        // keeping focus there makes the shift invisible to navigation.
        if let Some(node) = window.node_at(1) {
            surface.focus(node);
        }
        true
    }

    fn cross_bottom<S, T>(&self, surface: &mut S, term: &mut T, window: &mut RowWindow) -> bool
    where
        S: AccessibleSurface,
        T: TerminalView,
    {
        // Bottom node already shows the last line of all available data
        if term.scroll_offset() + term.rows() >= term.total_lines() {
            return false;
        }
        log::debug!("boundary crossing: one line toward live screen");

        if window.shift_down(surface).is_none() {
            return false;
        }
        term.scroll_lines(1);

        if window.len() >= 2 {
            if let Some(node) = window.node_at(window.len() - 2) {
                surface.focus(node);
            }
        }
        true
    }
}
