//! Accessibility window
//!
//! Owns the ordered sequence of row nodes mirroring the terminal viewport.
//! The window always holds exactly one node per visible terminal row; the
//! first and last node carry the focus subscriptions that make boundary
//! crossing detectable. Rendering pulls line text from the terminal and
//! stamps the AT position metadata on each touched node.

use crate::surface::{AccessibleSurface, BoundarySide, NodeAttr, NodeId};
use crate::term::TerminalView;

/// Substituted for rows whose materialized text is empty. An accessible
/// node with no text is skipped by some AT navigation.
pub const EMPTY_ROW_PLACEHOLDER: &str = "\u{a0}";

/// Fixed-size ordered sequence of row nodes mirroring the viewport.
#[derive(Debug)]
pub struct RowWindow {
    nodes: Vec<NodeId>,
}

impl RowWindow {
    /// Create the window with one node per terminal row and attach the
    /// boundary focus subscriptions.
    pub fn new<S: AccessibleSurface>(surface: &mut S, rows: usize) -> Self {
        let mut window = Self { nodes: Vec::with_capacity(rows) };
        for index in 0..rows {
            let node = surface.create_node();
            surface.insert_node(node, index);
            window.nodes.push(node);
        }
        window.attach_boundary_listeners(surface);
        window
    }

    /// Number of row nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the window holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at the given window index
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Window index of the given node
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// Grow or shrink the window to match a new row count.
    ///
    /// The bottom-boundary subscription is removed before any node changes
    /// position and re-attached to the final last index, so no stale
    /// transition can fire mid-resize. Same-length resizes are a no-op.
    pub fn resize<S: AccessibleSurface>(&mut self, surface: &mut S, new_rows: usize) {
        if new_rows == self.nodes.len() {
            return;
        }
        log::debug!("row window resize {} -> {}", self.nodes.len(), new_rows);

        if let Some(&last) = self.nodes.last() {
            surface.remove_focus_listener(last, BoundarySide::Bottom);
        }

        while self.nodes.len() < new_rows {
            let node = surface.create_node();
            surface.insert_node(node, self.nodes.len());
            self.nodes.push(node);
        }
        while self.nodes.len() > new_rows {
            if let Some(node) = self.nodes.pop() {
                surface.remove_node(node);
            }
        }

        if let Some(&last) = self.nodes.last() {
            surface.add_focus_listener(last, BoundarySide::Bottom);
        }
    }

    /// Render line text and position metadata for an inclusive range of
    /// window indices. The range is clamped to the window; this is the only
    /// place node text is written.
    pub fn render_range<S, T>(&mut self, surface: &mut S, term: &T, start: usize, end: usize)
    where
        S: AccessibleSurface,
        T: TerminalView,
    {
        if self.nodes.is_empty() {
            return;
        }
        let end = end.min(self.nodes.len() - 1);
        if start > end {
            return;
        }

        let offset = term.scroll_offset();
        let total = term.total_lines();
        for index in start..=end {
            let node = self.nodes[index];
            let text = term.line_text(offset + index, true);
            if text.is_empty() {
                surface.set_text(node, EMPTY_ROW_PLACEHOLDER);
            } else {
                surface.set_text(node, &text);
            }
            surface.set_attribute(node, NodeAttr::PositionInSet(offset + index + 1));
            surface.set_attribute(node, NodeAttr::SetSize(total));
        }
    }

    /// Shift the window one line toward history: evict the bottom node,
    /// insert a fresh node at the top. Boundary subscriptions are detached
    /// first and re-attached to the new extremes. Returns the new top node.
    pub fn shift_up<S: AccessibleSurface>(&mut self, surface: &mut S) -> Option<NodeId> {
        self.detach_boundary_listeners(surface);
        let evicted = self.nodes.pop()?;
        surface.remove_node(evicted);

        let node = surface.create_node();
        surface.insert_node(node, 0);
        self.nodes.insert(0, node);

        self.attach_boundary_listeners(surface);
        Some(node)
    }

    /// Mirror of [`shift_up`](Self::shift_up): evict the top node, append a
    /// fresh node at the bottom. Returns the new bottom node.
    pub fn shift_down<S: AccessibleSurface>(&mut self, surface: &mut S) -> Option<NodeId> {
        self.detach_boundary_listeners(surface);
        if self.nodes.is_empty() {
            return None;
        }
        let evicted = self.nodes.remove(0);
        surface.remove_node(evicted);

        let node = surface.create_node();
        surface.insert_node(node, self.nodes.len());
        self.nodes.push(node);

        self.attach_boundary_listeners(surface);
        Some(node)
    }

    /// Remove every node and both subscriptions. Used at disposal.
    pub fn clear<S: AccessibleSurface>(&mut self, surface: &mut S) {
        self.detach_boundary_listeners(surface);
        for node in self.nodes.drain(..) {
            surface.remove_node(node);
        }
    }

    fn attach_boundary_listeners<S: AccessibleSurface>(&self, surface: &mut S) {
        if let Some(&first) = self.nodes.first() {
            surface.add_focus_listener(first, BoundarySide::Top);
        }
        if let Some(&last) = self.nodes.last() {
            surface.add_focus_listener(last, BoundarySide::Bottom);
        }
    }

    fn detach_boundary_listeners<S: AccessibleSurface>(&self, surface: &mut S) {
        if let Some(&first) = self.nodes.first() {
            surface.remove_focus_listener(first, BoundarySide::Top);
        }
        if let Some(&last) = self.nodes.last() {
            surface.remove_focus_listener(last, BoundarySide::Bottom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemorySurface, MemoryTerminal};

    fn assert_boundary_listeners(surface: &MemorySurface, window: &RowWindow) {
        let listeners = surface.focus_listeners();
        assert_eq!(listeners.len(), 2);
        assert!(listeners.contains(&(window.node_at(0).unwrap(), BoundarySide::Top)));
        assert!(listeners
            .contains(&(window.node_at(window.len() - 1).unwrap(), BoundarySide::Bottom)));
    }

    #[test]
    fn test_window_new() {
        let mut surface = MemorySurface::new();
        let window = RowWindow::new(&mut surface, 24);
        assert_eq!(window.len(), 24);
        assert_eq!(surface.row_count(), 24);
        assert_boundary_listeners(&surface, &window);
    }

    #[test]
    fn test_window_single_row_holds_both_listeners() {
        let mut surface = MemorySurface::new();
        let window = RowWindow::new(&mut surface, 1);
        let node = window.node_at(0).unwrap();
        let listeners = surface.focus_listeners();
        assert_eq!(listeners.len(), 2);
        assert!(listeners.contains(&(node, BoundarySide::Top)));
        assert!(listeners.contains(&(node, BoundarySide::Bottom)));
    }

    #[test]
    fn test_window_resize_grow() {
        let mut surface = MemorySurface::new();
        let mut window = RowWindow::new(&mut surface, 10);
        window.resize(&mut surface, 15);
        assert_eq!(window.len(), 15);
        assert_eq!(surface.row_count(), 15);
        assert_boundary_listeners(&surface, &window);
    }

    #[test]
    fn test_window_resize_shrink() {
        let mut surface = MemorySurface::new();
        let mut window = RowWindow::new(&mut surface, 10);
        let top = window.node_at(0).unwrap();
        window.resize(&mut surface, 4);
        assert_eq!(window.len(), 4);
        assert_eq!(surface.row_count(), 4);
        // Top node survives a shrink untouched
        assert_eq!(window.node_at(0), Some(top));
        assert_boundary_listeners(&surface, &window);
    }

    #[test]
    fn test_window_resize_noop() {
        let mut surface = MemorySurface::new();
        let mut window = RowWindow::new(&mut surface, 10);
        let nodes: Vec<_> = (0..10).map(|i| window.node_at(i).unwrap()).collect();
        window.resize(&mut surface, 10);
        let after: Vec<_> = (0..10).map(|i| window.node_at(i).unwrap()).collect();
        assert_eq!(nodes, after);
        assert_boundary_listeners(&surface, &window);
    }

    #[test]
    fn test_render_range_sets_text_and_positions() {
        let mut surface = MemorySurface::new();
        let mut term = MemoryTerminal::new(80, 3);
        term.feed_str("alpha\nbeta\ngamma");
        let mut window = RowWindow::new(&mut surface, 3);

        window.render_range(&mut surface, &term, 0, 2);

        let first = window.node_at(0).unwrap();
        let last = window.node_at(2).unwrap();
        assert_eq!(surface.node_text(first), "alpha");
        assert_eq!(surface.node_text(last), "gamma");
        assert_eq!(surface.node_position(first), Some(1));
        assert_eq!(surface.node_set_size(first), Some(3));
    }

    #[test]
    fn test_render_range_empty_row_gets_placeholder() {
        let mut surface = MemorySurface::new();
        let term = MemoryTerminal::new(80, 2);
        let mut window = RowWindow::new(&mut surface, 2);

        window.render_range(&mut surface, &term, 0, 1);

        let node = window.node_at(1).unwrap();
        assert_eq!(surface.node_text(node), EMPTY_ROW_PLACEHOLDER);
    }

    #[test]
    fn test_render_range_clamps_to_window() {
        let mut surface = MemorySurface::new();
        let mut term = MemoryTerminal::new(80, 2);
        term.feed_str("one\ntwo");
        let mut window = RowWindow::new(&mut surface, 2);

        window.render_range(&mut surface, &term, 0, 99);

        assert_eq!(surface.node_text(window.node_at(1).unwrap()), "two");
    }

    #[test]
    fn test_shift_up_pairs_eviction_with_insertion() {
        let mut surface = MemorySurface::new();
        let mut window = RowWindow::new(&mut surface, 5);
        let old_top = window.node_at(0).unwrap();
        let old_bottom = window.node_at(4).unwrap();

        let new_top = window.shift_up(&mut surface).unwrap();

        assert_eq!(window.len(), 5);
        assert_eq!(window.node_at(0), Some(new_top));
        // Previous top slides to index 1, previous bottom is gone
        assert_eq!(window.node_at(1), Some(old_top));
        assert_eq!(window.index_of(old_bottom), None);
        assert_boundary_listeners(&surface, &window);
    }

    #[test]
    fn test_shift_down_pairs_eviction_with_insertion() {
        let mut surface = MemorySurface::new();
        let mut window = RowWindow::new(&mut surface, 5);
        let old_top = window.node_at(0).unwrap();
        let old_bottom = window.node_at(4).unwrap();

        let new_bottom = window.shift_down(&mut surface).unwrap();

        assert_eq!(window.len(), 5);
        assert_eq!(window.node_at(4), Some(new_bottom));
        assert_eq!(window.node_at(3), Some(old_bottom));
        assert_eq!(window.index_of(old_top), None);
        assert_boundary_listeners(&surface, &window);
    }

    #[test]
    fn test_clear_removes_nodes_and_listeners() {
        let mut surface = MemorySurface::new();
        let mut window = RowWindow::new(&mut surface, 8);
        window.clear(&mut surface);
        assert!(window.is_empty());
        assert_eq!(surface.row_count(), 0);
        assert!(surface.focus_listeners().is_empty());
    }
}
