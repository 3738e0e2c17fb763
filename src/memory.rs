//! In-memory collaborators
//!
//! Implementations of [`AccessibleSurface`], [`TerminalView`] and
//! [`RendererMetrics`] that live entirely in memory. They back the test
//! suite and the headless harness; a real frontend supplies its own
//! implementations over the platform accessibility tree and screen model.
//!
//! [`MemorySurface`] is deliberately strict: removing a node does not
//! discard its focus subscriptions, so a caller that forgets the
//! detach-before-evict choreography is visible in the listener set.

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use crate::surface::{AccessibleSurface, BoundarySide, NodeAttr, NodeId};
use crate::term::{RendererMetrics, TerminalView};

#[derive(Debug, Clone, Default)]
struct NodeState {
    text: String,
    position_in_set: Option<usize>,
    set_size: Option<usize>,
    height: Option<f32>,
}

/// In-memory accessible surface with full introspection.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u32,
    nodes: HashMap<NodeId, NodeState>,
    rows: Vec<NodeId>,
    focus_listeners: Vec<(NodeId, BoundarySide)>,
    focused: Option<NodeId>,
    live_text: String,
    live_attached: bool,
    attached: bool,
    mutations: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            live_attached: true,
            attached: true,
            ..Self::default()
        }
    }

    /// Number of nodes currently in the row container
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row nodes in container order
    pub fn row_nodes(&self) -> &[NodeId] {
        &self.rows
    }

    /// Displayed text of a node (empty if unknown)
    pub fn node_text(&self, node: NodeId) -> &str {
        self.nodes.get(&node).map(|n| n.text.as_str()).unwrap_or("")
    }

    /// 1-based absolute line number stamped on the node, if rendered
    pub fn node_position(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(&node).and_then(|n| n.position_in_set)
    }

    /// Total line count stamped on the node, if rendered
    pub fn node_set_size(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(&node).and_then(|n| n.set_size)
    }

    /// Height applied to the node, if any
    pub fn node_height(&self, node: NodeId) -> Option<f32> {
        self.nodes.get(&node).and_then(|n| n.height)
    }

    /// Current focus subscriptions as (node, side) pairs
    pub fn focus_listeners(&self) -> &[(NodeId, BoundarySide)] {
        &self.focus_listeners
    }

    /// Node last given AT focus
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Accumulated live region text
    pub fn live_region_text(&self) -> &str {
        &self.live_text
    }

    /// Whether the live region is attached to the accessible root
    pub fn live_region_attached(&self) -> bool {
        self.live_attached
    }

    /// Whether the accessible subtree is attached to the host root
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Total count of mutating surface calls
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }
}

impl AccessibleSurface for MemorySurface {
    fn create_node(&mut self) -> NodeId {
        self.mutations += 1;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, NodeState::default());
        id
    }

    fn insert_node(&mut self, node: NodeId, index: usize) {
        self.mutations += 1;
        let index = index.min(self.rows.len());
        self.rows.insert(index, node);
    }

    fn remove_node(&mut self, node: NodeId) {
        self.mutations += 1;
        self.rows.retain(|&n| n != node);
        self.nodes.remove(&node);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.mutations += 1;
        if let Some(state) = self.nodes.get_mut(&node) {
            state.text = text.to_string();
        }
    }

    fn set_attribute(&mut self, node: NodeId, attr: NodeAttr) {
        self.mutations += 1;
        if let Some(state) = self.nodes.get_mut(&node) {
            match attr {
                NodeAttr::PositionInSet(pos) => state.position_in_set = Some(pos),
                NodeAttr::SetSize(size) => state.set_size = Some(size),
            }
        }
    }

    fn set_height(&mut self, node: NodeId, px: f32) {
        self.mutations += 1;
        if let Some(state) = self.nodes.get_mut(&node) {
            state.height = Some(px);
        }
    }

    fn add_focus_listener(&mut self, node: NodeId, side: BoundarySide) {
        self.mutations += 1;
        self.focus_listeners.push((node, side));
    }

    fn remove_focus_listener(&mut self, node: NodeId, side: BoundarySide) {
        self.mutations += 1;
        self.focus_listeners.retain(|&entry| entry != (node, side));
    }

    fn focus(&mut self, node: NodeId) {
        self.mutations += 1;
        self.focused = Some(node);
    }

    fn live_region_append(&mut self, text: &str) {
        self.mutations += 1;
        self.live_text.push_str(text);
    }

    fn live_region_clear(&mut self) {
        self.mutations += 1;
        self.live_text.clear();
    }

    fn live_region_set_attached(&mut self, attached: bool) {
        self.mutations += 1;
        self.live_attached = attached;
    }

    fn set_attached(&mut self, attached: bool) {
        self.mutations += 1;
        self.attached = attached;
    }
}

/// In-memory terminal: a growing list of lines with a pinned-to-bottom
/// viewport, enough scroll state for the accessibility layer to exercise
/// virtualization. Not a screen model; there is no cursor addressing and
/// no attribute state.
#[derive(Debug)]
pub struct MemoryTerminal {
    cols: usize,
    rows: usize,
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    offset: usize,
}

impl MemoryTerminal {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows: rows.max(1),
            lines: vec![String::new(); rows.max(1)],
            cursor_line: 0,
            cursor_col: 0,
            offset: 0,
        }
    }

    /// Feed printable text. `'\n'` starts a new line; lines wider than the
    /// column count wrap. Feeding re-pins the viewport to the bottom, as a
    /// terminal does while not scrolled back.
    pub fn feed_str(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.newline();
                continue;
            }
            let width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if width > 0 && self.cursor_col + width > self.cols {
                self.newline();
            }
            self.lines[self.cursor_line].push(ch);
            self.cursor_col += width;
        }
        self.offset = self.lines.len().saturating_sub(self.rows);
    }

    /// Replace a line in place, as an application redrawing a row through
    /// cursor addressing would. Out-of-range indices are ignored.
    pub fn set_line(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.clear();
            line.push_str(text);
        }
    }

    /// Resize the grid. The viewport stays within the available range.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows.max(1);
        while self.lines.len() < self.rows {
            self.lines.push(String::new());
        }
        self.offset = self.offset.min(self.lines.len() - self.rows);
    }

    fn newline(&mut self) {
        self.cursor_line += 1;
        self.cursor_col = 0;
        if self.cursor_line >= self.lines.len() {
            self.lines.push(String::new());
        }
    }
}

impl TerminalView for MemoryTerminal {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn scroll_offset(&self) -> usize {
        self.offset
    }

    fn total_lines(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, index: usize, trim: bool) -> String {
        match self.lines.get(index) {
            Some(line) if trim => line.trim_end().to_string(),
            Some(line) => line.clone(),
            None => String::new(),
        }
    }

    fn scroll_lines(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(self.rows) as isize;
        let next = (self.offset as isize + delta).clamp(0, max);
        self.offset = next as usize;
    }
}

/// Renderer double reporting a fixed cell height.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    cell_height: f32,
}

impl MemoryRenderer {
    /// Renderer that has measured its font
    pub fn with_cell_height(cell_height: f32) -> Self {
        Self { cell_height }
    }

    /// Renderer that has not measured anything yet
    pub fn unmeasured() -> Self {
        Self { cell_height: 0.0 }
    }

    /// Simulate a metric change (font size, DPI)
    pub fn set_cell_height(&mut self, cell_height: f32) {
        self.cell_height = cell_height;
    }
}

impl RendererMetrics for MemoryRenderer {
    fn cell_height(&self) -> f32 {
        self.cell_height
    }
}
