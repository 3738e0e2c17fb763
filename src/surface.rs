//! Accessible surface capability interface
//!
//! The host provides the actual accessible elements (platform accessibility
//! tree, DOM, whatever the frontend exposes to AT software). This layer only
//! needs the small set of operations below, so the window, boundary and
//! announcer logic stays testable against an in-memory implementation.

/// Opaque handle to a row node on the accessible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// AT-visible attributes set on row nodes.
///
/// Position and set size are 1-based so AT software can announce
/// "line X of Y" directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAttr {
    /// Absolute 1-based line number of the row
    PositionInSet(usize),
    /// Total line count across scrollback and screen
    SetSize(usize),
}

/// Which end of the window a focus subscription guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundarySide {
    Top,
    Bottom,
}

/// Minimal capability interface over the host accessible surface.
///
/// All operations are infallible from this layer's point of view; a host
/// that can fail internally must absorb the failure itself. The surface is
/// write-only here; nothing in the core reads state back from it.
pub trait AccessibleSurface {
    /// Create a detached row node
    fn create_node(&mut self) -> NodeId;

    /// Insert a node into the row container at the given position
    fn insert_node(&mut self, node: NodeId, index: usize);

    /// Remove a node from the row container and release it
    fn remove_node(&mut self, node: NodeId);

    /// Replace the node's displayed text
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Set an AT attribute on the node
    fn set_attribute(&mut self, node: NodeId, attr: NodeAttr);

    /// Set the node's visual height in pixels
    fn set_height(&mut self, node: NodeId, px: f32);

    /// Subscribe the boundary-crossing handler to focus events on the node
    fn add_focus_listener(&mut self, node: NodeId, side: BoundarySide);

    /// Remove the focus subscription for the given side from the node
    fn remove_focus_listener(&mut self, node: NodeId, side: BoundarySide);

    /// Move AT focus to the node
    fn focus(&mut self, node: NodeId);

    /// Append text to the live region
    fn live_region_append(&mut self, text: &str);

    /// Clear the live region's accumulated text
    fn live_region_clear(&mut self);

    /// Attach or detach the live region from the accessible root
    fn live_region_set_attached(&mut self, attached: bool);

    /// Attach or detach the whole accessible subtree from the host root
    fn set_attached(&mut self, attached: bool);
}
