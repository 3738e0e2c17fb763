//! Accessible state snapshot for testing and debugging
//!
//! Snapshots capture what AT software would currently see (the row nodes
//! with their text and position metadata, plus the live region) in a
//! serializable format for deterministic testing and the headless harness.

use serde::{Deserialize, Serialize};

use crate::memory::MemorySurface;

/// A snapshot of the accessible surface state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilitySnapshot {
    /// Row nodes in container order
    pub rows: Vec<RowSnapshot>,
    /// Accumulated live region text
    pub live_region: String,
    /// Whether the live region is attached to the accessible root
    pub live_region_attached: bool,
    /// Whether the whole subtree is attached to the host root
    pub attached: bool,
}

/// Snapshot of a single row node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub text: String,
    /// 1-based absolute line number, unset before the first flush
    pub position_in_set: Option<usize>,
    /// Total line count, unset before the first flush
    pub set_size: Option<usize>,
    pub height: Option<f32>,
}

impl AccessibilitySnapshot {
    /// Capture the current state of an in-memory surface
    pub fn from_surface(surface: &MemorySurface) -> Self {
        let rows = surface
            .row_nodes()
            .iter()
            .map(|&node| RowSnapshot {
                text: surface.node_text(node).to_string(),
                position_in_set: surface.node_position(node),
                set_size: surface.node_set_size(node),
                height: surface.node_height(node),
            })
            .collect();

        Self {
            rows,
            live_region: surface.live_region_text().to_string(),
            live_region_attached: surface.live_region_attached(),
            attached: surface.is_attached(),
        }
    }

    /// Row texts joined with newlines, the way a screen reader would walk
    /// the window top to bottom
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
