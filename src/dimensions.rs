//! Node height synchronization
//!
//! Row nodes must match the renderer's actual cell height or the accessible
//! rows drift out of alignment with the painted glyphs. The height is
//! re-applied on cell-metric changes, DPI changes and host window resizes;
//! the latter two are belt-and-suspenders for platforms where the metric
//! notification is unreliable.

use crate::surface::AccessibleSurface;
use crate::term::RendererMetrics;
use crate::window::RowWindow;

/// Applies the renderer's cell height to every node in the window.
#[derive(Debug, Default)]
pub struct DimensionsSync;

impl DimensionsSync {
    /// Re-apply the current cell height to all nodes. A renderer that has
    /// not measured a font yet reports a non-positive height; that is
    /// not-ready, not an error, and the resync is skipped.
    pub fn resync<S, R>(surface: &mut S, window: &RowWindow, renderer: &R)
    where
        S: AccessibleSurface,
        R: RendererMetrics,
    {
        let height = renderer.cell_height();
        if height <= 0.0 {
            return;
        }
        for index in 0..window.len() {
            if let Some(node) = window.node_at(index) {
                surface.set_height(node, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRenderer, MemorySurface};

    #[test]
    fn test_resync_applies_height_to_all_nodes() {
        let mut surface = MemorySurface::new();
        let window = RowWindow::new(&mut surface, 4);
        let renderer = MemoryRenderer::with_cell_height(18.0);

        DimensionsSync::resync(&mut surface, &window, &renderer);

        for index in 0..window.len() {
            let node = window.node_at(index).unwrap();
            assert_eq!(surface.node_height(node), Some(18.0));
        }
    }

    #[test]
    fn test_resync_before_measurement_is_noop() {
        let mut surface = MemorySurface::new();
        let window = RowWindow::new(&mut surface, 4);
        let renderer = MemoryRenderer::unmeasured();

        DimensionsSync::resync(&mut surface, &window, &renderer);

        assert_eq!(surface.node_height(window.node_at(0).unwrap()), None);
    }
}
