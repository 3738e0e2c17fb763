//! Accessibility manager
//!
//! The single handle the host embeds. Construction attaches the accessible
//! subtree and builds the row window; every terminal, renderer and host
//! event is routed to exactly one component; `tick` runs once per host
//! scheduling tick and drains the deferred work; `dispose` releases
//! everything, after which every entry point is a no-op.

use crate::announce::LiveRegionAnnouncer;
use crate::boundary::{BoundaryFocusController, BoundaryHit};
use crate::config::AccessibilityConfig;
use crate::debounce::RenderDebouncer;
use crate::dimensions::DimensionsSync;
use crate::event::TerminalEvent;
use crate::surface::{AccessibleSurface, NodeId};
use crate::term::{RendererMetrics, TerminalView};
use crate::window::RowWindow;

/// Owns the accessible surface and coordinates all components.
pub struct AccessibilityManager<S: AccessibleSurface> {
    surface: S,
    window: RowWindow,
    debouncer: RenderDebouncer,
    boundary: BoundaryFocusController,
    announcer: LiveRegionAnnouncer,
    disposed: bool,
}

impl<S: AccessibleSurface> AccessibilityManager<S> {
    /// Attach the accessible subtree and build the window sized to the
    /// terminal's current rows. The first `tick` renders every row.
    pub fn new<T, R>(
        mut surface: S,
        term: &T,
        renderer: &R,
        config: AccessibilityConfig,
    ) -> Self
    where
        T: TerminalView,
        R: RendererMetrics,
    {
        surface.set_attached(true);
        let window = RowWindow::new(&mut surface, term.rows());
        DimensionsSync::resync(&mut surface, &window, renderer);

        let mut debouncer = RenderDebouncer::new();
        if !window.is_empty() {
            debouncer.refresh(0, window.len() - 1);
        }

        log::debug!("accessibility manager attached with {} rows", window.len());
        Self {
            surface,
            window,
            debouncer,
            boundary: BoundaryFocusController::new(),
            announcer: LiveRegionAnnouncer::new(&config),
            disposed: false,
        }
    }

    /// Route one terminal or host event to its component.
    pub fn handle_event<R: RendererMetrics>(&mut self, renderer: &R, event: TerminalEvent) {
        if self.disposed {
            return;
        }
        match event {
            TerminalEvent::Resize { cols: _, rows } => {
                self.window.resize(&mut self.surface, rows);
                DimensionsSync::resync(&mut self.surface, &self.window, renderer);
                self.refresh_all();
            }
            TerminalEvent::Refresh { start, end } => {
                self.debouncer.refresh(start, end);
            }
            TerminalEvent::Scroll => {
                self.refresh_all();
            }
            TerminalEvent::Char(ch) => {
                self.announcer.on_char(&mut self.surface, ch);
            }
            TerminalEvent::LineFeed => {
                self.announcer.on_char(&mut self.surface, '\n');
            }
            TerminalEvent::Tab(spaces) => {
                self.announcer.on_tab(&mut self.surface, spaces);
            }
            TerminalEvent::KeyPress(ch) => {
                self.announcer.on_key(&mut self.surface, ch);
            }
            TerminalEvent::Blur => {
                self.announcer.on_blur(&mut self.surface);
            }
            TerminalEvent::DpiChange
            | TerminalEvent::RendererResize
            | TerminalEvent::WindowResize => {
                DimensionsSync::resync(&mut self.surface, &self.window, renderer);
            }
        }
    }

    /// Process an AT focus event on `target` arriving from `related`.
    ///
    /// Returns `true` when a boundary crossing consumed the event and the
    /// host must suppress its default focus traversal.
    pub fn handle_focus<T, R>(
        &mut self,
        term: &mut T,
        renderer: &R,
        target: NodeId,
        related: Option<NodeId>,
    ) -> bool
    where
        T: TerminalView,
        R: RendererMetrics,
    {
        if self.disposed {
            return false;
        }
        let consumed = self.boundary.handle_focus(
            &mut self.surface,
            term,
            &mut self.window,
            target,
            related,
        );
        if consumed {
            // The shifted window shows one new line and fresh metadata on
            // every row; the new node also needs its height
            DimensionsSync::resync(&mut self.surface, &self.window, renderer);
            self.refresh_all();
        }
        consumed
    }

    /// Run once per host scheduling tick: flush at most one coalesced
    /// render and perform a pending live-region reattachment.
    pub fn tick<T: TerminalView>(&mut self, term: &T) {
        if self.disposed {
            return;
        }
        if let Some((start, end)) = self.debouncer.take_pending() {
            self.window.render_range(&mut self.surface, term, start, end);
        }
        self.announcer.flush_reattach(&mut self.surface);
    }

    /// Release every node and subscription and detach the subtree. All
    /// later calls on this manager are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.debouncer.dispose();
        self.window.clear(&mut self.surface);
        self.surface.set_attached(false);
        log::debug!("accessibility manager disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of row nodes in the window
    pub fn row_count(&self) -> usize {
        self.window.len()
    }

    /// Edge classification of the most recent focus event
    pub fn boundary_state(&self) -> BoundaryHit {
        self.boundary.state()
    }

    /// The underlying surface, for snapshots and assertions
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Node at the given window index
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.window.node_at(index)
    }

    fn refresh_all(&mut self) {
        if !self.window.is_empty() {
            self.debouncer.refresh(0, self.window.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRenderer, MemorySurface, MemoryTerminal};

    fn setup() -> (AccessibilityManager<MemorySurface>, MemoryTerminal, MemoryRenderer) {
        let mut term = MemoryTerminal::new(80, 4);
        term.feed_str("one\ntwo\nthree\nfour");
        let renderer = MemoryRenderer::with_cell_height(17.0);
        let manager = AccessibilityManager::new(
            MemorySurface::new(),
            &term,
            &renderer,
            AccessibilityConfig::default(),
        );
        (manager, term, renderer)
    }

    #[test]
    fn test_construction_attaches_and_sizes_window() {
        let (mut manager, term, _renderer) = setup();
        assert!(manager.surface().is_attached());
        assert_eq!(manager.row_count(), 4);
        assert_eq!(manager.surface().focus_listeners().len(), 2);

        // First tick renders every row
        manager.tick(&term);
        let top = manager.node_at(0).unwrap();
        assert_eq!(manager.surface().node_text(top), "one");
        assert_eq!(manager.surface().node_position(top), Some(1));
        assert_eq!(manager.surface().node_height(top), Some(17.0));
    }

    #[test]
    fn test_resize_event_tracks_row_count() {
        let (mut manager, mut term, renderer) = setup();
        term.resize(80, 7);
        manager.handle_event(&renderer, TerminalEvent::Resize { cols: 80, rows: 7 });
        assert_eq!(manager.row_count(), 7);
        assert_eq!(manager.surface().focus_listeners().len(), 2);
    }

    #[test]
    fn test_dispose_detaches_everything() {
        let (mut manager, term, _renderer) = setup();
        manager.tick(&term);
        manager.dispose();
        assert!(manager.is_disposed());
        assert!(!manager.surface().is_attached());
        assert_eq!(manager.surface().row_count(), 0);
        assert!(manager.surface().focus_listeners().is_empty());
    }

    #[test]
    fn test_events_after_dispose_are_noops() {
        let (mut manager, mut term, renderer) = setup();
        manager.dispose();
        let mutations = manager.surface().mutation_count();

        manager.handle_event(&renderer, TerminalEvent::Char('x'));
        manager.handle_event(&renderer, TerminalEvent::Refresh { start: 0, end: 3 });
        manager.handle_event(&renderer, TerminalEvent::Scroll);
        manager.tick(&term);
        let top = NodeId(0);
        assert!(!manager.handle_focus(&mut term, &renderer, top, None));

        assert_eq!(manager.surface().mutation_count(), mutations);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (mut manager, _term, _renderer) = setup();
        manager.dispose();
        let mutations = manager.surface().mutation_count();
        manager.dispose();
        assert_eq!(manager.surface().mutation_count(), mutations);
    }
}
