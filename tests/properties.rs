//! Property-based tests for the window and debouncer invariants

use proptest::prelude::*;

use mimi::memory::{MemoryRenderer, MemorySurface, MemoryTerminal};
use mimi::{
    AccessibilityConfig, AccessibilityManager, BoundarySide, RenderDebouncer, TerminalEvent,
};

proptest! {
    /// After any resize sequence settles, the window length matches the
    /// terminal rows and exactly two focus subscriptions sit on the
    /// extremes.
    #[test]
    fn prop_resize_sequence_preserves_invariants(sizes in prop::collection::vec(1usize..=60, 1..20)) {
        let mut term = MemoryTerminal::new(80, 4);
        term.feed_str("a\nb\nc\nd");
        let renderer = MemoryRenderer::with_cell_height(16.0);
        let mut manager = AccessibilityManager::new(
            MemorySurface::new(),
            &term,
            &renderer,
            AccessibilityConfig::default(),
        );

        for rows in sizes {
            term.resize(80, rows);
            manager.handle_event(&renderer, TerminalEvent::Resize { cols: 80, rows });
            manager.tick(&term);

            prop_assert_eq!(manager.row_count(), rows);
            let listeners = manager.surface().focus_listeners();
            prop_assert_eq!(listeners.len(), 2);
            let top = manager.node_at(0).unwrap();
            let bottom = manager.node_at(rows - 1).unwrap();
            prop_assert!(listeners.contains(&(top, BoundarySide::Top)));
            prop_assert!(listeners.contains(&(bottom, BoundarySide::Bottom)));
        }
    }

    /// Any sequence of refresh calls within one tick drains as a single
    /// range covering exactly the union of the requests.
    #[test]
    fn prop_refresh_requests_drain_as_union(ranges in prop::collection::vec((0usize..50, 0usize..50), 1..30)) {
        let mut debouncer = RenderDebouncer::new();
        let mut expected: Option<(usize, usize)> = None;
        for (a, b) in ranges {
            let (start, end) = (a.min(b), a.max(b));
            debouncer.refresh(start, end);
            expected = match expected {
                Some((s, e)) => Some((s.min(start), e.max(end))),
                None => Some((start, end)),
            };
        }
        prop_assert_eq!(debouncer.take_pending(), expected);
        prop_assert_eq!(debouncer.take_pending(), None);
    }

    /// A flush mutates every row inside the unioned range and no row
    /// outside it.
    #[test]
    fn prop_flush_touches_only_the_union(
        ranges in prop::collection::vec((0usize..6, 0usize..6), 1..8),
    ) {
        let rows = 6;
        let mut term = MemoryTerminal::new(80, rows);
        term.feed_str("r0\nr1\nr2\nr3\nr4\nr5");
        let renderer = MemoryRenderer::with_cell_height(16.0);
        let mut manager = AccessibilityManager::new(
            MemorySurface::new(),
            &term,
            &renderer,
            AccessibilityConfig::default(),
        );
        manager.tick(&term);

        for index in 0..rows {
            term.set_line(index, &format!("new{}", index));
        }
        let mut union: Option<(usize, usize)> = None;
        for (a, b) in ranges {
            let (start, end) = (a.min(b), a.max(b));
            manager.handle_event(&renderer, TerminalEvent::Refresh { start, end });
            union = match union {
                Some((s, e)) => Some((s.min(start), e.max(end))),
                None => Some((start, end)),
            };
        }
        manager.tick(&term);

        let (start, end) = union.unwrap();
        for index in 0..rows {
            let node = manager.node_at(index).unwrap();
            let text = manager.surface().node_text(node);
            if index >= start && index <= end {
                prop_assert_eq!(text, format!("new{}", index));
            } else {
                prop_assert_eq!(text, format!("r{}", index));
            }
        }
    }

    /// Boundary crossings never change the window length, and the listener
    /// invariant holds after any interleaving of crossings in both
    /// directions.
    #[test]
    fn prop_boundary_crossings_keep_window_stable(directions in prop::collection::vec(any::<bool>(), 1..25)) {
        let mut term = MemoryTerminal::new(80, 3);
        term.feed_str("l0\nl1\nl2\nl3\nl4\nl5\nl6\nl7");
        let renderer = MemoryRenderer::with_cell_height(16.0);
        let mut manager = AccessibilityManager::new(
            MemorySurface::new(),
            &term,
            &renderer,
            AccessibilityConfig::default(),
        );
        manager.tick(&term);

        for upward in directions {
            let (target, related) = if upward {
                (manager.node_at(0).unwrap(), manager.node_at(1))
            } else {
                (manager.node_at(2).unwrap(), manager.node_at(1))
            };
            manager.handle_focus(&mut term, &renderer, target, related);
            manager.tick(&term);

            prop_assert_eq!(manager.row_count(), 3);
            let listeners = manager.surface().focus_listeners();
            prop_assert_eq!(listeners.len(), 2);
            let top = manager.node_at(0).unwrap();
            let bottom = manager.node_at(2).unwrap();
            prop_assert!(listeners.contains(&(top, BoundarySide::Top)));
            prop_assert!(listeners.contains(&(bottom, BoundarySide::Bottom)));
        }
    }
}
