//! Mimi: screen reader accessibility layer for terminal emulators
//!
//! Mimi mirrors the visible terminal rows into a small accessible window
//! that AT software can navigate, virtualized over an unbounded scrollback:
//!
//! - `window`: the row-node window mirroring the viewport
//! - `boundary`: focus-driven window shifting through history
//! - `announce`: live region announcements with typed-echo suppression
//! - `debounce`: one coalesced render per scheduling tick
//! - `dimensions`: node heights synced to the renderer's cell height
//! - `manager`: the disposable handle hosts embed
//!
//! The host supplies its terminal and renderer behind the [`TerminalView`]
//! and [`RendererMetrics`] traits and its accessible elements behind
//! [`AccessibleSurface`]; the `memory` module has in-memory implementations
//! for tests and the headless harness.

pub mod announce;
pub mod boundary;
pub mod config;
pub mod debounce;
pub mod dimensions;
pub mod event;
pub mod headless;
pub mod manager;
pub mod memory;
pub mod snapshot;
pub mod surface;
pub mod term;
pub mod window;

pub use announce::{LiveRegionAnnouncer, TOO_MUCH_OUTPUT};
pub use boundary::{BoundaryFocusController, BoundaryHit};
pub use config::AccessibilityConfig;
pub use debounce::RenderDebouncer;
pub use dimensions::DimensionsSync;
pub use event::TerminalEvent;
pub use headless::HeadlessRun;
pub use manager::AccessibilityManager;
pub use snapshot::{AccessibilitySnapshot, RowSnapshot};
pub use surface::{AccessibleSurface, BoundarySide, NodeAttr, NodeId};
pub use term::{RendererMetrics, TerminalView};
pub use window::{RowWindow, EMPTY_ROW_PLACEHOLDER};
