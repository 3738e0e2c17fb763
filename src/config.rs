//! Configuration for the accessibility layer

use serde::{Deserialize, Serialize};

/// Default number of announced rows before output is truncated
pub const DEFAULT_MAX_ANNOUNCE_ROWS: usize = 20;

/// Accessibility layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    /// Number of rows the live region announces before appending the
    /// truncation notice and suppressing further output
    pub max_announce_rows: usize,
    /// Detach and reattach the live region so populated-while-detached
    /// content is announced. Needed on platforms whose AT stack only
    /// announces live regions on attachment.
    pub reattach_live_region: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            max_announce_rows: DEFAULT_MAX_ANNOUNCE_ROWS,
            reattach_live_region: false,
        }
    }
}

impl AccessibilityConfig {
    /// Configuration with the reattach workaround set for the build platform
    pub fn for_platform() -> Self {
        Self {
            reattach_live_region: cfg!(target_os = "macos"),
            ..Self::default()
        }
    }
}
