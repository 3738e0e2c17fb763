//! Live region announcements
//!
//! Freshly written terminal output is appended to a live region so AT
//! software reads it aloud without stealing focus. Characters the user just
//! typed are already echoed audibly by the input method, so a FIFO of
//! expected echo characters suppresses double-speaking them. Announcement
//! stops after a configurable number of rows; a burst of output past the cap
//! is summarized by a one-time truncation notice.

use std::collections::VecDeque;

use crate::config::AccessibilityConfig;
use crate::surface::AccessibleSurface;

/// Appended once when announced output exceeds the row cap.
pub const TOO_MUCH_OUTPUT: &str =
    "Too much output to announce, navigate to rows manually to read";

/// Consumes the character/tab/key/blur stream and maintains the live region.
#[derive(Debug)]
pub struct LiveRegionAnnouncer {
    /// Characters expected to echo back from the terminal because the user
    /// just typed them. Can desynchronize under fast concurrent typing and
    /// streaming output; a same-value stream character then consumes the
    /// queued entry. Accepted approximation.
    echo_queue: VecDeque<char>,
    /// Rows announced since the last clear
    line_count: usize,
    /// Row cap before the truncation notice
    max_rows: usize,
    /// Detach/reattach the live region to retrigger announcement
    reattach_workaround: bool,
    /// Whether the live region is currently attached to the accessible root
    attached: bool,
    /// Whether the live region holds any text
    has_text: bool,
    /// Reattachment deferred to the next tick
    reattach_pending: bool,
}

impl LiveRegionAnnouncer {
    pub fn new(config: &AccessibilityConfig) -> Self {
        Self {
            echo_queue: VecDeque::new(),
            line_count: 0,
            max_rows: config.max_announce_rows,
            reattach_workaround: config.reattach_live_region,
            attached: true,
            has_text: false,
            reattach_pending: false,
        }
    }

    /// Rows announced since the last clear (stops counting at cap + 1)
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// A character arrived on the terminal data stream.
    pub fn on_char<S: AccessibleSurface>(&mut self, surface: &mut S, ch: char) {
        if self.line_count > self.max_rows {
            return;
        }

        // Head of the queue is the character we expect the user's own
        // keystroke to echo back; a match is not announced. An empty queue
        // means the output is not user-typed.
        let announce = match self.echo_queue.pop_front() {
            Some(expected) => expected != ch,
            None => true,
        };
        if announce {
            if ch == ' ' {
                // Non-breaking space keeps inter-character spacing visible
                // in AT caption renderings
                surface.live_region_append("\u{a0}");
            } else {
                surface.live_region_append(ch.encode_utf8(&mut [0; 4]));
            }
            self.has_text = true;
        }

        if ch == '\n' {
            self.line_count += 1;
            if self.line_count == self.max_rows + 1 {
                log::debug!("live region cap reached after {} rows", self.max_rows);
                surface.live_region_append(TOO_MUCH_OUTPUT);
                self.has_text = true;
            }
        }

        if self.reattach_workaround && !self.attached && self.has_text {
            self.reattach_pending = true;
        }
    }

    /// A tab advanced the cursor by `spaces` cells.
    pub fn on_tab<S: AccessibleSurface>(&mut self, surface: &mut S, spaces: usize) {
        for _ in 0..spaces {
            self.on_char(surface, ' ');
        }
    }

    /// The user pressed a key producing `ch`.
    pub fn on_key<S: AccessibleSurface>(&mut self, surface: &mut S, ch: char) {
        self.clear(surface);
        self.echo_queue.push_back(ch);
    }

    /// The terminal lost input focus.
    pub fn on_blur<S: AccessibleSurface>(&mut self, surface: &mut S) {
        self.clear(surface);
    }

    /// Perform a deferred live-region reattachment. Called once per tick.
    pub fn flush_reattach<S: AccessibleSurface>(&mut self, surface: &mut S) {
        if self.reattach_pending {
            self.reattach_pending = false;
            self.attached = true;
            surface.live_region_set_attached(true);
        }
    }

    fn clear<S: AccessibleSurface>(&mut self, surface: &mut S) {
        surface.live_region_clear();
        self.line_count = 0;
        self.has_text = false;
        self.reattach_pending = false;
        if self.reattach_workaround && self.attached {
            surface.live_region_set_attached(false);
            self.attached = false;
        }
    }
}
