//! Headless harness
//!
//! Drives an [`AccessibilityManager`] wired to the in-memory collaborators
//! from a line-oriented event script, for testing and generating
//! deterministic snapshots without a host frontend.
//!
//! Script commands, one per line (`#` starts a comment):
//!
//! ```text
//! feed <text>          terminal output; \n embeds a line feed
//! key <char>           user key press
//! tab <n>              tab advancing n cells
//! blur                 terminal loses focus
//! resize <cols> <rows> terminal resize
//! scroll <delta>       scroll the viewport by a signed line count
//! cell-height <px>     renderer re-measures its cell height
//! focus <idx> <from>   AT focus on window index, arriving from index ("-" = outside)
//! tick                 one scheduling tick
//! dispose              release the accessibility layer
//! ```

use crate::config::AccessibilityConfig;
use crate::event::TerminalEvent;
use crate::manager::AccessibilityManager;
use crate::memory::{MemoryRenderer, MemorySurface, MemoryTerminal};
use crate::snapshot::AccessibilitySnapshot;
use crate::term::TerminalView;

/// A manager plus in-memory collaborators, driven by script commands.
pub struct HeadlessRun {
    term: MemoryTerminal,
    renderer: MemoryRenderer,
    manager: AccessibilityManager<MemorySurface>,
}

impl HeadlessRun {
    pub fn new(cols: usize, rows: usize, config: AccessibilityConfig) -> Self {
        let term = MemoryTerminal::new(cols, rows);
        let renderer = MemoryRenderer::with_cell_height(16.0);
        let manager = AccessibilityManager::new(MemorySurface::new(), &term, &renderer, config);
        Self { term, renderer, manager }
    }

    /// Apply a whole script, one command per line.
    pub fn run_script(&mut self, script: &str) {
        for line in script.lines() {
            self.apply_line(line);
        }
    }

    /// Apply a single script line. Blank lines, comments and unknown
    /// commands are skipped; malformed arguments fall back to no-ops.
    pub fn apply_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (line, ""),
        };

        match command {
            "feed" => self.feed(&unescape(rest)),
            "key" => {
                if let Some(ch) = rest.chars().next() {
                    self.handle(TerminalEvent::KeyPress(ch));
                }
            }
            "tab" => {
                if let Ok(spaces) = rest.trim().parse() {
                    self.handle(TerminalEvent::Tab(spaces));
                }
            }
            "blur" => self.handle(TerminalEvent::Blur),
            "resize" => {
                let mut parts = rest.split_whitespace();
                if let (Some(Ok(cols)), Some(Ok(rows))) =
                    (parts.next().map(str::parse), parts.next().map(str::parse))
                {
                    self.term.resize(cols, rows);
                    self.handle(TerminalEvent::Resize { cols, rows });
                }
            }
            "scroll" => {
                if let Ok(delta) = rest.trim().parse::<isize>() {
                    self.term.scroll_lines(delta);
                    self.handle(TerminalEvent::Scroll);
                }
            }
            "cell-height" => {
                if let Ok(px) = rest.trim().parse::<f32>() {
                    self.renderer.set_cell_height(px);
                    self.handle(TerminalEvent::RendererResize);
                }
            }
            "focus" => {
                let mut parts = rest.split_whitespace();
                let target = parts.next().and_then(|p| p.parse::<usize>().ok());
                let related = match parts.next() {
                    Some("-") | None => None,
                    Some(p) => p.parse::<usize>().ok(),
                };
                if let Some(target) = target.and_then(|i| self.manager.node_at(i)) {
                    let related = related.and_then(|i| self.manager.node_at(i));
                    self.manager
                        .handle_focus(&mut self.term, &self.renderer, target, related);
                }
            }
            "tick" => self.manager.tick(&self.term),
            "dispose" => self.manager.dispose(),
            _ => log::warn!("unknown script command: {}", command),
        }
    }

    /// Snapshot of the current accessible state
    pub fn snapshot(&self) -> AccessibilitySnapshot {
        AccessibilitySnapshot::from_surface(self.manager.surface())
    }

    /// Feed terminal output and deliver the matching data-stream events,
    /// the way a host forwards its parser's side effects.
    fn feed(&mut self, text: &str) {
        self.term.feed_str(text);
        for ch in text.chars() {
            if ch == '\n' {
                self.handle(TerminalEvent::LineFeed);
            } else {
                self.handle(TerminalEvent::Char(ch));
            }
        }
        // Output may have scrolled the pinned viewport
        self.handle(TerminalEvent::Scroll);
    }

    fn handle(&mut self, event: TerminalEvent) {
        self.manager.handle_event(&self.renderer, event);
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
