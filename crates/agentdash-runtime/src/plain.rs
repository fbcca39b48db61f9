//! Line-oriented renderer for pipes and `--plain`.
//!
//! One line per visible change. The ticking clock is not printed.

use std::io::Write;

use agentdash_core::format::EMPTY_PROJECTS_PLACEHOLDER;
use agentdash_core::log_buffer::WAITING_PLACEHOLDER;
use agentdash_core::{
    ActivityLine, ConnectionStatus, FeedView, LogEntry, ProjectsView, Renderer, StateDisplay,
    StatsView,
};

use crate::display::{connection_indicator, kind_indicator, parse_hex_color, state_indicator};

pub struct PlainRenderer<W> {
    out: W,
    use_color: bool,
    /// `seq` of the newest entry already printed; the feed is printed
    /// incrementally.
    last_seq: Option<u64>,
}

impl<W: Write + Send> PlainRenderer<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            last_seq: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, label: &str, text: &str) {
        if let Err(e) = writeln!(self.out, "{label:<9}{text}") {
            tracing::debug!("plain output write failed: {e}");
        }
    }

    fn paint(&self, token: &str, text: &str) -> String {
        match parse_hex_color(token) {
            Some((r, g, b)) if self.use_color => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }
}

/// Entries newer than `last_seq`, oldest first.
fn unseen(entries: &[LogEntry], last_seq: Option<u64>) -> Vec<&LogEntry> {
    let mut fresh: Vec<&LogEntry> = entries
        .iter()
        .take_while(|e| last_seq.is_none_or(|seen| e.seq > seen))
        .collect();
    fresh.reverse();
    fresh
}

impl<W: Write + Send> Renderer for PlainRenderer<W> {
    fn state(&mut self, display: &StateDisplay) {
        let text = format!("{} {}", state_indicator(display.id), display.label);
        let painted = self.paint(display.color, &text);
        self.emit("state", &painted);
    }

    fn feed(&mut self, feed: &FeedView) {
        match feed {
            FeedView::Waiting => {
                if self.last_seq.is_none() {
                    self.emit("feed", WAITING_PLACEHOLDER);
                }
            }
            FeedView::Entries(entries) => {
                let lines: Vec<String> = unseen(entries, self.last_seq)
                    .into_iter()
                    .map(|e| format!("[{}] {} {}", e.time, kind_indicator(&e.kind), e.message))
                    .collect();
                for line in lines {
                    self.emit("log", &line);
                }
                self.last_seq = entries.first().map(|e| e.seq);
            }
        }
    }

    fn connection(&mut self, status: ConnectionStatus) {
        let text = format!("{} {status}", connection_indicator(status));
        self.emit("conn", &text);
    }

    fn activity(&mut self, line: &ActivityLine) {
        let mut parts: Vec<String> = [&line.activity, &line.last_action]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();
        if let Some(n) = line.projects_shipped {
            parts.push(format!("{n} shipped"));
        }
        if !parts.is_empty() {
            self.emit("activity", &parts.join(" \u{b7} "));
        }
    }

    fn stats(&mut self, stats: &StatsView) {
        let text = format!(
            "projects {} \u{b7} commits {} \u{b7} loc {}",
            stats.projects, stats.commits, stats.loc
        );
        self.emit("stats", &text);
    }

    fn projects(&mut self, projects: &ProjectsView) {
        match projects {
            ProjectsView::Empty => self.emit("projects", EMPTY_PROJECTS_PLACEHOLDER),
            ProjectsView::Cards(cards) => {
                self.emit("projects", &cards.len().to_string());
                for card in cards {
                    let mut line = format!("- {}", card.name);
                    if !card.description.is_empty() {
                        line.push_str(&format!(": {}", card.description));
                    }
                    if !card.tags.is_empty() {
                        line.push_str(&format!(" [{}]", card.tags.join(", ")));
                    }
                    if card.has_repo() {
                        line.push_str(&format!(" <{}>", card.link));
                    }
                    self.emit("", &line);
                }
            }
        }
    }

    fn clock(&mut self, _uptime: &str, _wall_clock: &str) {}
}
