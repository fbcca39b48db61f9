//! Renderer boundary. Implementations only draw; every value they receive
//! is already resolved and formatted.

use crate::format::{ProjectsView, StatsView};
use crate::log_buffer::FeedView;
use crate::state::StateDisplay;
use crate::types::{ActivityLine, ConnectionStatus};

pub trait Renderer: Send {
    /// The indicator changed.
    fn state(&mut self, display: &StateDisplay);

    /// The feed changed (or was initialised).
    fn feed(&mut self, feed: &FeedView);

    fn connection(&mut self, status: ConnectionStatus);

    fn activity(&mut self, line: &ActivityLine);

    fn stats(&mut self, stats: &StatsView);

    fn projects(&mut self, projects: &ProjectsView);

    /// Once per clock tick.
    fn clock(&mut self, uptime: &str, wall_clock: &str);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn state(&mut self, display: &StateDisplay) {
        (**self).state(display);
    }

    fn feed(&mut self, feed: &FeedView) {
        (**self).feed(feed);
    }

    fn connection(&mut self, status: ConnectionStatus) {
        (**self).connection(status);
    }

    fn activity(&mut self, line: &ActivityLine) {
        (**self).activity(line);
    }

    fn stats(&mut self, stats: &StatsView) {
        (**self).stats(stats);
    }

    fn projects(&mut self, projects: &ProjectsView) {
        (**self).projects(projects);
    }

    fn clock(&mut self, uptime: &str, wall_clock: &str) {
        (**self).clock(uptime, wall_clock);
    }
}

// ─── RecordingRenderer ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    State(StateDisplay),
    Feed(FeedView),
    Connection(ConnectionStatus),
    Activity(ActivityLine),
    Stats(StatsView),
    Projects(ProjectsView),
    Clock { uptime: String, wall_clock: String },
}

/// Records every notification in order. Used by tests across the workspace.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn state_calls(&self) -> Vec<StateDisplay> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::State(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn connection_calls(&self) -> Vec<ConnectionStatus> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::Connection(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn last_feed(&self) -> Option<&FeedView> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::Feed(f) => Some(f),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn state(&mut self, display: &StateDisplay) {
        self.calls.push(RenderCall::State(*display));
    }

    fn feed(&mut self, feed: &FeedView) {
        self.calls.push(RenderCall::Feed(feed.clone()));
    }

    fn connection(&mut self, status: ConnectionStatus) {
        self.calls.push(RenderCall::Connection(status));
    }

    fn activity(&mut self, line: &ActivityLine) {
        self.calls.push(RenderCall::Activity(line.clone()));
    }

    fn stats(&mut self, stats: &StatsView) {
        self.calls.push(RenderCall::Stats(stats.clone()));
    }

    fn projects(&mut self, projects: &ProjectsView) {
        self.calls.push(RenderCall::Projects(projects.clone()));
    }

    fn clock(&mut self, uptime: &str, wall_clock: &str) {
        self.calls.push(RenderCall::Clock {
            uptime: uptime.to_string(),
            wall_clock: wall_clock.to_string(),
        });
    }
}
