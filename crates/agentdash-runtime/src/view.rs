//! Retained view model for the full-screen dashboard.
//! The renderer side of the scheduler writes into it; the TUI frame reads it.

use agentdash_core::{
    ActivityLine, ConnectionStatus, FeedView, ProjectsView, Renderer, StateDisplay, StatsView,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub state: Option<StateDisplay>,
    pub feed: FeedView,
    pub connection: ConnectionStatus,
    pub activity: ActivityLine,
    pub stats: Option<StatsView>,
    pub projects: Option<ProjectsView>,
    pub uptime: String,
    pub wall_clock: String,
    /// Bumped on every notification so the frame loop can skip idle redraws.
    pub revision: u64,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            state: None,
            feed: FeedView::Waiting,
            connection: ConnectionStatus::Connecting,
            activity: ActivityLine::default(),
            stats: None,
            projects: None,
            uptime: "00:00".to_string(),
            wall_clock: String::new(),
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DashboardView {
    fn state(&mut self, display: &StateDisplay) {
        self.state = Some(*display);
        self.touch();
    }

    fn feed(&mut self, feed: &FeedView) {
        self.feed = feed.clone();
        self.touch();
    }

    fn connection(&mut self, status: ConnectionStatus) {
        self.connection = status;
        self.touch();
    }

    fn activity(&mut self, line: &ActivityLine) {
        self.activity = line.clone();
        self.touch();
    }

    fn stats(&mut self, stats: &StatsView) {
        self.stats = Some(stats.clone());
        self.touch();
    }

    fn projects(&mut self, projects: &ProjectsView) {
        self.projects = Some(projects.clone());
        self.touch();
    }

    fn clock(&mut self, uptime: &str, wall_clock: &str) {
        self.uptime = uptime.to_string();
        self.wall_clock = wall_clock.to_string();
        self.touch();
    }
}
