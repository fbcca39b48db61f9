//! Dashboard context: the single owner of all mutable dashboard state.
//!
//! One instance per scheduler. Poll outcomes are applied here and every
//! visible change is forwarded to the [`Renderer`].

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::PollError;
use crate::format::{ProjectsView, StatsView};
use crate::log_buffer::LogAggregator;
use crate::render::Renderer;
use crate::state::{StateDisplay, StateTracker};
use crate::types::{
    ActivityLine, ConnectionStatus, LogEntry, LogEntryInput, ProjectInfo, StateId, StatsInfo,
    StatusSnapshot,
};
use crate::uptime::{UptimeClock, wall_clock};

/// Serializable point-in-time view of the whole dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub state: Option<StateDisplay>,
    pub connection: ConnectionStatus,
    pub activity: ActivityLine,
    pub logs: Vec<LogEntry>,
    pub stats: Option<StatsView>,
    pub projects: Option<ProjectsView>,
    pub uptime: String,
}

pub struct Dashboard<R> {
    tracker: StateTracker,
    logs: LogAggregator,
    connection: ConnectionStatus,
    uptime: UptimeClock,
    activity: ActivityLine,
    stats: Option<StatsView>,
    projects: Option<ProjectsView>,
    /// Sequence number handed to the next status request.
    next_seq: u64,
    /// Highest sequence number whose outcome was applied.
    last_applied_seq: Option<u64>,
    renderer: R,
}

impl<R: Renderer> Dashboard<R> {
    pub fn new(renderer: R, max_logs: usize, started_at: DateTime<Local>) -> Self {
        Self {
            tracker: StateTracker::new(),
            logs: LogAggregator::with_capacity(max_logs),
            connection: ConnectionStatus::Connecting,
            uptime: UptimeClock::new(started_at),
            activity: ActivityLine::default(),
            stats: None,
            projects: None,
            next_seq: 0,
            last_applied_seq: None,
            renderer,
        }
    }

    /// Initial render: sleeping indicator, waiting feed, connecting pill,
    /// zero uptime.
    pub fn start(&mut self, now: DateTime<Local>) {
        self.set_state(StateId::Sleeping.as_str());
        self.renderer.feed(&self.logs.feed());
        self.renderer.connection(self.connection);
        self.tick_clock(now);
    }

    /// Reserve the sequence number for a status request about to be sent.
    pub fn next_status_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Apply the outcome of status request `seq`.
    ///
    /// Outcomes arriving after a newer request's outcome was applied are
    /// dropped. Returns whether the outcome was applied.
    pub fn apply_status(
        &mut self,
        seq: u64,
        outcome: Result<StatusSnapshot, PollError>,
        now: DateTime<Local>,
    ) -> bool {
        if self.last_applied_seq.is_some_and(|last| seq <= last) {
            tracing::debug!(seq, last = ?self.last_applied_seq, "dropping stale status response");
            return false;
        }
        self.last_applied_seq = Some(seq);

        match outcome {
            Ok(snapshot) => {
                let activity = ActivityLine::from(&snapshot);
                let StatusSnapshot { state, logs, .. } = snapshot;

                self.set_state(state.as_deref().unwrap_or("sleeping"));

                if let Some(logs) = logs.filter(|l| !l.is_empty()) {
                    self.push_logs(logs, now);
                }

                if activity != self.activity {
                    self.activity = activity;
                    self.renderer.activity(&self.activity);
                }

                self.set_connection(ConnectionStatus::Live);
            }
            Err(e) => {
                tracing::debug!(seq, error = %e, "status poll failed");
                self.set_connection(ConnectionStatus::Offline);
            }
        }
        true
    }

    /// Projects refresh: failures leave the current gallery untouched.
    pub fn apply_projects(&mut self, outcome: Result<Vec<ProjectInfo>, PollError>) {
        match outcome {
            Ok(projects) => {
                let view = ProjectsView::from(projects);
                self.renderer.projects(&view);
                self.projects = Some(view);
            }
            Err(e) => tracing::debug!(error = %e, "projects refresh failed"),
        }
    }

    /// Stats refresh: failures leave the current figures untouched.
    pub fn apply_stats(&mut self, outcome: Result<StatsInfo, PollError>) {
        match outcome {
            Ok(stats) => {
                let view = StatsView::from(stats);
                self.renderer.stats(&view);
                self.stats = Some(view);
            }
            Err(e) => tracing::debug!(error = %e, "stats refresh failed"),
        }
    }

    pub fn tick_clock(&mut self, now: DateTime<Local>) {
        let uptime = self.uptime.elapsed(now);
        self.renderer.clock(&uptime, &wall_clock(now));
    }

    pub fn set_state(&mut self, candidate: &str) {
        if let Some(shown) = self.tracker.set_state(candidate) {
            tracing::debug!(state = %shown.id, "state changed");
            self.renderer.state(&shown);
        }
    }

    pub fn push_logs(&mut self, entries: Vec<LogEntryInput>, now: DateTime<Local>) {
        self.logs.push(entries, now);
        self.renderer.feed(&self.logs.feed());
    }

    fn set_connection(&mut self, status: ConnectionStatus) {
        if self.connection != status {
            tracing::info!(from = %self.connection, to = %status, "connection changed");
            self.connection = status;
            self.renderer.connection(status);
        }
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn current_state(&self) -> Option<StateId> {
        self.tracker.current()
    }

    pub fn logs(&self) -> &LogAggregator {
        &self.logs
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn summary(&self, now: DateTime<Local>) -> DashboardSummary {
        DashboardSummary {
            state: self.tracker.display(),
            connection: self.connection,
            activity: self.activity.clone(),
            logs: self.logs.snapshot(),
            stats: self.stats.clone(),
            projects: self.projects.clone(),
            uptime: self.uptime.elapsed(now),
        }
    }
}
