//! agentdash-core: dashboard state for a polled agent status API.
//! Holds the bounded activity feed, the debounced state indicator, the uptime
//! clock and the renderer boundary. No IO: every time-dependent operation
//! takes `now` explicitly.

pub mod dashboard;
pub mod error;
pub mod format;
pub mod log_buffer;
pub mod render;
pub mod state;
pub mod types;
pub mod uptime;

pub use dashboard::{Dashboard, DashboardSummary};
pub use error::{PollError, UnknownStateId};
pub use format::{ProjectCard, ProjectsView, StatsView, fmt_count};
pub use log_buffer::{FeedView, LogAggregator, MAX_LOGS};
pub use render::{RecordingRenderer, RenderCall, Renderer};
pub use state::{StateDisplay, StateTracker};
pub use types::{
    ActivityLine, ConnectionStatus, LogEntry, LogEntryInput, ProjectInfo, StateId, StatsInfo,
    StatusSnapshot,
};
pub use uptime::UptimeClock;
