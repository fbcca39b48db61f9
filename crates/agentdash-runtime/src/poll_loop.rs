//! Poll loop: wires the dashboard API into the dashboard context.
//! Three independent tickers: status poll, projects/stats refresh, clock.
//!
//! Every status and refresh tick spawns its fetches and returns immediately.
//! In-flight requests are never awaited, serialized or cancelled by later
//! ticks; the context drops status outcomes older than one already applied.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tokio::time::interval;

use agentdash_core::{Dashboard, Renderer};

use crate::client::DashboardApi;
use crate::config::DashboardConfig;

pub type SharedDashboard<R> = Arc<Mutex<Dashboard<R>>>;

pub fn shared<R: Renderer>(dashboard: Dashboard<R>) -> SharedDashboard<R> {
    Arc::new(Mutex::new(dashboard))
}

/// Run the three tickers forever. The first status poll, refresh and clock
/// tick fire immediately.
pub async fn run_poll_loop<A, R>(
    api: Arc<A>,
    dashboard: SharedDashboard<R>,
    config: &DashboardConfig,
) where
    A: DashboardApi + 'static,
    R: Renderer + 'static,
{
    let mut status_ticker = interval(config.status_interval);
    let mut refresh_ticker = interval(config.refresh_interval);
    let mut clock_ticker = interval(config.clock_interval);

    loop {
        tokio::select! {
            _ = status_ticker.tick() => {
                spawn_status_poll(&api, &dashboard).await;
            }
            _ = refresh_ticker.tick() => {
                spawn_refresh(&api, &dashboard);
            }
            _ = clock_ticker.tick() => {
                dashboard.lock().await.tick_clock(Local::now());
            }
        }
    }
}

/// Reserve a sequence number, then fetch and apply on a detached task.
pub async fn spawn_status_poll<A, R>(api: &Arc<A>, dashboard: &SharedDashboard<R>)
where
    A: DashboardApi + 'static,
    R: Renderer + 'static,
{
    let seq = dashboard.lock().await.next_status_seq();
    let api = Arc::clone(api);
    let dashboard = Arc::clone(dashboard);
    tokio::spawn(async move {
        poll_status(api.as_ref(), &dashboard, seq).await;
    });
}

/// One status poll cycle. Never fails: the outcome is handed to the
/// dashboard either way.
pub async fn poll_status<A, R>(api: &A, dashboard: &SharedDashboard<R>, seq: u64)
where
    A: DashboardApi,
    R: Renderer,
{
    let outcome = api.fetch_status().await;
    if let Err(e) = &outcome {
        tracing::debug!(seq, "status fetch failed: {e}");
    }
    dashboard.lock().await.apply_status(seq, outcome, Local::now());
}

/// Projects and stats are fetched on two independent detached tasks.
pub fn spawn_refresh<A, R>(api: &Arc<A>, dashboard: &SharedDashboard<R>)
where
    A: DashboardApi + 'static,
    R: Renderer + 'static,
{
    let projects_api = Arc::clone(api);
    let projects_dash = Arc::clone(dashboard);
    tokio::spawn(async move {
        let outcome = projects_api.fetch_projects().await;
        projects_dash.lock().await.apply_projects(outcome);
    });

    let stats_api = Arc::clone(api);
    let stats_dash = Arc::clone(dashboard);
    tokio::spawn(async move {
        let outcome = stats_api.fetch_stats().await;
        stats_dash.lock().await.apply_stats(outcome);
    });
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                tracing::warn!("cannot register SIGTERM handler: {e}");
                ctrl_c.await.ok();
                tracing::info!("received ctrl-c, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        tracing::info!("received ctrl-c, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use agentdash_core::{
        ConnectionStatus, PollError, ProjectInfo, ProjectsView, RecordingRenderer, RenderCall,
        StateId, StatsInfo, StatusSnapshot,
    };

    type StatusReply = (Duration, Result<StatusSnapshot, PollError>);

    /// Fake API with scripted, optionally delayed status replies.
    /// Once the script is exhausted every poll fails.
    struct FakeApi {
        status_replies: std::sync::Mutex<VecDeque<StatusReply>>,
        projects: Result<Vec<ProjectInfo>, PollError>,
        stats: Result<StatsInfo, PollError>,
        status_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                status_replies: std::sync::Mutex::new(VecDeque::new()),
                projects: Ok(Vec::new()),
                stats: Ok(StatsInfo::default()),
                status_calls: AtomicUsize::new(0),
                refresh_calls: AtomicUsize::new(0),
            }
        }

        fn with_status(self, delay_ms: u64, reply: Result<StatusSnapshot, PollError>) -> Self {
            self.status_replies
                .lock()
                .expect("fake lock")
                .push_back((Duration::from_millis(delay_ms), reply));
            self
        }

        fn with_stats(mut self, stats: Result<StatsInfo, PollError>) -> Self {
            self.stats = stats;
            self
        }

        fn with_projects(mut self, projects: Result<Vec<ProjectInfo>, PollError>) -> Self {
            self.projects = projects;
            self
        }
    }

    impl DashboardApi for FakeApi {
        async fn fetch_status(&self) -> Result<StatusSnapshot, PollError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            let next = self.status_replies.lock().expect("fake lock").pop_front();
            match next {
                Some((delay, reply)) => {
                    tokio::time::sleep(delay).await;
                    reply
                }
                None => Err(PollError::Transport("script exhausted".into())),
            }
        }

        async fn fetch_projects(&self) -> Result<Vec<ProjectInfo>, PollError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.projects.clone()
        }

        async fn fetch_stats(&self) -> Result<StatsInfo, PollError> {
            self.stats.clone()
        }
    }

    fn snapshot(state: &str) -> Result<StatusSnapshot, PollError> {
        Ok(StatusSnapshot {
            state: Some(state.to_string()),
            ..StatusSnapshot::default()
        })
    }

    fn new_dashboard() -> SharedDashboard<RecordingRenderer> {
        shared(Dashboard::new(RecordingRenderer::new(), 12, Local::now()))
    }

    fn config(status_ms: u64, refresh_ms: u64) -> DashboardConfig {
        DashboardConfig {
            base_url: "http://fake".into(),
            status_interval: Duration::from_millis(status_ms),
            refresh_interval: Duration::from_millis(refresh_ms),
            clock_interval: Duration::from_secs(1),
            max_logs: 12,
        }
    }

    #[tokio::test]
    async fn poll_status_applies_success() {
        let api = FakeApi::new().with_status(0, snapshot("coding"));
        let dash = new_dashboard();

        poll_status(&api, &dash, 0).await;

        let d = dash.lock().await;
        assert_eq!(d.current_state(), Some(StateId::Coding));
        assert_eq!(d.connection(), ConnectionStatus::Live);
    }

    #[tokio::test]
    async fn poll_status_failure_marks_offline() {
        let api = FakeApi::new().with_status(0, Err(PollError::Decode("not json".into())));
        let dash = new_dashboard();

        poll_status(&api, &dash, 0).await;

        let d = dash.lock().await;
        assert_eq!(d.connection(), ConnectionStatus::Offline);
        assert_eq!(d.current_state(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_polls_keep_newest() {
        // First request is slow, second is fast: the slow reply arrives last
        // and must not overwrite the newer state.
        let api = Arc::new(
            FakeApi::new()
                .with_status(1500, snapshot("coding"))
                .with_status(10, snapshot("thinking")),
        );
        let dash = new_dashboard();

        spawn_status_poll(&api, &dash).await;
        spawn_status_poll(&api, &dash).await;
        tokio::time::sleep(Duration::from_secs(2)).await;

        let d = dash.lock().await;
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 2);
        assert_eq!(d.current_state(), Some(StateId::Thinking));
        assert_eq!(d.renderer().state_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_do_not_wait_for_inflight_requests() {
        // Every reply takes longer than the poll interval.
        let mut api = FakeApi::new();
        for _ in 0..5 {
            api = api.with_status(5_000, snapshot("sleeping"));
        }
        let api = Arc::new(api);
        let dash = new_dashboard();
        let cfg = config(2000, 60_000);

        let _ = tokio::time::timeout(
            Duration::from_millis(4500),
            run_poll_loop(Arc::clone(&api), Arc::clone(&dash), &cfg),
        )
        .await;

        // Ticks at 0, 2000 and 4000 ms all issued a request although none
        // had completed yet.
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 3);
        assert_eq!(dash.lock().await.connection(), ConnectionStatus::Connecting);
    }

    #[tokio::test(start_paused = true)]
    async fn offline_then_live_without_reset() {
        let api = Arc::new(
            FakeApi::new()
                .with_status(0, Err(PollError::Transport("connection refused".into())))
                .with_status(0, snapshot("searching")),
        );
        let dash = new_dashboard();
        let cfg = config(2000, 60_000);

        let _ = tokio::time::timeout(
            Duration::from_millis(2500),
            run_poll_loop(Arc::clone(&api), Arc::clone(&dash), &cfg),
        )
        .await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let d = dash.lock().await;
        assert_eq!(
            d.renderer().connection_calls(),
            [ConnectionStatus::Offline, ConnectionStatus::Live]
        );
        assert_eq!(d.current_state(), Some(StateId::Searching));
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_runs_on_its_own_interval() {
        let api = Arc::new(FakeApi::new().with_stats(Ok(StatsInfo {
            projects: Some(3),
            commits: Some(2_300_000),
            loc: Some(950),
        })));
        let dash = new_dashboard();
        let cfg = config(2000, 30_000);

        let _ = tokio::time::timeout(
            Duration::from_millis(31_000),
            run_poll_loop(Arc::clone(&api), Arc::clone(&dash), &cfg),
        )
        .await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 2);
        let d = dash.lock().await;
        let r = d.renderer();
        assert_eq!(r.count(|c| matches!(c, RenderCall::Projects(ProjectsView::Empty))), 2);
        let summary = d.summary(Local::now());
        let stats = summary.stats.expect("stats applied");
        assert_eq!(stats.commits, "2.3M");
        assert_eq!(stats.loc, "950");
        // Refresh never touches the feed or the state.
        assert!(r.last_feed().is_none());
    }

    #[tokio::test]
    async fn refresh_failure_is_absorbed() {
        let api = Arc::new(
            FakeApi::new()
                .with_projects(Err(PollError::Http { status: 500 }))
                .with_stats(Err(PollError::Transport("reset".into()))),
        );
        let dash = new_dashboard();

        spawn_refresh(&api, &dash);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let d = dash.lock().await;
        assert!(d.renderer().calls.is_empty());
        assert_eq!(d.connection(), ConnectionStatus::Connecting);
    }

    #[tokio::test(start_paused = true)]
    async fn clock_ticks_every_second() {
        let api = Arc::new(FakeApi::new());
        let dash = new_dashboard();
        let cfg = config(60_000, 60_000);

        let _ = tokio::time::timeout(
            Duration::from_millis(3500),
            run_poll_loop(Arc::clone(&api), Arc::clone(&dash), &cfg),
        )
        .await;

        let d = dash.lock().await;
        let clocks = d
            .renderer()
            .count(|c| matches!(c, RenderCall::Clock { .. }));
        assert_eq!(clocks, 4);
    }
}
