//! `agentdash once`: fetch all three endpoints once and print the dashboard.

use chrono::Local;

use agentdash_core::format::{EMPTY_PROJECTS_PLACEHOLDER, MISSING_STAT};
use agentdash_core::log_buffer::WAITING_PLACEHOLDER;
use agentdash_core::{Dashboard, DashboardSummary, ProjectsView};

use crate::client::DashboardApi;
use crate::display::{connection_indicator, kind_indicator, state_indicator};
use crate::view::DashboardView;

/// Offline is reported in the output; the exit status stays 0.
pub async fn cmd_once<A: DashboardApi>(
    api: &A,
    max_logs: usize,
    json: bool,
) -> anyhow::Result<()> {
    let summary = collect_summary(api, max_logs).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

/// One status poll and one refresh, applied through the same context as
/// the live dashboard.
pub async fn collect_summary<A: DashboardApi>(api: &A, max_logs: usize) -> DashboardSummary {
    let now = Local::now();
    let mut dashboard = Dashboard::new(DashboardView::new(), max_logs, now);
    dashboard.start(now);

    let seq = dashboard.next_status_seq();
    let (status, projects, stats) =
        tokio::join!(api.fetch_status(), api.fetch_projects(), api.fetch_stats());

    dashboard.apply_status(seq, status, Local::now());
    dashboard.apply_projects(projects);
    dashboard.apply_stats(stats);
    dashboard.summary(Local::now())
}

pub fn format_summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();

    let state = summary.state.map_or_else(
        || MISSING_STAT.to_string(),
        |s| format!("{} {}", state_indicator(s.id), s.label),
    );
    out.push_str(&format!("State:       {state}\n"));
    out.push_str(&format!(
        "Connection:  {} {}\n",
        connection_indicator(summary.connection),
        summary.connection
    ));
    if let Some(activity) = summary.activity.activity.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("Activity:    {activity}\n"));
    }
    if let Some(action) = summary.activity.last_action.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("Last action: {action}\n"));
    }
    out.push_str(&format!("Uptime:      {}\n", summary.uptime));

    match &summary.stats {
        Some(s) => out.push_str(&format!(
            "Stats:       projects {} \u{b7} commits {} \u{b7} loc {}\n",
            s.projects, s.commits, s.loc
        )),
        None => out.push_str(&format!("Stats:       {MISSING_STAT}\n")),
    }

    out.push_str("\nProjects\n");
    match &summary.projects {
        Some(ProjectsView::Cards(cards)) => {
            for card in cards {
                out.push_str(&format!("  {}", card.name));
                if !card.description.is_empty() {
                    out.push_str(&format!(": {}", card.description));
                }
                if card.has_repo() {
                    out.push_str(&format!(" <{}>", card.link));
                }
                out.push('\n');
            }
        }
        Some(ProjectsView::Empty) => out.push_str(&format!("  {EMPTY_PROJECTS_PLACEHOLDER}\n")),
        None => out.push_str(&format!("  {MISSING_STAT}\n")),
    }

    out.push_str("\nActivity feed\n");
    if summary.logs.is_empty() {
        out.push_str(&format!("  {WAITING_PLACEHOLDER}\n"));
    }
    for entry in &summary.logs {
        out.push_str(&format!(
            "  [{}] {} {}\n",
            entry.time,
            kind_indicator(&entry.kind),
            entry.message
        ));
    }
    out
}
