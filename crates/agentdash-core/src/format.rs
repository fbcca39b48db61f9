//! Display formatting for stats and the project gallery.

use serde::Serialize;

use crate::types::{ProjectInfo, StatsInfo};

/// Shown for a stat the API did not report.
pub const MISSING_STAT: &str = "\u{2014}";

/// Shown instead of an empty project gallery.
pub const EMPTY_PROJECTS_PLACEHOLDER: &str = "No projects yet.";

/// Link used for a project without a repository.
pub const NO_LINK: &str = "#";

/// Abbreviate large counts: `950`, `1.5k`, `2.3M`.
///
/// One decimal on the floating-point quotient, ties away from zero.
pub fn fmt_count(n: u64) -> String {
    if n >= 1_000_000 {
        scaled(n, 1_000_000, "M")
    } else if n >= 1_000 {
        scaled(n, 1_000, "k")
    } else {
        n.to_string()
    }
}

fn scaled(n: u64, unit: u64, suffix: &str) -> String {
    let x = n as f64 / unit as f64;
    // A binary quotient sits exactly halfway between tenths only at .25 / .75.
    let tie = (x * 4.0).fract() == 0.0 && (x * 2.0).fract() != 0.0;
    if tie {
        format!("{:.1}{suffix}", (x * 10.0).ceil() / 10.0)
    } else {
        format!("{x:.1}{suffix}")
    }
}

// ─── Stats ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub projects: String,
    pub commits: String,
    pub loc: String,
}

impl From<StatsInfo> for StatsView {
    fn from(stats: StatsInfo) -> Self {
        Self {
            projects: stats
                .projects
                .map_or_else(|| MISSING_STAT.to_string(), |n| n.to_string()),
            commits: fmt_count(stats.commits.unwrap_or(0)),
            loc: fmt_count(stats.loc.unwrap_or(0)),
        }
    }
}

// ─── Projects ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub name: String,
    /// Description, else status, else empty.
    pub description: String,
    /// Repository URL or [`NO_LINK`].
    pub link: String,
    /// Stack and date, when present.
    pub tags: Vec<String>,
}

impl ProjectCard {
    pub fn has_repo(&self) -> bool {
        self.link != NO_LINK
    }
}

impl From<ProjectInfo> for ProjectCard {
    fn from(p: ProjectInfo) -> Self {
        let description = non_empty(p.description)
            .or_else(|| non_empty(p.status))
            .unwrap_or_default();
        let tags = [p.stack, p.date]
            .into_iter()
            .filter_map(non_empty)
            .collect();
        Self {
            name: p.name.unwrap_or_default(),
            description,
            link: non_empty(p.repo).unwrap_or_else(|| NO_LINK.to_string()),
            tags,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cards", rename_all = "snake_case")]
pub enum ProjectsView {
    /// Render [`EMPTY_PROJECTS_PLACEHOLDER`], not an empty container.
    Empty,
    Cards(Vec<ProjectCard>),
}

impl From<Vec<ProjectInfo>> for ProjectsView {
    fn from(projects: Vec<ProjectInfo>) -> Self {
        if projects.is_empty() {
            Self::Empty
        } else {
            Self::Cards(projects.into_iter().map(ProjectCard::from).collect())
        }
    }
}
