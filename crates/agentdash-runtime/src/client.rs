//! DashboardApi trait and HttpApi (reqwest client for the dashboard API).
//! The trait is the mock-injection seam for the scheduler tests.

use std::future::Future;

use agentdash_core::{PollError, ProjectInfo, StatsInfo, StatusSnapshot};
use serde::de::DeserializeOwned;

pub const STATUS_PATH: &str = "/api/status";
pub const PROJECTS_PATH: &str = "/api/projects";
pub const STATS_PATH: &str = "/api/stats";

/// Read-only access to the three dashboard endpoints.
pub trait DashboardApi: Send + Sync {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, PollError>> + Send;

    fn fetch_projects(&self) -> impl Future<Output = Result<Vec<ProjectInfo>, PollError>> + Send;

    fn fetch_stats(&self) -> impl Future<Output = Result<StatsInfo, PollError>> + Send;
}

impl<T: DashboardApi> DashboardApi for &T {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, PollError>> + Send {
        (**self).fetch_status()
    }

    fn fetch_projects(&self) -> impl Future<Output = Result<Vec<ProjectInfo>, PollError>> + Send {
        (**self).fetch_projects()
    }

    fn fetch_stats(&self) -> impl Future<Output = Result<StatsInfo, PollError>> + Send {
        (**self).fetch_stats()
    }
}

/// Real API client. No request timeout beyond the client default.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// `base_url` must already be validated (scheme present, no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("agentdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PollError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PollError::Transport(format!("GET {path}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PollError::Http {
                status: status.as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                PollError::Decode(format!("GET {path}: {e}"))
            } else {
                PollError::Transport(format!("GET {path}: {e}"))
            }
        })
    }
}

impl DashboardApi for HttpApi {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, PollError>> + Send {
        self.get_json(STATUS_PATH)
    }

    fn fetch_projects(&self) -> impl Future<Output = Result<Vec<ProjectInfo>, PollError>> + Send {
        self.get_json(PROJECTS_PATH)
    }

    fn fetch_stats(&self) -> impl Future<Output = Result<StatsInfo, PollError>> + Send {
        self.get_json(STATS_PATH)
    }
}
