use std::collections::HashSet;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;
use crate::config::Config;
use crate::github::errors::{FetchError, FetchErrorKind, FetchStage};
use crate::github::models::{BranchResponse, CombinedStatusResponse};
use crate::github::StatusSource;
use crate::status::StatusRecord;

const USER_AGENT: &str = concat!("statusbadge/", env!("CARGO_PKG_VERSION"));

/// Reads the combined status of a branch tip from the GitHub REST API.
///
/// Requests go through a blocking `ureq` agent; every call is moved onto
/// the tokio blocking pool so a slow upstream never stalls the runtime.
#[derive(Clone)]
pub struct StatusFetcher {
    agent: ureq::Agent,
    api_url: String,
    repo: String,
    branch: String,
    token: String,
}

impl StatusFetcher {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.client_timeout)
            .user_agent(USER_AGENT)
            .build();

        Self {
            agent,
            api_url: config.api_url.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        }
    }

    /// Resolve the commit sha at the tip of the tracked branch
    pub async fn resolve_branch_tip(&self) -> Result<String, FetchError> {
        let stage = FetchStage::ResolveBranch;
        let url = self.endpoint(&["branches", self.branch.as_str()], stage)?;
        let branch: BranchResponse = self.get_json(url, stage).await?;

        match branch.commit.and_then(|c| c.sha) {
            Some(sha) if !sha.trim().is_empty() => Ok(sha),
            _ => Err(FetchError::new(stage, FetchErrorKind::MissingSha)),
        }
    }

    /// Fetch one record per context reported for `sha`.
    ///
    /// GitHub lists the most recent entry first, so when a context shows up
    /// more than once only its first occurrence is kept.
    pub async fn fetch_commit_statuses(&self, sha: &str) -> Result<Vec<StatusRecord>, FetchError> {
        let stage = FetchStage::FetchStatus;
        let url = self.endpoint(&["commits", sha, "status"], stage)?;
        let combined: CombinedStatusResponse = self.get_json(url, stage).await?;

        tracing::debug!(
            "combined state of {}: {}",
            sha,
            combined.state.as_deref().unwrap_or("unknown")
        );

        let mut seen = HashSet::new();
        let records = combined
            .statuses
            .into_iter()
            .filter(|entry| seen.insert(entry.context.clone()))
            .map(StatusRecord::from)
            .collect();

        Ok(records)
    }

    /// `{api_url}/repos/{owner}/{name}/<tail>`, every segment percent-encoded
    fn endpoint(&self, tail: &[&str], stage: FetchStage) -> Result<String, FetchError> {
        let invalid = |reason: String| FetchError::new(stage, FetchErrorKind::InvalidUrl(reason));

        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot be a base url", self.api_url)))?
            .pop_if_empty()
            .push("repos")
            .extend(self.repo.split('/'))
            .extend(tail);
        Ok(url.into())
    }

    async fn get_json<T>(&self, url: String, stage: FetchStage) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let agent = self.agent.clone();
        let auth = format!("Bearer {}", self.token);

        let body = tokio::task::spawn_blocking(move || Self::get(&agent, &url, &auth))
            .await
            .map_err(|e| FetchError::new(stage, FetchErrorKind::Interrupted(e.to_string())))?
            .map_err(|kind| FetchError::new(stage, kind))?;

        serde_json::from_str(&body)
            .map_err(|e| FetchError::new(stage, FetchErrorKind::Decode(e.to_string())))
    }

    fn get(agent: &ureq::Agent, url: &str, auth: &str) -> Result<String, FetchErrorKind> {
        tracing::debug!("GET {}", url);

        let response = agent
            .get(url)
            .set("Authorization", auth)
            .set("Accept", "application/vnd.github+json")
            .call();

        match response {
            Ok(response) => response
                .into_string()
                .map_err(|e| FetchErrorKind::Network(e.to_string())),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(FetchErrorKind::Status { code, body })
            }
            // transport failures, timeouts included
            Err(e) => Err(FetchErrorKind::Network(e.to_string())),
        }
    }
}

#[async_trait]
impl StatusSource for StatusFetcher {
    async fn fetch_statuses(&self) -> Result<Vec<StatusRecord>, FetchError> {
        let sha = self.resolve_branch_tip().await?;
        tracing::debug!("tip of {} is {}", self.branch, sha);
        self.fetch_commit_statuses(&sha).await
    }
}
