//! GitHub REST payloads, reduced to the fields we read

use serde::Deserialize;
use crate::status::{StatusRecord, StatusState};

/// `GET /repos/{repo}/branches/{branch}`
#[derive(Deserialize, Debug)]
pub(crate) struct BranchResponse {
    #[serde(default)]
    pub commit: Option<BranchCommit>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct BranchCommit {
    #[serde(default)]
    pub sha: Option<String>,
}

/// `GET /repos/{repo}/commits/{sha}/status`
#[derive(Deserialize, Debug)]
pub(crate) struct CombinedStatusResponse {
    // aggregate over all contexts, only logged
    #[serde(default)]
    pub state: Option<String>,
    pub statuses: Vec<StatusEntry>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct StatusEntry {
    pub context: String,
    pub state: String,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<StatusEntry> for StatusRecord {
    fn from(entry: StatusEntry) -> Self {
        StatusRecord {
            state: StatusState::parse(&entry.state),
            context: entry.context,
            target_url: entry.target_url.unwrap_or_default(),
            description: entry.description.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_without_commit() {
        let branch: BranchResponse = serde_json::from_str(r#"{"name": "master"}"#).unwrap();
        assert!(branch.commit.is_none());
    }

    #[test]
    fn test_status_entry_with_nulls() {
        let entry: StatusEntry = serde_json::from_str(
            r#"{"context": "lint", "state": "pending", "target_url": null, "description": null}"#,
        )
        .unwrap();
        let record = StatusRecord::from(entry);
        assert_eq!(record.context, "lint");
        assert_eq!(record.state, StatusState::Pending);
        assert_eq!(record.target_url, "");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_combined_status_requires_statuses() {
        let res = serde_json::from_str::<CombinedStatusResponse>(r#"{"state": "success"}"#);
        assert!(res.is_err());
    }
}
