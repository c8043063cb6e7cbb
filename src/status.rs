//! Normalized commit status records

use std::fmt;

/// State of a single status context.
///
/// Anything the hosting API reports outside the four documented states is
/// kept verbatim in `Unknown` instead of failing the whole poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusState {
    Success,
    Failure,
    Pending,
    Error,
    Unknown(String),
}

impl StatusState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => StatusState::Success,
            "failure" => StatusState::Failure,
            "pending" => StatusState::Pending,
            "error" => StatusState::Error,
            other => StatusState::Unknown(other.to_string()),
        }
    }

    /// Name of the badge image (without extension) served for this state.
    /// Unknown states fall back to the error badge.
    pub fn badge_name(&self) -> &'static str {
        match self {
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Pending => "pending",
            StatusState::Error | StatusState::Unknown(_) => "error",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusState::Unknown(raw) => write!(f, "unknown({})", raw),
            known => f.write_str(known.badge_name()),
        }
    }
}

/// Latest reported status of one context on the branch tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub context: String,
    pub state: StatusState,
    pub target_url: String,
    pub description: String,
}
