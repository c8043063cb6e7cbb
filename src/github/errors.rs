//! Poll cycle errors
//!
//! A `FetchError` always aborts the whole cycle it was raised in. It is
//! recoverable: the refresher logs it and tries again on the next tick.

use std::fmt;

/// Which of the two outbound calls failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// `GET /repos/{repo}/branches/{branch}`
    ResolveBranch,

    /// `GET /repos/{repo}/commits/{sha}/status`
    FetchStatus,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchStage::ResolveBranch => fmt.write_str("resolve-branch"),
            FetchStage::FetchStatus => fmt.write_str("fetch-status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection failure, timeout, or a body that could not be read
    Network(String),

    /// Upstream answered with a non-2xx status
    Status { code: u16, body: String },

    /// Body is not the JSON shape we expect
    Decode(String),

    /// Branch payload carries no usable `commit.sha`
    MissingSha,

    /// The blocking request task died before returning
    Interrupted(String),

    /// The request url could not be built from the configured base
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub stage: FetchStage,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(stage: FetchStage, kind: FetchErrorKind) -> Self {
        Self { stage, kind }
    }
}

impl std::error::Error for FetchError {}

impl fmt::Display for FetchError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            FetchErrorKind::Network(e) => write!(fmt, "{}: network error: {}", self.stage, e),
            FetchErrorKind::Status { code, body } => {
                write!(fmt, "{}: upstream returned {} - {}", self.stage, code, body)
            }
            FetchErrorKind::Decode(e) => write!(fmt, "{}: malformed response: {}", self.stage, e),
            FetchErrorKind::MissingSha => write!(fmt, "{}: response has no commit.sha", self.stage),
            FetchErrorKind::Interrupted(e) => write!(fmt, "{}: request aborted: {}", self.stage, e),
            FetchErrorKind::InvalidUrl(e) => write!(fmt, "{}: invalid url: {}", self.stage, e),
        }
    }
}
