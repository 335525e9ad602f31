//! Provider-agnostic pull request events

use std::fmt;

/// What happened to a pull request
///
/// Provider parsers normalise their own action vocabulary into these
/// canonical values. Anything unrecognised is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PullRequestAction {
    Create,
    Opened,
    Reopened,
    Updated,
    Merged,
    Closed,
    Other(String),
}

/// Effect an action has on the pull-request variant resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Create the variant if absent, otherwise refresh its git coordinates
    Upsert,
    /// Delete the variant if it exists
    Remove,
    /// No mutation
    Skip,
}

impl PullRequestAction {
    pub fn parse(s: &str) -> Self {
        match s {
            "create" => Self::Create,
            "opened" => Self::Opened,
            "reopened" => Self::Reopened,
            "updated" => Self::Updated,
            "merged" => Self::Merged,
            "closed" => Self::Closed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Opened => "opened",
            Self::Reopened => "reopened",
            Self::Updated => "updated",
            Self::Merged => "merged",
            Self::Closed => "closed",
            Self::Other(s) => s,
        }
    }

    pub fn effect(&self) -> ActionEffect {
        match self {
            Self::Create | Self::Opened | Self::Reopened | Self::Updated => ActionEffect::Upsert,
            Self::Merged | Self::Closed => ActionEffect::Remove,
            Self::Other(_) => ActionEffect::Skip,
        }
    }
}

impl fmt::Display for PullRequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical projection of an inbound pull request webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub action: PullRequestAction,
    pub repo_clone_url: String,
    /// Branch the pull request merges into
    pub target_branch: String,
    /// Branch the pull request is built from
    pub head_ref: String,
    pub head_sha: String,
    pub number: u64,
}
