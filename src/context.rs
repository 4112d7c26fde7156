use std::path::PathBuf;

use serde::Deserialize;

use crate::inputs::EnvProvider;

/// Event kind, resolved once from `GITHUB_EVENT_NAME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    Other(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "push" => Self::Push,
            "pull_request" => Self::PullRequest,
            "issues" => Self::Issues,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull_request",
            Self::Issues => "issues",
            Self::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    pub head_sha: String,
    pub head_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueInfo {
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub milestone: Option<String>,
    pub html_url: String,
}

/// Everything the card builders need to know about the triggering event.
///
/// Built once at startup from `GITHUB_*` environment variables and the
/// event payload document the runner writes to `GITHUB_EVENT_PATH`, then
/// passed by reference everywhere. Missing variables become empty strings
/// so that placeholder tokens resolve to empty text rather than failing.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub kind: EventKind,
    pub repository_name: String,
    pub repository_url: String,
    pub git_ref: String,
    pub sha: String,
    pub actor: String,
    pub workflow: String,
    pub run_number: String,
    pub run_id: String,
    pub pull_request: Option<PullRequestInfo>,
    pub issue: Option<IssueInfo>,
}

impl EventContext {
    pub fn from_env(env: &impl EnvProvider) -> Result<Self, ContextError> {
        let payload = match env.var("GITHUB_EVENT_PATH") {
            Ok(path) if !path.is_empty() => EventPayload::from_path(PathBuf::from(path))?,
            _ => EventPayload::default(),
        };

        let var = |key: &str| env.var(key).unwrap_or_default();

        let repository = payload.repository.unwrap_or_default();
        let pull_request = payload.pull_request.map(|pr| PullRequestInfo {
            head_sha: pr.head.sha,
            head_ref: pr.head.r#ref,
        });
        let issue = payload.issue.map(|issue| IssueInfo {
            title: issue.title,
            body: issue.body,
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            milestone: issue.milestone.map(|milestone| milestone.title),
            html_url: issue.html_url,
        });

        Ok(Self {
            kind: EventKind::from_name(&var("GITHUB_EVENT_NAME")),
            repository_name: repository.name,
            repository_url: repository.html_url,
            git_ref: var("GITHUB_REF"),
            sha: var("GITHUB_SHA"),
            actor: var("GITHUB_ACTOR"),
            workflow: var("GITHUB_WORKFLOW"),
            run_number: var("GITHUB_RUN_NUMBER"),
            run_id: var("GITHUB_RUN_ID"),
            pull_request,
            issue,
        })
    }

    /// Branch shown on the card: the head ref for pull requests, otherwise
    /// the push ref with its `refs/heads/` prefix stripped.
    pub fn branch(&self) -> String {
        if self.kind == EventKind::PullRequest {
            if let Some(pr) = &self.pull_request {
                return pr.head_ref.clone();
            }
        }
        self.git_ref
            .strip_prefix("refs/heads/")
            .unwrap_or(&self.git_ref)
            .to_string()
    }

    /// The commit the notification describes: the pull-request head when
    /// there is one, the pushed sha otherwise.
    pub fn commit_sha(&self) -> &str {
        match (&self.kind, &self.pull_request) {
            (EventKind::PullRequest, Some(pr)) => &pr.head_sha,
            _ => &self.sha,
        }
    }

    pub fn workflow_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repository_url, self.run_id)
    }
}

// Subset of the event payload document this tool reads.
#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    repository: Option<RepositoryPayload>,
    pull_request: Option<PullRequestPayload>,
    issue: Option<IssuePayload>,
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(default)]
    sha: String,
    #[serde(default, rename = "ref")]
    r#ref: String,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    #[serde(default)]
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelPayload>,
    milestone: Option<MilestonePayload>,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MilestonePayload {
    title: String,
}

impl EventPayload {
    fn from_path(path: PathBuf) -> Result<Self, ContextError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|source| ContextError::EventPayloadRead { path: path.clone(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| ContextError::EventPayloadParse { path, source })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to read event payload from {path:?}: {source}")]
    EventPayloadRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse event payload from {path:?}: {source}")]
    EventPayloadParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
