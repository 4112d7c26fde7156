use crate::commit::CommitInfo;
use crate::context::{EventContext, EventKind, IssueInfo};

pub(crate) fn push_context() -> EventContext {
    EventContext {
        kind: EventKind::Push,
        repository_name: "widgets".to_string(),
        repository_url: "https://github.com/acme/widgets".to_string(),
        git_ref: "refs/heads/main".to_string(),
        sha: "cafebabe0123456789abcdef0123456789abcdef".to_string(),
        actor: "octocat".to_string(),
        workflow: "CI".to_string(),
        run_number: "42".to_string(),
        run_id: "987654".to_string(),
        pull_request: None,
        issue: None,
    }
}

pub(crate) fn issue_context() -> EventContext {
    EventContext {
        kind: EventKind::Issues,
        issue: Some(IssueInfo {
            title: "Crash on save".to_string(),
            body: Some("Steps to reproduce\nopen, save".to_string()),
            labels: vec!["bug".to_string(), "p1".to_string()],
            milestone: Some("v2.0".to_string()),
            html_url: "https://github.com/acme/widgets/issues/7".to_string(),
        }),
        ..push_context()
    }
}

pub(crate) fn sample_commit() -> CommitInfo {
    CommitInfo {
        sha: "cafebabe0123456789abcdef0123456789abcdef".to_string(),
        message: "feat: add card builder".to_string(),
        changed_files: vec!["src/card.rs".to_string(), "src/lib.rs".to_string()],
        author: "Jane Doe".to_string(),
    }
}
