use crate::changed_files::format_changed_files;
use crate::commit::CommitInfo;
use crate::config::RenderConfig;
use crate::context::EventContext;
use crate::issue_body::format_issue_body;

/// Resolved values for the closed placeholder vocabulary.
///
/// Every token maps to a string; values missing from the run (no commit
/// info on issue events, no issue fields on push events) resolve to the
/// empty string so templates never render a literal `undefined`.
#[derive(Debug, Clone)]
pub struct TokenMap {
    values: Vec<(&'static str, String)>,
}

impl TokenMap {
    pub fn build(
        ctx: &EventContext,
        config: &RenderConfig,
        commit: Option<&CommitInfo>,
        custom_message_1: &str,
        custom_message_2: &str,
    ) -> Self {
        let changed_files = commit
            .and_then(|info| format_changed_files(config, &info.changed_files))
            .unwrap_or_default();

        let issue = ctx.issue.as_ref();
        let issue_body = issue
            .and_then(|info| format_issue_body(config, info.body.as_deref()))
            .unwrap_or_default();
        let issue_labels = issue
            .map(|info| info.labels.join(", "))
            .unwrap_or_default();

        let commit_field = |f: fn(&CommitInfo) -> &str| {
            commit.map(|info| f(info).to_string()).unwrap_or_default()
        };

        let values = vec![
            ("{GITHUB_RUN_NUMBER}", ctx.run_number.clone()),
            ("{COMMIT_MESSAGE}", commit_field(|info| &info.message)),
            ("{CUSTOM_MESSAGE_1}", custom_message_1.to_string()),
            ("{CUSTOM_MESSAGE_2}", custom_message_2.to_string()),
            ("{GITHUB_REPOSITORY}", ctx.repository_name.clone()),
            ("{BRANCH}", ctx.branch()),
            ("{GITHUB_EVENT_NAME}", ctx.kind.as_str().to_string()),
            ("{GITHUB_WORKFLOW}", ctx.workflow.clone()),
            ("{GITHUB_ACTOR}", ctx.actor.clone()),
            ("{GITHUB_SHA}", ctx.sha.clone()),
            ("{CHANGED_FILES}", changed_files),
            ("{AUTHOR}", commit_field(|info| &info.author)),
            (
                "{ISSUE_TITLE}",
                issue.map(|info| info.title.clone()).unwrap_or_default(),
            ),
            ("{ISSUE_LABELS}", issue_labels),
            (
                "{ISSUE_MILESTONE}",
                issue
                    .and_then(|info| info.milestone.clone())
                    .unwrap_or_default(),
            ),
            ("{ISSUE_BODY}", issue_body),
        ];

        Self { values }
    }

    fn value(&self, token: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == token)
            .map(|(_, value)| value.as_str())
    }

    /// Formatted changed-file list, if any file survived the filter.
    pub fn changed_files(&self) -> Option<&str> {
        self.value("{CHANGED_FILES}").filter(|value| !value.is_empty())
    }

    /// Formatted issue body, if the event carried one.
    pub fn issue_body(&self) -> Option<&str> {
        self.value("{ISSUE_BODY}").filter(|value| !value.is_empty())
    }
}

/// Replaces every occurrence of each placeholder token in `template`.
pub fn substitute(template: &str, tokens: &TokenMap) -> String {
    let mut resolved = template.to_string();
    for (token, value) in &tokens.values {
        resolved = resolved.replace(token, value);
    }
    log::debug!("substituted card content:\n{resolved}");
    resolved
}
