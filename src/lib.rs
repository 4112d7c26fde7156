mod actions;
mod card;
mod changed_files;
mod commit;
mod config;
mod context;
mod inputs;
mod issue_body;
mod mentions;
mod payload;
mod placeholder;
mod webhook;

#[cfg(test)]
mod test_utils;

pub use actions::{ActionError, CardAction, build_actions};
pub use card::{CardBlock, Fact, FactSet, TextBlock, build_code_body, build_issue_body};
pub use changed_files::format_changed_files;
pub use commit::{CommitError, CommitInfo, GitCli, GitCommand};
pub use config::{ConfigError, RenderConfig};
pub use context::{ContextError, EventContext, EventKind, IssueInfo, PullRequestInfo};
pub use inputs::{ActionInputs, EnvProvider, StdEnvProvider};
pub use issue_body::format_issue_body;
pub use mentions::{ChatUser, MentionEntity, UsersError, build_entities, load_users};
pub use payload::{PayloadError, build_card_payload};
pub use placeholder::{TokenMap, substitute};
pub use webhook::{WebhookClient, WebhookError};
