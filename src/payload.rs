use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::actions::{ActionError, build_actions};
use crate::card::{build_code_body, build_issue_body};
use crate::commit::CommitInfo;
use crate::config::RenderConfig;
use crate::context::{EventContext, EventKind};
use crate::inputs::ActionInputs;
use crate::mentions::{ChatUser, build_entities};
use crate::placeholder::{TokenMap, substitute};

const CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
const SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const CARD_VERSION: &str = "1.2";

/// Assembles the full webhook payload: card body (from a user template or
/// the default builders), actions, and mention entities, wrapped in the
/// adaptive-card attachment envelope.
pub fn build_card_payload(
    config: &RenderConfig,
    ctx: &EventContext,
    commit: Option<&CommitInfo>,
    inputs: &ActionInputs,
    users: &[ChatUser],
) -> Result<Value, PayloadError> {
    let tokens = TokenMap::build(ctx, config, commit, &inputs.message1, &inputs.message2);

    let body = match &inputs.template {
        Some(path) => template_body(path, &tokens)?,
        None => default_body(config, ctx, inputs, &tokens)?,
    };

    let actions = build_actions(&inputs.action_titles, &inputs.action_urls, ctx)?;

    let mut content = json!({
        "$schema": SCHEMA,
        "type": "AdaptiveCard",
        "version": CARD_VERSION,
        "body": body,
        "actions": actions,
    });
    if !users.is_empty() {
        content["msteams"] = json!({ "entities": build_entities(users) });
    }

    Ok(json!({
        "attachments": [{
            "contentType": CONTENT_TYPE,
            "content": content,
        }]
    }))
}

fn default_body(
    config: &RenderConfig,
    ctx: &EventContext,
    inputs: &ActionInputs,
    tokens: &TokenMap,
) -> Result<Value, PayloadError> {
    let body = match ctx.kind {
        EventKind::Issues => build_issue_body(ctx, &inputs.message1, &inputs.message2, tokens),
        _ => build_code_body(config, &inputs.message1, &inputs.message2, tokens),
    }
    .map_err(PayloadError::BodyRender)?;
    log::debug!("default card body: {body}");
    Ok(body)
}

// A user template bypasses the default builders entirely: its raw text is
// substituted and must parse back as JSON.
fn template_body(path: &Path, tokens: &TokenMap) -> Result<Value, PayloadError> {
    let content = std::fs::read_to_string(path).map_err(|source| PayloadError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    let body: Value =
        serde_json::from_str(&substitute(&content, tokens)).map_err(|source| {
            PayloadError::TemplateParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
    log::debug!("template card body: {body}");
    Ok(body)
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to load template from {path:?}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template {path:?} is not valid JSON after substitution: {source}")]
    TemplateParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to render card body: {0}")]
    BodyRender(serde_json::Error),
    #[error(transparent)]
    Action(#[from] ActionError),
}
