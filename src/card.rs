use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RenderConfig;
use crate::context::EventContext;
use crate::placeholder::{TokenMap, substitute};

/// One renderable block within a card body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardBlock {
    TextBlock(TextBlock),
    FactSet(FactSet),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSet {
    pub facts: Vec<Fact>,
    pub id: String,
    pub separator: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

impl Fact {
    fn new(title: &str, value: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
        }
    }
}

// Block constructors. Each call builds a fresh tree; nothing is shared or
// mutated across invocations.

fn title_block(text: &str) -> CardBlock {
    CardBlock::TextBlock(TextBlock {
        text: text.to_string(),
        id: Some("Title".to_string()),
        spacing: Some("Medium".to_string()),
        size: Some("large".to_string()),
        weight: Some("Bolder".to_string()),
        color: Some("Accent".to_string()),
        ..Default::default()
    })
}

fn message_block(text: &str) -> CardBlock {
    CardBlock::TextBlock(TextBlock {
        text: text.to_string(),
        separator: Some(true),
        wrap: Some(true),
        ..Default::default()
    })
}

fn changed_files_header() -> CardBlock {
    message_block("**Changed files:**")
}

fn changed_files_block() -> CardBlock {
    CardBlock::TextBlock(TextBlock {
        text: "{CHANGED_FILES}".to_string(),
        size: Some("small".to_string()),
        wrap: Some(false),
        ..Default::default()
    })
}

fn fact_set(facts: Vec<Fact>) -> CardBlock {
    CardBlock::FactSet(FactSet {
        facts,
        id: "acFactSet".to_string(),
        separator: true,
    })
}

/// Default body for push / pull-request events.
///
/// Fixed block order: title, custom message 1, fact set, custom message 2,
/// changed-files header and list. Every step except the title is
/// conditional; the fact set is dropped entirely when no visibility flag
/// is on, and the changed-files section when the formatter produced
/// nothing.
pub fn build_code_body(
    config: &RenderConfig,
    custom_message_1: &str,
    custom_message_2: &str,
    tokens: &TokenMap,
) -> Result<Value, serde_json::Error> {
    let mut body = vec![title_block("#{GITHUB_RUN_NUMBER} {COMMIT_MESSAGE}")];
    if !custom_message_1.is_empty() {
        body.push(message_block("{CUSTOM_MESSAGE_1}"));
    }

    let visible = &config.visible;
    let mut facts = Vec::new();
    if visible.repository_name {
        facts.push(Fact::new("Repository:", "{GITHUB_REPOSITORY}"));
    }
    if visible.branch_name {
        facts.push(Fact::new("Branch:", "{BRANCH}"));
    }
    if visible.workflow_name {
        facts.push(Fact::new("Workflow:", "{GITHUB_WORKFLOW}"));
    }
    if visible.event {
        facts.push(Fact::new("Event:", "{GITHUB_EVENT_NAME}"));
    }
    if visible.actor {
        facts.push(Fact::new("Actor:", "{GITHUB_ACTOR}"));
    }
    if visible.sha1 {
        facts.push(Fact::new("SHA-1:", "{GITHUB_SHA}"));
    }
    if !facts.is_empty() {
        body.push(fact_set(facts));
    }

    if !custom_message_2.is_empty() {
        body.push(message_block("{CUSTOM_MESSAGE_2}"));
    }

    if visible.changed_files && tokens.changed_files().is_some() {
        body.push(changed_files_header());
        body.push(changed_files_block());
    }

    resolve(&body, tokens)
}

/// Default body for issue events.
///
/// Fixed block order: title, custom message 1, fact set (labels and
/// milestone, each only when present), issue body, custom message 2.
pub fn build_issue_body(
    ctx: &EventContext,
    custom_message_1: &str,
    custom_message_2: &str,
    tokens: &TokenMap,
) -> Result<Value, serde_json::Error> {
    let mut body = vec![title_block("{ISSUE_TITLE}")];
    if !custom_message_1.is_empty() {
        body.push(message_block("{CUSTOM_MESSAGE_1}"));
    }

    let issue = ctx.issue.as_ref();
    let mut facts = Vec::new();
    if issue.is_some_and(|info| !info.labels.is_empty()) {
        facts.push(Fact::new("Labels:", "{ISSUE_LABELS}"));
    }
    if issue.is_some_and(|info| info.milestone.is_some()) {
        facts.push(Fact::new("Milestone:", "{ISSUE_MILESTONE}"));
    }
    if !facts.is_empty() {
        body.push(fact_set(facts));
    }

    if tokens.issue_body().is_some() {
        body.push(message_block("{ISSUE_BODY}"));
    }

    if !custom_message_2.is_empty() {
        body.push(message_block("{CUSTOM_MESSAGE_2}"));
    }

    resolve(&body, tokens)
}

// Round-trip the built tree through its serialized form so placeholder
// resolution works identically for built-in bodies and user templates.
fn resolve(body: &[CardBlock], tokens: &TokenMap) -> Result<Value, serde_json::Error> {
    let raw = serde_json::to_string(body)?;
    serde_json::from_str(&substitute(&raw, tokens))
}
