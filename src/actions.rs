use serde::{Deserialize, Serialize};

use crate::context::{EventContext, EventKind};

/// Clickable element attached to the card, separate from the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardAction {
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl { title: String, url: String },
}

/// Builds the validated action list from the paired title/URL inputs.
///
/// With no input at all (both lists empty, or a single empty pair from a
/// blank multi-line input) the event-appropriate default action is
/// returned. Otherwise titles and URLs pair up positionally and every
/// member must be non-empty.
pub fn build_actions(
    titles: &[String],
    urls: &[String],
    ctx: &EventContext,
) -> Result<Vec<CardAction>, ActionError> {
    if titles.len() != urls.len() {
        return Err(ActionError::LengthMismatch {
            titles: titles.len(),
            urls: urls.len(),
        });
    }

    let no_input = titles.is_empty()
        || (titles.len() == 1 && titles[0].is_empty() && urls[0].is_empty());
    if no_input {
        return Ok(vec![default_action(ctx)]);
    }

    titles
        .iter()
        .zip(urls)
        .enumerate()
        .map(|(index, (title, url))| {
            if title.is_empty() || url.is_empty() {
                Err(ActionError::MissingTitleOrUrl { index })
            } else {
                Ok(CardAction::OpenUrl {
                    title: title.clone(),
                    url: url.clone(),
                })
            }
        })
        .collect()
}

fn default_action(ctx: &EventContext) -> CardAction {
    match (&ctx.kind, &ctx.issue) {
        (EventKind::Issues, Some(issue)) => CardAction::OpenUrl {
            title: "View Issue".to_string(),
            url: issue.html_url.clone(),
        },
        _ => CardAction::OpenUrl {
            title: "View Workflow".to_string(),
            url: ctx.workflow_url(),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("action titles and URLs must have the same length (titles: {titles}, urls: {urls})")]
    LengthMismatch { titles: usize, urls: usize },
    #[error("action pair {index} is missing a title or URL")]
    MissingTitleOrUrl { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{issue_context, push_context};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_default_action_for_push() {
        let ctx = push_context();
        for (titles, urls) in [(vec![], vec![]), (strings(&[""]), strings(&[""]))] {
            let actions = build_actions(&titles, &urls, &ctx).unwrap();
            assert_eq!(
                actions,
                vec![CardAction::OpenUrl {
                    title: "View Workflow".to_string(),
                    url: "https://github.com/acme/widgets/actions/runs/987654".to_string(),
                }]
            );
        }
    }

    #[test]
    fn test_default_action_for_issue() {
        let ctx = issue_context();
        let actions = build_actions(&[], &[], &ctx).unwrap();
        assert_eq!(
            actions,
            vec![CardAction::OpenUrl {
                title: "View Issue".to_string(),
                url: "https://github.com/acme/widgets/issues/7".to_string(),
            }]
        );
    }

    #[test]
    fn test_pairs_preserve_order() {
        let ctx = push_context();
        let actions = build_actions(
            &strings(&["Dashboard", "Docs"]),
            &strings(&["https://a.example", "https://b.example"]),
            &ctx,
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                CardAction::OpenUrl {
                    title: "Dashboard".to_string(),
                    url: "https://a.example".to_string(),
                },
                CardAction::OpenUrl {
                    title: "Docs".to_string(),
                    url: "https://b.example".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let ctx = push_context();
        let err = build_actions(&strings(&["a"]), &[], &ctx).unwrap_err();
        assert!(matches!(
            err,
            ActionError::LengthMismatch { titles: 1, urls: 0 }
        ));
    }

    #[test]
    fn test_empty_member_is_an_error() {
        let ctx = push_context();
        let err = build_actions(
            &strings(&["a", ""]),
            &strings(&["u1", "u2"]),
            &ctx,
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::MissingTitleOrUrl { index: 1 }));

        let err = build_actions(&strings(&["a"]), &strings(&[""]), &ctx).unwrap_err();
        assert!(matches!(err, ActionError::MissingTitleOrUrl { index: 0 }));
    }

    #[test]
    fn test_serialization_shape() {
        let action = CardAction::OpenUrl {
            title: "View Workflow".to_string(),
            url: "https://example.com".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({
                "type": "Action.OpenUrl",
                "title": "View Workflow",
                "url": "https://example.com"
            })
        );
    }
}
