use std::sync::LazyLock;

use regex::Regex;

use crate::changed_files::ESCAPED_LINE_BREAK;
use crate::config::RenderConfig;

// Leading Markdown heading marker: one or more '#' followed by whitespace.
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s+").expect("Invalid heading marker regex"));

/// Truncates an issue body for the card.
///
/// Keeps the first `issue.maxLines` lines (default 5), strips heading
/// markers and surrounding whitespace from each, appends a `...` line when
/// the body was longer, and joins with escaped line breaks. Absent or
/// empty input yields `None`.
pub fn format_issue_body(config: &RenderConfig, body: Option<&str>) -> Option<String> {
    let body = body?;
    if body.is_empty() {
        return None;
    }

    let lines: Vec<&str> = body.lines().collect();
    let max = config.issue.max_lines();

    let mut kept: Vec<String> = lines
        .iter()
        .take(max)
        .map(|line| HEADING_MARKER.replace(line.trim(), "").trim().to_string())
        .collect();
    if lines.len() > max {
        kept.push("...".to_string());
    }

    Some(kept.join(ESCAPED_LINE_BREAK))
}
