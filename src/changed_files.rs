use std::path::Path;

use crate::config::{MkdocsConfig, RenderConfig};

/// Line separator understood by the card renderer: the destination expects
/// escaped newlines inside a JSON string value, so this is the literal
/// four-character sequence `\n\n`.
pub(crate) const ESCAPED_LINE_BREAK: &str = r"\n\n";

/// Renders the changed-file list for the card.
///
/// Applies the extension filter, truncates to the configured maximum
/// (appending a `...` marker when files were dropped), rewrites matching
/// Markdown files into mkdocs links, and joins everything with escaped
/// line breaks. Returns `None` when nothing survives the filter, which
/// suppresses the whole changed-files section.
pub fn format_changed_files(config: &RenderConfig, files: &[String]) -> Option<String> {
    let extensions = &config.filter.extension;
    let filtered: Vec<&String> = files
        .iter()
        .filter(|file| extensions.is_empty() || matches_extension(file, extensions))
        .collect();

    if filtered.is_empty() {
        return None;
    }

    let max = config.changed_file.max();
    let mut rendered: Vec<String> = filtered
        .iter()
        .take(max)
        .map(|file| render_file(&config.mkdocs, file))
        .collect();
    if filtered.len() > max {
        rendered.push("...".to_string());
    }

    Some(rendered.join(ESCAPED_LINE_BREAK))
}

// Extension of the final path segment, so `.eslintrc.js` matches `.js` and
// extensionless files match nothing.
fn matches_extension(file: &str, extensions: &[String]) -> bool {
    let Some(extension) = Path::new(file).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.') == extension)
}

fn render_file(mkdocs: &MkdocsConfig, file: &str) -> String {
    match mkdocs_url(mkdocs, file) {
        Some(url) => format!("[`{file}`]({url})"),
        None => format!("`{file}`"),
    }
}

// Markdown files under the mkdocs root map onto their published page URL.
fn mkdocs_url(mkdocs: &MkdocsConfig, file: &str) -> Option<String> {
    let base_url = mkdocs.base_url.as_deref()?;
    let path = Path::new(file);
    if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
        return None;
    }

    let relative = match &mkdocs.root_dir {
        Some(root) => path.strip_prefix(root).ok()?,
        None => path,
    };

    let base_url = base_url.trim_end_matches('/');
    let relative = relative.to_string_lossy();
    let page = relative.strip_suffix(".md").unwrap_or(&relative);
    if page.is_empty() {
        Some(base_url.to_string())
    } else {
        Some(format!("{base_url}/{page}"))
    }
}
