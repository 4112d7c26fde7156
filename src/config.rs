use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_CHANGED_FILES: usize = 10;
const DEFAULT_MAX_ISSUE_LINES: usize = 5;

/// Rendering configuration, loaded from an optional JSON file.
///
/// Every level is optional: a missing key means the corresponding feature
/// is off, never an error. [`RenderConfig::standard`] is what applies when
/// the workflow supplies no config file at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub visible: VisibleSections,
    #[serde(rename = "changedFile")]
    pub changed_file: ChangedFileConfig,
    pub filter: FilterConfig,
    pub mkdocs: MkdocsConfig,
    pub issue: IssueConfig,
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibleSections {
    pub repository_name: bool,
    pub branch_name: bool,
    pub workflow_name: bool,
    pub event: bool,
    pub actor: bool,
    pub sha1: bool,
    pub changed_files: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangedFileConfig {
    pub max: Option<usize>,
}

impl ChangedFileConfig {
    pub fn max(&self) -> usize {
        self.max.unwrap_or(DEFAULT_MAX_CHANGED_FILES)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub extension: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MkdocsConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "rootDir")]
    pub root_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueConfig {
    #[serde(rename = "maxLines")]
    pub max_lines: Option<usize>,
}

impl IssueConfig {
    pub fn max_lines(&self) -> usize {
        self.max_lines.unwrap_or(DEFAULT_MAX_ISSUE_LINES)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    #[serde(rename = "ignoreKeywords")]
    pub ignore_keywords: Vec<String>,
}

impl RenderConfig {
    /// Configuration used when the workflow supplies no config file.
    pub fn standard() -> Self {
        Self {
            visible: VisibleSections {
                repository_name: true,
                branch_name: true,
                workflow_name: true,
                event: false,
                actor: false,
                sha1: false,
                changed_files: true,
            },
            ..Default::default()
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the notification should be skipped for this commit message.
    pub fn should_skip(&self, commit_message: &str) -> bool {
        self.notification
            .ignore_keywords
            .iter()
            .any(|keyword| commit_message.contains(keyword))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
