use std::process::Command;

use crate::context::EventContext;

#[cfg(test)]
use mockall::automock;

/// Seam over the `git` invocations used to describe the notified commit.
#[cfg_attr(test, automock)]
pub trait GitCli {
    /// Full commit message of `sha`.
    fn commit_message(&self, sha: &str) -> Result<String, CommitError>;
    /// Paths touched by `sha`, one per line.
    fn changed_files(&self, sha: &str) -> Result<String, CommitError>;
    /// Author name of the most recent commit.
    fn author(&self) -> Result<String, CommitError>;
}

/// Runs `git` in the current working directory.
pub struct GitCommand;

impl GitCommand {
    fn run(&self, args: &[&str]) -> Result<String, CommitError> {
        log::debug!("running git {}", args.join(" "));
        let output = Command::new("git").args(args).output()?;
        if !output.status.success() {
            // Tolerated: e.g. `<sha>^1` does not exist for an initial
            // commit. Whatever stdout was produced is still used.
            log::warn!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitCli for GitCommand {
    fn commit_message(&self, sha: &str) -> Result<String, CommitError> {
        self.run(&["show", "-s", "--format=%B", sha])
    }

    fn changed_files(&self, sha: &str) -> Result<String, CommitError> {
        self.run(&[
            "diff-tree",
            "--no-commit-id",
            "--name-only",
            "-r",
            &format!("{sha}^1"),
            sha,
        ])
    }

    fn author(&self) -> Result<String, CommitError> {
        self.run(&["log", "-1", "--pretty=format:%an"])
    }
}

/// Commit metadata shown on code-event cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    /// First line of the commit message.
    pub message: String,
    pub changed_files: Vec<String>,
    pub author: String,
}

impl CommitInfo {
    pub fn collect(ctx: &EventContext, git: &impl GitCli) -> Result<Self, CommitError> {
        let sha = ctx.commit_sha().to_string();

        let message = git
            .commit_message(&sha)?
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        let changed_files: Vec<String> = git
            .changed_files(&sha)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let author = git.author()?.replace('\\', "").trim().to_string();

        Ok(Self {
            sha,
            message,
            changed_files,
            author,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_takes_first_message_line() {
        let mut git = MockGitCli::new();
        git.expect_commit_message()
            .returning(|_| Ok("feat: add card builder\n\nLonger explanation\n".to_string()));
        git.expect_changed_files()
            .returning(|_| Ok("src/card.rs\nsrc/lib.rs\n".to_string()));
        git.expect_author().returning(|| Ok("Jane Doe\n".to_string()));

        let ctx = crate::test_utils::push_context();
        let info = CommitInfo::collect(&ctx, &git).unwrap();
        assert_eq!(info.sha, ctx.sha);
        assert_eq!(info.message, "feat: add card builder");
        assert_eq!(info.changed_files, vec!["src/card.rs", "src/lib.rs"]);
        assert_eq!(info.author, "Jane Doe");
    }

    #[test]
    fn test_collect_uses_pr_head_sha() {
        let mut git = MockGitCli::new();
        git.expect_commit_message()
            .withf(|sha| sha == "feedface")
            .returning(|_| Ok("fix: typo".to_string()));
        git.expect_changed_files()
            .withf(|sha| sha == "feedface")
            .returning(|_| Ok("README.md".to_string()));
        git.expect_author().returning(|| Ok("Jane".to_string()));

        let mut ctx = crate::test_utils::push_context();
        ctx.kind = crate::context::EventKind::PullRequest;
        ctx.pull_request = Some(crate::context::PullRequestInfo {
            head_sha: "feedface".to_string(),
            head_ref: "feature/x".to_string(),
        });

        let info = CommitInfo::collect(&ctx, &git).unwrap();
        assert_eq!(info.sha, "feedface");
    }

    #[test]
    fn test_collect_with_empty_git_output() {
        let mut git = MockGitCli::new();
        git.expect_commit_message().returning(|_| Ok(String::new()));
        git.expect_changed_files().returning(|_| Ok("\n".to_string()));
        git.expect_author().returning(|| Ok(String::new()));

        let ctx = crate::test_utils::push_context();
        let info = CommitInfo::collect(&ctx, &git).unwrap();
        assert_eq!(info.message, "");
        assert!(info.changed_files.is_empty());
        assert_eq!(info.author, "");
    }

    #[test]
    fn test_author_backslashes_removed() {
        let mut git = MockGitCli::new();
        git.expect_commit_message().returning(|_| Ok("msg".to_string()));
        git.expect_changed_files().returning(|_| Ok(String::new()));
        git.expect_author()
            .returning(|| Ok("Jane \\\"JD\\\" Doe".to_string()));

        let ctx = crate::test_utils::push_context();
        let info = CommitInfo::collect(&ctx, &git).unwrap();
        assert_eq!(info.author, "Jane \"JD\" Doe");
    }
}
