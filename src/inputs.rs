use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

// Trait for environment variable access (mockable in tests)
#[cfg_attr(test, automock)]
pub trait EnvProvider {
    fn var(&self, key: &str) -> Result<String, std::env::VarError>;
}

// Default implementation that uses std::env
#[derive(Default)]
pub struct StdEnvProvider;

impl EnvProvider for StdEnvProvider {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// Workflow inputs as exposed by the Actions runner.
///
/// The runner passes each declared input as an `INPUT_<NAME>` environment
/// variable with dashes replaced by underscores and the name uppercased.
/// Unset and empty inputs are treated the same way.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    pub webhook_url: Option<String>,
    pub template: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub message1: String,
    pub message2: String,
    pub action_titles: Vec<String>,
    pub action_urls: Vec<String>,
    pub users: Option<PathBuf>,
}

impl ActionInputs {
    pub fn from_env(env: &impl EnvProvider) -> Self {
        Self {
            webhook_url: input(env, "webhook-url"),
            template: input(env, "template").map(PathBuf::from),
            config: input(env, "config").map(PathBuf::from),
            message1: input(env, "message1").unwrap_or_default(),
            message2: input(env, "message2").unwrap_or_default(),
            action_titles: input_lines(env, "action-titles"),
            action_urls: input_lines(env, "action-urls"),
            users: input(env, "users").map(PathBuf::from),
        }
    }
}

fn input(env: &impl EnvProvider, name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.to_uppercase().replace('-', "_"));
    env.var(&key).ok().filter(|value| !value.is_empty())
}

// Multi-line inputs carry one entry per line; an absent input is an empty list.
fn input_lines(env: &impl EnvProvider, name: &str) -> Vec<String> {
    input(env, name)
        .map(|value| value.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(vars: &[(&str, &str)]) -> MockEnvProvider {
        let mut env = MockEnvProvider::new();
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env.expect_var().returning(move |key| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .ok_or(std::env::VarError::NotPresent)
        });
        env
    }

    #[test]
    fn test_input_name_mapping() {
        let env = env_with(&[("INPUT_WEBHOOK_URL", "https://example.com/hook")]);
        let inputs = ActionInputs::from_env(&env);
        assert_eq!(
            inputs.webhook_url.as_deref(),
            Some("https://example.com/hook")
        );
    }

    #[test]
    fn test_empty_input_is_absent() {
        let env = env_with(&[("INPUT_TEMPLATE", ""), ("INPUT_MESSAGE1", "")]);
        let inputs = ActionInputs::from_env(&env);
        assert!(inputs.template.is_none());
        assert_eq!(inputs.message1, "");
    }

    #[test]
    fn test_multiline_inputs_split_per_line() {
        let env = env_with(&[
            ("INPUT_ACTION_TITLES", "Dashboard\nDocs"),
            ("INPUT_ACTION_URLS", "https://a.example\nhttps://b.example"),
        ]);
        let inputs = ActionInputs::from_env(&env);
        assert_eq!(inputs.action_titles, vec!["Dashboard", "Docs"]);
        assert_eq!(
            inputs.action_urls,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_absent_multiline_input_is_empty() {
        let env = env_with(&[]);
        let inputs = ActionInputs::from_env(&env);
        assert!(inputs.action_titles.is_empty());
        assert!(inputs.action_urls.is_empty());
    }
}
