use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One entry of the users file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub alias: String,
}

/// Structured chat-user reference embedded in the payload so Teams
/// notifies the mentioned people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub text: String,
    pub mentioned: MentionedUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionedUser {
    pub id: String,
    pub name: String,
}

pub fn load_users(path: impl AsRef<Path>) -> Result<Vec<ChatUser>, UsersError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| UsersError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| UsersError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Maps users 1:1 onto mention entities, preserving order.
pub fn build_entities(users: &[ChatUser]) -> Vec<MentionEntity> {
    users
        .iter()
        .map(|user| MentionEntity {
            entity_type: "mention".to_string(),
            text: format!("<at>{}</at>", user.alias),
            mentioned: MentionedUser {
                id: user.id.clone(),
                name: user.display_name.clone(),
            },
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum UsersError {
    #[error("failed to read users file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse users file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_entities_maps_in_order() {
        let users = vec![
            ChatUser {
                id: "u1".to_string(),
                display_name: "Jane Doe".to_string(),
                alias: "jane".to_string(),
            },
            ChatUser {
                id: "u2".to_string(),
                display_name: "John Roe".to_string(),
                alias: "john".to_string(),
            },
        ];

        let entities = build_entities(&users);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].text, "<at>jane</at>");
        assert_eq!(entities[0].mentioned.name, "Jane Doe");
        assert_eq!(entities[1].mentioned.id, "u2");
    }

    #[test]
    fn test_empty_users_yield_no_entities() {
        assert!(build_entities(&[]).is_empty());
    }

    #[test]
    fn test_entity_serialization_shape() {
        let entities = build_entities(&[ChatUser {
            id: "29:abc".to_string(),
            display_name: "Jane Doe".to_string(),
            alias: "jane".to_string(),
        }]);
        assert_eq!(
            serde_json::to_value(&entities).unwrap(),
            serde_json::json!([{
                "type": "mention",
                "text": "<at>jane</at>",
                "mentioned": { "id": "29:abc", "name": "Jane Doe" }
            }])
        );
    }

    #[test]
    fn test_load_users_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "id": "u1", "displayName": "Jane Doe", "alias": "jane" }}]"#
        )
        .unwrap();

        let users = load_users(file.path()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].alias, "jane");
    }

    #[test]
    fn test_load_users_rejects_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "id": "u1" }}]"#).unwrap();
        let err = load_users(file.path()).unwrap_err();
        assert!(matches!(err, UsersError::Parse { .. }));
    }
}
