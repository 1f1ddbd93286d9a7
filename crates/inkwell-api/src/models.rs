// Wire models for the blog REST API.
//
// Read shapes embed related objects (a post carries its full category and
// author); write shapes reference them by id. Server-assigned fields are
// read-only and never appear in write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Read models ──────────────────────────────────────────────────────

/// A post category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Server-computed post count at response time. Goes stale as soon as
    /// posts change locally; derived counts are computed from the post cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A blog post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A user account. Read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    /// `"First Last"`, falling back to the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

// ── Write payloads ───────────────────────────────────────────────────

/// Body for creating or fully replacing a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Body for a partial category update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for creating or fully replacing a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category_id: i64,
    #[serde(default)]
    pub published: bool,
}

/// Body for a partial post update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_deserializes_embedded_relations() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "title": "Hello",
            "content": "Body",
            "category": { "id": 2, "name": "News", "description": "", "posts_count": 3 },
            "author": { "id": 1, "username": "admin", "email": "a@b.c",
                        "first_name": "", "last_name": "" },
            "published": true,
            "created_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T10:35:00Z"
        }))
        .unwrap();

        assert_eq!(post.category.id, 2);
        assert_eq!(post.category.posts_count, Some(3));
        assert_eq!(post.author.as_ref().unwrap().username, "admin");
        assert!(post.published);
    }

    #[test]
    fn category_description_defaults_to_empty() {
        let category: Category = serde_json::from_value(json!({ "id": 1, "name": "X" })).unwrap();
        assert_eq!(category.description, "");
        assert!(category.created_at.is_none());
    }

    #[test]
    fn patch_omits_absent_fields() {
        let patch = PostPatch {
            published: Some(true),
            ..PostPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "published": true }));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = User {
            id: 1,
            username: "jdoe".into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        };
        assert_eq!(user.display_name(), "jdoe");
        user.first_name = "Jane".into();
        assert_eq!(user.display_name(), "Jane");
    }
}
