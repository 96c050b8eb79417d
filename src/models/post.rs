//! Post request and response models

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::PostRecord;

use super::validation::{self, ValidationError};
use super::{patch_field, resolve_patch};

/// Maximum length of a post title.
pub const TITLE_MAX: usize = 200;

/// Author details joined from the owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub email: String,
    pub user_id: String,
}

/// A post as returned by the API. `user_id` is the owning user's external id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

impl From<PostRecord> for Post {
    fn from(r: PostRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            body: r.body,
            author: Author {
                name: r.author_name,
                email: r.author_email,
                user_id: r.user_id.clone(),
            },
            user_id: r.user_id,
            // Rows from older database variants may carry a NULL timestamp;
            // substitute the current time rather than failing the read.
            created_at: r
                .created_at
                .map(|t| Utc.from_utc_datetime(&t))
                .unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    /// External id of the owning user.
    pub user_id: String,
}

impl CreatePost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_length("title", &self.title, TITLE_MAX)?;
        validation::require_non_empty("body", &self.body)?;
        validation::require_non_empty("userId", &self.user_id)
    }
}

/// Partial update payload. An absent field leaves the stored value untouched.
/// The owning user is immutable and cannot be patched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    #[serde(default, deserialize_with = "patch_field")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub body: Option<Option<String>>,
}

impl UpdatePost {
    pub fn title_patch(&self) -> Result<Option<&str>, ValidationError> {
        let title = resolve_patch("title", &self.title)?;
        if let Some(title) = title {
            validation::require_length("title", title, TITLE_MAX)?;
        }
        Ok(title.map(String::as_str))
    }

    pub fn body_patch(&self) -> Result<Option<&str>, ValidationError> {
        let body = resolve_patch("body", &self.body)?;
        if let Some(body) = body {
            validation::require_non_empty("body", body)?;
        }
        Ok(body.map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created_at: Option<chrono::NaiveDateTime>) -> PostRecord {
        PostRecord {
            id: 1,
            title: "T".into(),
            body: "B".into(),
            user_id: "u-1".into(),
            created_at,
            author_name: "Ann".into(),
            author_email: "ann@x.com".into(),
        }
    }

    #[test]
    fn shapes_author_from_joined_columns() {
        let post = Post::from(record(Some(
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )));
        assert_eq!(post.author.name, "Ann");
        assert_eq!(post.author.user_id, "u-1");
        assert_eq!(post.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn missing_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let post = Post::from(record(None));
        assert!(post.created_at >= before);
    }

    #[test]
    fn create_post_bounds() {
        let ok = CreatePost {
            title: "T".into(),
            body: "B".into(),
            user_id: "u-1".into(),
        };
        assert!(ok.validate().is_ok());

        let empty_body = CreatePost {
            title: "T".into(),
            body: String::new(),
            user_id: "u-1".into(),
        };
        assert_eq!(
            empty_body.validate(),
            Err(ValidationError::Empty { field: "body" })
        );
    }
}
