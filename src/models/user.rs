//! User request and response models

use serde::{Deserialize, Serialize};

use crate::db::repos::UserRecord;

use super::validation::{self, ValidationError};
use super::{patch_field, resolve_patch};

/// Maximum length of a user display name.
pub const NAME_MAX: usize = 100;

/// A user as returned by the API.
///
/// The numeric `id` is a storage artifact; `user_id` is the stable public
/// identifier that other entities reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_id: String,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            user_id: r.user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_length("name", &self.name, NAME_MAX)?;
        validation::require_email("email", &self.email)
    }
}

/// Partial update payload. An absent field leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    #[serde(default, deserialize_with = "patch_field")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub email: Option<Option<String>>,
}

impl UpdateUser {
    pub fn name_patch(&self) -> Result<Option<&str>, ValidationError> {
        let name = resolve_patch("name", &self.name)?;
        if let Some(name) = name {
            validation::require_length("name", name, NAME_MAX)?;
        }
        Ok(name.map(String::as_str))
    }

    pub fn email_patch(&self) -> Result<Option<&str>, ValidationError> {
        let email = resolve_patch("email", &self.email)?;
        if let Some(email) = email {
            validation::require_email("email", email)?;
        }
        Ok(email.map(String::as_str))
    }
}
