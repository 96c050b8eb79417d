//! Request and response models for the jotter API
//!
//! Organized by resource type:
//! - user: accounts with a public external id
//! - post: blog posts owned by a user
//! - todo: standalone task items

pub mod post;
pub mod todo;
pub mod user;
pub mod validation;

pub use validation::ValidationError;

use serde::{Deserialize, Deserializer};

/// Deserialize a patch field keeping "absent" and "present but null"
/// distinguishable: `None` means the field was absent from the payload,
/// `Some(None)` means an explicit `null` was sent.
pub(crate) fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Resolve a patch field: absent passes through as "no change", an explicit
/// `null` is rejected (all updatable columns are NOT NULL).
pub(crate) fn resolve_patch<'a, T>(
    field: &'static str,
    value: &'a Option<Option<T>>,
) -> Result<Option<&'a T>, ValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Err(ValidationError::Null { field }),
        Some(Some(v)) => Ok(Some(v)),
    }
}
