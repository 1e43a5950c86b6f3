//! Query-string deserialization helpers.
//!
//! Filter structs flatten [`crate::utils::pagination::PaginationParams`],
//! which forces every field through string deserialization; these helpers
//! turn empty strings into `None` instead of a 400.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::modules::users::model::{Role, StoreStatus};

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<Role>().map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn deserialize_optional_store_status<'de, D>(
    deserializer: D,
) -> Result<Option<StoreStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<StoreStatus>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
