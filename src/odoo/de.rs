//! Deserialization helpers for Odoo field values.
//!
//! Odoo encodes an unset field as `false` whatever its declared type, and a
//! many2one field as a `[id, "display name"]` pair.

use serde::{Deserialize, Deserializer, Serialize};

/// Maps `false` and `null` to `None`
///
/// Use with `#[serde(default, deserialize_with = "falsy")]`.
pub fn falsy<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OrFalse<T> {
        Value(T),
        Flag(bool),
    }

    Ok(match Option::<OrFalse<T>>::deserialize(deserializer)? {
        Some(OrFalse::Value(value)) => Some(value),
        Some(OrFalse::Flag(_)) | None => None,
    })
}

/// Reference to another record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Many2One {
    pub id: i64,
    pub name: String,
}

impl<'de> Deserialize<'de> for Many2One {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (id, name) = <(i64, String)>::deserialize(deserializer)?;
        Ok(Self { id, name })
    }
}
