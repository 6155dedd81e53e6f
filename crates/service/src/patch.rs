//! Helpers for sparse (PATCH) payloads.
//!
//! Nullable columns use `Option<Option<T>>`: outer `None` means the field was
//! not sent, `Some(None)` means it was sent as `null`.

use serde::{Deserialize, Deserializer};

/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
