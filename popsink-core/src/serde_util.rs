//! Serde helpers shared by the wire types

use serde::{Deserialize, Deserializer};

/// Deserialize a field that the API may send as `null`, falling back to the
/// type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
