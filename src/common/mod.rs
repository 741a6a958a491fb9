use serde::{Deserialize, Deserializer};

/// Deserialize a JSON `null` as the type's default value. The backend sends `null` for empty
/// strings and numbers on older records.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
