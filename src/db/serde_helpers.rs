use serde::{Deserialize, Deserializer};

/// Reads a sequence that may be stored or sent as `null`; `null` becomes empty.
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
