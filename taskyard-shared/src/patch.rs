/// Tri-state partial-update helpers
///
/// Update payloads distinguish three cases per field: the key is absent (do
/// not touch the field), the key is `null` (clear the field), or the key has
/// a value (overwrite the field). Plain `Option<T>` collapses the first two,
/// so nullable patch fields are modeled as `Option<Option<T>>`:
///
/// - `None`: key absent, leave the stored value alone
/// - `Some(None)`: key was `null`, clear the column
/// - `Some(Some(v))`: overwrite with `v`
///
/// Serde needs a custom deserializer to produce the outer `Some` for present
/// keys, combined with `#[serde(default)]` for absent ones:
///
/// ```
/// use serde::Deserialize;
/// use taskyard_shared::patch::double_option;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     #[serde(default, deserialize_with = "double_option")]
///     description: Option<Option<String>>,
/// }
///
/// let p: Patch = serde_json::from_str(r#"{}"#).unwrap();
/// assert!(p.description.is_none());
///
/// let p: Patch = serde_json::from_str(r#"{"description": null}"#).unwrap();
/// assert_eq!(p.description, Some(None));
///
/// let p: Patch = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
/// assert_eq!(p.description, Some(Some("x".to_string())));
/// ```

use serde::{Deserialize, Deserializer};

/// Deserializes a present key into `Some(inner)`, preserving `null` as
/// `Some(None)`. Pair with `#[serde(default)]` so absent keys stay `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
