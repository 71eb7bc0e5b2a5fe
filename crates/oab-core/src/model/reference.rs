use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Either a `$ref` pointer or an inline value of `T`.
///
/// A mapping with a string `$ref` key decodes as a reference and its
/// sibling keys are dropped. Anything else is decoded as `T`, and `T`'s own
/// error is reported when that fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}

impl<T> RefOr<T> {
    /// Build a reference variant.
    pub fn reference(ref_path: impl Into<String>) -> Self {
        RefOr::Ref {
            ref_path: ref_path.into(),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, RefOr::Ref { .. })
    }

    /// The `$ref` target, if this is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            RefOr::Ref { ref_path } => Some(ref_path),
            RefOr::Item(_) => None,
        }
    }

    /// The inline value, if this is not a reference.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            RefOr::Ref { .. } => None,
            RefOr::Item(item) => Some(item),
        }
    }
}

impl<'de, T> Deserialize<'de> for RefOr<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if let Some(ref_path) = raw.get("$ref").and_then(Value::as_str) {
            return Ok(RefOr::reference(ref_path));
        }
        serde_json::from_value::<T>(raw)
            .map(RefOr::Item)
            .map_err(DeError::custom)
    }
}

impl<T> From<T> for RefOr<T> {
    fn from(item: T) -> Self {
        RefOr::Item(item)
    }
}
