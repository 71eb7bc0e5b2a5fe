use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::header::HeaderOrRef;
use super::link::LinkOrRef;
use super::media_type::MediaType;
use super::reference::RefOr;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, LinkOrRef>,
}

/// A reference or inline response.
pub type ResponseOrRef = RefOr<Response>;

/// Deserialize a status-code keyed map.
///
/// YAML authors write `200:` unquoted. Inside a callback the operation is
/// buffered before it is decoded and such keys arrive as integers, so they
/// are accepted and stored as their decimal string.
pub(crate) fn deserialize_status_map<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, ResponseOrRef>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(StatusMapVisitor)
}

struct StatusMapVisitor;

impl<'de> Visitor<'de> for StatusMapVisitor {
    type Value = IndexMap<String, ResponseOrRef>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of status codes to responses")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut responses = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(StatusKey(code)) = map.next_key()? {
            let response = map.next_value()?;
            responses.insert(code, response);
        }
        Ok(responses)
    }
}

struct StatusKey(String);

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = StatusKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a status code or `default`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<StatusKey, E> {
                Ok(StatusKey(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
