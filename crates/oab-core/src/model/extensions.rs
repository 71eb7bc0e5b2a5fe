use std::fmt;
use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Specification extensions (`x-...` keys) attached to an object.
///
/// Meant to be `#[serde(flatten)]`ed: on decode it keeps only the keys
/// starting with `x-` and drops any other unknown key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Extensions(pub IndexMap<String, Value>);

impl Deref for Extensions {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Extensions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'de> Deserialize<'de> for Extensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtensionsVisitor;

        impl<'de> Visitor<'de> for ExtensionsVisitor {
            type Value = Extensions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of specification extensions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Extensions, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut extensions = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key.starts_with("x-") {
                        extensions.insert(key, map.next_value()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(Extensions(extensions))
            }
        }

        deserializer.deserialize_map(ExtensionsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_only_x_keys_are_kept() {
        let yaml = "x-internal: true\nunknown: 1\nx-codeSamples: [1]\n";
        let extensions: Extensions = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions["x-internal"], json!(true));
        assert_eq!(extensions["x-codeSamples"], json!([1]));
    }
}
