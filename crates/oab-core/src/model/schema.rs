use std::fmt;

use indexmap::IndexMap;
use serde::de::value::{SeqAccessDeserializer, StrDeserializer};
use serde::de::{Error as DeError, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::reference::RefOr;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl<'de> Deserialize<'de> for TypeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TypeSetVisitor;

        impl<'de> Visitor<'de> for TypeSetVisitor {
            type Value = TypeSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a type name or a list of type names")
            }

            fn visit_str<E>(self, v: &str) -> Result<TypeSet, E>
            where
                E: DeError,
            {
                SchemaType::deserialize(StrDeserializer::<E>::new(v)).map(TypeSet::Single)
            }

            fn visit_seq<A>(self, seq: A) -> Result<TypeSet, A::Error>
            where
                A: SeqAccess<'de>,
            {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(TypeSet::Multiple)
            }
        }

        deserializer.deserialize_any(TypeSetVisitor)
    }
}

/// A reference or inline schema.
pub type SchemaOrRef = RefOr<Schema>;

/// Discriminator for polymorphic schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discriminator {
    #[serde(rename = "propertyName")]
    pub property_name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
}

/// A schema object.
///
/// Only the keywords that nest other schemas get a typed field. Validation
/// keywords (`minimum`, `pattern`, `maxItems`, ...) and `x-` extensions are
/// carried through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}

impl<'de> Deserialize<'de> for AdditionalProperties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(allowed) => Ok(AdditionalProperties::Bool(allowed)),
            raw => serde_json::from_value::<SchemaOrRef>(raw)
                .map(|schema| AdditionalProperties::Schema(Box::new(schema)))
                .map_err(DeError::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_properties_keep_refs() {
        let yaml = r##"
type: object
required: [id]
properties:
  id:
    type: integer
    format: int64
  owner:
    $ref: "#/components/schemas/User"
  tags:
    type: array
    items:
      type: string
"##;
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.required, vec!["id".to_string()]);
        assert_eq!(schema.properties.len(), 3);
        assert_eq!(
            schema.properties["owner"].as_reference(),
            Some("#/components/schemas/User")
        );

        let tags = schema.properties["tags"].as_item().unwrap();
        let items = tags.items.as_ref().unwrap();
        assert_eq!(
            items.as_item().unwrap().schema_type,
            Some(TypeSet::Single(SchemaType::String))
        );
    }

    #[test]
    fn test_unmodelled_keywords_survive_round_trip() {
        let yaml = "type: string\nminLength: 3\npattern: ^[a-z]+$\nx-internal: true\n";
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.extra.len(), 3);
        assert_eq!(schema.extra["minLength"], serde_json::json!(3));
        assert_eq!(schema.extra["x-internal"], serde_json::json!(true));

        let encoded = serde_yaml_ng::to_string(&schema).unwrap();
        let decoded: Schema = serde_yaml_ng::from_str(&encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_additional_properties_bool_or_schema() {
        let open: Schema = serde_yaml_ng::from_str("additionalProperties: true\n").unwrap();
        assert_eq!(
            open.additional_properties,
            Some(AdditionalProperties::Bool(true))
        );

        let typed: Schema =
            serde_yaml_ng::from_str("additionalProperties:\n  type: integer\n").unwrap();
        assert!(matches!(
            typed.additional_properties,
            Some(AdditionalProperties::Schema(_))
        ));
    }

    #[test]
    fn test_type_list_and_bad_type_name() {
        let nullable: Schema = serde_yaml_ng::from_str("type: [string, 'null']\n").unwrap();
        assert_eq!(
            nullable.schema_type,
            Some(TypeSet::Multiple(vec![SchemaType::String, SchemaType::Null]))
        );

        let err = serde_yaml_ng::from_str::<Schema>("type: objct\n").unwrap_err();
        assert!(err.to_string().contains("unknown variant `objct`"));

        let err = serde_yaml_ng::from_str::<Schema>("additionalProperties:\n  type: [objct]\n")
            .unwrap_err();
        assert!(err.to_string().contains("objct"));
    }
}
