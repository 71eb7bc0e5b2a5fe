use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::example::ExampleOrRef;
use super::media_type::MediaType;
use super::reference::RefOr;
use super::schema::SchemaOrRef;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(rename = "allowEmptyValue", skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    #[serde(rename = "allowReserved", skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, ExampleOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// A reference or inline parameter.
pub type ParameterOrRef = RefOr<Parameter>;
