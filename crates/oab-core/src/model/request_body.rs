use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::MediaType;
use super::reference::RefOr;

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub content: IndexMap<String, MediaType>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// A reference or inline request body.
pub type RequestBodyOrRef = RefOr<RequestBody>;
