use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::document::ExternalDocumentation;
use super::extensions::Extensions;
use super::parameter::ParameterOrRef;
use super::reference::RefOr;
use super::request_body::RequestBodyOrRef;
use super::response::{ResponseOrRef, deserialize_status_map};
use super::security::SecurityRequirement;
use super::server::Server;

/// The HTTP methods a path item has operation slots for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase name, as used for the document key.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// Fragment file holding this method's operation inside a path directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get.yml",
            HttpMethod::Put => "put.yml",
            HttpMethod::Post => "post.yml",
            HttpMethod::Delete => "delete.yml",
            HttpMethod::Options => "options.yml",
            HttpMethod::Head => "head.yml",
            HttpMethod::Patch => "patch.yml",
            HttpMethod::Trace => "trace.yml",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime expression → path item describing an out-of-band request.
pub type Callback = IndexMap<String, PathItem>;

pub type CallbackOrRef = RefOr<Callback>;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(
        default,
        deserialize_with = "deserialize_status_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, CallbackOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// `Some(vec![])` explicitly clears the document-level requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// The operations and shared settings of one URL path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Mutable access to the slot for `method`.
    pub fn operation_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Trace => &mut self.trace,
        }
    }

    /// Present operations in method declaration order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}
