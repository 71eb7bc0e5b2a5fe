use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::example::ExampleOrRef;
use super::header::HeaderOrRef;
use super::link::LinkOrRef;
use super::operation::CallbackOrRef;
use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::SchemaOrRef;
use super::security::SecuritySchemeOrRef;

/// The kinds of reusable component, one directory each under `components/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    Responses,
    Parameters,
    Examples,
    RequestBodies,
    Headers,
    SecuritySchemes,
    Links,
    Callbacks,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Schemas,
        ComponentKind::Responses,
        ComponentKind::Parameters,
        ComponentKind::Examples,
        ComponentKind::RequestBodies,
        ComponentKind::Headers,
        ComponentKind::SecuritySchemes,
        ComponentKind::Links,
        ComponentKind::Callbacks,
    ];

    /// Directory name, identical to the key inside the `components` object.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Responses => "responses",
            ComponentKind::Parameters => "parameters",
            ComponentKind::Examples => "examples",
            ComponentKind::RequestBodies => "requestBodies",
            ComponentKind::Headers => "headers",
            ComponentKind::SecuritySchemes => "securitySchemes",
            ComponentKind::Links => "links",
            ComponentKind::Callbacks => "callbacks",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Components object holding reusable definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, ExampleOrRef>,

    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderOrRef>,

    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, SecuritySchemeOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, LinkOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, CallbackOrRef>,
}

impl Components {
    /// Number of entries for one kind.
    pub fn len_of(&self, kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::Schemas => self.schemas.len(),
            ComponentKind::Responses => self.responses.len(),
            ComponentKind::Parameters => self.parameters.len(),
            ComponentKind::Examples => self.examples.len(),
            ComponentKind::RequestBodies => self.request_bodies.len(),
            ComponentKind::Headers => self.headers.len(),
            ComponentKind::SecuritySchemes => self.security_schemes.len(),
            ComponentKind::Links => self.links.len(),
            ComponentKind::Callbacks => self.callbacks.len(),
        }
    }

    pub fn len(&self) -> usize {
        ComponentKind::ALL.iter().map(|kind| self.len_of(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
