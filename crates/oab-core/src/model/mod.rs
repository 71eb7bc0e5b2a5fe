//! Typed OpenAPI 3.x document model.
//!
//! Every reusable entity is wrapped in [`RefOr`], which is either a `$ref`
//! pointer or the inline value.

pub mod components;
pub mod document;
pub mod example;
pub mod extensions;
pub mod header;
pub mod link;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;

pub use components::{ComponentKind, Components};
pub use document::{Contact, Document, ExternalDocumentation, Info, License, Paths, Tag};
pub use example::{Example, ExampleOrRef};
pub use extensions::Extensions;
pub use header::{Header, HeaderOrRef};
pub use link::{Link, LinkOrRef};
pub use media_type::{Encoding, MediaType};
pub use operation::{Callback, CallbackOrRef, HttpMethod, Operation, PathItem};
pub use parameter::{Parameter, ParameterLocation, ParameterOrRef};
pub use reference::RefOr;
pub use request_body::{RequestBody, RequestBodyOrRef};
pub use response::{Response, ResponseOrRef};
pub use schema::{AdditionalProperties, Discriminator, Schema, SchemaOrRef, SchemaType, TypeSet};
pub use security::{
    ApiKeyLocation, OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme,
    SecuritySchemeOrRef, SecuritySchemeType,
};
pub use server::{Server, ServerVariable};
