//! API-level IR for parsed operations and generated clients.

use crate::schema::SchemaNode;

/// HTTP method
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
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

/// Parameter location. Header and cookie parameters are dropped during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    Path,
    Query,
}

/// One path or query parameter, references already followed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParameter {
    /// Name as written in the document (the wire name).
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: SchemaNode,
}

/// JSON request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequestBody {
    pub schema: SchemaNode,
    pub required: bool,
}

/// Normalized API operation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOperation {
    pub method: HttpMethod,
    /// URL path (e.g., "/pets/{petId}")
    pub path_template: String,
    /// Declared operationId, or one synthesized from method and path
    pub operation_id: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Path-level parameters first, then operation-level, in declaration order
    pub parameters: Vec<ParsedParameter>,
    pub request_body: Option<ParsedRequestBody>,
    /// Schema of the first 2xx JSON response; `None` means the call returns nothing
    pub response: Option<SchemaNode>,
    pub has_body: bool,
}

/// One tag group turned into a client class.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedClient {
    pub tag: String,
    pub class_name: String,
    pub file_name: String,
    pub operations: Vec<ParsedOperation>,
}

/// A client together with its rendered source.
#[derive(Debug, Clone)]
pub struct EmittedClient {
    pub client: GeneratedClient,
    pub source: String,
    /// Shape names imported from the types file, sorted
    pub imports: Vec<String>,
}
