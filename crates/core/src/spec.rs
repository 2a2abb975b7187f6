//! OpenAPI document structs for serde deserialization.
//!
//! This module defines the subset of OpenAPI 3.x needed to produce TypeScript
//! declarations and clients. Maps are `IndexMap`s so that document order
//! survives parsing and drives output order.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::ir::HttpMethod;
use crate::schema::{ReferenceResolver, SchemaNode};

/// Root of an OpenAPI document.
#[derive(Debug, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Deserialize)]
pub struct Components {
    pub schemas: Option<IndexMap<String, Schema>>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    /// Path-level parameters shared by all operations.
    pub parameters: Option<Vec<MaybeRef<Parameter>>>,
}

/// An API operation (endpoint).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub parameters: Option<Vec<MaybeRef<Parameter>>>,
    pub request_body: Option<MaybeRef<RequestBody>>,
    #[serde(default)]
    pub responses: IndexMap<String, MaybeRef<Response>>,
}

/// Either an inline object or a `$ref` to one elsewhere in the document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeRef<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}

/// A parameter (path, query, header or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    pub content: Option<IndexMap<String, MediaType>>,
}

/// A response definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties for object types, in document order.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Enum values (can be strings, integers, floats, booleans, or null).
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Union type (any of these schemas).
    pub any_of: Option<Vec<Schema>>,

    /// Union type (exactly one of these schemas).
    pub one_of: Option<Vec<Schema>>,

    /// Intersection type (all of these schemas combined).
    pub all_of: Option<Vec<Schema>>,

    /// Additional properties for object types (for Record/dict types).
    pub additional_properties: Option<AdditionalProperties>,

    /// Discriminator for polymorphic oneOf/anyOf schemas.
    pub discriminator: Option<Discriminator>,

    /// Format hint (e.g., date-time, uuid).
    pub format: Option<String>,

    /// Constant value - schema matches only this exact value.
    #[serde(rename = "const")]
    pub const_value: Option<Value>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead).
    pub nullable: Option<bool>,

    pub description: Option<String>,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Discriminator for polymorphic schemas (oneOf/anyOf).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// The property name that contains the discriminator value.
    pub property_name: String,
    /// Optional mapping from discriminator values to schema refs.
    pub mapping: Option<IndexMap<String, String>>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

impl PathItem {
    /// Declared operations in OpenAPI field order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, self.get.as_ref()),
            (HttpMethod::Put, self.put.as_ref()),
            (HttpMethod::Post, self.post.as_ref()),
            (HttpMethod::Delete, self.delete.as_ref()),
            (HttpMethod::Options, self.options.as_ref()),
            (HttpMethod::Head, self.head.as_ref()),
            (HttpMethod::Patch, self.patch.as_ref()),
            (HttpMethod::Trace, self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// A named, reusable schema from `components.schemas`.
#[derive(Debug, Clone)]
pub struct NamedShape {
    pub name: String,
    pub node: SchemaNode,
}

/// A loaded OpenAPI document: the raw tree (for pointer resolution) plus its typed view.
#[derive(Debug)]
pub struct Document {
    raw: Value,
    spec: OpenApiSpec,
}

impl Document {
    /// Parse JSON or YAML, choosing by the first non-whitespace character.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            Self::from_yaml(text)
        }
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_value(raw)
    }

    pub fn from_yaml(text: &str) -> Result<Self, LoadError> {
        // Going through serde_yaml::Value keeps non-string keys such as
        // unquoted `200:` response codes; serde_json stringifies them.
        let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
        let raw = serde_json::to_value(yaml).map_err(LoadError::Shape)?;
        Self::from_value(raw)
    }

    /// Validate the top-level shape and build the typed view.
    pub fn from_value(raw: Value) -> Result<Self, LoadError> {
        let version = raw
            .get("openapi")
            .and_then(Value::as_str)
            .ok_or(LoadError::MissingVersion)?;
        if !version.starts_with("3.") {
            return Err(LoadError::UnsupportedVersion {
                version: version.to_string(),
            });
        }
        if !raw.get("paths").is_some_and(Value::is_object) {
            return Err(LoadError::MissingPaths);
        }

        let spec = OpenApiSpec::deserialize(&raw).map_err(LoadError::Shape)?;
        Ok(Self { raw, spec })
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(&self.raw)
    }

    /// Component schemas converted to schema nodes, in document order.
    pub fn named_shapes(&self) -> Vec<NamedShape> {
        self.spec
            .components
            .as_ref()
            .and_then(|c| c.schemas.as_ref())
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, schema)| NamedShape {
                        name: name.clone(),
                        node: SchemaNode::from_raw(schema),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_preserves_schema_order() {
        let doc = Document::parse(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": { "schemas": { "Zebra": { "type": "string" }, "Apple": { "type": "number" } } }
}"##,
        )
        .unwrap();
        let names: Vec<_> = doc.named_shapes().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Zebra", "Apple"]);
    }

    #[test]
    fn test_parse_yaml_with_numeric_response_codes() {
        let yaml = r#"
openapi: 3.1.0
paths:
  /ping:
    get:
      operationId: ping
      responses:
        200:
          description: OK
"#;
        let doc = Document::parse(yaml).unwrap();
        let item = &doc.spec().paths["/ping"];
        let (method, op) = item.operations().next().unwrap();
        assert_eq!(method, HttpMethod::Get);
        assert!(op.responses.contains_key("200"));
    }

    #[test]
    fn test_missing_paths_rejected() {
        let err = Document::from_json(r#"{ "openapi": "3.1.0" }"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingPaths));
    }

    #[test]
    fn test_swagger_2_rejected() {
        let err = Document::from_json(r#"{ "openapi": "2.0", "paths": {} }"#).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedVersion { .. }));

        let err = Document::from_json(r#"{ "swagger": "2.0", "paths": {} }"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingVersion));
    }

    #[test]
    fn test_invalid_json_error() {
        let err = Document::from_json(r#"{ "openapi": "3.1.0", invalid }"#).unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_parameter_ref_deserializes_as_ref() {
        let p: MaybeRef<Parameter> =
            serde_json::from_str(r##"{ "$ref": "#/components/parameters/Limit" }"##).unwrap();
        assert!(matches!(p, MaybeRef::Ref { ref_path } if ref_path == "#/components/parameters/Limit"));

        let p: MaybeRef<Parameter> =
            serde_json::from_str(r#"{ "name": "limit", "in": "query" }"#).unwrap();
        assert!(matches!(p, MaybeRef::Item(p) if p.name == "limit" && !p.required));
    }
}
