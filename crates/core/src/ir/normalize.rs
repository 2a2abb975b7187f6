//! Normalization from OpenAPI paths to parsed operations.
//!
//! This module handles the operation-level OpenAPI logic:
//! - Parameter, request body and response `$ref` resolution
//! - Path-level and operation-level parameter merging
//! - Success response selection
//! - Grouping operations by tag

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::api::{HttpMethod, ParamLocation, ParsedOperation, ParsedParameter, ParsedRequestBody};
use super::utils::{capitalize_first, sanitize_ts_identifier};
use crate::error::GenerateError;
use crate::schema::{ReferenceResolver, SchemaNode};
use crate::spec::{Document, MaybeRef, MediaType, Operation, Parameter};

/// Tag used for operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// Parse every operation in the document, in path then method order.
pub fn parse_operations(document: &Document) -> Result<Vec<ParsedOperation>, GenerateError> {
    let resolver = document.resolver();
    let mut operations = Vec::new();
    let mut method_names = HashSet::new();

    for (path, item) in &document.spec().paths {
        let path_params = item.parameters.as_deref().unwrap_or_default();

        for (method, op) in item.operations() {
            let parsed = parse_operation(path, method, op, path_params, &resolver)?;

            // Check for operationId collision
            if !method_names.insert(sanitize_ts_identifier(&parsed.operation_id)) {
                return Err(GenerateError::DuplicateOperationId {
                    operation_id: parsed.operation_id,
                    method: method.as_str().to_string(),
                    path: path.clone(),
                });
            }

            operations.push(parsed);
        }
    }

    debug!(count = operations.len(), "Parsed operations.");
    Ok(operations)
}

fn parse_operation(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    path_params: &[MaybeRef<Parameter>],
    resolver: &ReferenceResolver<'_>,
) -> Result<ParsedOperation, GenerateError> {
    let mut parameters = Vec::new();
    for param in path_params.iter().chain(op.parameters.iter().flatten()) {
        let param = resolve_item(param, resolver)?;
        let location = match param.location.as_str() {
            "path" => ParamLocation::Path,
            "query" => ParamLocation::Query,
            other => {
                debug!(name = %param.name, location = other, "Skipping parameter.");
                continue;
            }
        };
        parameters.push(ParsedParameter {
            required: param.required || location == ParamLocation::Path,
            schema: param
                .schema
                .as_ref()
                .map_or_else(SchemaNode::string, SchemaNode::from_raw),
            name: param.name,
            location,
        });
    }

    let request_body = match &op.request_body {
        Some(body) => {
            let body = resolve_item(body, resolver)?;
            json_schema(body.content.as_ref()).map(|schema| ParsedRequestBody {
                schema,
                required: body.required,
            })
        }
        None => None,
    };

    let operation_id = op
        .operation_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| synthesize_operation_id(method, path));

    Ok(ParsedOperation {
        method,
        path_template: path.to_string(),
        operation_id,
        summary: op.summary.clone(),
        tags: op.tags.clone().unwrap_or_default(),
        parameters,
        has_body: request_body.is_some(),
        request_body,
        response: success_response(op, resolver)?,
    })
}

/// Schema of the lowest 2xx status code that has JSON content.
fn success_response(
    op: &Operation,
    resolver: &ReferenceResolver<'_>,
) -> Result<Option<SchemaNode>, GenerateError> {
    let mut successes: Vec<(u16, &MaybeRef<_>)> = op
        .responses
        .iter()
        .filter_map(|(code, response)| {
            let code = code.parse::<u16>().ok()?;
            (200..300).contains(&code).then_some((code, response))
        })
        .collect();
    successes.sort_by_key(|(code, _)| *code);

    for (_, response) in successes {
        let response = resolve_item(response, resolver)?;
        if let Some(schema) = json_schema(response.content.as_ref()) {
            return Ok(Some(schema));
        }
    }
    Ok(None)
}

/// Schema of the first JSON media type; `unknown` if it declares none.
fn json_schema(content: Option<&IndexMap<String, MediaType>>) -> Option<SchemaNode> {
    content?
        .iter()
        .find(|(media_type, _)| is_json_media_type(media_type))
        .map(|(_, media)| {
            media
                .schema
                .as_ref()
                .map_or_else(SchemaNode::unknown, SchemaNode::from_raw)
        })
}

fn is_json_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn resolve_item<T: Clone + DeserializeOwned>(
    item: &MaybeRef<T>,
    resolver: &ReferenceResolver<'_>,
) -> Result<T, GenerateError> {
    match item {
        MaybeRef::Ref { ref_path } => resolver.resolve_as(ref_path),
        MaybeRef::Item(value) => Ok(value.clone()),
    }
}

/// `GET /pets/{petId}` -> `getPetsPetId`.
pub fn synthesize_operation_id(method: HttpMethod, path: &str) -> String {
    let mut id = method.as_str().to_ascii_lowercase();
    for word in path
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        id.push_str(&capitalize_first(word));
    }
    id
}

/// Group operations by tag, in order of first appearance. An operation with
/// several tags lands in each group; untagged ones go to [`DEFAULT_TAG`].
pub fn group_by_tag(operations: &[ParsedOperation]) -> IndexMap<String, Vec<&ParsedOperation>> {
    let mut groups: IndexMap<String, Vec<&ParsedOperation>> = IndexMap::new();
    for op in operations {
        if op.tags.is_empty() {
            groups.entry(DEFAULT_TAG.to_string()).or_default().push(op);
            continue;
        }
        let mut seen = HashSet::new();
        for tag in op.tags.iter().filter(|t| seen.insert(t.as_str())) {
            groups.entry(tag.clone()).or_default().push(op);
        }
    }
    groups
}
