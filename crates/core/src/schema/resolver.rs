//! Internal `$ref` resolution.
//!
//! Pointers follow RFC 6901 against the raw document tree. Only pointers into
//! the same document are followed; URLs and file paths are rejected up front.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{NodeKind, SchemaNode};
use crate::error::{GenerateError, ReferenceKind};
use crate::spec::Schema;

/// Resolves `#/...` pointers against the raw document.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    document: &'a Value,
}

/// Classify a `$ref` string.
pub fn classify_reference(reference: &str) -> ReferenceKind {
    if reference.starts_with('#') {
        ReferenceKind::Internal
    } else if reference.starts_with("http://") || reference.starts_with("https://") {
        ReferenceKind::Url
    } else {
        ReferenceKind::ExternalFile
    }
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    /// Walk a pointer to its raw target.
    pub fn lookup(&self, pointer: &str) -> Result<&'a Value, GenerateError> {
        let mut current = self.document;
        for segment in pointer_segments(pointer)? {
            let next = match current {
                Value::Object(map) => map.get(segment.as_str()),
                Value::Array(items) => {
                    let index: usize =
                        segment
                            .parse()
                            .map_err(|_| GenerateError::InvalidPointerPath {
                                pointer: pointer.to_string(),
                                segment: segment.clone(),
                            })?;
                    items.get(index)
                }
                _ => {
                    return Err(GenerateError::InvalidPointerPath {
                        pointer: pointer.to_string(),
                        segment,
                    });
                }
            };
            current = next.ok_or_else(|| GenerateError::PointerNotFound {
                pointer: pointer.to_string(),
            })?;
        }
        Ok(current)
    }

    /// Resolve a pointer to a schema node.
    pub fn resolve(&self, pointer: &str) -> Result<SchemaNode, GenerateError> {
        let raw: Schema = self.resolve_as(pointer)?;
        Ok(SchemaNode::from_raw(&raw))
    }

    /// Resolve a pointer and deserialize the target as `T` (parameters,
    /// request bodies, responses).
    pub fn resolve_as<T: DeserializeOwned>(&self, pointer: &str) -> Result<T, GenerateError> {
        let value = self.lookup(pointer)?;
        T::deserialize(value).map_err(|e| GenerateError::InvalidTarget {
            pointer: pointer.to_string(),
            message: e.to_string(),
        })
    }

    pub fn is_reference(node: &SchemaNode) -> bool {
        node.is_reference()
    }

    /// Follow one level of reference, borrowing the node when it is not one.
    pub fn resolve_if_reference<'n>(
        &self,
        node: &'n SchemaNode,
    ) -> Result<Cow<'n, SchemaNode>, GenerateError> {
        match &node.kind {
            NodeKind::Reference(pointer) => Ok(Cow::Owned(self.resolve(pointer)?)),
            _ => Ok(Cow::Borrowed(node)),
        }
    }

    /// Name of the component schema a pointer designates.
    ///
    /// Only `#/components/schemas/<Name>` can be used as a type name; the
    /// target must exist.
    pub fn shape_name(&self, pointer: &str) -> Result<String, GenerateError> {
        let segments = pointer_segments(pointer)?;
        match segments.as_slice() {
            [components, schemas, name] if components == "components" && schemas == "schemas" => {
                self.lookup(pointer)?;
                Ok(name.clone())
            }
            _ => Err(GenerateError::UnsupportedPointerShape {
                pointer: pointer.to_string(),
            }),
        }
    }
}

fn pointer_segments(pointer: &str) -> Result<Vec<String>, GenerateError> {
    let kind = classify_reference(pointer);
    if kind != ReferenceKind::Internal {
        return Err(GenerateError::UnsupportedReference {
            pointer: pointer.to_string(),
            kind,
        });
    }

    let fragment = &pointer[1..];
    if fragment.is_empty() {
        return Ok(Vec::new());
    }
    let Some(path) = fragment.strip_prefix('/') else {
        return Err(GenerateError::InvalidPointerPath {
            pointer: pointer.to_string(),
            segment: fragment.to_string(),
        });
    };
    Ok(path.split('/').map(unescape_segment).collect())
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
