//! Normalized schema model.
//!
//! Raw [`Schema`] structs mirror the document 1:1. [`SchemaNode`] classifies
//! them into exactly one kind so that the type generators can match on it
//! instead of probing optional fields.

mod declaration;
mod discriminator;
mod resolver;
mod typegen;

use indexmap::{IndexMap, IndexSet};

use crate::spec::{AdditionalProperties, EnumValue, Schema, SchemaType};

pub use declaration::{build_declaration, emit_declaration, enum_declaration};
pub use discriminator::{DiscriminatorInfo, DiscriminatorMap, collect_discriminators};
pub use resolver::{ReferenceResolver, classify_reference};
pub use typegen::{apply_nullable, generate_properties, property_name, to_type_expression};

/// A classified schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: NodeKind,
    /// The value may also be null (3.0 `nullable`, a `null` type-array member,
    /// a `null` union member or a `null` enum value).
    pub nullable: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Primitive {
        kind: PrimitiveKind,
        format: Option<String>,
    },
    Array(Box<SchemaNode>),
    Object(ObjectSchema),
    /// A `$ref`, kept unresolved so cycles stay finite.
    Reference(String),
    Enumeration(Vec<EnumValue>),
    Composition(Composition),
    /// `const`.
    Constant(EnumValue),
    /// No constraints at all.
    Unknown,
    /// A `type` the generator does not recognize.
    Unclassified(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, SchemaNode>,
    pub required: IndexSet<String>,
    pub additional: Option<AdditionalValues>,
}

/// Normalized `additionalProperties`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalValues {
    /// `false`
    Forbidden,
    /// `true` or `{}`
    Open,
    Typed(Box<SchemaNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub kind: CompositionKind,
    pub members: Vec<SchemaNode>,
    pub discriminator: Option<DiscriminatorSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionKind {
    AllOf,
    OneOf,
    AnyOf,
}

/// Discriminator metadata as written on a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorSpec {
    pub property_name: String,
    /// Literal value -> reference (pointer or bare schema name).
    pub mapping: IndexMap<String, String>,
}

impl SchemaNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            nullable: false,
            description: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(NodeKind::Unknown)
    }

    pub fn string() -> Self {
        Self::new(NodeKind::Primitive {
            kind: PrimitiveKind::String,
            format: None,
        })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, NodeKind::Reference(_))
    }

    /// Classify a raw schema.
    ///
    /// Precedence: `$ref`, `const`, `enum`, `allOf`, `oneOf`, `anyOf`, `type`,
    /// then object/array hints from `properties` or `items`.
    pub fn from_raw(raw: &Schema) -> Self {
        let mut nullable = raw.nullable == Some(true);

        let kind = if let Some(pointer) = &raw.ref_path {
            NodeKind::Reference(pointer.clone())
        } else if let Some(value) = &raw.const_value {
            constant_kind(value)
        } else if let Some(values) = &raw.enum_values {
            let non_null: Vec<EnumValue> = values
                .iter()
                .filter(|v| !matches!(v, EnumValue::Null))
                .cloned()
                .collect();
            nullable |= non_null.len() < values.len();
            if non_null.is_empty() {
                NodeKind::Primitive {
                    kind: PrimitiveKind::Null,
                    format: None,
                }
            } else {
                NodeKind::Enumeration(non_null)
            }
        } else if let Some(members) = &raw.all_of {
            NodeKind::Composition(Composition {
                kind: CompositionKind::AllOf,
                members: members.iter().map(SchemaNode::from_raw).collect(),
                discriminator: None,
            })
        } else if let Some(members) = raw.one_of.as_ref().or(raw.any_of.as_ref()) {
            let kind = if raw.one_of.is_some() {
                CompositionKind::OneOf
            } else {
                CompositionKind::AnyOf
            };
            let discriminator = raw.discriminator.as_ref().map(|d| DiscriminatorSpec {
                property_name: d.property_name.clone(),
                mapping: d.mapping.clone().unwrap_or_default(),
            });

            let mut kept = Vec::with_capacity(members.len());
            for member in members.iter().map(SchemaNode::from_raw) {
                if member.is_null() {
                    nullable = true;
                } else {
                    kept.push(member);
                }
            }

            // `anyOf: [T, {type: null}]` is just a nullable T.
            if kept.len() == 1 && discriminator.is_none() {
                let mut only = kept.remove(0);
                only.nullable |= nullable;
                if raw.description.is_some() {
                    only.description.clone_from(&raw.description);
                }
                return only;
            }

            NodeKind::Composition(Composition {
                kind,
                members: kept,
                discriminator,
            })
        } else {
            match &raw.schema_type {
                Some(SchemaType::Single(name)) => type_kind(name, raw),
                Some(SchemaType::Multiple(names)) => {
                    let non_null: Vec<&String> = names.iter().filter(|n| *n != "null").collect();
                    nullable |= non_null.len() < names.len();
                    match non_null.as_slice() {
                        [] => NodeKind::Primitive {
                            kind: PrimitiveKind::Null,
                            format: None,
                        },
                        [single] => type_kind(single, raw),
                        several => NodeKind::Composition(Composition {
                            kind: CompositionKind::AnyOf,
                            members: several
                                .iter()
                                .map(|name| SchemaNode::new(type_kind(name, raw)))
                                .collect(),
                            discriminator: None,
                        }),
                    }
                }
                None if raw.properties.is_some() || raw.additional_properties.is_some() => {
                    NodeKind::Object(object_schema(raw))
                }
                None if raw.items.is_some() => array_kind(raw),
                None => NodeKind::Unknown,
            }
        };

        Self {
            kind,
            nullable,
            description: raw.description.clone(),
        }
    }

    fn is_null(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Primitive {
                kind: PrimitiveKind::Null,
                ..
            }
        )
    }
}

fn type_kind(name: &str, raw: &Schema) -> NodeKind {
    let primitive = |kind| NodeKind::Primitive {
        kind,
        format: raw.format.clone(),
    };
    match name {
        "string" => primitive(PrimitiveKind::String),
        "number" => primitive(PrimitiveKind::Number),
        "integer" => primitive(PrimitiveKind::Integer),
        "boolean" => primitive(PrimitiveKind::Boolean),
        "null" => primitive(PrimitiveKind::Null),
        "array" => array_kind(raw),
        "object" => NodeKind::Object(object_schema(raw)),
        other => NodeKind::Unclassified(other.to_string()),
    }
}

fn array_kind(raw: &Schema) -> NodeKind {
    let items = raw
        .items
        .as_deref()
        .map_or_else(SchemaNode::unknown, SchemaNode::from_raw);
    NodeKind::Array(Box::new(items))
}

fn object_schema(raw: &Schema) -> ObjectSchema {
    let properties = raw
        .properties
        .as_ref()
        .map(|props| {
            props
                .iter()
                .map(|(name, schema)| (name.clone(), SchemaNode::from_raw(schema)))
                .collect()
        })
        .unwrap_or_default();
    let required = raw.required.iter().flatten().cloned().collect();
    let additional = raw.additional_properties.as_ref().map(|ap| match ap {
        AdditionalProperties::Bool(true) => AdditionalValues::Open,
        AdditionalProperties::Bool(false) => AdditionalValues::Forbidden,
        AdditionalProperties::Schema(schema) => {
            let values = SchemaNode::from_raw(schema);
            if values.kind == NodeKind::Unknown && !values.nullable {
                AdditionalValues::Open
            } else {
                AdditionalValues::Typed(Box::new(values))
            }
        }
    });

    ObjectSchema {
        properties,
        required,
        additional,
    }
}

fn constant_kind(value: &serde_json::Value) -> NodeKind {
    use serde_json::Value;

    let literal = match value {
        Value::String(s) => EnumValue::String(s.clone()),
        Value::Bool(b) => EnumValue::Bool(*b),
        Value::Null => EnumValue::Null,
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => EnumValue::Integer(i),
            (None, Some(f)) => EnumValue::Float(f),
            (None, None) => return NodeKind::Unknown,
        },
        Value::Array(_) | Value::Object(_) => return NodeKind::Unknown,
    };
    NodeKind::Constant(literal)
}
