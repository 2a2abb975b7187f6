//! Schema node to TypeScript type expression.

use super::{AdditionalValues, CompositionKind, NodeKind, ObjectSchema, PrimitiveKind, SchemaNode};
use crate::config::{DateType, NullableType, PropertyNameStyle};
use crate::context::GenerationContext;
use crate::diagnostics::DiagnosticKind;
use crate::error::GenerateError;
use crate::ir::types::{TsLiteral, TsObject, TsPrimitive, TsProp, TsType};
use crate::ir::utils::{
    camel_case, enum_value_to_literal, make_string_record, make_unknown_record, pascal_case,
};

/// Render a schema node as a type expression.
///
/// `parent` and `property` name the enclosing declaration and property.
/// When both are present, inline enums are hoisted to a declaration named
/// `<Parent><Property>` and inline objects use the same pair as the scope for
/// their own nested properties.
pub fn to_type_expression(
    node: &SchemaNode,
    ctx: &mut GenerationContext<'_>,
    parent: Option<&str>,
    property: Option<&str>,
) -> Result<TsType, GenerateError> {
    let ty = match &node.kind {
        NodeKind::Primitive { kind, format } => primitive_type(*kind, format.as_deref(), ctx),
        NodeKind::Array(items) => {
            TsType::Array(Box::new(to_type_expression(items, ctx, parent, property)?))
        }
        NodeKind::Object(obj) => {
            let scope = nested_scope(parent, property);
            object_type(obj, ctx, scope.as_deref(), None)?
        }
        NodeKind::Reference(pointer) => TsType::Ref(ctx.resolver().shape_name(pointer)?),
        NodeKind::Enumeration(values) => match (parent, property) {
            (Some(parent), Some(property)) => {
                let requested = format!("{parent}{}", pascal_case(property));
                TsType::Ref(ctx.hoist_enum(&requested, values))
            }
            _ => literal_union(values.iter().map(enum_value_to_literal).collect()),
        },
        NodeKind::Composition(composition) => {
            let mut members = Vec::with_capacity(composition.members.len());
            for member in &composition.members {
                members.push(to_type_expression(member, ctx, parent, property)?);
            }
            match composition.kind {
                CompositionKind::AllOf => combine(members, TsType::Intersection),
                CompositionKind::OneOf | CompositionKind::AnyOf => {
                    combine(members, TsType::Union)
                }
            }
        }
        NodeKind::Constant(value) => TsType::Literal(enum_value_to_literal(value)),
        NodeKind::Unknown => TsType::Primitive(TsPrimitive::Unknown),
        NodeKind::Unclassified(type_name) => {
            ctx.report(DiagnosticKind::UnclassifiedSchema {
                type_name: type_name.clone(),
            });
            TsType::Primitive(TsPrimitive::Unknown)
        }
    };

    Ok(apply_nullable(ty, node.nullable, ctx.config().nullable_type))
}

/// Append the configured bottom value to a nullable type, once.
pub fn apply_nullable(ty: TsType, nullable: bool, style: NullableType) -> TsType {
    if !nullable {
        return ty;
    }
    let bottom = match style {
        NullableType::Null => TsPrimitive::Null,
        NullableType::Undefined => TsPrimitive::Undefined,
    };
    let is_bottom = |t: &TsType| matches!(t, TsType::Primitive(p) if *p == bottom);

    match ty {
        TsType::Union(mut members) => {
            if !members.iter().any(is_bottom) {
                members.push(TsType::Primitive(bottom));
            }
            TsType::Union(members)
        }
        other if is_bottom(&other) => other,
        other => TsType::Union(vec![other, TsType::Primitive(bottom)]),
    }
}

/// Type of an object schema.
///
/// `scope` is the name nested enums are hoisted under. `discriminator_owner`
/// is the named shape whose discriminator binding (if any) narrows one of
/// the properties to a literal.
pub(crate) fn object_type(
    obj: &ObjectSchema,
    ctx: &mut GenerationContext<'_>,
    scope: Option<&str>,
    discriminator_owner: Option<&str>,
) -> Result<TsType, GenerateError> {
    if obj.properties.is_empty() {
        return Ok(match &obj.additional {
            None | Some(AdditionalValues::Open) => make_unknown_record(),
            Some(AdditionalValues::Forbidden) => {
                make_string_record(TsType::Primitive(TsPrimitive::Never))
            }
            Some(AdditionalValues::Typed(values)) => {
                make_string_record(to_type_expression(values, ctx, scope, None)?)
            }
        });
    }

    let properties = generate_properties(obj, ctx, scope, discriminator_owner)?;
    match &obj.additional {
        None | Some(AdditionalValues::Forbidden) => Ok(TsType::Object(TsObject::new(properties))),
        Some(AdditionalValues::Open) => Ok(TsType::Object(TsObject {
            properties,
            index_signature: Some(Box::new(TsType::Primitive(TsPrimitive::Unknown))),
        })),
        Some(AdditionalValues::Typed(values)) => {
            ctx.report(DiagnosticKind::TypedAdditionalProperties);
            let value_type = to_type_expression(values, ctx, scope, None)?;
            Ok(TsType::Intersection(vec![
                TsType::Object(TsObject::new(properties)),
                make_string_record(value_type),
            ]))
        }
    }
}

/// Property list of an object schema, in document order.
pub fn generate_properties(
    obj: &ObjectSchema,
    ctx: &mut GenerationContext<'_>,
    scope: Option<&str>,
    discriminator_owner: Option<&str>,
) -> Result<Vec<TsProp>, GenerateError> {
    let discriminator = discriminator_owner
        .and_then(|owner| ctx.discriminator_for(owner))
        .cloned();
    let style = ctx.config().property_name_style;

    let mut props = Vec::with_capacity(obj.properties.len());
    for (name, schema) in &obj.properties {
        let (ty, optional) = match &discriminator {
            Some(d) if d.property_name == *name => (
                TsType::Literal(TsLiteral::String(d.literal_value.clone())),
                false,
            ),
            _ => (
                to_type_expression(schema, ctx, scope, Some(name))?,
                !obj.required.contains(name),
            ),
        };
        props.push(TsProp {
            name: property_name(name, style),
            ty,
            optional,
            description: schema.description.clone(),
        });
    }
    Ok(props)
}

/// Output spelling of a property name.
pub fn property_name(name: &str, style: PropertyNameStyle) -> String {
    match style {
        PropertyNameStyle::Original => name.to_string(),
        PropertyNameStyle::CamelCase => camel_case(name),
    }
}

fn primitive_type(
    kind: PrimitiveKind,
    format: Option<&str>,
    ctx: &GenerationContext<'_>,
) -> TsType {
    let primitive = match kind {
        PrimitiveKind::String => match (format, ctx.config().date_type) {
            (Some("date" | "date-time"), DateType::Date) => TsPrimitive::Date,
            _ => TsPrimitive::String,
        },
        PrimitiveKind::Number | PrimitiveKind::Integer => TsPrimitive::Number,
        PrimitiveKind::Boolean => TsPrimitive::Boolean,
        PrimitiveKind::Null => TsPrimitive::Null,
    };
    TsType::Primitive(primitive)
}

fn literal_union(literals: Vec<TsLiteral>) -> TsType {
    combine(
        literals.into_iter().map(TsType::Literal).collect(),
        TsType::Union,
    )
}

/// Scope for properties of an inline object found at `parent.property`.
fn nested_scope(parent: Option<&str>, property: Option<&str>) -> Option<String> {
    match (parent, property) {
        (Some(parent), Some(property)) => Some(format!("{parent}{}", pascal_case(property))),
        (Some(parent), None) => Some(parent.to_string()),
        _ => None,
    }
}

fn combine(mut members: Vec<TsType>, wrap: fn(Vec<TsType>) -> TsType) -> TsType {
    match members.len() {
        0 => TsType::Primitive(TsPrimitive::Never),
        1 => members.remove(0),
        _ => wrap(members),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ir::Emit;
    use crate::spec::{Document, Schema};

    const DOC: &str = r##"{
  "openapi": "3.1.0",
  "paths": {},
  "components": {
    "schemas": {
      "User": { "type": "object" },
      "Pet": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }],
        "discriminator": { "propertyName": "petType" }
      },
      "Cat": { "type": "object" }
    }
  }
}"##;

    fn render_with(config: &Config, schema: &str, parent: Option<&str>, property: Option<&str>) -> String {
        let doc = Document::from_json(DOC).unwrap();
        let shapes = doc.named_shapes();
        let mut ctx = GenerationContext::new(&doc, config, &shapes).unwrap();
        let raw: Schema = serde_json::from_str(schema).unwrap();
        let node = SchemaNode::from_raw(&raw);
        to_type_expression(&node, &mut ctx, parent, property).unwrap().emit()
    }

    fn render(schema: &str) -> String {
        render_with(&Config::default(), schema, None, None)
    }

    #[test]
    fn test_primitives() {
        assert_eq!(render(r#"{ "type": "string" }"#), "string");
        assert_eq!(render(r#"{ "type": "integer" }"#), "number");
        assert_eq!(render(r#"{ "type": "boolean" }"#), "boolean");
        assert_eq!(render(r#"{ "type": "null" }"#), "null");
        assert_eq!(render(r#"{}"#), "unknown");
    }

    #[test]
    fn test_dates() {
        assert_eq!(render(r#"{ "type": "string", "format": "date-time" }"#), "string");
        let config = Config {
            date_type: DateType::Date,
            ..Config::default()
        };
        assert_eq!(
            render_with(&config, r#"{ "type": "string", "format": "date" }"#, None, None),
            "Date"
        );
        assert_eq!(
            render_with(&config, r#"{ "type": "string", "format": "uuid" }"#, None, None),
            "string"
        );
    }

    #[test]
    fn test_reference_and_array() {
        assert_eq!(
            render(r##"{ "type": "array", "items": { "$ref": "#/components/schemas/User" } }"##),
            "User[]"
        );
    }

    #[test]
    fn test_nullable_styles() {
        assert_eq!(render(r#"{ "type": ["string", "null"] }"#), "string | null");
        let config = Config {
            nullable_type: NullableType::Undefined,
            ..Config::default()
        };
        assert_eq!(
            render_with(&config, r#"{ "type": "string", "nullable": true }"#, None, None),
            "string | undefined"
        );
        assert_eq!(
            render(r#"{ "type": ["array", "null"], "items": { "type": "integer" } }"#),
            "number[] | null"
        );
    }

    #[test]
    fn test_nullable_union_gets_single_bottom() {
        assert_eq!(
            render(r#"{ "oneOf": [{ "type": "string" }, { "type": "integer" }, { "type": "null" }] }"#),
            "string | number | null"
        );
    }

    #[test]
    fn test_inline_enum_without_context_is_literal_union() {
        assert_eq!(render(r#"{ "enum": ["a", "b"] }"#), "'a' | 'b'");
        assert_eq!(render(r#"{ "enum": [1, 2] }"#), "1 | 2");
    }

    #[test]
    fn test_inline_enum_is_hoisted() {
        let rendered = render_with(
            &Config::default(),
            r#"{ "enum": ["active", "inactive"] }"#,
            Some("Order"),
            Some("status"),
        );
        assert_eq!(rendered, "OrderStatus");
    }

    #[test]
    fn test_nested_object_scope() {
        let doc = Document::from_json(DOC).unwrap();
        let config = Config::default();
        let shapes = doc.named_shapes();
        let mut ctx = GenerationContext::new(&doc, &config, &shapes).unwrap();
        let raw: Schema = serde_json::from_str(
            r#"{ "type": "object", "properties": { "state": { "enum": ["on", "off"] } } }"#,
        )
        .unwrap();
        let ty = to_type_expression(&SchemaNode::from_raw(&raw), &mut ctx, Some("Device"), Some("power"))
            .unwrap();
        assert_eq!(ty.emit(), "{ state?: DevicePowerState }");
        assert_eq!(ctx.inline_enums()[0].name, "DevicePowerState");
    }

    #[test]
    fn test_open_maps() {
        assert_eq!(
            render(r#"{ "type": "object", "additionalProperties": true }"#),
            "Record<string, unknown>"
        );
        assert_eq!(render(r#"{ "type": "object" }"#), "Record<string, unknown>");
        assert_eq!(
            render(r#"{ "type": "object", "additionalProperties": { "type": "integer" } }"#),
            "Record<string, number>"
        );
        assert_eq!(
            render(r#"{ "type": "object", "additionalProperties": false }"#),
            "Record<string, never>"
        );
    }

    #[test]
    fn test_object_with_fixed_and_open_properties() {
        assert_eq!(
            render(r#"{ "type": "object", "properties": { "id": { "type": "string" } }, "required": ["id"], "additionalProperties": true }"#),
            "{ id: string; [key: string]: unknown }"
        );
    }

    #[test]
    fn test_typed_additional_properties_reports() {
        let doc = Document::from_json(DOC).unwrap();
        let config = Config::default();
        let shapes = doc.named_shapes();
        let mut ctx = GenerationContext::new(&doc, &config, &shapes).unwrap();
        let raw: Schema = serde_json::from_str(
            r#"{ "type": "object", "properties": { "id": { "type": "string" } }, "additionalProperties": { "type": "number" } }"#,
        )
        .unwrap();
        let ty = to_type_expression(&SchemaNode::from_raw(&raw), &mut ctx, None, None).unwrap();
        assert_eq!(ty.emit(), "{ id?: string } & Record<string, number>");
        assert_eq!(ctx.diagnostics()[0].kind, DiagnosticKind::TypedAdditionalProperties);
    }

    #[test]
    fn test_unclassified_reports() {
        let doc = Document::from_json(DOC).unwrap();
        let config = Config::default();
        let shapes = doc.named_shapes();
        let mut ctx = GenerationContext::new(&doc, &config, &shapes).unwrap();
        ctx.set_subject("Upload");
        let raw: Schema = serde_json::from_str(r#"{ "type": "file" }"#).unwrap();
        let ty = to_type_expression(&SchemaNode::from_raw(&raw), &mut ctx, None, None).unwrap();
        assert_eq!(ty.emit(), "unknown");
        assert_eq!(ctx.diagnostics()[0].subject, "Upload");
    }

    #[test]
    fn test_discriminator_overrides_property() {
        let doc = Document::from_json(DOC).unwrap();
        let config = Config::default();
        let shapes = doc.named_shapes();
        let mut ctx = GenerationContext::new(&doc, &config, &shapes).unwrap();
        let raw: Schema = serde_json::from_str(
            r#"{ "type": "object", "properties": { "petType": { "type": "string" }, "name": { "type": "string" } } }"#,
        )
        .unwrap();
        let NodeKind::Object(obj) = SchemaNode::from_raw(&raw).kind else {
            unreachable!()
        };
        let props = generate_properties(&obj, &mut ctx, Some("Cat"), Some("Cat")).unwrap();
        assert_eq!(props[0].emit(), "petType: 'cat'");
        assert_eq!(props[1].emit(), "name?: string");
    }

    #[test]
    fn test_camel_case_properties() {
        let config = Config {
            property_name_style: PropertyNameStyle::CamelCase,
            ..Config::default()
        };
        assert_eq!(
            render_with(
                &config,
                r#"{ "type": "object", "properties": { "first_name": { "type": "string" }, "content-type": { "type": "string" } } }"#,
                None,
                None
            ),
            "{ firstName?: string; contentType?: string }"
        );
        assert_eq!(
            render(r#"{ "type": "object", "properties": { "content-type": { "type": "string" } } }"#),
            "{ 'content-type'?: string }"
        );
    }

    #[test]
    fn test_const_and_compositions() {
        assert_eq!(render(r#"{ "const": "dog" }"#), "'dog'");
        assert_eq!(
            render(r##"{ "allOf": [{ "$ref": "#/components/schemas/User" }, { "$ref": "#/components/schemas/Cat" }] }"##),
            "User & Cat"
        );
        assert_eq!(
            render(r##"{ "anyOf": [{ "type": "string" }, { "type": "array", "items": { "type": "string" } }] }"##),
            "string | string[]"
        );
    }

    #[test]
    fn test_dangling_reference_is_fatal() {
        let doc = Document::from_json(DOC).unwrap();
        let config = Config::default();
        let shapes = doc.named_shapes();
        let mut ctx = GenerationContext::new(&doc, &config, &shapes).unwrap();
        let node = SchemaNode::new(NodeKind::Reference("#/components/schemas/Missing".into()));
        let err = to_type_expression(&node, &mut ctx, None, None).unwrap_err();
        assert!(matches!(err, GenerateError::PointerNotFound { .. }));
    }
}
