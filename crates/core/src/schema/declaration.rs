//! Top-level declarations for named shapes.
//!
//! Objects with properties become interfaces, `allOf` with a single base
//! reference becomes an extending interface, enumerations follow the
//! configured enum style, and everything else becomes a type alias.

use std::collections::HashSet;

use super::typegen::object_type;
use super::{
    AdditionalValues, Composition, CompositionKind, NodeKind, ObjectSchema, ReferenceResolver,
    SchemaNode, apply_nullable, generate_properties, property_name, to_type_expression,
};
use crate::config::{EnumStyle, NullableType};
use crate::context::{GenerationContext, InlineEnum};
use crate::diagnostics::DiagnosticKind;
use crate::error::GenerateError;
use crate::ir::Emit;
use crate::ir::types::{EnumMember, TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use crate::ir::utils::{enum_value_to_key, enum_value_to_literal};
use crate::spec::EnumValue;

/// Render the declaration for one named shape.
pub fn emit_declaration(
    name: &str,
    node: &SchemaNode,
    ctx: &mut GenerationContext<'_>,
) -> Result<String, GenerateError> {
    Ok(build_declaration(name, node, ctx)?.emit())
}

/// Build the declaration IR for one named shape. Inline enums discovered on
/// the way are registered on the context.
pub fn build_declaration(
    name: &str,
    node: &SchemaNode,
    ctx: &mut GenerationContext<'_>,
) -> Result<TsTypeDef, GenerateError> {
    ctx.set_subject(name);

    let kind = match &node.kind {
        NodeKind::Enumeration(values) => enum_kind(values, node.nullable, ctx),
        NodeKind::Object(obj) if !obj.properties.is_empty() => object_kind(name, node, obj, ctx)?,
        NodeKind::Composition(composition) if composition.kind == CompositionKind::AllOf => {
            all_of_kind(name, node, composition, ctx)?
        }
        _ => TypeDefKind::TypeAlias {
            ty: to_type_expression(node, ctx, Some(name), None)?,
        },
    };

    Ok(TsTypeDef {
        name: name.to_string(),
        description: node.description.clone(),
        kind,
    })
}

/// Declaration for an enum hoisted out of a property.
pub fn enum_declaration(inline: &InlineEnum, ctx: &mut GenerationContext<'_>) -> TsTypeDef {
    ctx.set_subject(inline.name.as_str());
    TsTypeDef {
        name: inline.name.clone(),
        description: None,
        kind: enum_kind(&inline.values, false, ctx),
    }
}

/// Enumeration in the configured style. A nullable enumeration carries the
/// configured bottom value on its derived type, which a TypeScript `enum`
/// cannot express.
fn enum_kind(
    values: &[EnumValue],
    nullable: bool,
    ctx: &mut GenerationContext<'_>,
) -> TypeDefKind {
    let bottom = nullable.then_some(match ctx.config().nullable_type {
        NullableType::Null => TsPrimitive::Null,
        NullableType::Undefined => TsPrimitive::Undefined,
    });
    let style = match ctx.config().enum_type {
        EnumStyle::Enum
            if nullable
                || values
                    .iter()
                    .any(|v| matches!(v, EnumValue::Bool(_) | EnumValue::Null)) =>
        {
            ctx.report(DiagnosticKind::EnumStyleFallback);
            EnumStyle::Union
        }
        style => style,
    };
    TypeDefKind::Enum {
        style,
        members: enum_members(values),
        bottom,
    }
}

/// Members with unique keys; repeated keys get numeric suffixes from 2.
fn enum_members(values: &[EnumValue]) -> Vec<EnumMember> {
    let mut used = HashSet::new();
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let base = enum_value_to_key(value, index);
            let mut key = base.clone();
            let mut suffix = 1;
            while !used.insert(key.clone()) {
                suffix += 1;
                key = format!("{base}{suffix}");
            }
            EnumMember {
                key,
                value: enum_value_to_literal(value),
            }
        })
        .collect()
}

fn object_kind(
    name: &str,
    node: &SchemaNode,
    obj: &ObjectSchema,
    ctx: &mut GenerationContext<'_>,
) -> Result<TypeDefKind, GenerateError> {
    if node.nullable || matches!(obj.additional, Some(AdditionalValues::Typed(_))) {
        let ty = object_type(obj, ctx, Some(name), Some(name))?;
        return Ok(TypeDefKind::TypeAlias {
            ty: apply_nullable(ty, node.nullable, ctx.config().nullable_type),
        });
    }

    Ok(TypeDefKind::Interface {
        extends: Vec::new(),
        properties: generate_properties(obj, ctx, Some(name), Some(name))?,
        index_signature: open_index(obj),
    })
}

fn all_of_kind(
    name: &str,
    node: &SchemaNode,
    composition: &Composition,
    ctx: &mut GenerationContext<'_>,
) -> Result<TypeDefKind, GenerateError> {
    let (bases, inline): (Vec<&SchemaNode>, Vec<&SchemaNode>) = composition
        .members
        .iter()
        .partition(|m| ReferenceResolver::is_reference(m));

    match (bases.as_slice(), inline.as_slice()) {
        ([base], []) if !node.nullable => {
            if let Some(kind) = extending_interface(name, base, None, ctx)? {
                return Ok(kind);
            }
        }
        ([base], [extra]) if !node.nullable => {
            if let Some(kind) = extending_interface(name, base, Some(*extra), ctx)? {
                return Ok(kind);
            }
        }
        _ if bases.len() > 1 => {
            let mut names = Vec::with_capacity(bases.len());
            for base in &bases {
                if let NodeKind::Reference(pointer) = &base.kind {
                    names.push(ctx.resolver().shape_name(pointer)?);
                }
            }
            ctx.report(DiagnosticKind::MultipleBaseReferences { bases: names });
        }
        _ => {}
    }

    let mut members = Vec::with_capacity(composition.members.len());
    for member in &composition.members {
        members.push(member_type(name, member, ctx)?);
    }
    let ty = match members.len() {
        0 => TsType::Primitive(TsPrimitive::Unknown),
        1 => members.remove(0),
        _ => TsType::Intersection(members),
    };
    Ok(TypeDefKind::TypeAlias {
        ty: apply_nullable(ty, node.nullable, ctx.config().nullable_type),
    })
}

/// `interface Name extends Base { ...extra }`, or `None` when the shape
/// cannot be written that way and should fall back to an intersection.
fn extending_interface(
    name: &str,
    base: &SchemaNode,
    extra: Option<&SchemaNode>,
    ctx: &mut GenerationContext<'_>,
) -> Result<Option<TypeDefKind>, GenerateError> {
    let NodeKind::Reference(pointer) = &base.kind else {
        return Ok(None);
    };
    let base_name = ctx.resolver().shape_name(pointer)?;
    let target = ctx.resolver().resolve_if_reference(base)?;
    if !is_extendable(&target) {
        ctx.report(DiagnosticKind::NonObjectBase { base: base_name });
        return Ok(None);
    }

    let (mut properties, index_signature, declared): (Vec<TsProp>, Option<TsType>, Vec<String>) =
        match extra.map(|e| (&e.kind, e.nullable)) {
            None | Some((NodeKind::Unknown, false)) => (Vec::new(), None, Vec::new()),
            Some((NodeKind::Object(obj), false))
                if !matches!(obj.additional, Some(AdditionalValues::Typed(_))) =>
            {
                (
                    generate_properties(obj, ctx, Some(name), Some(name))?,
                    open_index(obj),
                    obj.properties.keys().cloned().collect(),
                )
            }
            _ => return Ok(None),
        };

    // A variant that inherits the discriminator property from its base still
    // needs the narrowed literal.
    if let Some(info) = ctx.discriminator_for(name).cloned()
        && !declared.contains(&info.property_name)
    {
        properties.insert(
            0,
            TsProp {
                name: property_name(&info.property_name, ctx.config().property_name_style),
                ty: TsType::Literal(TsLiteral::String(info.literal_value)),
                optional: false,
                description: None,
            },
        );
    }

    Ok(Some(TypeDefKind::Interface {
        extends: vec![base_name],
        properties,
        index_signature,
    }))
}

fn is_extendable(node: &SchemaNode) -> bool {
    !node.nullable
        && match &node.kind {
            NodeKind::Object(_) | NodeKind::Reference(_) | NodeKind::Unknown => true,
            NodeKind::Composition(c) => c.kind == CompositionKind::AllOf,
            _ => false,
        }
}

fn member_type(
    name: &str,
    member: &SchemaNode,
    ctx: &mut GenerationContext<'_>,
) -> Result<TsType, GenerateError> {
    match &member.kind {
        NodeKind::Object(obj) if !obj.properties.is_empty() => {
            let ty = object_type(obj, ctx, Some(name), Some(name))?;
            Ok(apply_nullable(ty, member.nullable, ctx.config().nullable_type))
        }
        _ => to_type_expression(member, ctx, Some(name), None),
    }
}

fn open_index(obj: &ObjectSchema) -> Option<TsType> {
    matches!(obj.additional, Some(AdditionalValues::Open))
        .then_some(TsType::Primitive(TsPrimitive::Unknown))
}
