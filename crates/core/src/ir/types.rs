//! TypeScript IR types for code generation.
//!
//! This module defines the TypeScript type system representation:
//! - TsType: Types (primitives, arrays, unions, objects, etc.)
//! - TsExpr: Expressions (identifiers, calls, templates, etc.)
//! - TsTypeDef / TsClass / TsModule: Declarations and files

use std::collections::BTreeSet;

use crate::config::EnumStyle;

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive and built-in types: string, number, Date, unknown, ...
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(TsObject),
    /// Record type: Record<K, V>
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    /// Literal type: 'foo', 42, true
    Literal(TsLiteral),
    /// Named type reference
    Ref(String),
    /// Built-in generic application: Promise<T>
    Generic { name: String, args: Vec<TsType> },
}

impl TsType {
    /// Named types referenced anywhere inside this type, for import lists.
    pub fn collect_refs(&self, out: &mut BTreeSet<String>) {
        match self {
            TsType::Ref(name) => {
                out.insert(name.clone());
            }
            TsType::Array(inner) => inner.collect_refs(out),
            TsType::Union(types) | TsType::Intersection(types) => {
                types.iter().for_each(|t| t.collect_refs(out));
            }
            TsType::Generic { args, .. } => args.iter().for_each(|t| t.collect_refs(out)),
            TsType::Object(obj) => {
                obj.properties.iter().for_each(|p| p.ty.collect_refs(out));
                if let Some(index) = &obj.index_signature {
                    index.collect_refs(out);
                }
            }
            TsType::Record { key, value } => {
                key.collect_refs(out);
                value.collect_refs(out);
            }
            TsType::Primitive(_) | TsType::Literal(_) => {}
        }
    }
}

/// TypeScript primitive and built-in types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Void,
    Unknown,
    Never,
    /// The built-in `Date` object type.
    Date,
}

/// Inline object type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsObject {
    pub properties: Vec<TsProp>,
    /// `[key: string]: T`
    pub index_signature: Option<Box<TsType>>,
}

impl TsObject {
    pub fn new(properties: Vec<TsProp>) -> Self {
        Self {
            properties,
            index_signature: None,
        }
    }
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property name as it appears in output (quoted on emit when needed).
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
    pub description: Option<String>,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    String(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    Null,
}

/// TypeScript expression
#[derive(Debug, Clone)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar', 42
    Literal(TsLiteral),
    /// Function call: foo<T>(a, b)
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<TsType>,
        args: Vec<TsExpr>,
    },
    /// Object literal: { a: 1, b: 2 }
    Object(Vec<(String, TsExpr)>),
    /// Member access: foo.bar
    Member { object: Box<TsExpr>, prop: String },
    /// Template literal: `${foo}/bar`
    Template(Vec<TemplatePart>),
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct TsParam {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// Template literal part
#[derive(Debug, Clone)]
pub enum TemplatePart {
    /// Static string part
    Static(String),
    /// Dynamic expression part: ${expr}
    Dynamic(TsExpr),
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone)]
pub struct TsImport {
    /// Names to import, already sorted
    pub items: Vec<String>,
    /// Module path
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

/// One member of an enumeration declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub key: String,
    pub value: TsLiteral,
}

/// Type definition kind
#[derive(Debug, Clone)]
pub enum TypeDefKind {
    /// interface Foo extends Bar { ... }
    Interface {
        extends: Vec<String>,
        properties: Vec<TsProp>,
        index_signature: Option<TsType>,
    },
    /// type Foo = ...
    TypeAlias { ty: TsType },
    /// Enumeration rendered in one of the configured styles
    Enum {
        style: EnumStyle,
        members: Vec<EnumMember>,
        /// `null` or `undefined` appended to the derived type
        bottom: Option<TsPrimitive>,
    },
}

/// Type definition
#[derive(Debug, Clone)]
pub struct TsTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeDefKind,
}

/// Statement in a function body
#[derive(Debug, Clone)]
pub enum TsStmt {
    /// Return statement
    Return(Option<TsExpr>),
}

/// Class method definition
#[derive(Debug, Clone)]
pub struct TsFunction {
    pub name: String,
    pub description: Option<String>,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    pub body: Vec<TsStmt>,
    pub is_async: bool,
}

/// Exported class with a fixed raw prelude (fields, constructor, helpers)
/// followed by generated methods.
#[derive(Debug, Clone)]
pub struct TsClass {
    pub name: String,
    pub prelude: String,
    pub methods: Vec<TsFunction>,
}

/// Complete TypeScript module
#[derive(Debug, Clone, Default)]
pub struct TsModule {
    pub imports: Vec<TsImport>,
    pub types: Vec<TsTypeDef>,
    pub classes: Vec<TsClass>,
}
