//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit`. Output uses two-space indentation,
//! single-quoted strings and semicolons.

use super::types::{
    EnumMember, TemplatePart, TsClass, TsExpr, TsFunction, TsImport, TsLiteral, TsModule, TsObject,
    TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{escape_js_string, quote_if_needed};
use crate::config::EnumStyle;

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

/// JSDoc block for a description, or nothing.
pub fn emit_doc(description: Option<&str>, prefix: &str) -> String {
    let Some(text) = description.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };
    let text = text.replace("*/", "*\\/");
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    if let [line] = lines.as_slice() {
        return format!("{prefix}/** {line} */\n");
    }

    let mut out = format!("{prefix}/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{prefix} *\n"));
        } else {
            out.push_str(&format!("{prefix} * {line}\n"));
        }
    }
    out.push_str(&format!("{prefix} */\n"));
    out
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Undefined => "undefined",
            TsPrimitive::Void => "void",
            TsPrimitive::Unknown => "unknown",
            TsPrimitive::Never => "never",
            TsPrimitive::Date => "Date",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("'{}'", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap complex types in parentheses
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(|t| t.emit()).collect::<Vec<_>>().join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(obj) => obj.emit(),
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => {
                let args = args.iter().map(|a| a.emit()).collect::<Vec<_>>().join(", ");
                format!("{name}<{args}>")
            }
        }
    }
}

impl Emit for TsObject {
    fn emit(&self) -> String {
        let mut parts: Vec<String> = self.properties.iter().map(|p| p.emit()).collect();
        if let Some(index) = &self.index_signature {
            parts.push(format!("[key: string]: {}", index.emit()));
        }
        if parts.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", parts.join("; "))
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let mut output = emit_doc(self.description.as_deref(), "");
        match &self.kind {
            TypeDefKind::Interface {
                extends,
                properties,
                index_signature,
            } => {
                let heritage = if extends.is_empty() {
                    String::new()
                } else {
                    format!(" extends {}", extends.join(", "))
                };
                if properties.is_empty() && index_signature.is_none() {
                    output.push_str(&format!("export interface {}{heritage} {{}}\n", self.name));
                    return output;
                }
                output.push_str(&format!("export interface {}{heritage} {{\n", self.name));
                for prop in properties {
                    output.push_str(&emit_doc(prop.description.as_deref(), "  "));
                    output.push_str(&format!("  {};\n", prop.emit()));
                }
                if let Some(index) = index_signature {
                    output.push_str(&format!("  [key: string]: {};\n", index.emit()));
                }
                output.push_str("}\n");
            }
            TypeDefKind::TypeAlias { ty } => {
                output.push_str(&format!("export type {} = {};\n", self.name, ty.emit()));
            }
            TypeDefKind::Enum {
                style,
                members,
                bottom,
            } => {
                output.push_str(&emit_enum(&self.name, *style, members, *bottom));
            }
        }
        output
    }
}

fn emit_enum(
    name: &str,
    style: EnumStyle,
    members: &[EnumMember],
    bottom: Option<TsPrimitive>,
) -> String {
    let bottom_suffix = bottom
        .map(|b| format!(" | {}", b.emit()))
        .unwrap_or_default();
    match style {
        EnumStyle::ConstObject => {
            let mut output = format!("export const {name} = {{\n");
            for member in members {
                output.push_str(&format!(
                    "  {}: {},\n",
                    quote_if_needed(&member.key),
                    member.value.emit()
                ));
            }
            output.push_str("} as const;\n\n");
            output.push_str(&format!(
                "export type {name} = (typeof {name})[keyof typeof {name}]{bottom_suffix};\n"
            ));
            output
        }
        EnumStyle::Union => {
            let ty: Vec<String> = members
                .iter()
                .map(|m| m.value.emit())
                .chain(bottom.map(|b| b.emit()))
                .collect();
            let ty = if ty.is_empty() {
                "never".to_string()
            } else {
                ty.join(" | ")
            };
            format!("export type {name} = {ty};\n")
        }
        EnumStyle::Enum => {
            let mut output = format!("export enum {name} {{\n");
            for member in members {
                output.push_str(&format!(
                    "  {} = {},\n",
                    quote_if_needed(&member.key),
                    member.value.emit()
                ));
            }
            output.push_str("}\n");
            output
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args_str = if type_args.is_empty() {
                    String::new()
                } else {
                    let list = type_args.iter().map(|t| t.emit()).collect::<Vec<_>>();
                    format!("<{}>", list.join(", "))
                };
                let args_str = args.iter().map(|a| a.emit()).collect::<Vec<_>>().join(", ");
                format!("{}{}({})", callee.emit(), type_args_str, args_str)
            }
            TsExpr::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props
                        .iter()
                        .map(|(k, v)| {
                            let value = v.emit();
                            if *k == value {
                                k.clone()
                            } else {
                                format!("{}: {}", quote_if_needed(k), value)
                            }
                        })
                        .collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Member { object, prop } => {
                format!("{}.{}", object.emit(), prop)
            }
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|p| match p {
                        TemplatePart::Static(s) => s.replace('\\', "\\\\").replace('`', "\\`"),
                        TemplatePart::Dynamic(e) => format!("${{{}}}", e.emit()),
                    })
                    .collect();
                format!("`{content}`")
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", self.name, opt, self.ty.emit())
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{}return {};\n", prefix, e.emit()),
                None => format!("{prefix}return;\n"),
            },
        }
    }
}

// =============================================================================
// Classes
// =============================================================================

impl TsFunction {
    /// Emit as a class method at the given indentation level.
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        let mut output = emit_doc(self.description.as_deref(), &prefix);

        let params_str = self.params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();
        let async_str = if self.is_async { "async " } else { "" };

        output.push_str(&format!(
            "{prefix}{async_str}{}({params_str}){return_type_str} {{\n",
            self.name
        ));
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(indent + 1));
        }
        output.push_str(&format!("{prefix}}}\n"));
        output
    }
}

impl Emit for TsFunction {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl Emit for TsClass {
    fn emit(&self) -> String {
        let mut output = format!("export class {} {{\n", self.name);
        output.push_str(self.prelude.trim_end_matches('\n'));
        output.push('\n');
        for method in &self.methods {
            output.push('\n');
            output.push_str(&method.emit_indented(1));
        }
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        format!(
            "import {}{{ {} }} from '{}';\n",
            type_keyword,
            self.items.join(", "),
            self.from
        )
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut blocks: Vec<String> = Vec::new();

        let imports: String = self.imports.iter().map(|i| i.emit()).collect();
        if !imports.is_empty() {
            blocks.push(imports);
        }
        blocks.extend(self.types.iter().map(|t| t.emit()));
        blocks.extend(self.classes.iter().map(|c| c.emit()));

        blocks.join("\n")
    }
}

// =============================================================================
// Tests
// =============================================================================
