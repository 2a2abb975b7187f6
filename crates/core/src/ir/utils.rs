//! Common utilities for TypeScript code generation.
//!
//! Naming transforms, quoting and small type constructors shared by the
//! declaration emitter and the client emitter.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::types::{TsLiteral, TsPrimitive, TsType};
use crate::spec::EnumValue;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check if a property or key name must be quoted.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a single-quoted TypeScript string literal.
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a property or enum key if it is not a plain identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Sanitize an identifier to be a valid TypeScript identifier.
/// - Treats anything but letters, digits, `_` and `$` as a word separator and camelCases
/// - Prepends `_` if starts with digit
/// - Escapes reserved words with `_` prefix
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = String::new();
    for (i, part) in name
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|p| !p.is_empty())
        .enumerate()
    {
        if i == 0 {
            result.push_str(part);
        } else {
            result.push_str(&capitalize_first(part));
        }
    }

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result = format!("_{result}");
    }

    result
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to snake_case (for comparison purposes).
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c == '-' {
            result.push('_');
        } else {
            result.push(c);
        }
    }
    result
}

/// PascalCase from arbitrary text: words split on non-alphanumerics, each
/// capitalized. All-caps words are treated as acronyms (`ID` -> `Id`).
pub fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let is_acronym = word.chars().any(char::is_alphabetic)
                && !word.chars().any(char::is_lowercase);
            let mut chars = word.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            let rest: String = chars.collect();
            let rest = if is_acronym { rest.to_lowercase() } else { rest };
            first.to_uppercase().chain(rest.chars()).collect::<String>()
        })
        .collect()
}

/// camelCase for property names. A leading `_` or `$` is kept.
pub fn camel_case(s: &str) -> String {
    let body_start = s.find(|c: char| c != '_' && c != '$').unwrap_or(s.len());
    let (prefix, body) = s.split_at(body_start);
    let pascal = pascal_case(body);
    if pascal.is_empty() {
        return s.to_string();
    }
    let mut chars = pascal.chars();
    let mut out = prefix.to_string();
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
        out.extend(chars);
    }
    out
}

/// Convert an OpenAPI enum value to a TypeScript literal.
pub fn enum_value_to_literal(v: &EnumValue) -> TsLiteral {
    match v {
        EnumValue::String(s) => TsLiteral::String(s.clone()),
        EnumValue::Integer(n) => TsLiteral::Int(*n),
        EnumValue::Float(f) => TsLiteral::Number(*f),
        EnumValue::Bool(b) => TsLiteral::Bool(*b),
        EnumValue::Null => TsLiteral::Null,
    }
}

/// Member key for an enum value in const-object and `enum` declarations.
///
/// Words become PascalCase (`in-progress` -> `InProgress`), numbers get a
/// `Value` prefix with `-` spelled `Minus` and `.` as `_` (`-1.5` ->
/// `ValueMinus1_5`). `index` is the fallback when nothing usable remains.
pub fn enum_value_to_key(v: &EnumValue, index: usize) -> String {
    match v {
        EnumValue::String(s) => string_enum_key(s, index),
        EnumValue::Integer(n) => numeric_enum_key(&n.to_string()),
        EnumValue::Float(f) => numeric_enum_key(&f.to_string()),
        EnumValue::Bool(true) => "True".to_string(),
        EnumValue::Bool(false) => "False".to_string(),
        EnumValue::Null => "Null".to_string(),
    }
}

fn string_enum_key(s: &str, index: usize) -> String {
    let is_numeric = !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '.')
        && s.parse::<f64>().is_ok();
    if is_numeric {
        return numeric_enum_key(s);
    }

    let key = pascal_case(s);
    match key.chars().next() {
        None => format!("Value{index}"),
        Some(c) if c.is_ascii_digit() => format!("Value{key}"),
        Some(_) => key,
    }
}

fn numeric_enum_key(text: &str) -> String {
    format!("Value{}", text.replace('-', "Minus").replace('.', "_"))
}

/// Create a `Record<string, T>` type.
pub fn make_string_record(value_type: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(value_type),
    }
}

/// Create a `Record<string, unknown>` type (common default for additionalProperties: true).
pub fn make_unknown_record() -> TsType {
    make_string_record(TsType::Primitive(TsPrimitive::Unknown))
}
