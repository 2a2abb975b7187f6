//! Non-fatal findings collected during generation.
//!
//! A diagnostic means the output was produced but degraded: a fallback
//! representation was chosen, a name was adjusted, or input was skipped.

use std::fmt;

/// One degraded-path finding, attached to the shape or operation it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Shape name or operation identity (`GET /pets`) the finding is about.
    pub subject: String,
    /// What happened.
    pub kind: DiagnosticKind,
}

/// The specific unsupported or degraded pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `allOf` combines several base references; rendered as an intersection.
    MultipleBaseReferences {
        /// Referenced shape names.
        bases: Vec<String>,
    },
    /// Fixed properties coexist with a typed `additionalProperties`;
    /// rendered as an intersection with `Record<string, T>`.
    TypedAdditionalProperties,
    /// A schema `type` the generator does not know; rendered as `unknown`.
    UnclassifiedSchema {
        /// The unrecognized type name.
        type_name: String,
    },
    /// `allOf` base cannot be extended by an interface; rendered as an intersection.
    NonObjectBase {
        /// The referenced base shape.
        base: String,
    },
    /// A hoisted enum name was already taken and got a suffix.
    HoistedNameCollision {
        /// Name derived from parent and property.
        requested: String,
        /// Name actually used.
        assigned: String,
    },
    /// The `enum` style cannot express boolean or null members, or a nullable
    /// enumeration; rendered as a union.
    EnumStyleFallback,
    /// The same parameter appears at path level and operation level; the first is kept.
    DuplicateParameter {
        /// Parameter name.
        name: String,
    },
    /// A `{placeholder}` in the path has no declared path parameter; typed as `string`.
    UndeclaredPathParameter {
        /// Placeholder name.
        name: String,
    },
    /// Two tags map to the same client class name; the later one got a suffix.
    ClientNameCollision {
        /// Name derived from the tag.
        requested: String,
        /// Name actually used.
        assigned: String,
    },
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            subject: subject.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.kind)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MultipleBaseReferences { bases } => write!(
                f,
                "allOf combines several base references ({}); emitted as an intersection type",
                bases.join(", ")
            ),
            DiagnosticKind::TypedAdditionalProperties => write!(
                f,
                "fixed properties with typed additionalProperties; emitted as an intersection with Record<string, T>"
            ),
            DiagnosticKind::UnclassifiedSchema { type_name } => {
                write!(f, "unsupported schema type `{type_name}`; emitted as unknown")
            }
            DiagnosticKind::NonObjectBase { base } => write!(
                f,
                "allOf base `{base}` is not an object type; emitted as an intersection type"
            ),
            DiagnosticKind::HoistedNameCollision {
                requested,
                assigned,
            } => write!(
                f,
                "inline enum name `{requested}` is already taken; hoisted as `{assigned}`"
            ),
            DiagnosticKind::EnumStyleFallback => write!(
                f,
                "enum is nullable or has boolean members, which a TypeScript enum cannot hold; emitted as a union type"
            ),
            DiagnosticKind::DuplicateParameter { name } => {
                write!(f, "parameter `{name}` is declared more than once; the first declaration is used")
            }
            DiagnosticKind::UndeclaredPathParameter { name } => write!(
                f,
                "path placeholder `{{{name}}}` has no matching path parameter; typed as string"
            ),
            DiagnosticKind::ClientNameCollision {
                requested,
                assigned,
            } => write!(
                f,
                "client class `{requested}` is already generated for another tag; emitted as `{assigned}`"
            ),
        }
    }
}
