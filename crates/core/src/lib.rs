//! OpenAPI 3.x to TypeScript compiler.
//!
//! This crate turns an OpenAPI document into TypeScript source:
//! - `types.ts` with one declaration per component schema
//! - one client class per operation tag, with a method per operation
//!
//! It performs no I/O. Callers hand in document text and a [`Config`] and get
//! back file contents plus [`Diagnostic`]s for patterns that were emitted
//! with a fallback.

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod ir;
pub mod schema;
pub mod spec;

// Re-export commonly used types
pub use config::{
    ClientSuffix, Config, DateType, EnumStyle, MethodNameStyle, NullableType, PropertyNameStyle,
};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{ConfigError, Error, GenerateError, LoadError, ReferenceKind};
pub use generator::{GenerationOutput, TYPES_FILE_NAME, generate, generate_str};
pub use spec::Document;
