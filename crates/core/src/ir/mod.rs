//! Intermediate representation for OpenAPI to TypeScript code generation.
//!
//! Three layers:
//! 1. API-level IR: parsed operations and tag groups
//! 2. TypeScript AST IR: types, expressions, statements, functions, classes
//! 3. Emission: AST to TypeScript source via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsTypeDef, TsClass, TsModule)
//! - `api`: API-level IR (ParsedOperation, GeneratedClient)
//! - `normalize`: OpenAPI paths -> parsed operations, grouped by tag
//! - `codegen`: parsed operations -> client class AST
//! - `emit`: TypeScript AST -> code strings
//! - `utils`: naming and quoting helpers shared across modules

mod api;
mod codegen;
mod emit;
mod normalize;
pub mod types;
pub mod utils;

pub use api::{
    EmittedClient, GeneratedClient, HttpMethod, ParamLocation, ParsedOperation, ParsedParameter,
    ParsedRequestBody,
};
pub use codegen::{TYPES_MODULE, client_class_name, emit_client};
pub use emit::{Emit, emit_doc};
pub use normalize::{DEFAULT_TAG, group_by_tag, parse_operations, synthesize_operation_id};
