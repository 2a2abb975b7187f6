//! TypeScript generation for OpenAPI documents.
//!
//! The pipeline is:
//! 1. Load: text -> Document (typed view plus raw value for pointers)
//! 2. Declarations: named shapes -> `types.ts`, hoisted enums first
//! 3. Operations: paths -> parsed operations, grouped by tag
//! 4. Clients: one class file per tag
//!
//! Every step runs against a single [`GenerationContext`].

use indexmap::IndexMap;
use tracing::debug;

use crate::config::Config;
use crate::context::GenerationContext;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, GenerateError};
use crate::ir::types::TsModule;
use crate::ir::{Emit, GeneratedClient, emit_client, group_by_tag, parse_operations};
use crate::schema::{build_declaration, enum_declaration};
use crate::spec::Document;

/// File holding every shape declaration.
pub const TYPES_FILE_NAME: &str = "types.ts";

/// Result of one generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    /// File name -> source text. `types.ts` first, then clients in tag order.
    pub files: IndexMap<String, String>,
    pub clients: Vec<GeneratedClient>,
    /// Degraded patterns that were emitted with a fallback.
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate declarations and clients for a loaded document.
pub fn generate(document: &Document, config: &Config) -> Result<GenerationOutput, GenerateError> {
    let shapes = document.named_shapes();
    let mut ctx = GenerationContext::new(document, config, &shapes)?;

    let mut types = TsModule::default();
    for shape in &shapes {
        let known = ctx.inline_enums().len();
        let declaration = build_declaration(&shape.name, &shape.node, &mut ctx)?;

        let hoisted = ctx.inline_enums()[known..].to_vec();
        for inline in &hoisted {
            types.types.push(enum_declaration(inline, &mut ctx));
        }
        types.types.push(declaration);
    }
    debug!(
        shapes = shapes.len(),
        hoisted = ctx.inline_enums().len(),
        "Generated type declarations."
    );

    let mut files = IndexMap::new();
    files.insert(TYPES_FILE_NAME.to_string(), types.emit());

    let operations = parse_operations(document)?;
    let mut clients = Vec::new();
    for (tag, group) in group_by_tag(&operations) {
        let emitted = emit_client(&tag, &group, &mut ctx)?;
        debug!(
            tag = %tag,
            class = %emitted.client.class_name,
            operations = group.len(),
            imports = emitted.imports.len(),
            "Generated client."
        );
        files.insert(emitted.client.file_name.clone(), emitted.source);
        clients.push(emitted.client);
    }

    Ok(GenerationOutput {
        files,
        clients,
        diagnostics: ctx.into_diagnostics(),
    })
}

/// Load a JSON or YAML document from text and generate from it.
pub fn generate_str(text: &str, config: &Config) -> Result<GenerationOutput, Error> {
    let document = Document::parse(text)?;
    Ok(generate(&document, config)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PETSTORE_YAML: &str = r##"
openapi: 3.0.3
info:
  title: Pets
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      tags: [pets]
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id:
          type: integer
        kind:
          type: string
          enum: [cat, dog]
"##;

    #[test]
    fn test_generate_yaml_document() {
        let output = generate_str(PETSTORE_YAML, &Config::default()).unwrap();

        let names: Vec<_> = output.files.keys().cloned().collect();
        assert_eq!(names, ["types.ts", "PetsClient.ts"]);
        assert!(output.diagnostics.is_empty());

        let types = &output.files["types.ts"];
        let enum_at = types.find("export const PetKind").unwrap();
        let pet_at = types.find("export interface Pet {").unwrap();
        assert!(enum_at < pet_at);
        assert!(types.contains("  kind?: PetKind;\n"));

        assert_eq!(output.clients.len(), 1);
        assert_eq!(output.clients[0].operations[0].operation_id, "listPets");
    }

    #[test]
    fn test_load_errors_surface() {
        let err = generate_str("openapi: 2.0\npaths: {}\n", &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }

    #[test]
    fn test_generation_errors_surface() {
        let err = generate_str(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": { "schemas": { "A": { "$ref": "#/components/schemas/Missing" } } }
}"##,
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Generate(GenerateError::PointerNotFound { .. })));
    }

    #[test]
    fn test_document_without_operations() {
        let output = generate_str(
            r#"{ "openapi": "3.1.0", "paths": {}, "components": { "schemas": { "Id": { "type": "string" } } } }"#,
            &Config::default(),
        )
        .unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files["types.ts"], "export type Id = string;\n");
        assert!(output.clients.is_empty());
    }
}
