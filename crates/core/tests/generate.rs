//! End-to-end generation over complete documents.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tsgen_core::{
    Config, DateType, DiagnosticKind, EnumStyle, Error, GenerateError, NullableType,
    PropertyNameStyle, ReferenceKind, generate_str,
};

const USERS: &str = r##"{
  "openapi": "3.0.3",
  "info": { "title": "Users", "version": "1.0.0" },
  "paths": {},
  "components": {
    "schemas": {
      "User": {
        "type": "object",
        "required": ["id"],
        "properties": {
          "id": { "type": "integer" },
          "name": { "type": "string" },
          "status": { "type": "string", "enum": ["active", "inactive"] }
        }
      }
    }
  }
}"##;

const PETS: &str = r##"{
  "openapi": "3.0.3",
  "info": { "title": "Pets", "version": "1.0.0" },
  "paths": {
    "/pets/{petId}": {
      "get": {
        "operationId": "getPetFamily",
        "tags": ["pets"],
        "parameters": [{ "name": "petId", "in": "path", "required": true, "schema": { "type": "integer" } }],
        "responses": {
          "200": {
            "description": "ok",
            "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } } }
          },
          "404": { "description": "missing" }
        }
      }
    }
  },
  "components": {
    "schemas": {
      "Pet": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }, { "$ref": "#/components/schemas/Dog" }],
        "discriminator": { "propertyName": "petType" }
      },
      "Cat": {
        "type": "object",
        "required": ["petType"],
        "properties": { "petType": { "type": "string" }, "meows": { "type": "boolean" } }
      },
      "Dog": {
        "type": "object",
        "properties": { "petType": { "type": "string" }, "barks": { "type": "boolean" } }
      }
    }
  }
}"##;

fn types(doc: &str, config: &Config) -> String {
    generate_str(doc, config).unwrap().files["types.ts"].clone()
}

#[test]
fn test_user_with_hoisted_status() {
    let out = types(USERS, &Config::default());
    assert_eq!(
        out,
        "export const UserStatus = {\n  Active: 'active',\n  Inactive: 'inactive',\n} as const;\n\n\
         export type UserStatus = (typeof UserStatus)[keyof typeof UserStatus];\n\n\
         export interface User {\n  id: number;\n  name?: string;\n  status?: UserStatus;\n}\n"
    );
}

#[test]
fn test_enum_styles_share_keys() {
    let union = types(
        USERS,
        &Config {
            enum_type: EnumStyle::Union,
            ..Config::default()
        },
    );
    assert!(union.starts_with("export type UserStatus = 'active' | 'inactive';\n"));

    let ts_enum = types(
        USERS,
        &Config {
            enum_type: EnumStyle::Enum,
            ..Config::default()
        },
    );
    assert!(ts_enum.starts_with("export enum UserStatus {\n  Active = 'active',\n  Inactive = 'inactive',\n}\n"));
}

#[test]
fn test_discriminated_union() {
    let output = generate_str(PETS, &Config::default()).unwrap();
    let types = &output.files["types.ts"];

    assert!(types.contains("export type Pet = Cat | Dog;\n"));
    assert!(types.contains("export interface Cat {\n  petType: 'cat';\n  meows?: boolean;\n}\n"));
    assert!(types.contains("export interface Dog {\n  petType: 'dog';\n  barks?: boolean;\n}\n"));
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_path_parameter_client() {
    let output = generate_str(PETS, &Config::default()).unwrap();
    let names: Vec<_> = output.files.keys().map(String::as_str).collect();
    assert_eq!(names, ["types.ts", "PetsClient.ts"]);

    let client = &output.files["PetsClient.ts"];
    assert!(client.starts_with("import type { Pet } from './types';\n\nexport class PetsClient {\n"));
    assert!(client.contains(
        "  async getPetFamily(petId: number): Promise<Pet[]> {\n    return this.request<Pet[]>('GET', `/pets/${encodeURIComponent(String(petId))}`);\n  }\n"
    ));
    assert!(client.contains("constructor(baseUrl: string, fetchImpl: typeof fetch"));
    assert!(client.contains("if (response.status === 204) {"));
}

#[test]
fn test_cyclic_shapes_terminate() {
    let out = types(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Node": {
        "type": "object",
        "properties": {
          "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } },
          "owner": { "$ref": "#/components/schemas/Owner" }
        }
      },
      "Owner": {
        "type": "object",
        "properties": { "root": { "$ref": "#/components/schemas/Node" } }
      }
    }
  }
}"##,
        &Config::default(),
    );
    assert_eq!(
        out,
        "export interface Node {\n  children?: Node[];\n  owner?: Owner;\n}\n\n\
         export interface Owner {\n  root?: Node;\n}\n"
    );
}

#[test]
fn test_nullable_marker_follows_config() {
    let doc = r##"{
  "openapi": "3.1.0",
  "paths": {},
  "components": {
    "schemas": {
      "Profile": {
        "type": "object",
        "properties": {
          "nickname": { "type": "string", "nullable": true },
          "age": { "type": ["integer", "null"] },
          "avatar": { "anyOf": [{ "$ref": "#/components/schemas/Image" }, { "type": "null" }] }
        }
      },
      "Image": { "type": "string" }
    }
  }
}"##;

    let null = types(doc, &Config::default());
    assert!(null.contains("  nickname?: string | null;\n"));
    assert!(null.contains("  age?: number | null;\n"));
    assert!(null.contains("  avatar?: Image | null;\n"));

    let undefined = types(
        doc,
        &Config {
            nullable_type: NullableType::Undefined,
            ..Config::default()
        },
    );
    assert!(undefined.contains("  nickname?: string | undefined;\n"));
    assert!(!undefined.contains("null"));
}

#[test]
fn test_dates_and_property_names() {
    let doc = r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Event": {
        "type": "object",
        "required": ["created_at"],
        "properties": {
          "created_at": { "type": "string", "format": "date-time" },
          "x-trace-id": { "type": "string" }
        }
      }
    }
  }
}"##;

    let original = types(doc, &Config::default());
    assert_eq!(
        original,
        "export interface Event {\n  created_at: string;\n  'x-trace-id'?: string;\n}\n"
    );

    let camel = types(
        doc,
        &Config {
            date_type: DateType::Date,
            property_name_style: PropertyNameStyle::CamelCase,
            ..Config::default()
        },
    );
    assert_eq!(
        camel,
        "export interface Event {\n  createdAt: Date;\n  xTraceId?: string;\n}\n"
    );
}

#[test]
fn test_extends_single_base() {
    let out = types(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Animal": { "type": "object", "properties": { "name": { "type": "string" } } },
      "Bird": {
        "allOf": [
          { "$ref": "#/components/schemas/Animal" },
          { "type": "object", "required": ["wings"], "properties": { "wings": { "type": "integer" } } }
        ]
      },
      "Fish": { "allOf": [{ "$ref": "#/components/schemas/Animal" }] }
    }
  }
}"##,
        &Config::default(),
    );
    assert!(out.contains("export interface Bird extends Animal {\n  wings: number;\n}\n"));
    assert!(out.contains("export interface Fish extends Animal {}\n"));
}

#[test]
fn test_degraded_patterns_reported() {
    let output = generate_str(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "A": { "type": "object", "properties": { "a": { "type": "string" } } },
      "B": { "type": "object", "properties": { "b": { "type": "string" } } },
      "AB": { "allOf": [{ "$ref": "#/components/schemas/A" }, { "$ref": "#/components/schemas/B" }] },
      "Blob": { "type": "file" }
    }
  }
}"##,
        &Config::default(),
    )
    .unwrap();

    let types = &output.files["types.ts"];
    assert!(types.contains("export type AB = A & B;\n"));
    assert!(types.contains("export type Blob = unknown;\n"));

    let kinds: Vec<_> = output.diagnostics.iter().map(|d| (d.subject.as_str(), &d.kind)).collect();
    assert_eq!(
        kinds,
        [
            (
                "AB",
                &DiagnosticKind::MultipleBaseReferences {
                    bases: vec!["A".into(), "B".into()]
                }
            ),
            (
                "Blob",
                &DiagnosticKind::UnclassifiedSchema {
                    type_name: "file".into()
                }
            ),
        ]
    );
}

#[test]
fn test_output_is_deterministic() {
    let config = Config::default();
    let first = generate_str(PETS, &config).unwrap();
    for _ in 0..5 {
        let again = generate_str(PETS, &config).unwrap();
        assert_eq!(first.files, again.files);
    }
}

#[test]
fn test_external_references_are_fatal() {
    let url = r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": { "schemas": { "A": { "$ref": "https://example.com/schemas.json#/A" } } }
}"##;
    let err = generate_str(url, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Generate(GenerateError::UnsupportedReference {
            kind: ReferenceKind::Url,
            ..
        })
    ));
    assert!(err.to_string().contains("inline or merge"));

    let file = url.replace("https://example.com/schemas.json#/A", "./common.yaml#/A");
    let err = generate_str(&file, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Generate(GenerateError::UnsupportedReference {
            kind: ReferenceKind::ExternalFile,
            ..
        })
    ));
}

#[test]
fn test_dangling_references_are_fatal() {
    let err = generate_str(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Order": { "type": "object", "properties": { "item": { "$ref": "#/components/schemas/Item" } } }
    }
  }
}"##,
        &Config::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Generate(GenerateError::PointerNotFound { ref pointer }) if pointer == "#/components/schemas/Item"));
}

#[test]
fn test_tags_with_same_class_name_keep_both_clients() {
    let output = generate_str(
        r##"{
  "openapi": "3.0.3",
  "paths": {
    "/a": { "get": { "operationId": "listA", "tags": ["pets"], "responses": { "204": { "description": "none" } } } },
    "/b": { "get": { "operationId": "listB", "tags": ["Pets"], "responses": { "204": { "description": "none" } } } }
  }
}"##,
        &Config::default(),
    )
    .unwrap();

    let names: Vec<_> = output.files.keys().map(String::as_str).collect();
    assert_eq!(names, ["types.ts", "PetsClient.ts", "PetsClient2.ts"]);
    assert_eq!(output.clients.len(), 2);
    for client in &output.clients {
        assert!(output.files.contains_key(&client.file_name));
    }

    assert!(output.files["PetsClient.ts"].contains("export class PetsClient {"));
    assert!(output.files["PetsClient.ts"].contains("async listA()"));
    assert!(output.files["PetsClient2.ts"].contains("export class PetsClient2 {"));
    assert!(output.files["PetsClient2.ts"].contains("async listB()"));

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].subject, "Pets");
    assert_eq!(
        output.diagnostics[0].kind,
        DiagnosticKind::ClientNameCollision {
            requested: "PetsClient".into(),
            assigned: "PetsClient2".into(),
        }
    );
}

#[test]
fn test_nullable_named_enum() {
    let out = types(
        r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Status": { "type": "string", "enum": ["a", "b"], "nullable": true },
      "Holder": { "type": "object", "required": ["s"], "properties": { "s": { "$ref": "#/components/schemas/Status" } } }
    }
  }
}"##,
        &Config::default(),
    );
    assert!(out.contains("export type Status = (typeof Status)[keyof typeof Status] | null;\n"));
    assert!(out.contains("export interface Holder {\n  s: Status;\n}\n"));
}
