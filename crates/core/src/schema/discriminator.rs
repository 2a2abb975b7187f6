//! Discriminated union analysis.
//!
//! Each variant shape of a discriminated `oneOf`/`anyOf` gets the literal it
//! carries in the discriminator property, so its declaration can narrow that
//! property from `string` to the literal.

use indexmap::IndexMap;

use super::{CompositionKind, DiscriminatorSpec, NodeKind, ReferenceResolver};
use crate::error::GenerateError;
use crate::spec::NamedShape;

/// Discriminator binding for one variant shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorInfo {
    pub property_name: String,
    pub literal_value: String,
}

impl DiscriminatorInfo {
    fn describe(&self) -> String {
        format!("{} = '{}'", self.property_name, self.literal_value)
    }
}

/// Variant shape name -> discriminator binding.
pub type DiscriminatorMap = IndexMap<String, DiscriminatorInfo>;

/// Walk the named shapes and bind every referenced variant of a
/// discriminated union to its literal.
///
/// The literal comes from the union's explicit mapping when one targets the
/// variant, otherwise it is the lowercased shape name. A shape claimed twice
/// with different bindings is an error.
pub fn collect_discriminators(
    shapes: &[NamedShape],
    resolver: &ReferenceResolver<'_>,
) -> Result<DiscriminatorMap, GenerateError> {
    let mut map = DiscriminatorMap::new();

    for shape in shapes {
        let NodeKind::Composition(composition) = &shape.node.kind else {
            continue;
        };
        if composition.kind == CompositionKind::AllOf {
            continue;
        }
        let Some(discriminator) = &composition.discriminator else {
            continue;
        };

        let mapping = mapped_literals(discriminator, resolver)?;
        for member in &composition.members {
            let NodeKind::Reference(pointer) = &member.kind else {
                continue;
            };
            let variant = resolver.shape_name(pointer)?;
            let literal_value = mapping
                .iter()
                .find(|(_, target)| *target == variant)
                .map_or_else(|| variant.to_lowercase(), |(value, _)| value.clone());
            let info = DiscriminatorInfo {
                property_name: discriminator.property_name.clone(),
                literal_value,
            };

            match map.get(&variant) {
                Some(existing) if *existing != info => {
                    return Err(GenerateError::ConflictingDiscriminator {
                        shape: variant,
                        first: existing.describe(),
                        second: info.describe(),
                    });
                }
                Some(_) => {}
                None => {
                    map.insert(variant, info);
                }
            }
        }
    }

    Ok(map)
}

/// Mapping entries as (literal, target shape name). Targets may be pointers
/// or bare schema names.
fn mapped_literals(
    discriminator: &DiscriminatorSpec,
    resolver: &ReferenceResolver<'_>,
) -> Result<Vec<(String, String)>, GenerateError> {
    discriminator
        .mapping
        .iter()
        .map(|(value, target)| {
            let pointer = if target.contains(['#', '/', '.', ':']) {
                target.clone()
            } else {
                format!("#/components/schemas/{target}")
            };
            Ok((value.clone(), resolver.shape_name(&pointer)?))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::spec::Document;

    fn collect(json: &str) -> Result<DiscriminatorMap, GenerateError> {
        let doc = Document::from_json(json).unwrap();
        collect_discriminators(&doc.named_shapes(), &doc.resolver())
    }

    #[test]
    fn test_default_literal_is_lowercased_name() {
        let map = collect(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Pet": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }, { "$ref": "#/components/schemas/Dog" }],
        "discriminator": { "propertyName": "petType" }
      },
      "Cat": { "type": "object", "properties": { "petType": { "type": "string" } } },
      "Dog": { "type": "object", "properties": { "petType": { "type": "string" } } }
    }
  }
}"##,
        )
        .unwrap();

        assert_eq!(
            map["Cat"],
            DiscriminatorInfo {
                property_name: "petType".into(),
                literal_value: "cat".into(),
            }
        );
        assert_eq!(map["Dog"].literal_value, "dog");
    }

    #[test]
    fn test_explicit_mapping() {
        let map = collect(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Shape": {
        "anyOf": [{ "$ref": "#/components/schemas/Circle" }, { "$ref": "#/components/schemas/Square" }],
        "discriminator": {
          "propertyName": "kind",
          "mapping": { "round": "#/components/schemas/Circle", "box": "Square" }
        }
      },
      "Circle": { "type": "object" },
      "Square": { "type": "object" }
    }
  }
}"##,
        )
        .unwrap();

        assert_eq!(map["Circle"].literal_value, "round");
        assert_eq!(map["Square"].literal_value, "box");
    }

    #[test]
    fn test_conflicting_claims_rejected() {
        let err = collect(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Pet": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }],
        "discriminator": { "propertyName": "petType" }
      },
      "Animal": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }],
        "discriminator": { "propertyName": "kind" }
      },
      "Cat": { "type": "object" }
    }
  }
}"##,
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::ConflictingDiscriminator { ref shape, .. } if shape == "Cat"));
    }

    #[test]
    fn test_identical_claims_allowed() {
        let map = collect(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Pet": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }],
        "discriminator": { "propertyName": "petType" }
      },
      "Feline": {
        "oneOf": [{ "$ref": "#/components/schemas/Cat" }],
        "discriminator": { "propertyName": "petType" }
      },
      "Cat": { "type": "object" }
    }
  }
}"##,
        )
        .unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_union_without_discriminator_ignored() {
        let map = collect(
            r##"{
  "openapi": "3.0.3",
  "paths": {},
  "components": {
    "schemas": {
      "Id": { "oneOf": [{ "$ref": "#/components/schemas/Num" }, { "type": "string" }] },
      "Num": { "type": "integer" }
    }
  }
}"##,
        )
        .unwrap();
        assert!(map.is_empty());
    }
}
