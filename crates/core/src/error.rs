//! Error types for document loading, configuration and generation.

use thiserror::Error;

/// Category of a `$ref` that cannot be followed inside the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `#/...` pointer into the document itself.
    Internal,
    /// `http://` or `https://` reference.
    Url,
    /// Relative or absolute path to another file.
    ExternalFile,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Internal => write!(f, "internal pointer"),
            ReferenceKind::Url => write!(f, "network URL reference"),
            ReferenceKind::ExternalFile => write!(f, "external file reference"),
        }
    }
}

/// Errors raised while turning raw text into a [`crate::Document`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The text is not valid JSON.
    #[error("failed to parse OpenAPI document as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The text is not valid YAML.
    #[error("failed to parse OpenAPI document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The top-level `openapi` field is absent.
    #[error("document has no `openapi` version field; only OpenAPI 3.x documents are supported")]
    MissingVersion,
    /// The document declares a major version other than 3.
    #[error("unsupported OpenAPI version `{version}`; only 3.x documents are supported")]
    UnsupportedVersion {
        /// Version string as written in the document.
        version: String,
    },
    /// The document has no `paths` table.
    #[error("document has no `paths` table")]
    MissingPaths,
    /// The document parsed but does not match the expected OpenAPI layout.
    #[error("document does not match the OpenAPI layout: {0}")]
    Shape(serde_json::Error),
}

/// Errors raised while parsing configuration option values.
#[derive(Debug, Error)]
#[error("invalid value `{value}` for `{option}`, expected one of: {expected}")]
pub struct ConfigError {
    /// Option name in camelCase, as written in configuration files.
    pub option: &'static str,
    /// Rejected value.
    pub value: String,
    /// Accepted spellings.
    pub expected: &'static str,
}

/// Fatal generation errors. Any of these aborts generation for the whole document.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A `$ref` points outside the current document.
    #[error(
        "unsupported {kind} `{pointer}`: only references inside the same document are supported; \
         inline or merge the external content into this document"
    )]
    UnsupportedReference {
        /// The reference as written.
        pointer: String,
        /// Whether it is a URL or a file reference.
        kind: ReferenceKind,
    },
    /// A pointer segment walks into something that is not an object or array.
    #[error("invalid pointer path `{pointer}`: cannot descend into segment `{segment}`")]
    InvalidPointerPath {
        /// The full pointer.
        pointer: String,
        /// The segment that could not be traversed.
        segment: String,
    },
    /// The pointer is well formed but nothing exists at its target.
    #[error("pointer `{pointer}` does not resolve to anything in the document")]
    PointerNotFound {
        /// The full pointer.
        pointer: String,
    },
    /// A schema reference does not name an entry of `components.schemas`.
    #[error(
        "reference `{pointer}` is used as a type but does not name a schema; \
         point it at `#/components/schemas/<Name>`"
    )]
    UnsupportedPointerShape {
        /// The full pointer.
        pointer: String,
    },
    /// The pointer target exists but cannot be read as the expected object.
    #[error("pointer `{pointer}` resolves to an invalid object: {message}")]
    InvalidTarget {
        /// The full pointer.
        pointer: String,
        /// Deserialization failure.
        message: String,
    },
    /// Two discriminated unions disagree about the literal of one variant.
    #[error(
        "shape `{shape}` is claimed by two discriminated unions (`{first}` and `{second}`); \
         give each union its own variant shapes"
    )]
    ConflictingDiscriminator {
        /// The variant shape.
        shape: String,
        /// `property = 'value'` from the first claim.
        first: String,
        /// `property = 'value'` from the conflicting claim.
        second: String,
    },
    /// Two operations produce the same method name.
    #[error(
        "duplicate operationId `{operation_id}` ({method} {path}); each operation must have a unique identifier"
    )]
    DuplicateOperationId {
        /// The colliding identifier.
        operation_id: String,
        /// HTTP method of the second occurrence.
        method: String,
        /// Path of the second occurrence.
        path: String,
    },
}

/// Any failure of [`crate::generate_str`]: the text did not load, or the
/// loaded document could not be compiled.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
