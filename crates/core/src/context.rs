//! Shared state for one generation pass.

use std::collections::HashSet;

use tracing::debug;

use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::GenerateError;
use crate::schema::{DiscriminatorInfo, DiscriminatorMap, ReferenceResolver, collect_discriminators};
use crate::spec::{Document, EnumValue, NamedShape};

/// An enumeration found inside a property and hoisted to a top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEnum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

/// Resolver, configuration, discriminator bindings, hoisted enums and
/// diagnostics, threaded through every generator call.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    resolver: ReferenceResolver<'a>,
    config: &'a Config,
    discriminators: DiscriminatorMap,
    shape_names: HashSet<String>,
    client_names: HashSet<String>,
    inline_enums: Vec<InlineEnum>,
    diagnostics: Vec<Diagnostic>,
    subject: String,
}

impl<'a> GenerationContext<'a> {
    /// Build the context for a document whose named shapes are `shapes`.
    pub fn new(
        document: &'a Document,
        config: &'a Config,
        shapes: &[NamedShape],
    ) -> Result<Self, GenerateError> {
        let resolver = document.resolver();
        let discriminators = collect_discriminators(shapes, &resolver)?;
        debug!(
            variants = discriminators.len(),
            "Collected discriminated union variants."
        );

        Ok(Self {
            resolver,
            config,
            discriminators,
            shape_names: shapes.iter().map(|s| s.name.clone()).collect(),
            client_names: HashSet::new(),
            inline_enums: Vec::new(),
            diagnostics: Vec::new(),
            subject: String::new(),
        })
    }

    pub fn resolver(&self) -> &ReferenceResolver<'a> {
        &self.resolver
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub fn discriminators(&self) -> &DiscriminatorMap {
        &self.discriminators
    }

    pub fn discriminator_for(&self, shape: &str) -> Option<&DiscriminatorInfo> {
        self.discriminators.get(shape)
    }

    pub fn inline_enums(&self) -> &[InlineEnum] {
        &self.inline_enums
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Shape or operation that subsequent diagnostics are attributed to.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn report(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(self.subject.clone(), kind);
        debug!(%diagnostic, "Recorded diagnostic.");
        self.diagnostics.push(diagnostic);
    }

    /// Register an inline enum under `requested` and return the name to
    /// reference it by.
    ///
    /// An existing hoisted enum with the same name and values is reused. If
    /// the name is taken by a named shape or a different enum, numeric
    /// suffixes are tried from 2 upward.
    pub fn hoist_enum(&mut self, requested: &str, values: &[EnumValue]) -> String {
        let mut candidate = requested.to_string();
        let mut suffix = 1;
        loop {
            match self.inline_enums.iter().find(|e| e.name == candidate) {
                Some(existing) if existing.values == values => return candidate,
                Some(_) => {}
                None if !self.shape_names.contains(&candidate) => break,
                None => {}
            }
            suffix += 1;
            candidate = format!("{requested}{suffix}");
        }

        if candidate != requested {
            self.report(DiagnosticKind::HoistedNameCollision {
                requested: requested.to_string(),
                assigned: candidate.clone(),
            });
        }
        self.inline_enums.push(InlineEnum {
            name: candidate.clone(),
            values: values.to_vec(),
        });
        candidate
    }

    /// Reserve a client class name. Tags that differ only in case or
    /// punctuation map to the same name; later ones get numeric suffixes
    /// from 2 upward.
    pub fn claim_client_name(&mut self, requested: &str) -> String {
        let mut candidate = requested.to_string();
        let mut suffix = 1;
        while self.client_names.contains(&candidate) {
            suffix += 1;
            candidate = format!("{requested}{suffix}");
        }

        if candidate != requested {
            self.report(DiagnosticKind::ClientNameCollision {
                requested: requested.to_string(),
                assigned: candidate.clone(),
            });
        }
        self.client_names.insert(candidate.clone());
        candidate
    }
}
