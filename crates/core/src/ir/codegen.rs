//! Client code generation from parsed operations to TypeScript AST.
//!
//! One class per tag. Every operation becomes an async method that forwards
//! to the shared `request<T>` helper carried in the class prelude.

use std::collections::{BTreeSet, HashSet};

use super::api::{EmittedClient, GeneratedClient, ParamLocation, ParsedOperation, ParsedParameter};
use super::emit::Emit;
use super::types::{
    TemplatePart, TsClass, TsExpr, TsFunction, TsImport, TsLiteral, TsModule, TsObject, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType,
};
use super::utils::{pascal_case, sanitize_ts_identifier, to_snake_case};
use crate::config::NullableType;
use crate::context::GenerationContext;
use crate::diagnostics::DiagnosticKind;
use crate::error::GenerateError;
use crate::schema::{apply_nullable, property_name, to_type_expression};

/// Module the client files import shape types from.
pub const TYPES_MODULE: &str = "./types";

/// Fields, constructor and the request helper shared by every client.
const CLIENT_PRELUDE: &str = r"  private readonly baseUrl: string;
  private readonly fetchImpl: typeof fetch;

  constructor(baseUrl: string, fetchImpl: typeof fetch = globalThis.fetch.bind(globalThis)) {
    this.baseUrl = baseUrl.replace(/\/+$/, '');
    this.fetchImpl = fetchImpl;
  }

  protected async request<T>(
    method: string,
    path: string,
    options: { query?: object; body?: unknown } = {},
  ): Promise<T> {
    const url = new URL(this.baseUrl + path);
    for (const [key, value] of Object.entries(options.query ?? {})) {
      if (value === undefined || value === null) {
        continue;
      }
      for (const item of Array.isArray(value) ? value : [value]) {
        url.searchParams.append(key, String(item));
      }
    }

    const headers: Record<string, string> = { Accept: 'application/json' };
    let body: string | undefined;
    if (options.body !== undefined) {
      headers['Content-Type'] = 'application/json';
      body = JSON.stringify(options.body);
    }

    const response = await this.fetchImpl(url.toString(), { method, headers, body });
    if (!response.ok) {
      throw new Error(`${method} ${path} failed with status ${response.status}`);
    }
    if (response.status === 204) {
      return undefined as T;
    }
    const text = await response.text();
    return (text ? JSON.parse(text) : undefined) as T;
  }
";

/// `<PascalCase(tag)><suffix>`, e.g. `pet-store` -> `PetStoreClient`.
pub fn client_class_name(tag: &str, ctx: &GenerationContext<'_>) -> String {
    let base = pascal_case(tag);
    let base = if base.is_empty() {
        "Default".to_string()
    } else if base.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Tag{base}")
    } else {
        base
    };
    format!("{base}{}", ctx.config().client_suffix.as_str())
}

/// Generate the client class for one tag group.
pub fn emit_client(
    tag: &str,
    operations: &[&ParsedOperation],
    ctx: &mut GenerationContext<'_>,
) -> Result<EmittedClient, GenerateError> {
    ctx.set_subject(tag);
    let requested = client_class_name(tag, ctx);
    let class_name = ctx.claim_client_name(&requested);
    let mut refs = BTreeSet::new();
    let mut methods = Vec::with_capacity(operations.len());

    for op in operations {
        let method = codegen_method(op, ctx)?;
        for param in &method.params {
            param.ty.collect_refs(&mut refs);
        }
        if let Some(ret) = &method.return_type {
            ret.collect_refs(&mut refs);
        }
        methods.push(method);
    }

    let imports: Vec<String> = refs.into_iter().collect();
    let mut module = TsModule::default();
    if !imports.is_empty() {
        module.imports.push(TsImport {
            items: imports.clone(),
            from: TYPES_MODULE.to_string(),
            type_only: true,
        });
    }
    module.classes.push(TsClass {
        name: class_name.clone(),
        prelude: CLIENT_PRELUDE.to_string(),
        methods,
    });

    Ok(EmittedClient {
        client: GeneratedClient {
            tag: tag.to_string(),
            file_name: format!("{class_name}.ts"),
            class_name,
            operations: operations.iter().map(|op| (*op).clone()).collect(),
        },
        source: module.emit(),
        imports,
    })
}

/// Piece of a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathSegment<'a> {
    Static(&'a str),
    Placeholder(&'a str),
}

/// Split `/pets/{petId}/toys` into static text and `{placeholder}` names.
/// An unterminated brace is kept as static text.
fn parse_path_template(template: &str) -> Vec<PathSegment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            segments.push(PathSegment::Static(&rest[..open]));
        }
        segments.push(PathSegment::Placeholder(&rest[open + 1..close]));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(PathSegment::Static(rest));
    }
    segments
}

/// Index of the path parameter a placeholder refers to: exact name first,
/// then snake_case equivalence (`pet_id` matches `petId`).
fn find_matching_param(placeholder: &str, params: &[&ParsedParameter]) -> Option<usize> {
    if let Some(index) = params.iter().position(|p| p.name == placeholder) {
        return Some(index);
    }
    let placeholder_snake = to_snake_case(placeholder);
    params
        .iter()
        .position(|p| to_snake_case(&p.name) == placeholder_snake)
}

/// Reserve `base` (or `base2`, `base3`, ...) as a method-local identifier.
fn unique_ident(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut suffix = 1;
    while used.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}{suffix}");
    }
    used.insert(candidate.clone());
    candidate
}

/// Argument name for a path parameter, following the property naming style.
fn path_ident(name: &str, ctx: &GenerationContext<'_>) -> String {
    sanitize_ts_identifier(&property_name(name, ctx.config().property_name_style))
}

fn codegen_method(
    op: &ParsedOperation,
    ctx: &mut GenerationContext<'_>,
) -> Result<TsFunction, GenerateError> {
    ctx.set_subject(format!("{} {}", op.method.as_str(), op.path_template));

    // Repeated (location, name) pairs are emitted once
    let mut seen = HashSet::new();
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();
    for param in &op.parameters {
        if !seen.insert((param.location, param.name.as_str())) {
            ctx.report(DiagnosticKind::DuplicateParameter {
                name: param.name.clone(),
            });
            continue;
        }
        match param.location {
            ParamLocation::Path => path_params.push(param),
            ParamLocation::Query => query_params.push(param),
        }
    }

    let mut used = HashSet::new();
    let mut params = Vec::new();
    let mut path_idents: Vec<Option<String>> = vec![None; path_params.len()];
    let mut path_parts = Vec::new();

    for segment in parse_path_template(&op.path_template) {
        let placeholder = match segment {
            PathSegment::Static(text) => {
                path_parts.push(TemplatePart::Static(text.to_string()));
                continue;
            }
            PathSegment::Placeholder(name) => name,
        };

        let ident = match find_matching_param(placeholder, &path_params) {
            Some(index) => match path_idents[index].clone() {
                Some(ident) => ident,
                None => {
                    let base = path_ident(&path_params[index].name, ctx);
                    let ident = unique_ident(&base, &mut used);
                    params.push(TsParam {
                        name: ident.clone(),
                        ty: to_type_expression(&path_params[index].schema, ctx, None, None)?,
                        optional: false,
                    });
                    path_idents[index] = Some(ident.clone());
                    ident
                }
            },
            None => {
                ctx.report(DiagnosticKind::UndeclaredPathParameter {
                    name: placeholder.to_string(),
                });
                let ident = unique_ident(&path_ident(placeholder, ctx), &mut used);
                params.push(TsParam {
                    name: ident.clone(),
                    ty: TsType::Primitive(TsPrimitive::String),
                    optional: false,
                });
                ident
            }
        };
        path_parts.push(TemplatePart::Dynamic(encode_path_value(ident)));
    }

    // Declared path parameters the template never mentions stay in the signature
    for (param, ident) in path_params.iter().zip(&path_idents) {
        if ident.is_none() {
            params.push(TsParam {
                name: unique_ident(&path_ident(&param.name, ctx), &mut used),
                ty: to_type_expression(&param.schema, ctx, None, None)?,
                optional: false,
            });
        }
    }

    let mut options = Vec::new();
    if let Some(body) = &op.request_body {
        let ident = unique_ident("body", &mut used);
        params.push(TsParam {
            name: ident.clone(),
            ty: to_type_expression(&body.schema, ctx, None, None)?,
            optional: !body.required,
        });
        options.push(("body".to_string(), TsExpr::Ident(ident)));
    }

    if !query_params.is_empty() {
        let mut properties = Vec::with_capacity(query_params.len());
        for param in &query_params {
            properties.push(TsProp {
                name: param.name.clone(),
                ty: to_type_expression(&param.schema, ctx, None, None)?,
                optional: !param.required,
                description: None,
            });
        }
        let ident = unique_ident("params", &mut used);
        params.push(TsParam {
            name: ident.clone(),
            optional: !query_params.iter().any(|p| p.required),
            ty: TsType::Object(TsObject::new(properties)),
        });
        // Query goes first in the options literal
        options.insert(0, ("query".to_string(), TsExpr::Ident(ident)));
    }

    require_before_required(&mut params);

    let response_type = match &op.response {
        Some(schema) => to_type_expression(schema, ctx, None, None)?,
        None => TsType::Primitive(TsPrimitive::Void),
    };

    let path_expr = if path_parts
        .iter()
        .any(|p| matches!(p, TemplatePart::Dynamic(_)))
    {
        TsExpr::Template(path_parts)
    } else {
        TsExpr::Literal(TsLiteral::String(op.path_template.clone()))
    };

    let mut args = vec![
        TsExpr::Literal(TsLiteral::String(op.method.as_str().to_string())),
        path_expr,
    ];
    if !options.is_empty() {
        args.push(TsExpr::Object(options));
    }

    let call = TsExpr::Call {
        callee: Box::new(TsExpr::Member {
            object: Box::new(TsExpr::Ident("this".into())),
            prop: "request".into(),
        }),
        type_args: vec![response_type.clone()],
        args,
    };

    Ok(TsFunction {
        name: sanitize_ts_identifier(&op.operation_id),
        description: op.summary.clone(),
        params,
        return_type: Some(TsType::Generic {
            name: "Promise".into(),
            args: vec![response_type],
        }),
        body: vec![TsStmt::Return(Some(call))],
        is_async: true,
    })
}

/// `encodeURIComponent(String(ident))`
fn encode_path_value(ident: String) -> TsExpr {
    let call = |name: &str, arg: TsExpr| TsExpr::Call {
        callee: Box::new(TsExpr::Ident(name.into())),
        type_args: vec![],
        args: vec![arg],
    };
    call("encodeURIComponent", call("String", TsExpr::Ident(ident)))
}

/// An optional parameter may not precede a required one; such parameters
/// become required and accept `undefined` instead.
fn require_before_required(params: &mut [TsParam]) {
    let mut required_follows = false;
    for param in params.iter_mut().rev() {
        if !param.optional {
            required_follows = true;
        } else if required_follows {
            param.optional = false;
            let ty = std::mem::replace(&mut param.ty, TsType::Primitive(TsPrimitive::Unknown));
            param.ty = apply_nullable(ty, true, NullableType::Undefined);
        }
    }
}
