//! Template evaluation: `{{ expr }}` spans inside author-provided text.
//!
//! Evaluation is all-or-nothing. If any span fails, the whole template
//! produces no value.

mod format;
mod helpers;
mod lexer;
mod parser;

pub use format::{NumberStyle, format_date, format_number, parse_date};
pub use helpers::{Argument, Helper, HelperRegistry};
pub use parser::{Expression, PathRef};

use crate::context::DataContext;
use crate::error::EvaluationError;
use crate::node::{Text, TextTransform};
use helpers::check_arity;
use parser::Parser;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::sync::LazyLock;

static DEFAULT_HELPERS: LazyLock<HelperRegistry> = LazyLock::new(HelperRegistry::default);

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Span(Expression),
}

/// A template split into literal text and parsed expression spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Splits `source` on `{{ }}` and parses each span. An opening delimiter
    /// with no closing one stays literal text.
    pub fn parse(source: &str) -> Result<Self, EvaluationError> {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(start) = rest.find(OPEN) {
            let inner = &rest[start + OPEN.len()..];
            let Some(end) = inner.find(CLOSE) else {
                break;
            };
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            segments.push(Segment::Span(Parser::parse_span(&inner[..end])?));
            rest = &inner[end + CLOSE.len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template contains at least one expression span.
    pub fn has_spans(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Span(_)))
    }

    pub fn render(
        &self,
        ctx: &DataContext<'_>,
        helpers: &HelperRegistry,
    ) -> Result<String, EvaluationError> {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Span(expression) => {
                    output.push_str(&evaluate_expression(expression, ctx, helpers)?)
                }
            }
        }
        Ok(output)
    }
}

/// Evaluates a template with the built-in helpers, returning `None` when any span fails.
pub fn evaluate(template: &str, ctx: &DataContext<'_>) -> Option<String> {
    evaluate_with(template, ctx, &DEFAULT_HELPERS)
}

/// Like [`evaluate`], with a caller-supplied helper registry.
pub fn evaluate_with(
    template: &str,
    ctx: &DataContext<'_>,
    helpers: &HelperRegistry,
) -> Option<String> {
    match try_evaluate_with(template, ctx, helpers) {
        Ok(output) => Some(output),
        Err(error) => {
            tracing::debug!(template, %error, "template evaluation failed");
            None
        }
    }
}

/// Evaluates a template with the built-in helpers, reporting why it failed.
pub fn try_evaluate(template: &str, ctx: &DataContext<'_>) -> Result<String, EvaluationError> {
    try_evaluate_with(template, ctx, &DEFAULT_HELPERS)
}

pub fn try_evaluate_with(
    template: &str,
    ctx: &DataContext<'_>,
    helpers: &HelperRegistry,
) -> Result<String, EvaluationError> {
    if !template.contains(OPEN) {
        return Ok(template.to_string());
    }
    Template::parse(template)?.render(ctx, helpers)
}

/// Evaluates one parsed expression to text.
pub fn evaluate_expression(
    expression: &Expression,
    ctx: &DataContext<'_>,
    helpers: &HelperRegistry,
) -> Result<String, EvaluationError> {
    match expression {
        Expression::Literal(text) | Expression::Number(text) => Ok(text.clone()),
        Expression::Path(path) => render_path(path, &*resolve_path(path, ctx)?),
        Expression::Call { helper, args } => {
            let implementation = helpers
                .get(helper)
                .ok_or_else(|| EvaluationError::UnknownHelper(helper.clone()))?;
            check_arity(implementation, args.len())?;
            let args = args
                .iter()
                .map(|arg| evaluate_argument(arg, ctx, helpers))
                .collect::<Result<Vec<_>, _>>()?;
            implementation.apply(&args, ctx)
        }
    }
}

/// Evaluates a helper argument, keeping the resolved value of path references.
fn evaluate_argument(
    expression: &Expression,
    ctx: &DataContext<'_>,
    helpers: &HelperRegistry,
) -> Result<Argument, EvaluationError> {
    match expression {
        Expression::Path(path) => {
            let value = resolve_path(path, ctx)?;
            let text = render_path(path, &value)?;
            Ok(Argument::resolved(text, value.into_owned()))
        }
        other => evaluate_expression(other, ctx, helpers).map(Argument::new),
    }
}

fn resolve_path<'a>(
    path: &PathRef,
    ctx: &DataContext<'a>,
) -> Result<Cow<'a, JsonValue>, EvaluationError> {
    ctx.resolve(path.namespace, path.keys.as_slice())
        .ok_or_else(|| EvaluationError::UnresolvedPath(path.to_string()))
}

fn render_path(path: &PathRef, value: &JsonValue) -> Result<String, EvaluationError> {
    render_value(value).ok_or_else(|| EvaluationError::NotRenderable(path.to_string()))
}

impl Text {
    /// Evaluates the text's template and applies its case transform.
    pub fn interpolated(&self, ctx: &DataContext<'_>) -> Option<String> {
        let text = evaluate(&self.text, ctx)?;
        Some(match self.transform {
            TextTransform::None => text,
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
        })
    }
}

/// Renders a scalar JSON value as text. Integral numbers drop the trailing `.0`.
pub fn render_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        JsonValue::Number(number) => {
            if number.is_i64() || number.is_u64() {
                return Some(number.to_string());
            }
            let float = number.as_f64()?;
            if float.fract() == 0.0 && float.abs() < 1e15 {
                Some(format!("{:.0}", float))
            } else {
                Some(float.to_string())
            }
        }
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
