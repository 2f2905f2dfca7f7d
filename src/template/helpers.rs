use super::format::{NumberStyle, format_date, format_number, parse_date};
use crate::context::DataContext;
use crate::error::EvaluationError;
use ahash::AHashMap;
use serde_json::Value as JsonValue;
use std::ops::RangeInclusive;

/// An evaluated helper argument. Path references also keep the JSON value
/// they resolved to, so type checks see the source value and not its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    text: String,
    value: Option<JsonValue>,
}

impl Argument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: None,
        }
    }

    pub fn resolved(text: impl Into<String>, value: JsonValue) -> Self {
        Self {
            text: text.into(),
            value: Some(value),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<&JsonValue> {
        self.value.as_ref()
    }
}

/// A named pure function callable from a template expression.
///
/// Arguments arrive already evaluated. The registry checks the arity against
/// `arity()` before `apply` is called.
pub trait Helper: Send + Sync {
    fn name(&self) -> &str;
    fn arity(&self) -> RangeInclusive<usize>;
    fn apply(&self, args: &[Argument], ctx: &DataContext<'_>) -> Result<String, EvaluationError>;
}

/// Lookup table from helper name to implementation.
pub struct HelperRegistry {
    helpers: AHashMap<String, Box<dyn Helper>>,
}

impl HelperRegistry {
    /// A registry with no helpers at all.
    pub fn empty() -> Self {
        Self {
            helpers: AHashMap::new(),
        }
    }

    /// Adds or replaces a helper under its own name.
    pub fn with_helper(mut self, helper: Box<dyn Helper>) -> Self {
        self.register(helper);
        self
    }

    pub fn register(&mut self, helper: Box<dyn Helper>) {
        self.helpers.insert(helper.name().to_string(), helper);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Helper> {
        self.helpers.get(name).map(|helper| helper.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    /// Looks up `name`, checks the argument count and applies the helper.
    pub fn call(
        &self,
        name: &str,
        args: &[Argument],
        ctx: &DataContext<'_>,
    ) -> Result<String, EvaluationError> {
        let helper = self
            .get(name)
            .ok_or_else(|| EvaluationError::UnknownHelper(name.to_string()))?;
        check_arity(helper, args.len())?;
        helper.apply(args, ctx)
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        let mut helpers = AHashMap::new();
        register_default_helpers(&mut helpers);
        Self { helpers }
    }
}

pub(super) fn check_arity(helper: &dyn Helper, found: usize) -> Result<(), EvaluationError> {
    let arity = helper.arity();
    if arity.contains(&found) {
        return Ok(());
    }
    let expected = if arity.start() == arity.end() {
        arity.start().to_string()
    } else {
        format!("{} to {}", arity.start(), arity.end())
    };
    Err(EvaluationError::ArityMismatch {
        helper: helper.name().to_string(),
        expected,
        found,
    })
}

/// Master macro to define the built-in helpers and their registration.
macro_rules! define_helpers {
    ( $( ($struct_name:ident, $name:literal, $arity:expr, $apply:ident) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl Helper for $struct_name {
                fn name(&self) -> &str { $name }
                fn arity(&self) -> RangeInclusive<usize> { $arity }
                fn apply(&self, args: &[Argument], ctx: &DataContext<'_>) -> Result<String, EvaluationError> {
                    $apply($name, args, ctx)
                }
            }
        )*

        fn register_default_helpers(registry: &mut AHashMap<String, Box<dyn Helper>>) {
            $( registry.insert($name.to_string(), Box::new($struct_name)); )*
        }
    };
}

define_helpers!(
    (Lowercase, "lowercase", 1..=1, lowercase),
    (Uppercase, "uppercase", 1..=1, uppercase),
    (Replace, "replace", 3..=3, replace),
    (DropFirst, "dropFirst", 2..=2, drop_first),
    (DropLast, "dropLast", 2..=2, drop_last),
    (Prefix, "prefix", 2..=2, prefix),
    (Suffix, "suffix", 2..=2, suffix),
    (DateFormat, "dateFormat", 2..=2, date_format),
    (NumberFormat, "numberFormat", 1..=2, number_format),
);

fn arguments<'a, const N: usize>(
    helper: &str,
    args: &'a [Argument],
) -> Result<&'a [Argument; N], EvaluationError> {
    args.try_into().map_err(|_| EvaluationError::ArityMismatch {
        helper: helper.to_string(),
        expected: N.to_string(),
        found: args.len(),
    })
}

/// A JSON integer, or text made only of ASCII digits. Floats and signed
/// text are rejected even when their value is integral.
fn count_argument(helper: &str, argument: &Argument) -> Result<usize, EvaluationError> {
    let count = match argument.value() {
        Some(JsonValue::Number(number)) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        Some(JsonValue::String(_)) | None => digits(argument.text()),
        Some(_) => None,
    };
    count.ok_or_else(|| EvaluationError::NotAnInteger {
        helper: helper.to_string(),
        found: match argument.value() {
            Some(JsonValue::Number(number)) => number.to_string(),
            _ => argument.text().to_string(),
        },
    })
}

fn digits(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn number_argument(helper: &str, text: &str) -> Result<f64, EvaluationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EvaluationError::NotANumber {
            helper: helper.to_string(),
            found: text.to_string(),
        })
}

fn lowercase(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text] = arguments(helper, args)?;
    Ok(text.text().to_lowercase())
}

fn uppercase(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text] = arguments(helper, args)?;
    Ok(text.text().to_uppercase())
}

fn replace(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text, pattern, replacement] = arguments(helper, args)?;
    if pattern.text().is_empty() {
        return Ok(text.text().to_string());
    }
    Ok(text.text().replace(pattern.text(), replacement.text()))
}

fn drop_first(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text, count] = arguments(helper, args)?;
    let count = count_argument(helper, count)?;
    Ok(text.text().chars().skip(count).collect())
}

fn drop_last(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text, count] = arguments(helper, args)?;
    let count = count_argument(helper, count)?;
    let keep = text.text().chars().count().saturating_sub(count);
    Ok(text.text().chars().take(keep).collect())
}

fn prefix(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text, count] = arguments(helper, args)?;
    let count = count_argument(helper, count)?;
    Ok(text.text().chars().take(count).collect())
}

fn suffix(helper: &str, args: &[Argument], _: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [text, count] = arguments(helper, args)?;
    let count = count_argument(helper, count)?;
    let skip = text.text().chars().count().saturating_sub(count);
    Ok(text.text().chars().skip(skip).collect())
}

fn date_format(helper: &str, args: &[Argument], ctx: &DataContext<'_>) -> Result<String, EvaluationError> {
    let [date, pattern] = arguments(helper, args)?;
    let date = parse_date(date.text())?;
    format_date(date, pattern.text(), ctx.utc_offset())
}

fn number_format(
    helper: &str,
    args: &[Argument],
    _: &DataContext<'_>,
) -> Result<String, EvaluationError> {
    let (value, style) = match args {
        [value] => (value, NumberStyle::None),
        [value, style] => (value, NumberStyle::from_name(style.text())),
        _ => {
            return Err(EvaluationError::ArityMismatch {
                helper: helper.to_string(),
                expected: "1 to 2".to_string(),
                found: args.len(),
            });
        }
    };
    let value = number_argument(helper, value.text())?;
    Ok(format_number(value, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[&str]) -> Result<String, EvaluationError> {
        let args: Vec<Argument> = args.iter().map(|a| Argument::new(*a)).collect();
        HelperRegistry::default().call(name, &args, &DataContext::new())
    }

    #[test]
    fn substring_helpers_count_characters() {
        assert_eq!(call("dropFirst", &["Mr. Hogan", "4"]).unwrap(), "Hogan");
        assert_eq!(call("dropLast", &["héllo", "2"]).unwrap(), "hél");
        assert_eq!(call("prefix", &["héllo", "2"]).unwrap(), "hé");
        assert_eq!(call("suffix", &["abc", "10"]).unwrap(), "abc");
    }

    #[test]
    fn count_must_be_an_integer() {
        assert!(matches!(
            call("prefix", &["abc", "1.5"]),
            Err(EvaluationError::NotAnInteger { .. })
        ));
        assert!(matches!(
            call("prefix", &["abc", "-1"]),
            Err(EvaluationError::NotAnInteger { .. })
        ));
        assert!(matches!(
            call("prefix", &["abc", "+1"]),
            Err(EvaluationError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn count_checks_the_resolved_json_type() {
        let registry = HelperRegistry::default();
        let ctx = DataContext::new();
        let with_count = |count: Argument| {
            registry.call("dropFirst", &[Argument::new("Mr. Hogan"), count], &ctx)
        };
        assert_eq!(with_count(Argument::resolved("4", serde_json::json!(4))).unwrap(), "Hogan");
        assert_eq!(with_count(Argument::resolved("4", serde_json::json!("4"))).unwrap(), "Hogan");
        assert_eq!(
            with_count(Argument::resolved("4", serde_json::json!(4.0))),
            Err(EvaluationError::NotAnInteger {
                helper: "dropFirst".to_string(),
                found: "4.0".to_string(),
            })
        );
        assert!(with_count(Argument::resolved("-4", serde_json::json!(-4))).is_err());
        assert!(with_count(Argument::resolved("true", serde_json::json!(true))).is_err());
    }

    #[test]
    fn replace_is_literal() {
        assert_eq!(call("replace", &["a.b.c", ".", "-"]).unwrap(), "a-b-c");
        assert_eq!(call("replace", &["abc", "", "x"]).unwrap(), "abc");
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(
            call("uppercase", &["a", "b"]),
            Err(EvaluationError::ArityMismatch {
                helper: "uppercase".to_string(),
                expected: "1".to_string(),
                found: 2,
            })
        );
        assert!(call("numberFormat", &[]).is_err());
        assert!(matches!(call("shout", &["a"]), Err(EvaluationError::UnknownHelper(_))));
    }

    #[test]
    fn number_format_falls_back_to_none_style() {
        assert_eq!(call("numberFormat", &["0.348", "percent"]).unwrap(), "35%");
        assert_eq!(call("numberFormat", &["1234.5", "fancy"]).unwrap(), "1234");
        assert!(matches!(
            call("numberFormat", &["NaN"]),
            Err(EvaluationError::NotANumber { .. })
        ));
    }
}
