use crate::context::DataContext;
use crate::template::{self, parse_date, render_value};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Predicate {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "doesNotEqual", alias = "notEquals")]
    NotEquals,
    #[serde(rename = "isGreaterThan", alias = "greaterThan")]
    GreaterThan,
    #[serde(rename = "isLessThan", alias = "lessThan")]
    LessThan,
    #[serde(rename = "isSet")]
    IsSet,
    #[serde(rename = "isNotSet")]
    IsNotSet,
    #[serde(rename = "isTrue")]
    IsTrue,
    #[serde(rename = "isFalse")]
    IsFalse,
}

/// A single predicate test against a namespaced value, e.g.
/// `{ "path": "data.age", "predicate": "isGreaterThan", "value": 18 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(alias = "dataKey", alias = "keyPath")]
    pub path: String,
    pub predicate: Predicate,
    #[serde(default)]
    pub value: Option<JsonValue>,
}

impl Condition {
    pub fn new(path: impl Into<String>, predicate: Predicate, value: Option<JsonValue>) -> Self {
        Self {
            path: path.into(),
            predicate,
            value,
        }
    }

    /// Evaluates the condition. Combinations of predicate, value and operand
    /// that have no defined comparison are `false`; this never fails.
    pub fn evaluate(&self, ctx: &DataContext<'_>) -> bool {
        let resolved = ctx.resolve_path(&self.path);
        let value = resolved.as_deref();

        match self.predicate {
            Predicate::IsSet => value.is_some_and(|v| !v.is_null()),
            Predicate::IsNotSet => value.is_none_or(JsonValue::is_null),
            Predicate::IsTrue => as_flag(value) == Some(true),
            Predicate::IsFalse => as_flag(value) == Some(false),
            predicate => match &self.value {
                Some(JsonValue::Number(operand)) => match operand.as_f64() {
                    Some(operand) => compare_numbers(predicate, as_number(value), operand),
                    None => false,
                },
                Some(JsonValue::String(operand)) => compare_text(predicate, value, operand, ctx),
                Some(JsonValue::Bool(operand)) => match predicate {
                    Predicate::Equals => as_flag(value) == Some(*operand),
                    Predicate::NotEquals => as_flag(value) != Some(*operand),
                    _ => false,
                },
                _ => false,
            },
        }
    }
}

fn compare_numbers(predicate: Predicate, value: Option<f64>, operand: f64) -> bool {
    match (predicate, value) {
        (Predicate::NotEquals, None) => true,
        (_, None) => false,
        (Predicate::Equals, Some(value)) => value == operand,
        (Predicate::NotEquals, Some(value)) => value != operand,
        (Predicate::GreaterThan, Some(value)) => value > operand,
        (Predicate::LessThan, Some(value)) => value < operand,
        _ => false,
    }
}

fn compare_text(
    predicate: Predicate,
    value: Option<&JsonValue>,
    operand: &str,
    ctx: &DataContext<'_>,
) -> bool {
    let Some(operand) = template::evaluate(operand, ctx) else {
        return predicate == Predicate::NotEquals;
    };
    let text = value.and_then(render_value);

    match predicate {
        Predicate::Equals => text.as_deref() == Some(operand.as_str()),
        Predicate::NotEquals => text.as_deref() != Some(operand.as_str()),
        Predicate::GreaterThan | Predicate::LessThan => {
            let Some(text) = text else {
                return false;
            };
            let ordering = match (parse_date(&text), parse_date(&operand)) {
                (Ok(left), Ok(right)) => Some(left.cmp(&right)),
                _ => match (text.trim().parse::<f64>(), operand.trim().parse::<f64>()) {
                    (Ok(left), Ok(right)) => left.partial_cmp(&right),
                    _ => None,
                },
            };
            let wanted = if predicate == Predicate::GreaterThan {
                Ordering::Greater
            } else {
                Ordering::Less
            };
            ordering == Some(wanted)
        }
        _ => false,
    }
}

/// A number, or a string that parses as one.
pub(super) fn as_number(value: Option<&JsonValue>) -> Option<f64> {
    match value? {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// A boolean, or the literal strings `"true"` / `"false"`.
fn as_flag(value: Option<&JsonValue>) -> Option<bool> {
    match value? {
        JsonValue::Bool(flag) => Some(*flag),
        JsonValue::String(text) if text == "true" => Some(true),
        JsonValue::String(text) if text == "false" => Some(false),
        _ => None,
    }
}

/// Evaluates every condition against the same context; all must hold.
pub fn all_hold<'c>(conditions: impl IntoIterator<Item = &'c Condition>, ctx: &DataContext<'_>) -> bool {
    conditions.into_iter().all(|condition| condition.evaluate(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(condition: JsonValue, data: JsonValue) -> bool {
        let condition: Condition = serde_json::from_value(condition).unwrap();
        condition.evaluate(&DataContext::new().with_data(&data))
    }

    #[test]
    fn predicate_aliases() {
        let a: Condition =
            serde_json::from_value(json!({ "keyPath": "x", "predicate": "notEquals" })).unwrap();
        let b: Condition =
            serde_json::from_value(json!({ "dataKey": "x", "predicate": "doesNotEqual" })).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn failed_numeric_parse() {
        let data = json!({ "age": "old" });
        assert!(!check(json!({ "path": "data.age", "predicate": "equals", "value": 3 }), data.clone()));
        assert!(check(json!({ "path": "data.age", "predicate": "notEquals", "value": 3 }), data));
    }

    #[test]
    fn flags_accept_literal_strings() {
        let data = json!({ "a": "true", "b": false, "c": "yes" });
        assert!(check(json!({ "path": "a", "predicate": "isTrue" }), data.clone()));
        assert!(check(json!({ "path": "b", "predicate": "isFalse" }), data.clone()));
        assert!(!check(json!({ "path": "c", "predicate": "isTrue" }), data.clone()));
        assert!(!check(json!({ "path": "c", "predicate": "isFalse" }), data));
    }
}
