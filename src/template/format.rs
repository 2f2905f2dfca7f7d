use crate::error::EvaluationError;
use chrono::format::{Fixed, Item, Numeric, Pad};
use chrono::{DateTime, FixedOffset, Local, Timelike};

/// Output styles accepted by `numberFormat`, rendered with en-US conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    #[default]
    None,
    Decimal,
    Currency,
    Percent,
}

impl NumberStyle {
    /// Unrecognized names fall back to `None`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "decimal" => NumberStyle::Decimal,
            "currency" => NumberStyle::Currency,
            "percent" => NumberStyle::Percent,
            _ => NumberStyle::None,
        }
    }
}

pub fn format_number(value: f64, style: NumberStyle) -> String {
    match style {
        NumberStyle::None => {
            let rounded = normalize_zero(value.round_ties_even());
            format!("{:.0}", rounded)
        }
        NumberStyle::Decimal => {
            let rounded = normalize_zero((value * 1000.0).round_ties_even() / 1000.0);
            let text = format!("{:.3}", rounded);
            let text = text.trim_end_matches('0').trim_end_matches('.');
            group_digits(text)
        }
        NumberStyle::Currency => {
            let rounded = normalize_zero((value * 100.0).round_ties_even() / 100.0);
            let text = group_digits(&format!("{:.2}", rounded.abs()));
            if rounded < 0.0 {
                format!("-${}", text)
            } else {
                format!("${}", text)
            }
        }
        NumberStyle::Percent => {
            let rounded = normalize_zero((value * 100.0).round_ties_even());
            format!("{}%", group_digits(&format!("{:.0}", rounded)))
        }
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Inserts thousands separators into the integer part of a plain decimal string.
fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Parses an ISO-8601 timestamp with a zone designator. Fractional seconds are accepted and dropped.
pub fn parse_date(input: &str) -> Result<DateTime<FixedOffset>, EvaluationError> {
    let trimmed = input.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|date| date.with_nanosecond(0).unwrap_or(date))
        .map_err(|_| EvaluationError::InvalidDate(input.to_string()))
}

/// Formats `date` with a Unicode date pattern such as `MMM d, yyyy h:mm a`,
/// in `offset` or the machine's local zone when none is given.
pub fn format_date(
    date: DateTime<FixedOffset>,
    pattern: &str,
    offset: Option<FixedOffset>,
) -> Result<String, EvaluationError> {
    let items = compile_pattern(pattern)?;
    let local = match offset {
        Some(offset) => date.with_timezone(&offset),
        None => date.with_timezone(&Local).fixed_offset(),
    };
    Ok(local.format_with_items(items.iter()).to_string())
}

/// Translates a Unicode (LDML) date pattern into chrono format items.
fn compile_pattern(pattern: &str) -> Result<Vec<Item<'static>>, EvaluationError> {
    let invalid = || EvaluationError::InvalidDatePattern(pattern.to_string());
    if pattern.is_empty() {
        return Err(invalid());
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut items = Vec::new();
    let mut index = 0;
    while index < chars.len() {
        let letter = chars[index];
        let mut run = 1;
        while index + run < chars.len() && chars[index + run] == letter {
            run += 1;
        }

        if letter == '\'' {
            // '' is an escaped quote; otherwise read up to the closing quote.
            if run >= 2 && run % 2 == 0 {
                items.push(Item::OwnedLiteral("'".repeat(run / 2).into()));
                index += run;
                continue;
            }
            let close = chars[index + 1..]
                .iter()
                .position(|&c| c == '\'')
                .ok_or_else(invalid)?;
            let literal: String = chars[index + 1..index + 1 + close].iter().collect();
            items.push(Item::OwnedLiteral(literal.into()));
            index += close + 2;
            continue;
        }

        let numeric = |field: Numeric| {
            let pad = if run >= 2 { Pad::Zero } else { Pad::None };
            Item::Numeric(field, pad)
        };
        let item = match letter {
            'y' if run == 2 => Item::Numeric(Numeric::YearMod100, Pad::Zero),
            'y' => numeric(Numeric::Year),
            'M' if run == 3 => Item::Fixed(Fixed::ShortMonthName),
            'M' if run >= 4 => Item::Fixed(Fixed::LongMonthName),
            'M' => numeric(Numeric::Month),
            'd' => numeric(Numeric::Day),
            'E' if run >= 4 => Item::Fixed(Fixed::LongWeekdayName),
            'E' => Item::Fixed(Fixed::ShortWeekdayName),
            'a' => Item::Fixed(Fixed::UpperAmPm),
            'h' => numeric(Numeric::Hour12),
            'H' => numeric(Numeric::Hour),
            'm' => numeric(Numeric::Minute),
            's' => numeric(Numeric::Second),
            'z' => Item::Fixed(Fixed::TimezoneOffsetColon),
            'Z' => Item::Fixed(Fixed::TimezoneOffset),
            c if c.is_ascii_alphabetic() => return Err(invalid()),
            _ => Item::OwnedLiteral(chars[index..index + run].iter().collect::<String>().into()),
        };
        items.push(item);
        index += run;
    }
    Ok(items)
}
