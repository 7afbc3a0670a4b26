//! value rewriter: turns one comparison into a closed min-/max- feature
//!
//! exclusive bounds have no min-/max- equivalent, so the value is nudged to
//! the nearest inclusive one: by one pixel for integral pixel lengths, by
//! [`STEP`] for everything else

use lazy_static::lazy_static;
use regex::Regex;

use super::options::Options;
use super::types::{Feature, RangeExpression};

/// smallest offset that survives unit conversion in nested queries (1in = 96px)
pub const STEP: f64 = 0.001;

const STEP_TEXT: &str = "0.001";

lazy_static! {
    /// first numeric run and everything after it (the unit or ratio tail)
    static ref NUMBER_AND_UNIT: Regex =
        Regex::new(r"(?s)^(?P<prefix>.*?)(?P<number>[-0-9.]+)(?P<unit>.*)$")
            .expect("number/unit pattern is valid");
}

/// rewrite one comparison as `(min-<feature>: v)` or `(max-<feature>: v)`
pub fn create_query(expr: &RangeExpression<'_>, options: &Options) -> String {
    let value = match &options.custom_value {
        Some(custom) if custom.is_match(expr.value) => custom_bound(expr, options.use_calc),
        _ => numeric_bound(expr),
    };

    format_query(expr, &value)
}

fn format_query(expr: &RangeExpression<'_>, value: &str) -> String {
    format!(
        "({}-{}: {})",
        expr.comparison.bound().prefix(),
        expr.feature.name(),
        value
    )
}

/// opaque values can't be computed, so the offset is written out
fn custom_bound(expr: &RangeExpression<'_>, use_calc: bool) -> String {
    if expr.inclusive {
        return expr.value.to_string();
    }

    let op = if expr.comparison.sign() < 0 {
        " - "
    } else {
        " + "
    };

    if use_calc {
        format!(
            "calc({}{}{}{})",
            expr.value,
            op,
            STEP_TEXT,
            expr.feature.unit()
        )
    } else {
        format!("{}{}{}", expr.value, op, STEP_TEXT)
    }
}

fn numeric_bound(expr: &RangeExpression<'_>) -> String {
    if expr.inclusive {
        return expr.value.to_string();
    }

    let Some(caps) = NUMBER_AND_UNIT.captures(expr.value) else {
        // nothing numeric to adjust
        return expr.value.to_string();
    };

    let prefix = &caps["prefix"];
    let number = &caps["number"];
    let unit = &caps["unit"];
    let sign = expr.comparison.sign();

    let parsed = match parse_number(number) {
        Some(n) if n.value != 0.0 => n,
        _ => return format!("{}{}{}", prefix, sign, minimal_unit(expr.feature, unit)),
    };

    let adjusted = if unit == "px" && parsed.is_integral() {
        parsed.value + f64::from(sign)
    } else {
        round_micro(parsed.value + STEP * f64::from(sign))
    };

    format!("{}{}{}", prefix, format_number(adjusted), unit)
}

/// unit paired with the ±1 substitute for a zero or unreadable number
fn minimal_unit(feature: Feature, unit: &str) -> &str {
    if unit.is_empty() {
        feature.unit()
    } else {
        unit
    }
}

/// leading decimal number of a `[-0-9.]` run
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParsedNumber {
    value: f64,
    /// digits appeared before any decimal point
    has_integer_part: bool,
}

impl ParsedNumber {
    /// written as a whole number, e.g. `300` or `300.0` but not `.0`
    fn is_integral(&self) -> bool {
        self.has_integer_part && self.value.fract() == 0.0
    }
}

/// parse the longest `-?digits[.digits]` prefix, ignoring trailing junk
fn parse_number(text: &str) -> Option<ParsedNumber> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let int_part = &rest[..int_len];

    let frac_part = match rest[int_len..].strip_prefix('.') {
        Some(after) => {
            let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
            &after[..frac_len]
        }
        None => "",
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let normalized = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part }
    );

    normalized.parse().ok().map(|value| ParsedNumber {
        value,
        has_integer_part: !int_part.is_empty(),
    })
}

/// round to 6 decimals by shifting the exponent in text, which keeps
/// `1.5 + 0.001` at `1.501` instead of `1.5010000000000001`
fn round_micro(value: f64) -> f64 {
    let scaled: f64 = format!("{}e6", value).parse().unwrap_or(value * 1e6);
    // half up, like Math.round
    let rounded = (scaled + 0.5).floor();
    format!("{}e-6", rounded)
        .parse()
        .unwrap_or(rounded / 1e6)
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // never print -0
        "0".to_string()
    } else {
        value.to_string()
    }
}
