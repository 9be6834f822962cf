//! Parsing of human-readable durations such as `3h` or `1h30m`.

use super::WindowError;
use chrono::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this add nothing at nanosecond precision.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a duration made of one or more `<decimal><unit>` terms.
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`, e.g.
/// `"8h"`, `"1h30m"`, `"1.5h"` or `"90s"`. A bare `"0"` is also accepted.
///
/// # Errors
///
/// Returns [`WindowError`] if the input is malformed, uses an unknown unit,
/// is negative, or overflows.
pub fn parse_duration(input: &str) -> Result<Duration, WindowError> {
    let invalid = |reason: &'static str| WindowError::InvalidDuration {
        input: input.to_string(),
        reason,
    };
    let out_of_range = || WindowError::OutOfRange {
        input: input.to_string(),
    };

    let mut rest = input.trim();
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| WindowError::UnknownUnit {
            input: input.to_string(),
            unit: unit.to_string(),
        })?;

        let mut term = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| out_of_range())?
                .checked_mul(scale)
                .ok_or_else(out_of_range)?
        };
        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let numerator = digits.parse::<u128>().map_err(|_| out_of_range())?;
            let denominator = 10u128.pow(digits.len() as u32);
            term += numerator * scale / denominator;
        }

        total = total.checked_add(term).ok_or_else(out_of_range)?;
        rest = after;
    }

    let nanos = i64::try_from(total).map_err(|_| out_of_range())?;
    if negative && nanos > 0 {
        return Err(WindowError::Negative {
            input: input.to_string(),
        });
    }
    Ok(Duration::nanoseconds(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(len)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}
