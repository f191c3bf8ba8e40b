//! Parser for compound duration strings such as `"5m30s"` or `"1.5h"`.
//!
//! A duration is an optional sign followed by one or more decimal numbers,
//! each with an optional fraction and a unit suffix. Valid units are `ns`,
//! `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. The bare string `"0"` is
//! accepted without a unit.

use std::time::Duration;

use crate::error::ParseDurationError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude limit, `|i64::MIN|`.
const MAGNITUDE_LIMIT: u64 = 1 << 63;
/// Fraction digits past this scale are below nanosecond resolution.
const MAX_FRACTION_SCALE: u64 = 10_000_000_000_000_000_000;

/// Parse `input` into a non-negative [`Duration`].
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let nanos = parse_duration_nanos(input)?;
    if nanos < 0 {
        return Err(ParseDurationError::Negative(input.to_string()));
    }
    Ok(Duration::from_nanos(nanos.unsigned_abs()))
}

/// Parse `input` into a signed count of nanoseconds.
pub fn parse_duration_nanos(input: &str) -> Result<i64, ParseDurationError> {
    if input.is_empty() {
        return Err(ParseDurationError::Empty);
    }
    let invalid = || ParseDurationError::Invalid(input.to_string());
    let overflow = || ParseDurationError::Overflow(input.to_string());

    let (negative, mut rest) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, whole_digits, after) =
            leading_int(rest).ok_or_else(overflow)?;
        rest = after;

        let mut fraction = Fraction::default();
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (parsed, after) = leading_fraction(after_dot);
            fraction = parsed;
            rest = after;
        }
        if whole_digits == 0 && fraction.digits == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let (unit_text, after) = rest.split_at(unit_len);
        rest = after;
        let unit = unit_nanos(unit_text).ok_or_else(|| {
            ParseDurationError::UnknownUnit {
                unit: unit_text.to_string(),
                input: input.to_string(),
            }
        })?;

        let component = whole
            .checked_mul(unit)
            .and_then(|v| v.checked_add(fraction.scaled(unit)))
            .filter(|v| *v <= MAGNITUDE_LIMIT)
            .ok_or_else(overflow)?;
        total = total
            .checked_add(component)
            .filter(|v| *v <= MAGNITUDE_LIMIT)
            .ok_or_else(overflow)?;
    }

    if negative {
        // total <= 2^63, so the negation always fits in i64
        return Ok((-i128::from(total)) as i64);
    }
    i64::try_from(total).map_err(|_| overflow())
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume leading ASCII digits. Returns `None` when the value exceeds
/// the magnitude limit.
fn leading_int(s: &str) -> Option<(u64, usize, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for b in s[..digits].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAGNITUDE_LIMIT)?;
    }
    Some((value, digits, &s[digits..]))
}

#[derive(Debug, Default, Clone, Copy)]
struct Fraction {
    value: u64,
    scale: u64,
    digits: usize,
}

impl Fraction {
    fn scaled(&self, unit: u64) -> u64 {
        if self.value == 0 {
            return 0;
        }
        let nanos =
            u128::from(self.value) * u128::from(unit) / u128::from(self.scale);
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}

/// Consume the digits after a decimal point. Digits past the precision
/// that fits in `i64` are consumed but ignored.
fn leading_fraction(s: &str) -> (Fraction, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut fraction = Fraction {
        value: 0,
        scale: 1,
        digits,
    };
    let mut saturated = false;
    for b in s[..digits].bytes() {
        if saturated {
            continue;
        }
        let next = fraction
            .value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAGNITUDE_LIMIT);
        let room = fraction.value <= i64::MAX as u64 / 10
            && fraction.scale <= MAX_FRACTION_SCALE / 10;
        match next {
            Some(v) if room => {
                fraction.value = v;
                fraction.scale *= 10;
            }
            _ => saturated = true,
        }
    }
    (fraction, &s[digits..])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let cases: &[(&str, i64)] = &[
            ("0", 0),
            ("-0", 0),
            ("+0", 0),
            ("5s", 5 * SECOND as i64),
            ("30s", 30 * SECOND as i64),
            ("1478s", 1478 * SECOND as i64),
            ("-5s", -5 * SECOND as i64),
            ("+5s", 5 * SECOND as i64),
            ("-0s", 0),
            ("5.0s", 5 * SECOND as i64),
            ("5.6s", 5_600_000_000),
            ("5.s", 5 * SECOND as i64),
            (".5s", 500_000_000),
            ("1.004s", 1_004_000_000),
            ("1.0040s", 1_004_000_000),
            ("100.00100s", 100_001_000_000),
            ("10ns", 10),
            ("11us", 11_000),
            ("12\u{b5}s", 12_000),
            ("12\u{3bc}s", 12_000),
            ("13ms", 13_000_000),
            ("15m", 15 * MINUTE as i64),
            ("16h", 16 * HOUR as i64),
            ("5m30s", 330_000_000_000),
            ("3h30m", (3 * HOUR + 30 * MINUTE) as i64),
            ("10.5s4m", (4 * MINUTE + 10 * SECOND) as i64 + 500_000_000),
            ("-2m3.4s", -((2 * MINUTE + 3 * SECOND) as i64 + 400_000_000)),
            (
                "1h2m3s4ms5us6ns",
                (HOUR + 2 * MINUTE + 3 * SECOND + 4 * MILLISECOND) as i64
                    + 5_006,
            ),
            ("39h9m14.425s", (39 * HOUR + 9 * MINUTE) as i64 + 14_425_000_000),
            ("52763797000ns", 52_763_797_000),
            ("1.5h", (HOUR + 30 * MINUTE) as i64),
            ("0.100000000000000000000h", 6 * MINUTE as i64),
            (
                "0.830103483285477580700h",
                (49 * MINUTE + 48 * SECOND) as i64 + 372_539_827,
            ),
            ("9007199254740993ns", (1 << 53) + 1),
            ("9223372036854775807ns", i64::MAX),
            ("9223372036854775.807us", i64::MAX),
            ("9223372036s854ms775us807ns", i64::MAX),
            ("-9223372036854775808ns", i64::MIN),
            ("-9223372036854775.808us", i64::MIN),
        ];
        for (input, expected) in cases {
            assert_eq!(
                parse_duration_nanos(input),
                Ok(*expected),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_invalid() {
        let invalid = ["3", "-", "s", ".", "-.", ".s", "+.s", "5m x", "1d"];
        for input in invalid {
            assert!(
                parse_duration_nanos(input).is_err(),
                "input {input:?} should be rejected"
            );
        }
        assert_eq!(parse_duration_nanos(""), Err(ParseDurationError::Empty));
        assert_eq!(
            parse_duration_nanos("3"),
            Err(ParseDurationError::MissingUnit("3".into()))
        );
        assert_eq!(
            parse_duration_nanos("1d"),
            Err(ParseDurationError::UnknownUnit {
                unit: "d".into(),
                input: "1d".into()
            })
        );
        assert_eq!(
            parse_duration_nanos("."),
            Err(ParseDurationError::Invalid(".".into()))
        );
    }

    #[test]
    fn test_parse_overflow() {
        for input in [
            "9223372036854775808ns",
            "9223372036854775.808us",
            "9223372036854ms775us808ns",
            "-9223372036854775809ns",
            "3000000h",
        ] {
            assert_eq!(
                parse_duration_nanos(input),
                Err(ParseDurationError::Overflow(input.into())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_std_duration() {
        assert_eq!(
            parse_duration("5m30s"),
            Ok(Duration::from_secs(5 * 60 + 30))
        );
        assert_eq!(parse_duration("-0s"), Ok(Duration::ZERO));
        assert_eq!(
            parse_duration("-1s"),
            Err(ParseDurationError::Negative("-1s".into()))
        );
    }
}
