//! Permissive text-to-number coercion.
//!
//! Values are first rendered to text (numbers, booleans, null and missing
//! fields included) and then parsed with prefix-tolerant integer and float
//! parsers. Nothing here fails: input with no numeric prefix becomes
//! [`Numeric::NaN`].

use serde_json::{Number, Value};

use crate::types::FieldKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
    /// Not-a-number sentinel: nothing numeric could be read.
    NaN,
}

impl Numeric {
    /// JSON form of the value. JSON has no NaN or infinity, so the sentinel
    /// and non-finite reals persist as `null`.
    pub fn into_json(self) -> Value {
        match self {
            Numeric::Integer(i) => Value::from(i),
            Numeric::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Numeric::NaN => Value::Null,
        }
    }
}

/// Coerce a field's current value (`None` when the field is absent) to `kind`.
pub fn coerce(kind: FieldKind, value: Option<&Value>) -> Numeric {
    let text = stringify(value);
    match kind {
        FieldKind::Integer => parse_int(&text),
        FieldKind::Real => parse_float(&text),
    }
}

/// Base-10 integer parse of the leading digits. Digit runs too long for
/// `i64` come back as `Real`, as does negative zero.
pub fn parse_int(text: &str) -> Numeric {
    let trimmed = trim_start(text);
    let (negative, rest) = split_sign(trimmed);
    let len = count_digits(rest.as_bytes());
    if len == 0 {
        return Numeric::NaN;
    }
    let literal = &trimmed[..trimmed.len() - rest.len() + len];
    match literal.parse::<i64>() {
        Ok(0) if negative => Numeric::Real(-0.0),
        Ok(v) => Numeric::Integer(v),
        Err(_) => literal.parse::<f64>().map_or(Numeric::NaN, Numeric::Real),
    }
}

/// Float parse of the longest leading decimal literal (`Infinity` included).
pub fn parse_float(text: &str) -> Numeric {
    let (negative, rest) = split_sign(trim_start(text));
    if rest.starts_with("Infinity") {
        return Numeric::Real(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    let len = decimal_prefix_len(rest.as_bytes());
    if len == 0 {
        return Numeric::NaN;
    }
    rest[..len]
        .parse::<f64>()
        .map_or(Numeric::NaN, |v| Numeric::Real(if negative { -v } else { v }))
}

/// Text form of a stored value, as the parsers see it.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_to_string(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => float_to_string(f),
        None => n.to_string(),
    }
}

/// Integral floats print without a fraction; very large and very small
/// magnitudes switch to exponent form (`1e+21`, `1.5e-7`).
fn float_to_string(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{f:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        format!("{f}")
    }
}

/// Skips the whitespace and line terminators a JS number parse skips.
/// NEL (U+0085) is Unicode whitespace but not JS whitespace.
fn trim_start(s: &str) -> &str {
    s.trim_start_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}')
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

fn count_digits(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

/// Length of `digits [. digits] [e [sign] digits]` at the start of `b`.
/// At least one mantissa digit is required; a dangling exponent is left unconsumed.
fn decimal_prefix_len(b: &[u8]) -> usize {
    let int_digits = count_digits(b);
    let mut i = int_digits;

    let mut frac_digits = 0;
    if b.get(i) == Some(&b'.') {
        frac_digits = count_digits(&b[i + 1..]);
        if frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&b[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn real(n: Numeric) -> f64 {
        match n {
            Numeric::Real(f) => f,
            other => panic!("expected Real, got {other:?}"),
        }
    }

    #[test]
    fn int_reads_plain_digits() {
        assert_eq!(parse_int("5"), Numeric::Integer(5));
        assert_eq!(parse_int("1609459200"), Numeric::Integer(1_609_459_200));
    }

    #[test]
    fn int_stops_at_first_non_digit() {
        assert_eq!(parse_int("12.9"), Numeric::Integer(12));
        assert_eq!(parse_int("15844176.0"), Numeric::Integer(15_844_176));
        assert_eq!(parse_int("1e3"), Numeric::Integer(1));
        assert_eq!(parse_int("42abc"), Numeric::Integer(42));
    }

    #[test]
    fn int_handles_whitespace_and_sign() {
        assert_eq!(parse_int("  -7"), Numeric::Integer(-7));
        assert_eq!(parse_int("\t+3 "), Numeric::Integer(3));
        assert_eq!(parse_int("- 3"), Numeric::NaN);
    }

    #[test]
    fn int_without_digits_is_nan() {
        assert_eq!(parse_int("N/A"), Numeric::NaN);
        assert_eq!(parse_int(""), Numeric::NaN);
        assert_eq!(parse_int("null"), Numeric::NaN);
        assert_eq!(parse_int(".5"), Numeric::NaN);
    }

    #[test]
    fn int_is_base_ten_only() {
        assert_eq!(parse_int("0x1A"), Numeric::Integer(0));
        assert_eq!(parse_int("010"), Numeric::Integer(10));
    }

    #[test]
    fn int_keeps_signed_edge_values() {
        assert_eq!(parse_int("-9223372036854775808"), Numeric::Integer(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Numeric::Integer(i64::MAX));
        match parse_int("-0") {
            Numeric::Real(v) => assert!(v == 0.0 && v.is_sign_negative(), "v={v}"),
            other => panic!("expected negative zero, got {other:?}"),
        }
        assert_eq!(parse_int("+0"), Numeric::Integer(0));
    }

    #[test]
    fn leading_whitespace_matches_js() {
        assert_eq!(parse_int("\u{feff}\u{a0}\u{2028}8"), Numeric::Integer(8));
        assert_eq!(parse_int("\u{85}8"), Numeric::NaN);
        assert_eq!(parse_float("\u{85}1.5"), Numeric::NaN);
        assert_eq!(parse_float("\u{3000}1.5"), Numeric::Real(1.5));
    }

    #[test]
    fn int_overflow_falls_back_to_real() {
        let v = real(parse_int("99999999999999999999"));
        assert!((v - 1e20).abs() < 1e6, "v={v}");
        assert!(real(parse_int("-99999999999999999999")) < 0.0);
    }

    #[test]
    fn float_reads_decimal_literals() {
        assert_eq!(parse_float("101.5"), Numeric::Real(101.5));
        assert_eq!(parse_float("42.7"), Numeric::Real(42.7));
        assert_eq!(parse_float("-.5"), Numeric::Real(-0.5));
        assert_eq!(parse_float("5."), Numeric::Real(5.0));
        assert_eq!(parse_float("2.5E3"), Numeric::Real(2500.0));
        assert_eq!(parse_float("1e-2"), Numeric::Real(0.01));
    }

    #[test]
    fn float_takes_longest_prefix() {
        assert_eq!(parse_float("  573.137 USD"), Numeric::Real(573.137));
        assert_eq!(parse_float("1.2.3"), Numeric::Real(1.2));
        assert_eq!(parse_float("7e"), Numeric::Real(7.0));
        assert_eq!(parse_float("7e+"), Numeric::Real(7.0));
    }

    #[test]
    fn float_without_mantissa_is_nan() {
        assert_eq!(parse_float("N/A"), Numeric::NaN);
        assert_eq!(parse_float("."), Numeric::NaN);
        assert_eq!(parse_float("e5"), Numeric::NaN);
        assert_eq!(parse_float("undefined"), Numeric::NaN);
        assert_eq!(parse_float("nan"), Numeric::NaN);
    }

    #[test]
    fn float_accepts_infinity() {
        assert_eq!(parse_float("Infinity"), Numeric::Real(f64::INFINITY));
        assert_eq!(parse_float("-Infinityx"), Numeric::Real(f64::NEG_INFINITY));
        assert_eq!(parse_float("inf"), Numeric::NaN);
    }

    #[test]
    fn stringify_matches_number_rendering() {
        assert_eq!(stringify(Some(&json!(5))), "5");
        assert_eq!(stringify(Some(&json!(101.5))), "101.5");
        assert_eq!(stringify(Some(&json!(15844176.0))), "15844176");
        assert_eq!(stringify(Some(&json!(-0.0))), "0");
        assert_eq!(stringify(Some(&json!(1e21))), "1e+21");
        assert_eq!(stringify(Some(&json!(1.5e-7))), "1.5e-7");
        assert_eq!(stringify(Some(&json!(u64::MAX))), u64::MAX.to_string());
    }

    #[test]
    fn stringify_non_numbers() {
        assert_eq!(stringify(None), "undefined");
        assert_eq!(stringify(Some(&Value::Null)), "null");
        assert_eq!(stringify(Some(&json!(true))), "true");
        assert_eq!(stringify(Some(&json!([1, null, "2"]))), "1,,2");
        assert_eq!(stringify(Some(&json!({"a": 1}))), "[object Object]");
    }

    #[test]
    fn coerce_numeric_input_is_stable() {
        assert_eq!(coerce(FieldKind::Integer, Some(&json!(5))), Numeric::Integer(5));
        assert_eq!(coerce(FieldKind::Real, Some(&json!(101.5))), Numeric::Real(101.5));
        assert_eq!(coerce(FieldKind::Real, Some(&json!(62.54))), Numeric::Real(62.54));
        assert_eq!(
            coerce(FieldKind::Integer, Some(&json!(1509909852))),
            Numeric::Integer(1_509_909_852)
        );
    }

    #[test]
    fn coerce_real_into_integer_field_truncates() {
        assert_eq!(coerce(FieldKind::Integer, Some(&json!(9.75))), Numeric::Integer(9));
    }

    #[test]
    fn coerce_missing_or_null_is_nan() {
        assert_eq!(coerce(FieldKind::Integer, None), Numeric::NaN);
        assert_eq!(coerce(FieldKind::Real, Some(&Value::Null)), Numeric::NaN);
        assert_eq!(coerce(FieldKind::Real, Some(&json!(false))), Numeric::NaN);
    }

    #[test]
    fn coerce_single_element_array() {
        assert_eq!(coerce(FieldKind::Integer, Some(&json!(["12"]))), Numeric::Integer(12));
    }

    #[test]
    fn into_json_forms() {
        assert_eq!(Numeric::Integer(5).into_json(), json!(5));
        assert_eq!(Numeric::Real(101.5).into_json(), json!(101.5));
        assert_eq!(Numeric::NaN.into_json(), Value::Null);
        assert_eq!(Numeric::Real(f64::INFINITY).into_json(), Value::Null);
        assert!(Numeric::Real(5.0).into_json().is_f64());
        assert!(Numeric::Integer(5).into_json().is_i64());
    }
}
