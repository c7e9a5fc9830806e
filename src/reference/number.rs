//! Oracle NUMBER encoding.
//!
//! A NUMBER is an exponent byte followed by up to 20 base-100 mantissa digits.
//! Positive values store `192 + e` and `digit + 1`; negative values store the
//! complement `63 - e` and `101 - digit`, plus a trailing 102 when the mantissa
//! is shorter than 20 digits. `e` is the base-100 exponent of the first digit
//! plus one, so 1 encodes as `C1 02` and 0.5 as `C0 33`.

use crate::native::{NativeError, NativeResult, OciNumber};

const MAX_DIGITS: usize = 20;
const ZERO: u8 = 0x80;
const NEGATIVE_TERMINATOR: u8 = 102;
const MAX_EXPONENT: i32 = 63;
const MIN_EXPONENT: i32 = -62;

fn invalid_number() -> NativeError {
    NativeError::ora(1722, "invalid number")
}

fn overflow() -> NativeError {
    NativeError::ora(1426, "numeric overflow")
}

/// Sign, base-100 digits (first one non-zero) and exponent `e` such that the
/// value is `0.d1d2... * 100^e`.
#[derive(Debug, PartialEq, Eq)]
struct Decoded {
    negative: bool,
    digits: Vec<u8>,
    exponent: i32,
}

pub(crate) fn encode_text(text: &str) -> NativeResult<OciNumber> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid_number());
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid_number());
    }

    let mut decimal: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    let mut point = i32::try_from(int_part.len()).map_err(|_| overflow())?;

    let leading = decimal.iter().take_while(|d| **d == 0).count();
    decimal.drain(..leading);
    point -= i32::try_from(leading).map_err(|_| overflow())?;
    while decimal.last() == Some(&0) {
        decimal.pop();
    }
    if decimal.is_empty() {
        return Ok(zero());
    }

    // Align the decimal point to a digit pair.
    if point.rem_euclid(2) != 0 {
        decimal.insert(0, 0);
        point += 1;
    }
    if decimal.len() % 2 != 0 {
        decimal.push(0);
    }
    let digits: Vec<u8> = decimal.chunks(2).map(|p| p[0] * 10 + p[1]).collect();

    let mut decoded = Decoded {
        negative,
        digits,
        exponent: point / 2,
    };
    round_to_max_digits(&mut decoded);
    encode(&decoded)
}

fn zero() -> OciNumber {
    // from_bytes only fails for empty or oversized input
    OciNumber::from_bytes(&[ZERO]).unwrap_or_else(|| OciNumber::from_raw([0; 22]))
}

/// Round half away from zero to 20 base-100 digits.
fn round_to_max_digits(value: &mut Decoded) {
    if value.digits.len() > MAX_DIGITS {
        let round_up = value.digits[MAX_DIGITS] >= 50;
        value.digits.truncate(MAX_DIGITS);
        if round_up {
            let mut idx = MAX_DIGITS;
            loop {
                if idx == 0 {
                    value.digits.insert(0, 1);
                    value.exponent += 1;
                    break;
                }
                idx -= 1;
                if value.digits[idx] == 99 {
                    value.digits[idx] = 0;
                } else {
                    value.digits[idx] += 1;
                    break;
                }
            }
        }
    }
    while value.digits.last() == Some(&0) {
        value.digits.pop();
    }
}

fn encode(value: &Decoded) -> NativeResult<OciNumber> {
    if value.digits.is_empty() {
        return Ok(zero());
    }
    if value.exponent > MAX_EXPONENT {
        return Err(overflow());
    }
    if value.exponent < MIN_EXPONENT {
        return Ok(zero());
    }
    let exp = if value.negative {
        63 - value.exponent
    } else {
        192 + value.exponent
    };
    let mut bytes = Vec::with_capacity(MAX_DIGITS + 2);
    bytes.push(u8::try_from(exp).map_err(|_| overflow())?);
    if value.negative {
        bytes.extend(value.digits.iter().map(|d| 101 - d));
        if value.digits.len() < MAX_DIGITS {
            bytes.push(NEGATIVE_TERMINATOR);
        }
    } else {
        bytes.extend(value.digits.iter().map(|d| d + 1));
    }
    OciNumber::from_bytes(&bytes).ok_or_else(overflow)
}

fn decode(value: &OciNumber) -> NativeResult<Option<Decoded>> {
    let bytes = value.bytes();
    let (&exp, mantissa) = bytes.split_first().ok_or_else(invalid_number)?;
    if exp == ZERO && mantissa.is_empty() {
        return Ok(None);
    }
    let negative = exp & 0x80 == 0;
    let mut digits = Vec::with_capacity(mantissa.len());
    let exponent = if negative {
        let mantissa = match mantissa.split_last() {
            Some((&NEGATIVE_TERMINATOR, rest)) => rest,
            _ => mantissa,
        };
        for &b in mantissa {
            if !(2..=101).contains(&b) {
                return Err(invalid_number());
            }
            digits.push(101 - b);
        }
        63 - i32::from(exp)
    } else {
        for &b in mantissa {
            if !(1..=100).contains(&b) {
                return Err(invalid_number());
            }
            digits.push(b - 1);
        }
        i32::from(exp) - 192
    };
    if digits.first().is_none_or(|d| *d == 0) {
        return Err(invalid_number());
    }
    Ok(Some(Decoded {
        negative,
        digits,
        exponent,
    }))
}

/// Plain decimal text, no exponent, `0.5` rather than `.5`.
pub(crate) fn decode_text(value: &OciNumber) -> NativeResult<String> {
    let Some(decoded) = decode(value)? else {
        return Ok("0".to_string());
    };
    let mut decimal = String::with_capacity(decoded.digits.len() * 2);
    for d in &decoded.digits {
        decimal.push(char::from(b'0' + d / 10));
        decimal.push(char::from(b'0' + d % 10));
    }
    let len = i32::try_from(decimal.len()).map_err(|_| invalid_number())?;
    let point = decoded.exponent * 2;

    let mut out = String::new();
    if decoded.negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        for _ in 0..-point {
            out.push('0');
        }
        out.push_str(decimal.trim_end_matches('0'));
    } else if point >= len {
        out.push_str(decimal.trim_start_matches('0'));
        for _ in 0..point - len {
            out.push('0');
        }
    } else {
        let split = usize::try_from(point).map_err(|_| invalid_number())?;
        let (int, frac) = decimal.split_at(split);
        let int = int.trim_start_matches('0');
        out.push_str(if int.is_empty() { "0" } else { int });
        let frac = frac.trim_end_matches('0');
        if !frac.is_empty() {
            out.push('.');
            out.push_str(frac);
        }
    }
    Ok(out)
}

pub(crate) fn decode_real(value: &OciNumber) -> NativeResult<f64> {
    decode_text(value)?.parse::<f64>().map_err(|_| invalid_number())
}

pub(crate) fn encode_real(value: f64) -> NativeResult<OciNumber> {
    if !value.is_finite() {
        return Err(overflow());
    }
    // Display for f64 is the shortest exact round-trip form and never uses an
    // exponent.
    encode_text(&format!("{value}"))
}

/// Truncates toward zero.
pub(crate) fn decode_int(value: &OciNumber) -> NativeResult<i64> {
    let text = decode_text(value)?;
    let int = text.split_once('.').map_or(text.as_str(), |(i, _)| i);
    match int {
        "-0" | "0" | "-" | "" => Ok(0),
        _ => int
            .parse::<i64>()
            .map_err(|_| NativeError::ora(1455, "converting column overflows integer datatype")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_of(text: &str) -> Vec<u8> {
        encode_text(text).unwrap().bytes().to_vec()
    }

    #[test]
    fn well_known_encodings() {
        assert_eq!(bytes_of("0"), vec![0x80]);
        assert_eq!(bytes_of("1"), vec![0xC1, 0x02]);
        assert_eq!(bytes_of("-1"), vec![0x3E, 0x64, 0x66]);
        assert_eq!(bytes_of("100"), vec![0xC2, 0x02]);
        assert_eq!(bytes_of("0.5"), vec![0xC0, 0x33]);
        assert_eq!(bytes_of("123.45"), vec![0xC2, 0x02, 0x18, 0x2E]);
    }

    #[test]
    fn decodes_to_plain_text() {
        for text in ["0", "1", "-1", "100", "0.5", "123.45", "-0.001", "1000000", "12.5"] {
            assert_eq!(decode_text(&encode_text(text).unwrap()).unwrap(), text);
        }
    }

    #[test]
    fn normalises_leading_and_trailing_zeros() {
        assert_eq!(decode_text(&encode_text("007.2500").unwrap()).unwrap(), "7.25");
        assert_eq!(decode_text(&encode_text(".5").unwrap()).unwrap(), "0.5");
        assert_eq!(decode_text(&encode_text("-0.000").unwrap()).unwrap(), "0");
    }

    #[test]
    fn rejects_garbage() {
        for text in ["", "-", ".", "1e5", "12a", "1.2.3"] {
            assert!(encode_text(text).is_err(), "{text:?}");
        }
    }

    #[test]
    fn rounds_to_forty_digits() {
        let text = "1234567890123456789012345678901234567890123";
        assert_eq!(
            decode_text(&encode_text(text).unwrap()).unwrap(),
            "1234567890123456789012345678901234567890000"
        );
        let nines = "9".repeat(45);
        assert_eq!(
            decode_text(&encode_text(&nines).unwrap()).unwrap(),
            format!("1{}", "0".repeat(45))
        );
    }

    #[test]
    fn exponent_limits() {
        assert!(encode_text(&format!("1{}", "0".repeat(126))).is_err());
        assert!(encode_text(&format!("1{}", "0".repeat(125))).is_ok());
        assert_eq!(bytes_of(&format!("0.{}1", "0".repeat(140))), vec![0x80]);
    }

    #[test]
    fn reals_round_trip() {
        for v in [0.1, -2.5, 1e100, 3.141_592_653_589_793, -1e-100, f64::MAX / 1e200] {
            assert_eq!(decode_real(&encode_real(v).unwrap()).unwrap(), v);
        }
        assert!(encode_real(f64::INFINITY).is_err());
    }

    #[test]
    fn ints_truncate_toward_zero() {
        assert_eq!(decode_int(&encode_text("-7.9").unwrap()).unwrap(), -7);
        assert_eq!(decode_int(&encode_text("0.9").unwrap()).unwrap(), 0);
        assert_eq!(decode_int(&encode_text("-0.9").unwrap()).unwrap(), 0);
        assert_eq!(
            decode_int(&encode_text(&i64::MIN.to_string()).unwrap()).unwrap(),
            i64::MIN
        );
        assert!(decode_int(&encode_text("99999999999999999999").unwrap()).is_err());
    }

    #[test]
    fn corrupt_bytes_are_invalid() {
        let bad = OciNumber::from_bytes(&[0xC1, 0xF0]).unwrap();
        assert!(decode_text(&bad).is_err());
        let leading_zero_digit = OciNumber::from_bytes(&[0xC1, 0x01]).unwrap();
        assert!(decode_text(&leading_zero_digit).is_err());
    }
}
