//! JavaScript-compatible number conversions.
//!
//! The markup this crate reads and writes is produced and consumed by JavaScript tooling, so
//! string/number conversions follow ECMAScript rather than Rust's `FromStr`/`Display`:
//! `Number("")` is `0`, `parseInt("256px", 10)` is `256`, and `60.0` prints as `60`.
//! Whitespace follows the ECMAScript `\s` class too (U+FEFF counts, U+0085 does not).

/// `StrWhiteSpaceChar` from ECMA-262 (WhiteSpace + LineTerminator).
pub fn is_js_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Splits like JavaScript's `s.split(/\s+/)`: runs of whitespace separate tokens, and a leading
/// or trailing run yields an empty token at that end.
pub(crate) fn split_js_whitespace(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_run = false;
    for (i, ch) in s.char_indices() {
        if is_js_whitespace(ch) {
            if !in_run {
                out.push(&s[start..i]);
                in_run = true;
            }
        } else if in_run {
            start = i;
            in_run = false;
        }
    }
    out.push(if in_run { "" } else { &s[start..] });
    out
}

/// `s.replace(/\s+/g, "")`.
pub(crate) fn strip_js_whitespace(s: &str) -> String {
    s.chars().filter(|&ch| !is_js_whitespace(ch)).collect()
}

/// Converts a string the way JavaScript's `Number(s)` does.
///
/// Returns `None` where JavaScript would produce `NaN`. Rust-only spellings accepted by
/// `f64::from_str` (`inf`, `nan`, `infinity`) are rejected.
pub fn js_number(s: &str) -> Option<f64> {
    let s = s.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(parsed) = radix_literal(s) {
        return parsed;
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let has_digit = unsigned.bytes().any(|b| b.is_ascii_digit());
    let decimal_chars = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !has_digit || !decimal_chars {
        return None;
    }
    s.parse::<f64>().ok()
}

/// `0x`/`0o`/`0b` literals. `None` when `s` is not a radix literal at all; `Some(None)` when it
/// starts like one but has invalid digits (`0x`, `0b12`).
fn radix_literal(s: &str) -> Option<Option<f64>> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(None);
    }

    let mut acc = 0.0f64;
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(radix) else {
            return Some(None);
        };
        acc = acc * f64::from(radix) + f64::from(d);
    }
    Some(Some(acc))
}

/// Converts a string the way JavaScript's `parseInt(s, 10)` does: leading whitespace is
/// skipped, an optional sign is accepted, and parsing stops at the first non-digit.
pub fn js_parse_int(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(is_js_whitespace);
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let v = rest[..end].parse::<f64>().ok()?;
    Some(if negative { -v } else { v })
}

pub fn fmt_js_number(v: f64) -> String {
    let mut out = String::new();
    fmt_js_number_into(&mut out, v);
    out
}

/// Appends `String(v)` as JavaScript would print it, with `-0` normalized to `0`.
pub fn fmt_js_number_into(out: &mut String, v: f64) {
    if v.is_nan() {
        out.push_str("NaN");
        return;
    }
    if v.is_infinite() {
        out.push_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }
    if v == 0.0 {
        out.push('0');
        return;
    }
    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(v));
}
