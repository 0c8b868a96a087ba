//! Character reference decoding for text and attribute values.

use std::borrow::Cow;

/// Named references that show up in generated pages. Anything else is kept
/// verbatim.
const NAMED: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("copy", "\u{a9}"),
    ("reg", "\u{ae}"),
    ("trade", "\u{2122}"),
    ("hellip", "\u{2026}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("laquo", "\u{ab}"),
    ("raquo", "\u{bb}"),
    ("middot", "\u{b7}"),
    ("bull", "\u{2022}"),
    ("times", "\u{d7}"),
    ("rarr", "\u{2192}"),
    ("larr", "\u{2190}"),
];

/// Decode `&name;`, `&#NNN;` and `&#xHH;` references in `input`.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_one(tail) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode a single reference at the start of `s` (which begins with `&`).
/// Returns the replacement text and the number of bytes consumed.
fn decode_one(s: &str) -> Option<(String, usize)> {
    let end = s[1..].find(|c: char| c == ';' || c == '&' || c.is_whitespace() || c == '<')?;
    let body = &s[1..1 + end];
    let has_semicolon = s[1 + end..].starts_with(';');
    let consumed = 1 + end + usize::from(has_semicolon);

    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        let ch = char::from_u32(code).unwrap_or('\u{fffd}');
        return Some((ch.to_string(), consumed));
    }

    if !has_semicolon {
        return None;
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, value)| (value.to_string(), consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(decode_entities("no refs"), Cow::Borrowed(_)));
    }

    #[test]
    fn named_and_numeric() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&#39;quoted&#x27;"), "'quoted'");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
    }

    #[test]
    fn unknown_and_bare_ampersands_are_kept() {
        assert_eq!(decode_entities("R&D"), "R&D");
        assert_eq!(decode_entities("&bogus; & more"), "&bogus; & more");
        assert_eq!(decode_entities("?a=1&b=2"), "?a=1&b=2");
    }
}
