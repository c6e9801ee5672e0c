//! XML Entity Decoding
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode text content, handling entity references
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &[u8]) -> Cow<'_, [u8]> {
    // Fast path: no '&' means no entities
    if memchr(b'&', input).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_entities(input))
}

/// Decode all entity references in the input
///
/// Unknown entities and bare ampersands are kept as-is; a preference
/// document with a stray '&' still yields usable attribute text.
pub fn decode_entities(input: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        if let Some(amp_pos) = memchr(b'&', &input[pos..]) {
            // Copy everything before the entity
            result.extend_from_slice(&input[pos..pos + amp_pos]);
            pos += amp_pos;

            // Find the semicolon
            if let Some(semi_offset) = memchr(b';', &input[pos..]) {
                let entity = &input[pos + 1..pos + semi_offset];

                if let Some(decoded) = decode_entity(entity) {
                    result.extend_from_slice(decoded.as_bytes());
                    pos += semi_offset + 1;
                } else {
                    // Unknown entity, keep as-is
                    result.push(b'&');
                    pos += 1;
                }
            } else {
                // No semicolon found, keep the ampersand
                result.push(b'&');
                pos += 1;
            }
        } else {
            // No more entities, copy the rest
            result.extend_from_slice(&input[pos..]);
            break;
        }
    }

    result
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &[u8]) -> Option<String> {
    if entity.is_empty() {
        return None;
    }

    // Numeric character reference
    if entity[0] == b'#' {
        return decode_numeric_entity(&entity[1..]);
    }

    // Named entity
    match entity {
        b"lt" => Some("<".to_string()),
        b"gt" => Some(">".to_string()),
        b"amp" => Some("&".to_string()),
        b"quot" => Some("\"".to_string()),
        b"apos" => Some("'".to_string()),
        _ => None,
    }
}

/// Decode a numeric character reference (decimal or hex, without '#')
fn decode_numeric_entity(entity: &[u8]) -> Option<String> {
    if entity.is_empty() {
        return None;
    }

    let code = if entity[0] == b'x' || entity[0] == b'X' {
        let hex = std::str::from_utf8(&entity[1..]).ok()?;
        u32::from_str_radix(hex, 16).ok()?
    } else {
        let dec = std::str::from_utf8(entity).ok()?;
        dec.parse::<u32>().ok()?
    };

    char::from_u32(code).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities_is_borrowed() {
        let decoded = decode_text(b"Screen timeout");
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded.as_ref(), b"Screen timeout");
    }

    #[test]
    fn test_builtin_entities() {
        let decoded = decode_text(b"a &lt;b&gt; &amp; c");
        assert_eq!(decoded.as_ref(), b"a <b> & c");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_text(b"&#65;").as_ref(), b"A");
        assert_eq!(decode_text(b"&#x41;").as_ref(), b"A");
    }

    #[test]
    fn test_unknown_entity_kept() {
        let decoded = decode_text(b"&nbsp;x");
        assert_eq!(decoded.as_ref(), b"&nbsp;x");
    }

    #[test]
    fn test_bare_ampersand_kept() {
        let decoded = decode_text(b"wifi & bluetooth");
        assert_eq!(decoded.as_ref(), b"wifi & bluetooth");
    }
}
