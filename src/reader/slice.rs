//! Forward-Only Slice Reader
//!
//! Parses XML from a byte slice with zero-copy semantics and yields events
//! through a forward-only iterator. The iterator is finite and not
//! restartable: a second pass over a document needs a new reader.
//!
//! Leniency is structural here. A malformed document simply ends the event
//! stream, so every downstream lookup degrades to None instead of an error.

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::{parse_attributes, Attribute};
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};

/// Zero-copy XML reader over a byte slice
pub struct SliceReader<'a> {
    input: &'a [u8],
    tokenizer: Tokenizer<'a>,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            input,
            tokenizer: Tokenizer::new(input),
        }
    }

    /// Get the next XML event
    ///
    /// XML declarations and DOCTYPE tokens are consumed silently; no
    /// preference-document consumer needs them.
    pub fn next_event(&mut self) -> Option<XmlEvent<'a>> {
        loop {
            let token = self.tokenizer.next_token()?;

            match token.kind {
                TokenKind::Eof => return Some(XmlEvent::EndDocument),

                TokenKind::StartTag => {
                    let attrs = self.parse_tag_attributes(&token);
                    let name = token.name?;
                    return Some(XmlEvent::StartElement(StartElement::new(name, attrs)));
                }

                TokenKind::EmptyTag => {
                    let attrs = self.parse_tag_attributes(&token);
                    let name = token.name?;
                    return Some(XmlEvent::EmptyElement(StartElement::new(name, attrs)));
                }

                TokenKind::EndTag => {
                    let name = token.name?;
                    return Some(XmlEvent::EndElement(EndElement::new(name)));
                }

                TokenKind::Text => {
                    if let Some(content) = token.content {
                        if !content.is_empty() {
                            return Some(XmlEvent::Text(content));
                        }
                    }
                }

                TokenKind::CData => {
                    if let Some(content) = token.content {
                        return Some(XmlEvent::CData(content));
                    }
                }

                TokenKind::Comment => {
                    if let Some(content) = token.content {
                        return Some(XmlEvent::Comment(content));
                    }
                }

                TokenKind::ProcessingInstruction => {
                    if let Some(name) = token.name {
                        return Some(XmlEvent::ProcessingInstruction {
                            target: std::borrow::Cow::Borrowed(name),
                            data: token.content,
                        });
                    }
                }

                // Skipped: nothing downstream consumes these
                TokenKind::XmlDeclaration | TokenKind::DocType => {}
            }
        }
    }

    /// Parse attributes from a tag token's raw span
    fn parse_tag_attributes(&self, token: &Token<'a>) -> Vec<Attribute<'a>> {
        let (start, end) = token.span;
        let tag_content = &self.input[start..end];

        // Skip '<' and the tag name
        let mut pos = 1;
        while pos < tag_content.len() {
            let b = tag_content[pos];
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'>' || b == b'/' {
                break;
            }
            pos += 1;
        }

        // Trim the closing '>' or '/>'
        let mut attr_end = tag_content.len();
        if tag_content.ends_with(b"/>") {
            attr_end -= 2;
        } else if tag_content.ends_with(b">") {
            attr_end -= 1;
        }

        if pos >= attr_end {
            return Vec::new();
        }

        parse_attributes(&tag_content[pos..attr_end])
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = XmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.next_event()?;
        if matches!(event, XmlEvent::EndDocument) {
            None
        } else {
            Some(event)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element() {
        let events: Vec<_> = SliceReader::new(b"<root>hello</root>").collect();
        assert_eq!(events.len(), 3);

        assert!(matches!(&events[0], XmlEvent::StartElement(e) if e.name_str() == Some("root")));
        assert!(matches!(&events[1], XmlEvent::Text(t) if t.as_ref() == b"hello"));
        assert!(matches!(&events[2], XmlEvent::EndElement(e) if e.name_str() == Some("root")));
    }

    #[test]
    fn test_empty_element() {
        let events: Vec<_> = SliceReader::new(b"<Preference/>").collect();
        assert_eq!(events.len(), 1);
        assert!(
            matches!(&events[0], XmlEvent::EmptyElement(e) if e.name_str() == Some("Preference"))
        );
    }

    #[test]
    fn test_namespaced_attributes() {
        let doc = b"<CheckBoxPreference android:key=\"toggle\" android:summaryOn=\"On\"/>";
        let events: Vec<_> = SliceReader::new(doc).collect();
        assert_eq!(events.len(), 1);

        let elem = events[0].as_start_element().expect("start element");
        assert_eq!(elem.attr("key"), Some("toggle"));
        assert_eq!(elem.attr("summaryOn"), Some("On"));
        assert_eq!(elem.attr("summaryOff"), None);
    }

    #[test]
    fn test_declaration_is_skipped() {
        let doc = b"<?xml version=\"1.0\" encoding=\"utf-8\"?><PreferenceScreen/>";
        let events: Vec<_> = SliceReader::new(doc).collect();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_start_element());
    }

    #[test]
    fn test_nested_document_order() {
        let doc = b"<PreferenceScreen><Preference/><ListPreference/></PreferenceScreen>";
        let names: Vec<_> = SliceReader::new(doc)
            .filter_map(|e| e.as_start_element().and_then(|s| s.name_str().map(String::from)))
            .collect();
        assert_eq!(names, vec!["PreferenceScreen", "Preference", "ListPreference"]);
    }

    #[test]
    fn test_malformed_document_ends_iteration() {
        let events: Vec<_> = SliceReader::new(b"<PreferenceScreen><Pref").collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_not_restartable() {
        let mut reader = SliceReader::new(b"<a/>");
        assert!(reader.next().is_some());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }
}
