//! XML Tokenizer - pull-style token extraction
//!
//! Extracts XML tokens from a byte slice:
//! - Element start/end/empty tags
//! - Text content
//! - CDATA sections
//! - Comments
//! - Processing instructions and the XML declaration
//! - DOCTYPE declarations
//!
//! The tokenizer is lenient by design: markup it cannot make sense of ends
//! the token stream instead of raising an error. Preference documents come
//! from the application's own resources, and a truncated or malformed
//! document must degrade to "attribute not found", not a crash.

use super::scanner::Scanner;
use std::borrow::Cow;

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Initial state before parsing starts
    Init,
    /// Inside text content between tags
    InsideText,
    /// Inside a markup construct (<...>)
    InsideMarkup,
    /// End of input reached
    Done,
}

/// Type of XML token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
    /// End of file
    Eof,
}

/// A parsed XML token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// For tags: the element name, borrowed from the input
    pub name: Option<&'a [u8]>,
    /// For text/cdata: the content (may be owned if entities were decoded)
    pub content: Option<Cow<'a, [u8]>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
        }
    }

    fn with_name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: Cow<'a, [u8]>) -> Self {
        self.content = Some(content);
        self
    }
}

/// Lenient XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Init,
        }
    }

    /// Get the next token, or None if the stream has ended
    ///
    /// The Eof token is emitted exactly once; after that, None.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.state == ParseState::Done {
            return None;
        }

        if self.state == ParseState::Init {
            self.scanner.skip_whitespace();
            self.state = ParseState::InsideText;
        }

        if self.scanner.is_eof() {
            self.state = ParseState::Done;
            let pos = self.scanner.position();
            return Some(Token::new(TokenKind::Eof, (pos, pos)));
        }

        match self.scanner.peek() {
            Some(b'<') => {
                let token = self.parse_markup();
                if token.is_none() {
                    // Malformed markup: the stream ends here for good
                    self.state = ParseState::Done;
                }
                token
            }
            Some(_) => self.parse_text(),
            None => {
                self.state = ParseState::Done;
                let pos = self.scanner.position();
                Some(Token::new(TokenKind::Eof, (pos, pos)))
            }
        }
    }

    /// Parse markup starting with '<'
    fn parse_markup(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        self.scanner.advance(1); // Skip '<'
        self.state = ParseState::InsideMarkup;

        match self.scanner.peek() {
            Some(b'/') => self.parse_end_tag(start),
            Some(b'!') => self.parse_bang_markup(start),
            Some(b'?') => self.parse_pi(start),
            Some(_) => self.parse_start_tag(start),
            None => None,
        }
    }

    /// Parse a start tag or empty element tag
    fn parse_start_tag(&mut self, start: usize) -> Option<Token<'a>> {
        let name = self.scanner.read_name()?;

        // Find the end of the tag, handling quoted attribute values
        let end = self.scanner.find_tag_end_quoted()?;

        let is_empty = end > start && self.scanner.slice(end - 1, end) == b"/";

        self.scanner.set_position(end + 1);
        self.state = ParseState::InsideText;

        let kind = if is_empty {
            TokenKind::EmptyTag
        } else {
            TokenKind::StartTag
        };
        Some(Token::new(kind, (start, end + 1)).with_name(name))
    }

    /// Parse an end tag
    fn parse_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '/'

        let name = self.scanner.read_name()?;
        let end = self.scanner.find_tag_end()?;

        self.scanner.set_position(end + 1);
        self.state = ParseState::InsideText;

        Some(Token::new(TokenKind::EndTag, (start, end + 1)).with_name(name))
    }

    /// Parse markup starting with '!' (comment, CDATA, DOCTYPE)
    fn parse_bang_markup(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '!'

        if self.scanner.starts_with(b"--") {
            self.parse_comment(start)
        } else if self.scanner.starts_with(b"[CDATA[") {
            self.parse_cdata(start)
        } else if self.scanner.starts_with(b"DOCTYPE") {
            self.parse_doctype(start)
        } else {
            None
        }
    }

    /// Parse a comment <!--...-->
    fn parse_comment(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(2); // Skip '--'
        let content_start = self.scanner.position();

        loop {
            let pos = self.scanner.find_byte(b'-')?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with(b"-->") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(3);
                self.state = ParseState::InsideText;
                return Some(
                    Token::new(TokenKind::Comment, (start, self.scanner.position()))
                        .with_content(Cow::Borrowed(content)),
                );
            }
            self.scanner.advance(1);
        }
    }

    /// Parse a CDATA section <![CDATA[...]]>
    fn parse_cdata(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(7); // Skip '[CDATA['
        let content_start = self.scanner.position();

        loop {
            let pos = self.scanner.find_byte(b']')?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with(b"]]>") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(3);
                self.state = ParseState::InsideText;
                return Some(
                    Token::new(TokenKind::CData, (start, self.scanner.position()))
                        .with_content(Cow::Borrowed(content)),
                );
            }
            self.scanner.advance(1);
        }
    }

    /// Parse a DOCTYPE declaration, honoring an internal subset
    fn parse_doctype(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(7); // Skip 'DOCTYPE'

        let mut in_internal_subset = false;
        let mut in_string = false;
        let mut string_char = 0u8;

        while !self.scanner.is_eof() {
            let b = self.scanner.peek()?;

            if in_string {
                if b == string_char {
                    in_string = false;
                }
                self.scanner.advance(1);
                continue;
            }

            match b {
                b'"' | b'\'' => {
                    in_string = true;
                    string_char = b;
                    self.scanner.advance(1);
                }
                b'[' => {
                    in_internal_subset = true;
                    self.scanner.advance(1);
                }
                b']' => {
                    in_internal_subset = false;
                    self.scanner.advance(1);
                }
                b'>' if !in_internal_subset => {
                    self.scanner.advance(1);
                    self.state = ParseState::InsideText;
                    return Some(Token::new(
                        TokenKind::DocType,
                        (start, self.scanner.position()),
                    ));
                }
                _ => self.scanner.advance(1),
            }
        }
        None
    }

    /// Parse a processing instruction or XML declaration
    fn parse_pi(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '?'

        let name = self.scanner.read_name()?;
        let is_xml_decl = name.eq_ignore_ascii_case(b"xml");
        let content_start = self.scanner.position();

        // Find '?>'
        loop {
            let pos = self.scanner.find_byte(b'?')?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with(b"?>") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(2);
                self.state = ParseState::InsideText;
                let kind = if is_xml_decl {
                    TokenKind::XmlDeclaration
                } else {
                    TokenKind::ProcessingInstruction
                };
                return Some(
                    Token::new(kind, (start, self.scanner.position()))
                        .with_name(name)
                        .with_content(Cow::Borrowed(content)),
                );
            }
            self.scanner.advance(1);
        }
    }

    /// Parse text content
    fn parse_text(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        self.state = ParseState::InsideText;

        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(start + self.scanner.remaining().len());

        if end == start {
            return None;
        }

        let content = self.scanner.slice(start, end);
        self.scanner.set_position(end);

        let decoded = super::entities::decode_text(content);
        Some(Token::new(TokenKind::Text, (start, end)).with_content(decoded))
    }
}

/// Iterator adapter for the tokenizer
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token()?;
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &[u8]) -> Vec<TokenKind> {
        Tokenizer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_start_end_tags() {
        let mut tokenizer = Tokenizer::new(b"<PreferenceScreen></PreferenceScreen>");

        let start = tokenizer.next_token().unwrap();
        assert_eq!(start.kind, TokenKind::StartTag);
        assert_eq!(start.name, Some(b"PreferenceScreen" as &[u8]));

        let end = tokenizer.next_token().unwrap();
        assert_eq!(end.kind, TokenKind::EndTag);

        assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Eof);
        assert!(tokenizer.next_token().is_none());
    }

    #[test]
    fn test_empty_tag() {
        let mut tokenizer = Tokenizer::new(b"<Preference android:key=\"k\"/>");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EmptyTag);
        assert_eq!(token.name, Some(b"Preference" as &[u8]));
    }

    #[test]
    fn test_text_decodes_entities() {
        let mut tokenizer = Tokenizer::new(b"<a>x &amp; y</a>");
        tokenizer.next_token();
        let text = tokenizer.next_token().unwrap();
        assert_eq!(text.kind, TokenKind::Text);
        assert_eq!(text.content.as_deref(), Some(b"x & y" as &[u8]));
    }

    #[test]
    fn test_xml_declaration_and_doctype() {
        let kinds = kinds(b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE prefs>\n<prefs/>");
        assert_eq!(
            kinds,
            vec![
                TokenKind::XmlDeclaration,
                TokenKind::Text,
                TokenKind::DocType,
                TokenKind::Text,
                TokenKind::EmptyTag,
            ]
        );
    }

    #[test]
    fn test_comment_and_cdata() {
        let kinds = kinds(b"<a><!-- note --><![CDATA[raw <>]]></a>");
        assert_eq!(
            kinds,
            vec![
                TokenKind::StartTag,
                TokenKind::Comment,
                TokenKind::CData,
                TokenKind::EndTag,
            ]
        );
    }

    #[test]
    fn test_malformed_markup_ends_stream() {
        // Unterminated tag: stream ends without panicking
        let mut tokenizer = Tokenizer::new(b"<Preference android:key=\"k\"");
        assert!(tokenizer.next_token().is_none());
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        let mut tokenizer = Tokenizer::new(b"<a title=\"1 > 0\">t</a>");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::StartTag);
        assert_eq!(token.name, Some(b"a" as &[u8]));
    }
}
