//! XML Event Types
//!
//! Event types for pull-parser style XML processing. Events borrow from the
//! input slice; attribute lookups return None for anything not declared on
//! the element.

use crate::core::attributes::{split_name, Attribute};
use std::borrow::Cow;

/// XML parsing event
#[derive(Debug, Clone)]
pub enum XmlEvent<'a> {
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement(EndElement<'a>),
    /// Empty element: <name attrs.../>
    EmptyElement(StartElement<'a>),
    /// Text content between tags
    Text(Cow<'a, [u8]>),
    /// CDATA section content
    CData(Cow<'a, [u8]>),
    /// Comment content
    Comment(Cow<'a, [u8]>),
    /// Processing instruction: <?target data?>
    ProcessingInstruction {
        target: Cow<'a, [u8]>,
        data: Option<Cow<'a, [u8]>>,
    },
    /// End of document
    EndDocument,
}

/// Start element event data
#[derive(Debug, Clone)]
pub struct StartElement<'a> {
    /// Full element name (may include prefix)
    pub name: Cow<'a, [u8]>,
    /// Local name (after colon)
    pub local_name: Cow<'a, [u8]>,
    /// Namespace prefix (before colon), if any
    pub prefix: Option<Cow<'a, [u8]>>,
    /// Element attributes
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> StartElement<'a> {
    /// Create a new start element from a byte slice
    pub fn new(name: &'a [u8], attributes: Vec<Attribute<'a>>) -> Self {
        let (prefix, local_name) = split_name(name);
        StartElement {
            name: Cow::Borrowed(name),
            local_name: Cow::Borrowed(local_name),
            prefix: prefix.map(Cow::Borrowed),
            attributes,
        }
    }

    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name.as_ref()).ok()
    }

    /// Get the local name as a string
    pub fn local_name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.local_name.as_ref()).ok()
    }

    /// Get an attribute value by local name
    ///
    /// Preference attributes are namespace-qualified (android:key,
    /// settings:controller); the prefix varies with the document while the
    /// local name does not, so this is the lookup the metadata layer uses.
    /// Case-sensitive; absent attribute yields None.
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name_str() == Some(local_name))
            .and_then(|a| a.value_str())
    }

    /// Get an attribute value by exact (fully qualified) name
    pub fn attr_exact(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name_str() == Some(name))
            .and_then(|a| a.value_str())
    }
}

/// End element event data
#[derive(Debug, Clone)]
pub struct EndElement<'a> {
    /// Full element name
    pub name: Cow<'a, [u8]>,
}

impl<'a> EndElement<'a> {
    /// Create a new end element from a byte slice
    pub fn new(name: &'a [u8]) -> Self {
        EndElement {
            name: Cow::Borrowed(name),
        }
    }

    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name.as_ref()).ok()
    }
}

impl<'a> XmlEvent<'a> {
    /// Check if this is a start element event (empty elements count)
    pub fn is_start_element(&self) -> bool {
        matches!(self, XmlEvent::StartElement(_) | XmlEvent::EmptyElement(_))
    }

    /// Get as start element if applicable
    ///
    /// Empty elements are start elements here: an XML pull parser reports
    /// `<Preference/>` as a start tag followed by an end tag, and most
    /// preference entries are written as empty elements.
    pub fn as_start_element(&self) -> Option<&StartElement<'a>> {
        match self {
            XmlEvent::StartElement(e) | XmlEvent::EmptyElement(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if applicable
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            XmlEvent::Text(t) | XmlEvent::CData(t) => Some(t.as_ref()),
            _ => None,
        }
    }
}
