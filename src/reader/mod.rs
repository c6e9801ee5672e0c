//! XML Reader Module
//!
//! Pull-style event reading over preference documents:
//! - Events: XML event types for pull parsing
//! - SliceReader: forward-only event iterator over a byte slice

pub mod events;
pub mod slice;

pub use events::{EndElement, StartElement, XmlEvent};
pub use slice::SliceReader;
