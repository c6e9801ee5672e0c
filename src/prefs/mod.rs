//! Preference Metadata Extraction
//!
//! Reads the fixed attribute set off preference-screen documents (title,
//! key, summary, summaryOn/Off, entries, keywords, controller) and collects
//! the per-entry (key, controller) records the search indexer consumes.

pub mod metadata;
pub mod parser;

pub use metadata::MetadataRecord;
pub use parser::{extract_metadata, extract_metadata_all, find_element, find_named_attribute};
