//! Preference Document Parsing
//!
//! Single-pass scans over preference-screen XML. Two tiers of leniency:
//! attribute lookups answer with None for anything absent or malformed,
//! while failing to open a document at all propagates as a ResourceError.
//!
//! Element names are compared by value equality on the full tag name;
//! attribute names match by local name so the namespace prefix a document
//! happens to use does not leak into the fixed attribute set.

use super::metadata::MetadataRecord;
use crate::reader::events::{StartElement, XmlEvent};
use crate::reader::slice::SliceReader;
use crate::resource::{ResourceError, Resources};
use log::warn;
use rayon::prelude::*;

/// Title attribute, may hold a `@string/` reference
pub const ATTR_TITLE: &str = "title";
/// Preference key attribute, always a literal
pub const ATTR_KEY: &str = "key";
/// Summary attribute, may hold a `@string/` reference
pub const ATTR_SUMMARY: &str = "summary";
/// Checked-state summary of two-state preferences
pub const ATTR_SUMMARY_ON: &str = "summaryOn";
/// Unchecked-state summary of two-state preferences
pub const ATTR_SUMMARY_OFF: &str = "summaryOff";
/// Entry list of list preferences, may hold an `@array/` reference
pub const ATTR_ENTRIES: &str = "entries";
/// Search keywords attribute, may hold a `@string/` reference
pub const ATTR_KEYWORDS: &str = "keywords";
/// Controller class name attribute, always a literal
pub const ATTR_CONTROLLER: &str = "controller";

/// Separator used when flattening entry arrays into one string
const ENTRIES_SEPARATOR: &str = "|";

/// Advance the reader to the next element with the given tag name
///
/// Scans forward from the reader's current position; both `<Tag ...>` and
/// `<Tag .../>` forms match. Returns None once the document is exhausted.
/// The reader is left positioned past the match, so attributes must be
/// read off the returned element before scanning further.
pub fn find_element<'a>(reader: &mut SliceReader<'a>, tag: &str) -> Option<StartElement<'a>> {
    for event in reader {
        if let XmlEvent::StartElement(element) | XmlEvent::EmptyElement(element) = event {
            if element.name_str() == Some(tag) {
                return Some(element);
            }
        }
    }
    None
}

/// Read one attribute off the next element with the given tag name
///
/// The attribute is matched by local name. Absent element, absent
/// attribute, and malformed documents all answer None; this lookup never
/// fails.
pub fn find_named_attribute(
    reader: &mut SliceReader<'_>,
    tag: &str,
    attribute: &str,
) -> Option<String> {
    let element = find_element(reader, tag)?;
    element.attr(attribute).map(str::to_string)
}

/// Resolve an attribute value that may be a `@string/` reference
///
/// Literal values pass through verbatim. A reference that the provider
/// cannot resolve yields None, keeping the attribute tier lenient.
fn resolve_string<R: Resources>(resources: &R, raw: &str) -> Option<String> {
    match raw.strip_prefix("@string/") {
        Some(name) => {
            let resolved = resources.string(name);
            if resolved.is_none() {
                warn!("unresolvable string reference @string/{name}");
            }
            resolved
        }
        None => Some(raw.to_string()),
    }
}

/// Display title of a preference element
pub fn data_title<R: Resources>(resources: &R, element: &StartElement<'_>) -> Option<String> {
    element
        .attr(ATTR_TITLE)
        .and_then(|raw| resolve_string(resources, raw))
}

/// Preference key of an element (literal, never a reference)
pub fn data_key(element: &StartElement<'_>) -> Option<String> {
    element.attr(ATTR_KEY).map(str::to_string)
}

/// Summary text of a preference element
pub fn data_summary<R: Resources>(resources: &R, element: &StartElement<'_>) -> Option<String> {
    element
        .attr(ATTR_SUMMARY)
        .and_then(|raw| resolve_string(resources, raw))
}

/// Checked-state summary of a two-state preference
pub fn data_summary_on<R: Resources>(resources: &R, element: &StartElement<'_>) -> Option<String> {
    element
        .attr(ATTR_SUMMARY_ON)
        .and_then(|raw| resolve_string(resources, raw))
}

/// Unchecked-state summary of a two-state preference
pub fn data_summary_off<R: Resources>(resources: &R, element: &StartElement<'_>) -> Option<String> {
    element
        .attr(ATTR_SUMMARY_OFF)
        .and_then(|raw| resolve_string(resources, raw))
}

/// Search keywords of a preference element
pub fn data_keywords<R: Resources>(resources: &R, element: &StartElement<'_>) -> Option<String> {
    element
        .attr(ATTR_KEYWORDS)
        .and_then(|raw| resolve_string(resources, raw))
}

/// Entry list of a list preference, flattened to one searchable string
///
/// An `@array/` reference resolves through the provider and joins the
/// entries with '|'; a literal value passes through verbatim.
pub fn data_entries<R: Resources>(resources: &R, element: &StartElement<'_>) -> Option<String> {
    let raw = element.attr(ATTR_ENTRIES)?;
    match raw.strip_prefix("@array/") {
        Some(name) => {
            let entries = resources.string_array(name);
            if entries.is_none() {
                warn!("unresolvable array reference @array/{name}");
            }
            entries.map(|values| values.join(ENTRIES_SEPARATOR))
        }
        None => Some(raw.to_string()),
    }
}

/// Controller class name of a preference element (literal)
pub fn data_controller(element: &StartElement<'_>) -> Option<String> {
    element.attr(ATTR_CONTROLLER).map(str::to_string)
}

/// Collect (key, controller) records from one preference document
///
/// Walks every start tag in document order; an element contributes a
/// record only when it declares both attributes. Opening the document is
/// the only failure; the scan itself cannot fail.
pub fn extract_metadata<R: Resources>(
    resources: &R,
    xml_name: &str,
) -> Result<Vec<MetadataRecord>, ResourceError> {
    let document = resources.open_xml(xml_name)?;
    Ok(collect_metadata(&document))
}

/// Collect (key, controller) records from every named document
///
/// The per-document scans run in parallel; results keep input order, with
/// each document's records in document order. The first open failure wins.
pub fn extract_metadata_all<R>(
    resources: &R,
    xml_names: &[&str],
) -> Result<Vec<MetadataRecord>, ResourceError>
where
    R: Resources + Sync,
{
    let per_document: Result<Vec<Vec<MetadataRecord>>, ResourceError> = xml_names
        .par_iter()
        .map(|name| extract_metadata(resources, name))
        .collect();

    Ok(per_document?.into_iter().flatten().collect())
}

/// Single pass over a document's start tags
fn collect_metadata(document: &[u8]) -> Vec<MetadataRecord> {
    let reader = SliceReader::new(document);
    let mut records = Vec::new();

    for event in reader {
        if let XmlEvent::StartElement(element) | XmlEvent::EmptyElement(element) = event {
            if let (Some(key), Some(controller)) =
                (element.attr(ATTR_KEY), element.attr(ATTR_CONTROLLER))
            {
                records.push(MetadataRecord::new(key, controller));
            }
        }
    }

    records
}
