//! prefxml - Preference-screen XML parsing and search metadata extraction
//!
//! Layers:
//! - core: lenient XML primitives (scanner, tokenizer, entities, attributes)
//! - reader: forward-only pull events over a document slice
//! - prefs: the fixed preference attribute set and (key, controller)
//!   metadata records for the search index
//! - resource: document and string-table providers
//! - props/version: build property table and the version summary controller
//!
//! The error policy has two tiers. Everything at or below an attribute
//! lookup answers `Option` - a missing attribute, a missing element, or a
//! malformed document all read as "absent". Only opening a document
//! surfaces a `ResourceError`.
//!
//! ```
//! use prefxml::{extract_metadata, StaticResources};
//!
//! let res = StaticResources::new().with_xml(
//!     "location_settings",
//!     br#"<Preference android:key="mode" settings:controller="ModeController"/>"#,
//! );
//!
//! let records = extract_metadata(&res, "location_settings").unwrap();
//! assert_eq!(records[0].key, "mode");
//! assert_eq!(records[0].controller, "ModeController");
//! ```

mod core;
mod prefs;
mod props;
mod reader;
mod resource;
mod version;

pub use crate::core::attributes::Attribute;
pub use prefs::metadata::MetadataRecord;
pub use prefs::parser::{
    data_controller, data_entries, data_key, data_keywords, data_summary, data_summary_off,
    data_summary_on, data_title, extract_metadata, extract_metadata_all, find_element,
    find_named_attribute,
};
pub use prefs::parser::{
    ATTR_CONTROLLER, ATTR_ENTRIES, ATTR_KEY, ATTR_KEYWORDS, ATTR_SUMMARY, ATTR_SUMMARY_OFF,
    ATTR_SUMMARY_ON, ATTR_TITLE,
};
pub use props::BuildProperties;
pub use reader::events::{EndElement, StartElement, XmlEvent};
pub use reader::slice::SliceReader;
pub use resource::{FileResources, ResourceError, Resources, StaticResources};
pub use version::{Availability, PreferenceController, VersionPreferenceController};

#[cfg(test)]
mod tests {
    use super::*;

    /// End-to-end: open, locate, read, resolve - the indexing path
    #[test]
    fn test_search_indexing_path() {
        let res = StaticResources::new()
            .with_xml(
                "sound_settings",
                br#"<PreferenceScreen xmlns:android="http://schemas.android.com/apk/res/android"
                                      xmlns:settings="http://schemas.android.com/apk/res-auto">
                    <Preference
                        android:key="phone_ringtone"
                        android:title="@string/ringtone_title"
                        settings:controller="RingtoneController" />
                </PreferenceScreen>"#,
            )
            .with_string("ringtone_title", "Phone ringtone");

        let doc = res.open_xml("sound_settings").unwrap();
        let mut reader = SliceReader::new(&doc);
        let element = find_element(&mut reader, "Preference").unwrap();
        assert_eq!(data_title(&res, &element).as_deref(), Some("Phone ringtone"));

        let records = extract_metadata(&res, "sound_settings").unwrap();
        assert_eq!(records, vec![MetadataRecord::new("phone_ringtone", "RingtoneController")]);
    }
}
