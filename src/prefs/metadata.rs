//! Search index metadata

/// Per-entry metadata for the settings search index
///
/// One record per preference element that declares both a key and a
/// controller class name. Immutable once created; collections of records
/// preserve document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// The preference key identifying the entry
    pub key: String,
    /// Class name of the controller backing the entry
    pub controller: String,
}

impl MetadataRecord {
    /// Create a new record
    pub fn new(key: impl Into<String>, controller: impl Into<String>) -> Self {
        MetadataRecord {
            key: key.into(),
            controller: controller.into(),
        }
    }
}
