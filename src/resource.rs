//! Resource Providers
//!
//! Preference documents are identified by resource name and resolved by a
//! provider. The provider is also where `@string/` and `@array/` references
//! inside attribute values get resolved.
//!
//! Opening a document is the one fallible operation of the crate: a missing
//! or unreadable resource surfaces as a `ResourceError` instead of
//! degrading to an absent value.

use log::debug;
use lru::LruCache;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Failure to open a preference document
#[derive(Debug)]
pub enum ResourceError {
    /// No resource registered or on disk under this name
    NotFound(String),
    /// The resource exists but could not be read
    Io { name: String, source: io::Error },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(name) => write!(f, "resource not found: {name}"),
            ResourceError::Io { name, source } => {
                write!(f, "failed to read resource {name}: {source}")
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::NotFound(_) => None,
            ResourceError::Io { source, .. } => Some(source),
        }
    }
}

/// Host resource lookup
///
/// The three services the metadata layer needs from its host: raw XML
/// documents by name, plus string and string-array resolution for reference
/// attribute values.
pub trait Resources {
    /// Open the raw bytes of a preference document
    fn open_xml(&self, name: &str) -> Result<Arc<[u8]>, ResourceError>;

    /// Resolve a string resource by name
    fn string(&self, name: &str) -> Option<String>;

    /// Resolve a string-array resource by name
    fn string_array(&self, name: &str) -> Option<Vec<String>>;
}

/// In-memory resource provider
///
/// Built once from registered documents and string tables; the provider of
/// choice for tests and for callers that embed their resources.
#[derive(Default)]
pub struct StaticResources {
    xml: HashMap<String, Arc<[u8]>>,
    strings: HashMap<String, String>,
    arrays: HashMap<String, Vec<String>>,
}

impl StaticResources {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preference document under a resource name
    pub fn with_xml(mut self, name: &str, document: &[u8]) -> Self {
        self.xml.insert(name.to_string(), Arc::from(document));
        self
    }

    /// Register a string resource
    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.strings.insert(name.to_string(), value.to_string());
        self
    }

    /// Register a string-array resource
    pub fn with_string_array(mut self, name: &str, values: &[&str]) -> Self {
        self.arrays
            .insert(name.to_string(), values.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl Resources for StaticResources {
    fn open_xml(&self, name: &str) -> Result<Arc<[u8]>, ResourceError> {
        self.xml
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    fn string(&self, name: &str) -> Option<String> {
        self.strings.get(name).cloned()
    }

    fn string_array(&self, name: &str) -> Option<Vec<String>> {
        self.arrays.get(name).cloned()
    }
}

const DEFAULT_CACHE_CAP: NonZeroUsize = NonZeroUsize::new(16).unwrap();

/// Directory-backed resource provider
///
/// Loads `<root>/<name>.xml` on demand and keeps recently opened documents
/// in an LRU cache, so repeated metadata sweeps over the same screens do
/// not re-read the disk. String tables are registered up front.
pub struct FileResources {
    root: PathBuf,
    strings: HashMap<String, String>,
    arrays: HashMap<String, Vec<String>>,
    cache: Mutex<LruCache<String, Arc<[u8]>>>,
}

impl FileResources {
    /// Create a provider rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_cache_capacity(root, DEFAULT_CACHE_CAP)
    }

    /// Create a provider with an explicit document-cache capacity
    pub fn with_cache_capacity(root: impl Into<PathBuf>, capacity: NonZeroUsize) -> Self {
        FileResources {
            root: root.into(),
            strings: HashMap::new(),
            arrays: HashMap::new(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Register a string resource
    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.strings.insert(name.to_string(), value.to_string());
        self
    }

    /// Register a string-array resource
    pub fn with_string_array(mut self, name: &str, values: &[&str]) -> Self {
        self.arrays
            .insert(name.to_string(), values.iter().map(|s| s.to_string()).collect());
        self
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(Path::new(name).with_extension("xml"))
    }
}

impl Resources for FileResources {
    fn open_xml(&self, name: &str) -> Result<Arc<[u8]>, ResourceError> {
        // A poisoned lock still guards valid cache entries
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(bytes) = cache.get(name) {
            return Ok(bytes.clone());
        }

        let path = self.document_path(name);
        let bytes: Arc<[u8]> = match fs::read(&path) {
            Ok(data) => Arc::from(data.as_slice()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ResourceError::NotFound(name.to_string()));
            }
            Err(e) => {
                return Err(ResourceError::Io {
                    name: name.to_string(),
                    source: e,
                });
            }
        };

        debug!("loaded preference document {} ({} bytes)", name, bytes.len());
        cache.put(name.to_string(), bytes.clone());
        Ok(bytes)
    }

    fn string(&self, name: &str) -> Option<String> {
        self.strings.get(name).cloned()
    }

    fn string_array(&self, name: &str) -> Option<Vec<String>> {
        self.arrays.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_open_xml() {
        let res = StaticResources::new().with_xml("display_settings", b"<PreferenceScreen/>");
        let bytes = res.open_xml("display_settings").unwrap();
        assert_eq!(bytes.as_ref(), b"<PreferenceScreen/>");
    }

    #[test]
    fn test_static_missing_xml_is_error() {
        let res = StaticResources::new();
        let err = res.open_xml("nope").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(name) if name == "nope"));
    }

    #[test]
    fn test_static_strings() {
        let res = StaticResources::new()
            .with_string("screen_timeout", "Screen timeout")
            .with_string_array("install_location_entries", &["Internal", "SD card"]);

        assert_eq!(res.string("screen_timeout").as_deref(), Some("Screen timeout"));
        assert_eq!(res.string("missing"), None);
        assert_eq!(
            res.string_array("install_location_entries"),
            Some(vec!["Internal".to_string(), "SD card".to_string()])
        );
    }

    #[test]
    fn test_file_resources() {
        let dir = std::env::temp_dir().join(format!("prefxml-res-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("about_legal.xml"), b"<PreferenceScreen/>").unwrap();

        let res = FileResources::new(&dir);
        let bytes = res.open_xml("about_legal").unwrap();
        assert_eq!(bytes.as_ref(), b"<PreferenceScreen/>");

        // Second open is served from the cache even if the file disappears
        fs::remove_file(dir.join("about_legal.xml")).unwrap();
        assert!(res.open_xml("about_legal").is_ok());

        assert!(matches!(
            res.open_xml("display_settings"),
            Err(ResourceError::NotFound(_))
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
