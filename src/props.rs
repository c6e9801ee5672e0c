//! Build Property Table
//!
//! Read-only access to the device build properties (build.prop syntax:
//! `key=value` lines, `#` comments). The table is parsed once and immutable
//! afterwards, so repeated reads of the same property always return the
//! same value.
//!
//! The live property service is out of scope; summaries that surface a
//! property only ever need the snapshot taken at construction.

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Parsed build properties
#[derive(Debug, Default, Clone)]
pub struct BuildProperties {
    values: HashMap<String, String>,
}

impl BuildProperties {
    /// Parse a property table from build.prop text
    ///
    /// Malformed lines (no '=') are skipped. Keys and values are trimmed;
    /// the value is everything after the first '='.
    pub fn parse(input: &str) -> Self {
        let mut values = HashMap::new();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        BuildProperties { values }
    }

    /// Load a property table from a file
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Read a property
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Read a property, returning the default when it is not set
    ///
    /// The value is returned verbatim; no interpretation happens here.
    pub fn get_or(&self, name: &str, default: &str) -> String {
        match self.get(name) {
            Some(value) => value.to_string(),
            None => {
                debug!("property {} not set, using default", name);
                default.to_string()
            }
        }
    }

    /// Number of properties in the table
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILD_PROP: &str = "\
# begin build properties
ro.product.version=2.1-20260807
ro.product.model = Pixel Test
persist.sys.timezone=Europe/Amsterdam

# malformed lines are skipped
not a property
";

    #[test]
    fn test_parse_and_get() {
        let props = BuildProperties::parse(BUILD_PROP);
        assert_eq!(props.len(), 3);
        assert_eq!(props.get("ro.product.version"), Some("2.1-20260807"));
        assert_eq!(props.get("ro.product.model"), Some("Pixel Test"));
        assert_eq!(props.get("ro.missing"), None);
    }

    #[test]
    fn test_get_or_default() {
        let props = BuildProperties::parse(BUILD_PROP);
        assert_eq!(props.get_or("ro.product.version", "unknown"), "2.1-20260807");
        assert_eq!(props.get_or("ro.missing", "unknown"), "unknown");
    }

    #[test]
    fn test_repeated_reads_identical() {
        let props = BuildProperties::parse(BUILD_PROP);
        let first = props.get_or("ro.product.version", "unknown");
        let second = props.get_or("ro.product.version", "unknown");
        assert_eq!(first, second);
    }

    #[test]
    fn test_value_with_equals_sign() {
        let props = BuildProperties::parse("ro.boot.cmdline=a=b c=d");
        assert_eq!(props.get("ro.boot.cmdline"), Some("a=b c=d"));
    }

    #[test]
    fn test_empty_input() {
        let props = BuildProperties::parse("");
        assert!(props.is_empty());
    }
}
