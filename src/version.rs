//! Software Version Preference
//!
//! Controller backing the "software version" entry of the about screen.
//! The summary is a straight read of a build property, with a
//! string-resource default when the device does not set it.

use crate::props::BuildProperties;
use crate::resource::Resources;

/// Build property holding the product version string
pub const PROP_PRODUCT_VERSION: &str = "ro.product.version";

/// String resource shown when the version property is not set
pub const RES_VERSION_DEFAULT: &str = "version_default";

/// Whether a preference entry should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The entry is supported and shown
    Available,
    /// The device cannot support the entry
    UnsupportedOnDevice,
}

/// Per-entry display logic
///
/// A controller owns one preference entry, named by its key, and decides
/// its availability and summary text.
pub trait PreferenceController {
    /// The preference key this controller is bound to
    fn preference_key(&self) -> &str;

    /// Whether the entry is shown at all
    fn availability(&self) -> Availability;

    /// Summary line displayed under the entry title, if any
    fn summary(&self) -> Option<String>;
}

/// Controller for the product version entry
///
/// Always available; the summary is the version property verbatim, or the
/// localized default when unset. The property table is immutable, so
/// repeated summary reads return identical text.
pub struct VersionPreferenceController<'a, R: Resources> {
    properties: &'a BuildProperties,
    resources: &'a R,
    key: String,
}

impl<'a, R: Resources> VersionPreferenceController<'a, R> {
    /// Create a controller bound to the given preference key
    pub fn new(properties: &'a BuildProperties, resources: &'a R, key: impl Into<String>) -> Self {
        VersionPreferenceController {
            properties,
            resources,
            key: key.into(),
        }
    }
}

impl<R: Resources> PreferenceController for VersionPreferenceController<'_, R> {
    fn preference_key(&self) -> &str {
        &self.key
    }

    fn availability(&self) -> Availability {
        Availability::Available
    }

    fn summary(&self) -> Option<String> {
        let default = self
            .resources
            .string(RES_VERSION_DEFAULT)
            .unwrap_or_default();
        Some(self.properties.get_or(PROP_PRODUCT_VERSION, &default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::StaticResources;

    fn resources() -> StaticResources {
        StaticResources::new().with_string(RES_VERSION_DEFAULT, "Unknown")
    }

    #[test]
    fn test_summary_reads_property() {
        let props = BuildProperties::parse("ro.product.version=3.0-rc1");
        let res = resources();
        let controller = VersionPreferenceController::new(&props, &res, "product_version");

        assert_eq!(controller.preference_key(), "product_version");
        assert_eq!(controller.availability(), Availability::Available);
        assert_eq!(controller.summary().as_deref(), Some("3.0-rc1"));
    }

    #[test]
    fn test_summary_falls_back_to_resource_default() {
        let props = BuildProperties::parse("");
        let res = resources();
        let controller = VersionPreferenceController::new(&props, &res, "product_version");

        assert_eq!(controller.summary().as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_summary_is_idempotent() {
        let props = BuildProperties::parse("ro.product.version=3.0-rc1");
        let res = resources();
        let controller = VersionPreferenceController::new(&props, &res, "product_version");

        assert_eq!(controller.summary(), controller.summary());
    }
}
