//! Client library version resolution.
//!
//! The linked library's version decides which bind/define entry points, length
//! widths and LOB calls the rest of a binding must use. Resolution happens once,
//! producing a [`Capabilities`] value that callers pass around instead of
//! naming native symbols directly.

mod capabilities;
mod config;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use capabilities::{
    ActualLength, BindAbi, Capabilities, EntryPoints, LengthWidth, LobAbi, LobEntryPoints,
    LobLength,
};
pub use config::{ResolverOptions, ResolverOptionsBuilder};

use crate::error::OciTransformError;

#[cfg(not(any(
    feature = "oci-9",
    feature = "oci-10",
    feature = "oci-11",
    feature = "oci-12"
)))]
compile_error!(
    "no Oracle client version selected; enable one of the `oci-9`, `oci-10`, `oci-11` or `oci-12` features"
);

/// Major/minor version of the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClientVersion {
    pub major: u8,
    pub minor: u8,
}

impl ClientVersion {
    pub const V10_1: ClientVersion = ClientVersion::new(10, 1);
    pub const V12_1: ClientVersion = ClientVersion::new(12, 1);

    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Two-byte hex form, `(major << 8) | minor`.
    #[must_use]
    pub const fn as_hex(self) -> u16 {
        ((self.major as u16) << 8) | self.minor as u16
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ClientVersion {
    type Err = OciTransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split('.');
        let major = parts.next().unwrap_or_default();
        // "19.3.0.0" style strings carry more than two components; only the
        // first two matter.
        let minor = parts.next().unwrap_or("0");
        let parse = |part: &str| {
            part.parse::<u8>().map_err(|e| {
                OciTransformError::ConfigError(format!("invalid client version {s:?}: {e}"))
            })
        };
        Ok(ClientVersion::new(parse(major)?, parse(minor)?))
    }
}

/// What a probe of the linked library observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VersionMarker {
    /// Major and minor version were published.
    Explicit(ClientVersion),
    /// No version numbers, but the module attribute exists, which first
    /// appeared in 10.1.
    ModuleAttribute,
}

impl VersionMarker {
    #[must_use]
    pub fn version(self) -> ClientVersion {
        match self {
            VersionMarker::Explicit(version) => version,
            VersionMarker::ModuleAttribute => ClientVersion::V10_1,
        }
    }
}

impl From<ClientVersion> for VersionMarker {
    fn from(version: ClientVersion) -> Self {
        VersionMarker::Explicit(version)
    }
}

/// Resolve a capability set from whatever marker was observed.
///
/// # Errors
///
/// Returns `OciTransformError::UnsupportedVersion` when there is no marker.
pub fn resolve(marker: Option<VersionMarker>) -> Result<Capabilities, OciTransformError> {
    let marker = marker.ok_or_else(|| {
        OciTransformError::UnsupportedVersion("no version marker found for OCI".to_string())
    })?;
    let caps = Capabilities::for_version(marker.version());
    tracing::info!(
        version = %caps.version,
        bind = ?caps.bind,
        lob = ?caps.lob,
        "resolved OCI capabilities"
    );
    Ok(caps)
}

/// Version the crate was compiled against, picked by Cargo feature. The
/// highest enabled feature wins.
#[must_use]
pub const fn linked_version() -> ClientVersion {
    if cfg!(feature = "oci-12") {
        ClientVersion::new(12, 1)
    } else if cfg!(feature = "oci-11") {
        ClientVersion::new(11, 2)
    } else if cfg!(feature = "oci-10") {
        ClientVersion::new(10, 1)
    } else {
        ClientVersion::new(9, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_orders_like_the_version() {
        assert_eq!(ClientVersion::new(12, 1).as_hex(), 0x0C01);
        assert!(ClientVersion::new(11, 2) < ClientVersion::V12_1);
        assert!(ClientVersion::new(12, 2) > ClientVersion::V12_1);
        assert!(ClientVersion::new(9, 9) < ClientVersion::V10_1);
    }

    #[test]
    fn parses_dotted_versions() {
        assert_eq!("12.1".parse::<ClientVersion>().unwrap(), ClientVersion::V12_1);
        assert_eq!(
            "19.3.0.0".parse::<ClientVersion>().unwrap(),
            ClientVersion::new(19, 3)
        );
        assert_eq!("11".parse::<ClientVersion>().unwrap(), ClientVersion::new(11, 0));
        assert!("twelve".parse::<ClientVersion>().is_err());
        assert!("".parse::<ClientVersion>().is_err());
    }

    #[test]
    fn module_attribute_implies_10_1() {
        assert_eq!(VersionMarker::ModuleAttribute.version(), ClientVersion::V10_1);
    }

    #[test]
    fn missing_marker_is_unsupported() {
        let err = resolve(None).unwrap_err();
        assert!(matches!(err, OciTransformError::UnsupportedVersion(_)));
    }

    #[test]
    fn default_feature_links_12_1() {
        if cfg!(feature = "oci-12") {
            assert_eq!(linked_version(), ClientVersion::V12_1);
        }
    }
}
