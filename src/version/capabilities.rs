use serde::Serialize;

use super::{ClientVersion, VersionMarker, linked_version};
use crate::error::OciTransformError;
use crate::native::NativeEnvironment;

/// Integer width of a length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LengthWidth {
    U16,
    U32,
    U64,
    I32,
    I64,
}

impl LengthWidth {
    /// Largest length the width can carry.
    #[must_use]
    pub fn max(self) -> u64 {
        match self {
            LengthWidth::U16 => u64::from(u16::MAX),
            LengthWidth::U32 => u64::from(u32::MAX),
            LengthWidth::U64 => u64::MAX,
            LengthWidth::I32 => i32::MAX as u64,
            LengthWidth::I64 => i64::MAX as u64,
        }
    }
}

/// Bind and define entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryPoints {
    pub bind_by_name: &'static str,
    pub bind_by_pos: &'static str,
    pub define_by_pos: &'static str,
}

/// LOB entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LobEntryPoints {
    pub get_length: &'static str,
    pub trim: &'static str,
    pub write: &'static str,
}

/// Bind/define generation: the 12.1 client widened lengths and added the
/// `...2` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BindAbi {
    Legacy,
    Modern,
}

impl BindAbi {
    #[must_use]
    pub fn for_version(version: ClientVersion) -> Self {
        if version >= ClientVersion::V12_1 {
            BindAbi::Modern
        } else {
            BindAbi::Legacy
        }
    }

    #[must_use]
    pub fn entry_points(self) -> EntryPoints {
        match self {
            BindAbi::Modern => EntryPoints {
                bind_by_name: "OCIBindByName2",
                bind_by_pos: "OCIBindByPos2",
                define_by_pos: "OCIDefineByPos2",
            },
            BindAbi::Legacy => EntryPoints {
                bind_by_name: "OCIBindByName",
                bind_by_pos: "OCIBindByPos",
                define_by_pos: "OCIDefineByPos",
            },
        }
    }

    /// Width of the "actual length" array filled in by bind/define.
    #[must_use]
    pub fn actual_length_width(self) -> LengthWidth {
        match self {
            BindAbi::Modern => LengthWidth::U32,
            BindAbi::Legacy => LengthWidth::U16,
        }
    }

    #[must_use]
    pub fn max_binary_bytes(self) -> u32 {
        match self {
            BindAbi::Modern => 32767,
            BindAbi::Legacy => 4000,
        }
    }

    /// Width of the generic `value_sz` length.
    #[must_use]
    pub fn length_width(self) -> LengthWidth {
        match self {
            BindAbi::Modern => LengthWidth::I64,
            BindAbi::Legacy => LengthWidth::I32,
        }
    }
}

/// LOB generation: 10.1 introduced 64-bit LOB lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LobAbi {
    Legacy,
    V2,
}

impl LobAbi {
    #[must_use]
    pub fn for_version(version: ClientVersion) -> Self {
        if version >= ClientVersion::V10_1 {
            LobAbi::V2
        } else {
            LobAbi::Legacy
        }
    }

    #[must_use]
    pub fn entry_points(self) -> LobEntryPoints {
        match self {
            LobAbi::V2 => LobEntryPoints {
                get_length: "OCILobGetLength2",
                trim: "OCILobTrim2",
                write: "OCILobWrite2",
            },
            LobAbi::Legacy => LobEntryPoints {
                get_length: "OCILobGetLength",
                trim: "OCILobTrim",
                write: "OCILobWrite",
            },
        }
    }

    #[must_use]
    pub fn length_width(self) -> LengthWidth {
        match self {
            LobAbi::V2 => LengthWidth::U64,
            LobAbi::Legacy => LengthWidth::U32,
        }
    }
}

/// An actual-length value in the width the bind ABI expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualLength {
    U16(u16),
    U32(u32),
}

/// A LOB length in the width the LOB ABI expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobLength {
    U32(u32),
    U64(u64),
}

/// Everything the rest of a binding needs to know about the linked library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub version: ClientVersion,
    pub bind: BindAbi,
    pub lob: LobAbi,
}

impl Capabilities {
    #[must_use]
    pub fn for_version(version: ClientVersion) -> Self {
        Self {
            version,
            bind: BindAbi::for_version(version),
            lob: LobAbi::for_version(version),
        }
    }

    /// The configuration selected at compile time.
    #[must_use]
    pub fn linked() -> Self {
        Self::for_version(linked_version())
    }

    /// Ask the environment which library it is talking to.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::UnsupportedVersion` if the environment shows
    /// no version marker.
    pub fn probe<E>(env: &E) -> Result<Self, OciTransformError>
    where
        E: NativeEnvironment + ?Sized,
    {
        super::resolve(env.client_version())
    }

    /// Resolve from an explicit marker.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::UnsupportedVersion` when `marker` is `None`.
    pub fn from_marker(marker: Option<VersionMarker>) -> Result<Self, OciTransformError> {
        super::resolve(marker)
    }

    #[must_use]
    pub fn entry_points(&self) -> EntryPoints {
        self.bind.entry_points()
    }

    #[must_use]
    pub fn lob_entry_points(&self) -> LobEntryPoints {
        self.lob.entry_points()
    }

    #[must_use]
    pub fn max_binary_bytes(&self) -> u32 {
        self.bind.max_binary_bytes()
    }

    /// Narrow `len` to the actual-length width.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::ParameterError` if `len` does not fit.
    pub fn actual_length(&self, len: usize) -> Result<ActualLength, OciTransformError> {
        let overflow = || {
            OciTransformError::ParameterError(format!(
                "length {len} does not fit the {:?} actual-length field of OCI {}",
                self.bind.actual_length_width(),
                self.version
            ))
        };
        match self.bind.actual_length_width() {
            LengthWidth::U16 => u16::try_from(len)
                .map(ActualLength::U16)
                .map_err(|_| overflow()),
            _ => u32::try_from(len)
                .map(ActualLength::U32)
                .map_err(|_| overflow()),
        }
    }

    /// Narrow `len` to the LOB length width.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::ParameterError` if `len` does not fit.
    pub fn lob_length(&self, len: u64) -> Result<LobLength, OciTransformError> {
        match self.lob.length_width() {
            LengthWidth::U32 => u32::try_from(len).map(LobLength::U32).map_err(|_| {
                OciTransformError::ParameterError(format!(
                    "LOB length {len} needs 64-bit LOB calls, OCI {} has 32-bit only",
                    self.version
                ))
            }),
            _ => Ok(LobLength::U64(len)),
        }
    }

    /// Reject binary payloads that cannot be bound inline.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::ParameterError` if `len` exceeds
    /// [`Capabilities::max_binary_bytes`].
    pub fn check_inline_binary(&self, len: usize) -> Result<(), OciTransformError> {
        let max = self.max_binary_bytes();
        if u64::try_from(len).unwrap_or(u64::MAX) > u64::from(max) {
            return Err(OciTransformError::ParameterError(format!(
                "binary value of {len} bytes exceeds the {max} byte inline limit"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_set_from_12_1() {
        let caps = Capabilities::for_version(ClientVersion::new(12, 1));
        assert_eq!(caps.bind, BindAbi::Modern);
        assert_eq!(caps.entry_points().bind_by_name, "OCIBindByName2");
        assert_eq!(caps.entry_points().bind_by_pos, "OCIBindByPos2");
        assert_eq!(caps.entry_points().define_by_pos, "OCIDefineByPos2");
        assert_eq!(caps.bind.actual_length_width(), LengthWidth::U32);
        assert_eq!(caps.max_binary_bytes(), 32767);
        assert_eq!(caps.bind.length_width(), LengthWidth::I64);
        assert_eq!(caps.lob, LobAbi::V2);
    }

    #[test]
    fn between_10_1_and_12_1_mixes_axes() {
        let caps = Capabilities::for_version(ClientVersion::new(11, 2));
        assert_eq!(caps.bind, BindAbi::Legacy);
        assert_eq!(caps.entry_points().define_by_pos, "OCIDefineByPos");
        assert_eq!(caps.bind.actual_length_width(), LengthWidth::U16);
        assert_eq!(caps.max_binary_bytes(), 4000);
        assert_eq!(caps.bind.length_width(), LengthWidth::I32);
        assert_eq!(caps.lob, LobAbi::V2);
        assert_eq!(caps.lob_entry_points().write, "OCILobWrite2");
        assert_eq!(caps.lob.length_width(), LengthWidth::U64);
    }

    #[test]
    fn legacy_everything_below_10_1() {
        let caps = Capabilities::for_version(ClientVersion::new(9, 2));
        assert_eq!(caps.bind, BindAbi::Legacy);
        assert_eq!(caps.lob, LobAbi::Legacy);
        assert_eq!(caps.lob_entry_points().get_length, "OCILobGetLength");
        assert_eq!(caps.lob_entry_points().trim, "OCILobTrim");
        assert_eq!(caps.lob.length_width(), LengthWidth::U32);
    }

    #[test]
    fn actual_length_respects_width() {
        let legacy = Capabilities::for_version(ClientVersion::new(11, 2));
        let modern = Capabilities::for_version(ClientVersion::V12_1);
        assert!(legacy.actual_length(70_000).is_err());
        assert_eq!(legacy.actual_length(4000).unwrap(), ActualLength::U16(4000));
        assert_eq!(modern.actual_length(70_000).unwrap(), ActualLength::U32(70_000));
    }

    #[test]
    fn lob_length_respects_width() {
        let legacy = Capabilities::for_version(ClientVersion::new(9, 2));
        let v2 = Capabilities::for_version(ClientVersion::V10_1);
        let big = u64::from(u32::MAX) + 1;
        assert!(legacy.lob_length(big).is_err());
        assert_eq!(legacy.lob_length(10).unwrap(), LobLength::U32(10));
        assert_eq!(v2.lob_length(big).unwrap(), LobLength::U64(big));
    }

    #[test]
    fn inline_binary_limit() {
        let legacy = Capabilities::for_version(ClientVersion::new(11, 2));
        let modern = Capabilities::for_version(ClientVersion::V12_1);
        assert!(legacy.check_inline_binary(4000).is_ok());
        assert!(legacy.check_inline_binary(4001).is_err());
        assert!(modern.check_inline_binary(32767).is_ok());
        assert!(modern.check_inline_binary(32768).is_err());
    }

    #[test]
    fn width_maxima() {
        assert_eq!(LengthWidth::U16.max(), 65535);
        assert_eq!(LengthWidth::I32.max(), 2_147_483_647);
    }
}
