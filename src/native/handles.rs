//! Native value handles.
//!
//! These mirror the layouts the client library hands out. `OciDate` is a plain
//! struct whose fields are read directly; the other three are opaque and only
//! the environment knows how to take them apart.

/// Size of an `OCINumber` buffer: one length byte plus up to 21 number bytes.
pub const OCI_NUMBER_SIZE: usize = 22;

/// Size of the external TIMESTAMP and INTERVAL DAY TO SECOND formats.
pub const OCI_DATETIME_SIZE: usize = 11;

/// `OCIDate`: calendar and clock fields stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OciDate {
    pub year: i16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl OciDate {
    #[must_use]
    pub fn new(year: i16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Equivalent of `OCIDateGetDate`.
    #[must_use]
    pub fn date(&self) -> (i16, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Equivalent of `OCIDateGetTime`.
    #[must_use]
    pub fn time(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.second)
    }
}

/// `OCIInterval` (day to second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OciInterval {
    raw: [u8; OCI_DATETIME_SIZE],
}

impl OciInterval {
    #[must_use]
    pub fn from_raw(raw: [u8; OCI_DATETIME_SIZE]) -> Self {
        Self { raw }
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8; OCI_DATETIME_SIZE] {
        &self.raw
    }
}

/// `OCIDateTime` (timestamp without time zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OciDateTime {
    raw: [u8; OCI_DATETIME_SIZE],
}

impl OciDateTime {
    #[must_use]
    pub fn from_raw(raw: [u8; OCI_DATETIME_SIZE]) -> Self {
        Self { raw }
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8; OCI_DATETIME_SIZE] {
        &self.raw
    }
}

/// `OCINumber`: binary-coded decimal, length-prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OciNumber {
    raw: [u8; OCI_NUMBER_SIZE],
}

impl OciNumber {
    #[must_use]
    pub fn from_raw(raw: [u8; OCI_NUMBER_SIZE]) -> Self {
        Self { raw }
    }

    /// Build from the number bytes alone (exponent byte first), adding the
    /// length prefix. Returns `None` if there are more than 21 bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() >= OCI_NUMBER_SIZE {
            return None;
        }
        let mut raw = [0u8; OCI_NUMBER_SIZE];
        raw[0] = u8::try_from(bytes.len()).ok()?;
        raw[1..=bytes.len()].copy_from_slice(bytes);
        Some(Self { raw })
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8; OCI_NUMBER_SIZE] {
        &self.raw
    }

    /// The number bytes without the length prefix. Empty if the prefix is corrupt.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        let len = usize::from(self.raw[0]);
        if len == 0 || len >= OCI_NUMBER_SIZE {
            return &[];
        }
        &self.raw[1..=len]
    }
}
