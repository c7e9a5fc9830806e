use std::fmt;

use serde::Serialize;

/// Return code of an OCI call (`sword`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Success,
    SuccessWithInfo,
    NeedData,
    NoData,
    Error,
    InvalidHandle,
    StillExecuting,
    Continue,
    /// A code this crate does not know; treated as an error.
    Other(i32),
}

impl Status {
    pub const OCI_SUCCESS: i32 = 0;
    pub const OCI_SUCCESS_WITH_INFO: i32 = 1;
    pub const OCI_NEED_DATA: i32 = 99;
    pub const OCI_NO_DATA: i32 = 100;
    pub const OCI_ERROR: i32 = -1;
    pub const OCI_INVALID_HANDLE: i32 = -2;
    pub const OCI_STILL_EXECUTING: i32 = -3123;
    pub const OCI_CONTINUE: i32 = -24200;

    #[must_use]
    pub fn from_sword(code: i32) -> Self {
        match code {
            Self::OCI_SUCCESS => Status::Success,
            Self::OCI_SUCCESS_WITH_INFO => Status::SuccessWithInfo,
            Self::OCI_NEED_DATA => Status::NeedData,
            Self::OCI_NO_DATA => Status::NoData,
            Self::OCI_ERROR => Status::Error,
            Self::OCI_INVALID_HANDLE => Status::InvalidHandle,
            Self::OCI_STILL_EXECUTING => Status::StillExecuting,
            Self::OCI_CONTINUE => Status::Continue,
            other => Status::Other(other),
        }
    }

    #[must_use]
    pub fn as_sword(self) -> i32 {
        match self {
            Status::Success => Self::OCI_SUCCESS,
            Status::SuccessWithInfo => Self::OCI_SUCCESS_WITH_INFO,
            Status::NeedData => Self::OCI_NEED_DATA,
            Status::NoData => Self::OCI_NO_DATA,
            Status::Error => Self::OCI_ERROR,
            Status::InvalidHandle => Self::OCI_INVALID_HANDLE,
            Status::StillExecuting => Self::OCI_STILL_EXECUTING,
            Status::Continue => Self::OCI_CONTINUE,
            Status::Other(code) => code,
        }
    }

    /// `OCI_SUCCESS` and `OCI_SUCCESS_WITH_INFO` both count as success.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success | Status::SuccessWithInfo)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("OCI_SUCCESS"),
            Status::SuccessWithInfo => f.write_str("OCI_SUCCESS_WITH_INFO"),
            Status::NeedData => f.write_str("OCI_NEED_DATA"),
            Status::NoData => f.write_str("OCI_NO_DATA"),
            Status::Error => f.write_str("OCI_ERROR"),
            Status::InvalidHandle => f.write_str("OCI_INVALID_HANDLE"),
            Status::StillExecuting => f.write_str("OCI_STILL_EXECUTING"),
            Status::Continue => f.write_str("OCI_CONTINUE"),
            Status::Other(code) => write!(f, "OCI status {code}"),
        }
    }
}

/// Failure reported by the native library for a single call.
///
/// `code` and `message` are what the error handle yields for the failed call
/// (`OCIErrorGet`); they are zero and empty when the status alone is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    pub status: Status,
    pub code: i32,
    pub message: String,
}

impl NativeError {
    pub fn new(status: Status, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// `OCI_ERROR` with the given ORA code.
    pub fn ora(code: i32, message: impl Into<String>) -> Self {
        Self::new(Status::Error, code, message)
    }
}

pub type NativeResult<T> = Result<T, NativeError>;

/// Turn a raw `sword` into a `NativeResult`.
///
/// `fetch_detail` is only consulted on failure, mirroring how the error handle
/// is read after a call returns a non-success status.
///
/// # Errors
///
/// Returns `NativeError` for every status other than success or success with info.
pub fn check_status<F>(code: i32, fetch_detail: F) -> NativeResult<()>
where
    F: FnOnce() -> (i32, String),
{
    let status = Status::from_sword(code);
    if status.is_success() {
        return Ok(());
    }
    let (ora, message) = fetch_detail();
    Err(NativeError::new(status, ora, message))
}
