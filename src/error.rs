use thiserror::Error;

use crate::native::{NativeError, Status};

#[derive(Debug, Error)]
pub enum OciTransformError {
    /// A call into the native client library returned a non-success status.
    #[error("{at}: {status} (ORA-{code:05}): {message}")]
    Conversion {
        at: String,
        status: Status,
        code: i32,
        message: String,
    },

    /// The decoded fields cannot be represented by the host type.
    #[error("{at}: value out of range: {detail}")]
    OutOfRange { at: &'static str, detail: String },

    #[error("Unsupported client version: {0}")]
    UnsupportedVersion(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl OciTransformError {
    /// Wrap a native failure, tagging it with the call site that observed it.
    pub(crate) fn conversion(at: impl Into<String>, err: NativeError) -> Self {
        let at = at.into();
        if err.status != Status::NoData {
            tracing::debug!(%at, status = %err.status, code = err.code, "native call failed");
        }
        OciTransformError::Conversion {
            at,
            status: err.status,
            code: err.code,
            message: err.message,
        }
    }

    /// Call-site label of a native conversion failure.
    #[must_use]
    pub fn call_site(&self) -> Option<&str> {
        match self {
            OciTransformError::Conversion { at, .. } => Some(at),
            OciTransformError::OutOfRange { at, .. } => Some(at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_names_call_site() {
        let err = OciTransformError::conversion(
            "interval_to_host()",
            NativeError::new(Status::Error, 1867, "the interval is invalid"),
        );
        assert_eq!(err.call_site(), Some("interval_to_host()"));
        assert_eq!(
            err.to_string(),
            "interval_to_host(): OCI_ERROR (ORA-01867): the interval is invalid"
        );
    }

    #[test]
    fn config_errors_have_no_call_site() {
        let err = OciTransformError::ConfigError("bad".into());
        assert!(err.call_site().is_none());
    }
}
