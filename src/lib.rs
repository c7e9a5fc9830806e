//! Conversions between Oracle client library (OCI) values and Rust host values.
//!
//! Two parts:
//!
//! - [`version`] resolves which OCI generation is linked and what that means for
//!   bind/define entry points, length widths and LOB calls.
//! - [`transform`] turns native dates, intervals, timestamps and NUMBERs into
//!   `chrono` values and floats (and back).
//!
//! Native calls go through the [`native::NativeEnvironment`] trait. An FFI
//! binding implements it on top of the client library;
//! [`reference::ReferenceEnvironment`] implements it in pure Rust.
//!
//! ```rust
//! use oci_transforms::prelude::*;
//!
//! let env = ReferenceEnvironment::default();
//! let caps = Capabilities::probe(&env).unwrap();
//! assert_eq!(caps, Capabilities::linked());
//!
//! let interval = env
//!     .interval_set_day_second(DaySecond { days: 1, hours: 2, minutes: 3, seconds: 4, fractional: 500_000 })
//!     .unwrap();
//! let host = interval_to_host(&env, &interval).unwrap();
//! assert_eq!(host.as_duration(), Some(HostDuration::new(1, 7384, 500)));
//! ```

pub mod conversion;
pub mod error;
pub mod native;
pub mod prelude;
pub mod reference;
pub mod transform;
pub mod types;
pub mod version;

pub use error::OciTransformError;
pub use types::{DateTag, HostDuration, HostValue, NativeValue};
pub use version::Capabilities;
