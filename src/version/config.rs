use std::env;

use super::{ClientVersion, VersionMarker};
use crate::error::OciTransformError;
use crate::native::NativeEnvironment;
use crate::version::Capabilities;

/// Environment variable holding a `major.minor` version that overrides probing.
pub const CLIENT_VERSION_VAR: &str = "OCI_CLIENT_VERSION";

/// Environment variable that, when set to a truthy value, reports the module
/// attribute as the only version evidence.
pub const MODULE_ATTRIBUTE_VAR: &str = "OCI_MODULE_ATTRIBUTE";

/// Options for resolving capabilities.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Skip probing and use this marker.
    pub override_marker: Option<VersionMarker>,
    /// Fall back to the compile-time version when the probe finds nothing.
    pub allow_linked_fallback: bool,
}

impl ResolverOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_override(mut self, marker: VersionMarker) -> Self {
        self.override_marker = Some(marker);
        self
    }

    #[must_use]
    pub fn with_linked_fallback(mut self, allow: bool) -> Self {
        self.allow_linked_fallback = allow;
        self
    }

    /// Read overrides from `OCI_CLIENT_VERSION` and `OCI_MODULE_ATTRIBUTE`.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::ConfigError` if `OCI_CLIENT_VERSION` is set
    /// but is not a `major.minor` version.
    pub fn from_env() -> Result<Self, OciTransformError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ResolverOptions::from_env`], with a caller-provided lookup.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::ConfigError` on an unparsable version.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OciTransformError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::new();
        if let Some(raw) = lookup(CLIENT_VERSION_VAR).filter(|v| !v.trim().is_empty()) {
            let version: ClientVersion = raw.parse()?;
            opts.override_marker = Some(VersionMarker::Explicit(version));
        } else if lookup(MODULE_ATTRIBUTE_VAR).is_some_and(|v| is_truthy(&v)) {
            opts.override_marker = Some(VersionMarker::ModuleAttribute);
        }
        Ok(opts)
    }

    /// Resolve capabilities: override first, then the environment probe, then
    /// (if allowed) the compile-time version.
    ///
    /// # Errors
    ///
    /// Returns `OciTransformError::UnsupportedVersion` when nothing yields a
    /// marker.
    pub fn resolve<E>(&self, env: &E) -> Result<Capabilities, OciTransformError>
    where
        E: NativeEnvironment + ?Sized,
    {
        if let Some(marker) = self.override_marker {
            tracing::debug!(?marker, "using configured OCI version");
            return Capabilities::from_marker(Some(marker));
        }
        match Capabilities::probe(env) {
            Err(OciTransformError::UnsupportedVersion(_)) if self.allow_linked_fallback => {
                tracing::warn!("OCI probe found no version, using compile-time version");
                Ok(Capabilities::linked())
            }
            other => other,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Fluent builder for `ResolverOptions`.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptionsBuilder {
    opts: ResolverOptions,
}

impl ResolverOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn client_version(mut self, version: ClientVersion) -> Self {
        self.opts.override_marker = Some(VersionMarker::Explicit(version));
        self
    }

    #[must_use]
    pub fn module_attribute(mut self) -> Self {
        self.opts.override_marker = Some(VersionMarker::ModuleAttribute);
        self
    }

    #[must_use]
    pub fn linked_fallback(mut self, allow: bool) -> Self {
        self.opts.allow_linked_fallback = allow;
        self
    }

    #[must_use]
    pub fn finish(self) -> ResolverOptions {
        self.opts
    }

    /// Build the options and resolve against `env` in one step.
    ///
    /// # Errors
    ///
    /// See [`ResolverOptions::resolve`].
    pub fn resolve<E>(self, env: &E) -> Result<Capabilities, OciTransformError>
    where
        E: NativeEnvironment + ?Sized,
    {
        self.finish().resolve(env)
    }
}
