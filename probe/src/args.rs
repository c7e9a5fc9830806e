use clap::{Parser, ValueEnum};
use oci_transforms::version::{ClientVersion, ResolverOptions, VersionMarker};
use oci_transforms::OciTransformError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve OCI capabilities and exercise value conversions")]
pub(crate) struct Args {
    /// Treat the client library as this `major.minor` version.
    #[arg(long)]
    pub(crate) client_version: Option<String>,
    /// Report only the module attribute as version evidence.
    #[arg(long, conflicts_with = "client_version")]
    pub(crate) module_attribute: bool,
    /// Probe an environment that reports no version at all.
    #[arg(long)]
    pub(crate) bare: bool,
    /// Use the compile-time version when nothing else is found.
    #[arg(long)]
    pub(crate) linked_fallback: bool,
    /// Number of random values to push through each conversion.
    #[arg(long, default_value_t = 0)]
    pub(crate) samples: u64,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    #[arg(long, value_enum, default_value = "json")]
    pub(crate) format: OutputFormat,
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProbeConfig {
    pub(crate) override_marker: Option<String>,
    pub(crate) bare: bool,
    pub(crate) linked_fallback: bool,
    pub(crate) samples: u64,
    pub(crate) seed: u64,
    pub(crate) format: OutputFormat,
    pub(crate) log: Option<PathBuf>,
    #[serde(skip)]
    pub(crate) options: ResolverOptions,
}

impl ProbeConfig {
    /// Command line flags win over `OCI_CLIENT_VERSION` / `OCI_MODULE_ATTRIBUTE`.
    pub(crate) fn from_args(args: Args) -> Result<Self, OciTransformError> {
        let mut options = ResolverOptions::from_env()?.with_linked_fallback(args.linked_fallback);
        if let Some(raw) = &args.client_version {
            let version: ClientVersion = raw.parse()?;
            options = options.with_override(VersionMarker::Explicit(version));
        } else if args.module_attribute {
            options = options.with_override(VersionMarker::ModuleAttribute);
        }
        Ok(Self {
            override_marker: options.override_marker.map(describe_marker),
            bare: args.bare,
            linked_fallback: args.linked_fallback,
            samples: args.samples,
            seed: args.seed.unwrap_or_else(random_seed),
            format: args.format,
            log: args.log,
            options,
        })
    }
}

fn describe_marker(marker: VersionMarker) -> String {
    match marker {
        VersionMarker::Explicit(version) => version.to_string(),
        VersionMarker::ModuleAttribute => format!("module attribute ({})", marker.version()),
    }
}

fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    now.as_secs() ^ u64::from(now.subsec_nanos())
}
