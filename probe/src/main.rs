mod args;
mod logging;
mod sample;

use std::process::ExitCode;

use clap::Parser;
use oci_transforms::prelude::*;
use oci_transforms::version::linked_version;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::Level;

use crate::args::{Args, OutputFormat, ProbeConfig};
use crate::logging::LogTarget;
use crate::sample::SampleReport;

#[derive(Debug, Serialize)]
struct Report {
    linked: ClientVersion,
    capabilities: Capabilities,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    samples: Vec<SampleReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_path = args.log.clone();
    let writer = LogTarget::open(log_path).unwrap_or_else(|err| {
        eprintln!("failed to open log file: {err}");
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(Level::INFO)
        .init();

    let config = match ProbeConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::from(2);
        }
    };
    let config_json = serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string());
    tracing::info!("config: {}", config_json);

    let env = if config.bare {
        ReferenceEnvironment::with_marker(None)
    } else {
        ReferenceEnvironment::new()
    };
    let capabilities = match config.options.resolve(&env) {
        Ok(caps) => caps,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::from(3);
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let samples = if config.samples > 0 {
        sample::run_all(&env, &mut rng, config.samples)
    } else {
        Vec::new()
    };
    let clean = samples.iter().all(SampleReport::is_clean);

    let report = Report {
        linked: linked_version(),
        capabilities,
        samples,
    };
    match config.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!("failed to render report: {err}");
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => print_text(&report),
    }

    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(4)
    }
}

fn print_text(report: &Report) {
    let caps = &report.capabilities;
    let binds = caps.entry_points();
    let lobs = caps.lob_entry_points();
    println!("linked version:    {}", report.linked);
    println!("resolved version:  {}", caps.version);
    println!(
        "bind/define:       {}, {}, {}",
        binds.bind_by_name, binds.bind_by_pos, binds.define_by_pos
    );
    println!("actual length:     {:?}", caps.bind.actual_length_width());
    println!("max inline binary: {} bytes", caps.max_binary_bytes());
    println!("lob calls:         {}, {}, {}", lobs.get_length, lobs.trim, lobs.write);
    println!("lob length:        {:?}", caps.lob.length_width());
    for s in &report.samples {
        println!(
            "{:<10} checked={} mismatches={} errors={}",
            s.kind, s.checked, s.mismatches, s.errors
        );
    }
}
