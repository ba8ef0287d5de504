//! CLI entrypoint for `configify`.

mod cli;

use std::io::IsTerminal;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use configify::config::{self, LOG_ENV};
use configify::error::ConfigifyError;
use configify::format::{GofmtFormatter, PassthroughFormatter, SourceFormatter};
use configify::loader::{CommandLoader, LoadRequest, PackageLoader, SnapshotFileLoader};
use configify::output::{self, OutputRequest};
use configify::pipeline::{self, GenerationRequest};

use crate::cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run().map_err(color_eyre::eyre::Report::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run() -> Result<(), ConfigifyError> {
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref(), &args.overrides.to_overrides())?;
    let patterns = args.patterns();

    let output_path = output::resolve_output_path(&OutputRequest {
        patterns: &patterns,
        tags: &args.tags,
        explicit: args.output.as_deref(),
        type_name: &args.type_name,
        suffix: &settings.output_suffix,
    })?;

    let loader: Box<dyn PackageLoader> = match &args.snapshot {
        Some(path) => Box::new(SnapshotFileLoader::new(path.clone())),
        None => Box::new(CommandLoader::new(settings.loader_command.clone())),
    };
    let formatter: Box<dyn SourceFormatter> = if settings.should_format {
        Box::new(GofmtFormatter::new(settings.formatter_command.clone()))
    } else {
        Box::new(PassthroughFormatter)
    };

    let request = GenerationRequest {
        type_name: args.type_name.clone(),
        load: LoadRequest {
            patterns,
            tags: args.tags.clone(),
        },
    };
    let generated = pipeline::run(&request, loader.as_ref(), formatter.as_ref())?;
    output::write_source(&output_path, &generated.source)?;

    if generated.format_warning.is_some() {
        warn!(path = %output_path, "wrote unformatted source");
    }
    info!(path = %output_path, "wrote options");
    Ok(())
}
