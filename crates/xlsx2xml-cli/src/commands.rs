use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use xlsx2xml_cli::config::Config;
use xlsx2xml_cli::pipeline::{BatchOptions, FailureMode, run_batch};
use xlsx2xml_cli::types::BatchResult;
use xlsx2xml_core::Analyzer;
use xlsx2xml_ingest::read_workbook;

use crate::cli::{CheckArgs, ConfigArgs, ConvertArgs};
use crate::summary::{fields_table, types_table};

pub fn run_convert(args: &ConvertArgs) -> Result<BatchResult> {
    let config = Config::discover(args.config.config.as_deref()).context("load config")?;
    let options = batch_options(&config, args);

    info!(path = %options.input_root.display(), "path xlsx");
    info!(path = %options.output_root.display(), "path xml");
    if let Some(path) = &options.schema_file {
        info!(path = %path.display(), "path format file");
    }

    run_batch(&options)
}

/// Merge CLI overrides into the loaded configuration.
fn batch_options(config: &Config, args: &ConvertArgs) -> BatchOptions {
    let mut options = BatchOptions::new(
        args.input.clone().unwrap_or_else(|| config.input_root()),
        args.output.clone().unwrap_or_else(|| config.output_root()),
    );
    options.schema_file = if args.no_format_file {
        None
    } else {
        args.format_file.clone().or_else(|| config.schema_file())
    };
    options.analyzer = config.analyzer_options();
    options.failure_mode = if args.keep_going {
        FailureMode::KeepGoing
    } else {
        FailureMode::FailFast
    };
    options.dry_run = args.dry_run;
    options
}

/// Analyze each file and print its fields. Returns the number of failures.
pub fn run_check(args: &CheckArgs) -> Result<usize> {
    let config = Config::discover(args.config.config.as_deref()).context("load config")?;
    let analyzer = Analyzer::new(config.analyzer_options());

    let mut failures = 0usize;
    for path in &args.files {
        let span = info_span!("check", file = %path.display());
        let _guard = span.enter();

        let analysis = read_workbook(path)
            .map_err(anyhow::Error::from)
            .and_then(|workbook| analyzer.analyze(&workbook).map_err(anyhow::Error::from));
        match analysis {
            Ok(analysis) => {
                println!(
                    "{}: {} fields, {} records",
                    path.display(),
                    analysis.keys.len(),
                    analysis.record_count()
                );
                if analysis.has_fields() {
                    println!("{}", fields_table(&analysis, &analyzer.options().types));
                }
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "check failed");
                eprintln!("{}: {err:#}", path.display());
                failures += 1;
            }
        }
    }
    Ok(failures)
}

pub fn run_types(args: &ConfigArgs) -> Result<()> {
    let config = Config::discover(args.config.as_deref()).context("load config")?;
    println!("{}", types_table(&config.type_registry()));
    Ok(())
}
