use anyhow::{Context, Result};
use tracing::info;

use massage_cli::summary::preview_table;
use massage_core::{JobReport, MassageConfig, run_job};

use crate::cli::{PreviewArgs, RunArgs};

pub fn run_normalize(args: &RunArgs) -> Result<JobReport> {
    let config = MassageConfig::default()
        .with_input(&args.input)
        .with_output(&args.output)
        .with_column(args.column)
        .with_quote_style(args.quote_style.into())
        .with_dry_run(args.dry_run);
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        "starting normalization"
    );
    run_job(&config).with_context(|| format!("normalize {}", config.input_path.display()))
}

pub fn run_preview(args: &PreviewArgs) {
    println!("{}", preview_table(&args.values));
}
