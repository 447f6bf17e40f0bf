use anyhow::{Context, Result};
use benchsig::cli::{Cli, OutputFormat};
use benchsig::comparison::{self, ComparisonReport};
use benchsig::json_output::JsonComparisonReport;
use benchsig::report_loader;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the report: notices to stderr, report blocks to stdout
fn print_text_report(report: &ComparisonReport) {
    for notice in &report.notices {
        eprintln!("warning: {}", notice);
    }

    let degenerate = report.degenerate();
    if !degenerate.is_empty() {
        let names: Vec<String> = degenerate.iter().map(ToString::to_string).collect();
        eprintln!(
            "warning: p-value could not be computed for: {} (degrees of freedom undefined)",
            names.join(", ")
        );
    }

    let blocks = report.blocks();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", block);
    }
}

fn main() -> Result<()> {
    // Invalid --alpha is rejected here, before any report is read
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = args.comparison_config();

    let first = report_loader::load_result_set(&args.first_report)
        .with_context(|| format!("Failed to load {}", args.first_report.display()))?;
    let second = report_loader::load_result_set(&args.second_report)
        .with_context(|| format!("Failed to load {}", args.second_report.display()))?;

    tracing::info!(
        first = first.label(),
        second = second.label(),
        alpha = config.alpha,
        direction = config.direction.as_str(),
        "Comparing benchmark reports"
    );

    let report = comparison::compare(&first, &second, &config);

    match args.format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => {
            let json = JsonComparisonReport::from(&report)
                .to_json()
                .context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}
