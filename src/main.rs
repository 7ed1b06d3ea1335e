use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod batch;
mod blend;
mod config;
mod engine;
mod error;
mod host;
mod model;
mod render;
mod table;
mod telemetry;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "spot-blend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch spot colour blend mode correction", long_about = None)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit diagnostic logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Adjust, export and route every document in a folder.
    Run {
        /// Folder holding the documents to process.
        #[arg(long)]
        source: PathBuf,

        /// Adjustment table (SpotColour,Type,BlendingMode).
        #[arg(long)]
        adjustments: PathBuf,

        /// The adjustment table has no header line.
        #[arg(long)]
        no_header: bool,

        /// Post-processing action name. Reserved.
        #[arg(long)]
        action: Option<String>,

        /// JSON manifest describing the documents to the host.
        #[arg(long)]
        manifest: PathBuf,

        /// Also write the run log as JSON.
        #[arg(long)]
        json_report: Option<PathBuf>,
    },

    /// Parse an adjustment table and report how each row resolves.
    Check {
        #[arg(long)]
        adjustments: PathBuf,

        #[arg(long)]
        no_header: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    telemetry::init_tracing(cli.json_logs, level);

    match cli.cmd {
        Commands::Run {
            source,
            adjustments,
            no_header,
            action,
            manifest,
            json_report,
        } => {
            let mut config = config::RunConfig::new(source, adjustments);
            config.has_header = !no_header;
            config.action_name = action;

            let mut host = host::SimulatedHost::from_manifest_file(&manifest)?;
            let outcome = batch::run_batch(&mut host, &config)?;
            tracing::debug!(
                exports = host.exports().len(),
                open_documents = host.open_documents(),
                live_selections = host.live_selections(),
                "host released"
            );

            if let Some(path) = json_report {
                std::fs::write(&path, render::render_json_report(&outcome.log)?)?;
                println!("Wrote {}", path.display());
            }

            let totals = outcome.log.totals();
            println!(
                "{} documents processed: {} passed, {} failed, {} not exported",
                totals.processed, totals.passed, totals.failed, totals.not_exported
            );
            println!("Wrote {}", outcome.log_path.display());
        }
        Commands::Check {
            adjustments,
            no_header,
        } => {
            let records = table::parse_adjustment_file(&adjustments, !no_header)?;
            let mut unknown = 0usize;
            let mut unknown_types = 0usize;
            for (position, record) in records.iter().enumerate() {
                let resolved = blend::resolve_blend_mode(&record.blending_mode);
                let mut notes = Vec::new();
                if record.attribute().is_none() {
                    unknown_types += 1;
                    notes.push(format!("Type Unknown: {:?}", record.kind));
                }
                if let Some(err) = resolved.error {
                    unknown += 1;
                    notes.push(err);
                }
                let kind = record.kind.trim_end_matches('\r');
                if notes.is_empty() {
                    println!(
                        "{:>4}  {}  {}  -> {}",
                        position + 1,
                        record.spot_colour,
                        kind,
                        resolved.mode
                    );
                } else {
                    println!(
                        "{:>4}  {}  {}  -> {} ({})",
                        position + 1,
                        record.spot_colour,
                        kind,
                        resolved.mode,
                        notes.join("; ")
                    );
                }
            }
            println!(
                "{} records, {} spot colours, {} unknown blending modes, {} unknown types",
                records.len(),
                engine::matcher::distinct_spot_count(&records),
                unknown,
                unknown_types
            );
        }
    }

    Ok(())
}
