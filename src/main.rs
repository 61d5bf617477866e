use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use wa_parser::export::{self, OutputFormat};
use wa_parser::parser::fee::service_fee;
use wa_parser::settings::Settings;
use wa_parser::{Dialect, Engine, ParseReport, RecordTable};

#[derive(Parser)]
#[command(name = "wa_parser", about = "Extract identity and balance records from chat transcripts")]
struct Cli {
    /// Config file (default: ./wa_parser.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse transcript files and export one table per file
    Parse {
        /// Transcript text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Transcript format (format_1, format_2); falls back to the config value
        #[arg(short, long)]
        format: Option<String>,
        /// Output directory; falls back to the config value
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Export format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        output_format: OutputFormat,
        /// Print tables to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Show the service fee for a balance total
    Fee { total: u64 },
    /// List recognized transcript formats
    Dialects,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            files,
            format,
            out_dir,
            output_format,
            stdout,
        } => {
            let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
            let dialect: Dialect = match format {
                Some(f) => f.parse()?,
                None => settings.dialect()?,
            };
            let engine = Engine::new(settings.engine_config()?);
            let out_dir = out_dir.unwrap_or_else(|| settings.output_dir.clone());
            info!(%dialect, files = files.len(), "parsing transcripts");

            let results = parse_files(&engine, &files, dialect)?;

            let mut failed = 0;
            for (path, result) in files.iter().zip(results) {
                let (table, report) = match result {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        error!(file = %path.display(), "{e:#}");
                        failed += 1;
                        continue;
                    }
                };
                log_report(path, &report);
                if stdout {
                    export::write_table(&table, output_format, std::io::stdout().lock())?;
                    println!();
                } else {
                    let written = export::export_to_dir(&table, &out_dir, output_format)
                        .with_context(|| format!("exporting {}", path.display()))?;
                    println!("{} -> {} ({} records)", path.display(), written.display(), table.len());
                }
            }

            if failed > 0 {
                bail!("{failed} of {} files failed", files.len());
            }
        }
        Commands::Fee { total } => {
            println!("{}", service_fee(total));
        }
        Commands::Dialects => {
            for dialect in Dialect::ALL {
                println!("{dialect}");
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("done in {}", human_duration(elapsed));
    }
    Ok(())
}

fn human_duration(d: std::time::Duration) -> String {
    match d.as_secs() {
        s if s < 60 => format!("{:.1}s", d.as_secs_f64()),
        s => format!("{}m {}s", s / 60, s % 60),
    }
}

type Parsed = anyhow::Result<(RecordTable, ParseReport)>;

/// Parse every file in parallel. Results come back in input order.
fn parse_files(engine: &Engine, files: &[PathBuf], dialect: Dialect) -> anyhow::Result<Vec<Parsed>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let results = files
        .par_iter()
        .map(|path| {
            let parsed = parse_file(engine, path, dialect);
            pb.inc(1);
            parsed
        })
        .collect();

    pb.finish_and_clear();
    Ok(results)
}

fn parse_file(engine: &Engine, path: &Path, dialect: Dialect) -> Parsed {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.trim();
    if text.is_empty() {
        bail!("{}: text must not be empty", path.display());
    }
    Ok(engine.parse_with_report(text, dialect))
}

fn log_report(path: &Path, report: &ParseReport) {
    info!(
        file = %path.display(),
        blocks = report.blocks,
        records = report.records,
        rejected = report.rejected(),
        too_short = report.too_short,
        no_identity = report.no_identity,
        duplicates = report.duplicates,
        "parsed"
    );
    if report.blocks > 0 && report.records == 0 {
        warn!(file = %path.display(), "no records extracted; check the transcript format");
    }
}
