use std::{
	io::{self, Write},
	path::PathBuf,
	process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use matchbook_service::{
	AdvisersForDealRequest, DealsForAdviserRequest, LoadReport, MatchService,
};

/// Exit status of a reload where at least one source failed.
pub const EXIT_SOURCES_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(
	version = matchbook_cli::VERSION,
	rename_all = "kebab",
	styles = matchbook_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Restage every source and rebuild the derived tables.
	Reload,
	/// Top advisers for one deal.
	AdvisersForDeal {
		/// `FD:<accession>`, `CF:<accession>` or a bare accession number.
		#[arg(long)]
		deal_id: String,
		#[arg(long)]
		limit: Option<u32>,
	},
	/// Top deals for one adviser.
	DealsForAdviser {
		#[arg(long)]
		adviser_id: String,
		#[arg(long)]
		limit: Option<u32>,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<ExitCode> {
	let config = matchbook_config::load(&args.config)?;

	init_tracing(&config);

	let service = MatchService::connect(config).await?;
	let mut out = io::stdout().lock();
	let code = match args.command {
		Command::Reload => {
			let report = service.reload().await?;

			write_summary(&mut out, &report)?;

			if report.succeeded() {
				ExitCode::SUCCESS
			} else {
				tracing::error!(failed = report.failures.len(), "Reload finished with failed sources.");

				ExitCode::from(EXIT_SOURCES_FAILED)
			}
		},
		Command::AdvisersForDeal { deal_id, limit } => {
			let response =
				service.advisers_for_deal(AdvisersForDealRequest { deal_id, limit }).await?;

			serde_json::to_writer_pretty(&mut out, &response)?;
			writeln!(out)?;

			ExitCode::SUCCESS
		},
		Command::DealsForAdviser { adviser_id, limit } => {
			let response =
				service.deals_for_adviser(DealsForAdviserRequest { adviser_id, limit }).await?;

			serde_json::to_writer_pretty(&mut out, &response)?;
			writeln!(out)?;

			ExitCode::SUCCESS
		},
	};

	service.db.close().await;

	Ok(code)
}

/// Store path, status, failures and per-table row counts, one item per line.
pub fn write_summary(out: &mut impl Write, report: &LoadReport) -> io::Result<()> {
	writeln!(out, "store: {}", report.store_path.display())?;
	writeln!(out, "run: {}", report.run_id)?;
	writeln!(out, "status: {}", report.status.as_str())?;

	for failure in &report.failures {
		writeln!(out, "failed: {} ({}): {}", failure.family, failure.kind, failure.message)?;
	}
	for source in &report.sources {
		if source.stats.warnings > 0 {
			writeln!(
				out,
				"warnings: {} recovered {} values, skipped {} rows",
				source.stats.family, source.stats.warnings, source.stats.rows_skipped
			)?;
		}
	}

	if report.empty_candidate_sets > 0 {
		writeln!(out, "deals without candidates: {}", report.empty_candidate_sets)?;

		for empty in &report.empty_candidate_samples {
			writeln!(out, "  {}: {}", empty.deal_id, empty.suggestion)?;
		}
	}

	writeln!(out, "tables:")?;

	for count in &report.table_counts {
		match count.rows {
			Some(rows) => writeln!(out, "  {:<32} {rows}", count.name)?,
			None => writeln!(out, "  {:<32} missing", count.name)?,
		}
	}

	Ok(())
}

fn init_tracing(config: &matchbook_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
