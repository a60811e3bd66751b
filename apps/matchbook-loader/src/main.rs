use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
	color_eyre::install()?;

	let args = matchbook_loader::Args::parse();

	matchbook_loader::run(args).await
}
