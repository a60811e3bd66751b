use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = matchbook_api::Args::parse();

	matchbook_api::run(args).await
}
