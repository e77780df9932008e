use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = rtsearch_api::Args::parse();

	rtsearch_api::run(args).await
}
