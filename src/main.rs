use clap::Parser;

use media_catalog::cli::{execute, Cli};
use media_catalog::domain::CatalogResult;
use media_catalog::infrastructure::config::Config;
use media_catalog::infrastructure::repositories::PostgresMediaRepository;

#[tokio::main]
async fn main() -> CatalogResult<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = config.connect().await?;
    let repo = PostgresMediaRepository::new(pool);

    let output = execute(&cli.command, &repo, config.page_size).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
