use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use logrank::analytics::AggregationPipeline;
use logrank::config::Config;
use logrank::models::Dimension;
use logrank::render::{self, OutputFormat};
use logrank::source::{self, ArchiveSource, HttpArchive, LocalArchive};

#[derive(Parser)]
#[command(name = "logrank")]
#[command(about = "Most frequent clients or requests per day in a gzipped access log", long_about = None)]
struct Cli {
    /// Rank clients or requests
    #[arg(short = 'g', long = "get-frequent", value_enum)]
    get_frequent: Dimension,
    /// URL of the gzip archive (the local backup archive is used when omitted)
    #[arg(long)]
    url: Option<String>,
    /// Number of top results per day
    #[arg(short = 'n')]
    n: Option<usize>,
    /// Output format
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!("Loaded configuration");

    let n = match cli.n {
        Some(n) => n,
        None => {
            info!(
                "Number of top results not set, using default value of {}",
                config.report.top_n
            );
            config.report.top_n
        }
    };
    let format = cli.output.unwrap_or(config.report.output);

    let remote = cli.url.is_some();
    let archive: Arc<dyn ArchiveSource> = match cli.url {
        Some(url) => Arc::new(HttpArchive::with_user_agent(
            url,
            config.source.user_agent.clone(),
        )),
        None => {
            info!("URL not provided, using backup archive");
            Arc::new(LocalArchive::new(config.source.backup_archive.clone()))
        }
    };

    info!("Fetching archive from {}", archive.describe());
    let archive_path = archive
        .fetch(&config.source.data_dir)
        .await
        .with_context(|| format!("Input unavailable: {}", archive.describe()))?;

    let pipeline = AggregationPipeline::new(cli.get_frequent, n);
    info!("Ranking top {} {} per day", n, pipeline.dimension());

    let (result, _stats) = tokio::task::spawn_blocking(move || -> Result<_> {
        // Downloads are extracted next to the archive, the backup is streamed in place
        let reader = source::prepare_log(&archive_path, remote).context("Input unavailable")?;
        pipeline.run_reader(reader).context("Input unavailable")
    })
    .await??;

    info!("Ranked {} days", result.len());
    print!("{}", render::render(&result, cli.get_frequent, format)?);

    Ok(())
}
