use anyhow::Result;
use clap::Parser;
use post_illustrator::ai::{DalleImageClient, ImageGenerationService};
use post_illustrator::config::Config;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "post-illustrator")]
#[command(about = "Generate DALL-E 3 illustrations for blog post titles")]
struct CliArgs {
    /// One or more post titles; each gets its own image request.
    #[arg(value_name = "TITLE", required = true, value_parser = parse_title_arg)]
    titles: Vec<String>,
}

fn parse_title_arg(input: &str) -> std::result::Result<String, String> {
    let title = input.trim();
    if title.is_empty() {
        return Err("Title must not be empty".to_string());
    }
    Ok(title.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_illustrator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = Config::from_env()?;
    let client = Arc::new(DalleImageClient::from_config(&config)?);

    info!("Generating {} illustration(s)", args.titles.len());

    let mut tasks = JoinSet::new();
    for title in args.titles {
        let client = Arc::clone(&client);
        tasks.spawn(async move {
            let result = client.generate_image(&title).await;
            (title, result)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            (title, Ok(url)) => println!("{}\t{}", title, url),
            (title, Err(e)) => {
                error!("Failed to illustrate '{}': {}", title, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{} illustration(s) failed", failed);
        std::process::exit(1);
    }

    Ok(())
}
