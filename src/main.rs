use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use inventory::config::Config;
use inventory::data::{ItemsRepository, OfflineItemsRepository};
use inventory::logging::init_tracing;
use inventory::shell::Shell;

/// Track items, prices and stock from the terminal.
#[derive(Debug, Parser)]
#[command(name = "inventory", version, about)]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON file with the initial items, overrides `data.seed_file`
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config_path = args.config.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let repository = match args.seed.or(config.data.seed_file.clone()) {
        Some(path) => OfflineItemsRepository::from_seed_file(&path)?,
        None => OfflineItemsRepository::new(),
    };
    tracing::info!(items = repository.len(), "Inventory started");
    let repository: Arc<dyn ItemsRepository> = Arc::new(repository);

    let mut shell = Shell::new(repository, config.controller.clone());
    let input = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = shell.run(input, tokio::io::stdout()) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_config_and_seed_paths() {
        let args = Args::parse_from(["inventory", "--config", "c.toml", "--seed", "s.json"]);
        assert_eq!(args.config.unwrap().to_str(), Some("c.toml"));
        assert_eq!(args.seed.unwrap().to_str(), Some("s.json"));
    }

    #[test]
    fn paths_are_optional() {
        let args = Args::parse_from(["inventory"]);
        assert!(args.config.is_none());
        assert!(args.seed.is_none());
    }
}
