use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stock_photo_frenzy::config::CliConfig;
use stock_photo_frenzy::content::SourceKind;
use stock_photo_frenzy::settings::Difficulty;
use stock_photo_frenzy::{Config, GameInterface, VERSION};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frenzy")]
#[command(about = "Stock Photo Frenzy: guess the words of a hidden photo caption against the clock")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour theme: default, dark or light
    #[arg(long)]
    theme: Option<String>,

    /// Where round items come from: placeholder, file or http
    #[arg(long)]
    source: Option<SourceKind>,

    /// JSON file of round items (implies --source file)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Base URL of the image API
    #[arg(long)]
    api_url: Option<String>,

    /// Play search mode with this term
    #[arg(short, long)]
    search: Option<String>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seconds per round: 30, 60, 90 or 120
    #[arg(short, long)]
    time_limit: Option<u32>,

    /// Number of rounds: 5, 10, 15 or 20
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Start straight away with the configured settings
    #[arg(short = 'y', long)]
    skip_menu: bool,
}

impl Cli {
    fn overrides(&self) -> CliConfig {
        CliConfig {
            log_level: None,
            debug: self.debug,
            theme: self.theme.clone(),
            skip_settings_menu: self.skip_menu,
            source: self.source,
            items_file: self.items.clone(),
            api_url: self.api_url.clone(),
            search_term: self.search.clone(),
            difficulty: self.difficulty,
            time_limit_seconds: self.time_limit,
            round_count: self.rounds,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::load(None)?,
    };
    config.merge_with_cli(cli.overrides());
    config.validate()?;

    // Initialize logging on stderr so it stays out of the game screen
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stock_photo_frenzy={},warn", config.logging.level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Stock Photo Frenzy v{}", VERSION);

    let mut game_interface = GameInterface::new(config).await?;

    if let Err(e) = game_interface.run().await {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["frenzy", "--debug", "-s", "beach", "--difficulty", "hard", "-r", "5"]).unwrap();

        assert!(cli.debug);
        assert_eq!(cli.search.as_deref(), Some("beach"));
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert_eq!(cli.rounds, Some(5));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from(["frenzy", "--items", "photos.json", "-t", "30", "-y"]).unwrap();
        let mut config = Config::default();
        config.merge_with_cli(cli.overrides());

        assert_eq!(config.content.source, SourceKind::File);
        assert_eq!(config.game.time_limit_seconds, Some(30));
        assert!(config.ui.skip_settings_menu);
    }

    #[test]
    fn test_cli_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["frenzy", "--source", "ftp"]).is_err());
    }
}
