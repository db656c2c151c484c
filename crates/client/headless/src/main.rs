//! Headless maze simulation driver.
mod config;
mod session;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use game_content::{BrainCatalog, BrainLoader, ConfigLoader, ContentFactory};
use game_core::{BrainPreset, GameConfig};
use runtime::{Runtime, RuntimeConfig};

use config::HeadlessConfig;
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = HeadlessConfig::from_env();
    let _guard = setup_logging(&config)?;

    let (game_config, catalog) = load_content(&config)?;
    let runtime_config = RuntimeConfig {
        game_config: game_config.clone(),
        maze_width: config.maze_width,
        maze_height: config.maze_height,
        seed: config.seed,
        tick_interval: config.tick_interval,
        default_preset: catalog.get_or_default(BrainPreset::STALKER),
        ..RuntimeConfig::default()
    };
    let cell_size = runtime_config.cell_size;

    let runtime = Runtime::builder()
        .config(runtime_config)
        .build()
        .await
        .context("failed to start runtime")?;

    let maze = runtime.handle().maze();
    info!(
        seed = config.seed,
        width = maze.width(),
        height = maze.height(),
        fingerprint = %hex::encode(maze.fingerprint()),
        "session started"
    );

    let summary = Session::new(&config, &game_config, &catalog, cell_size)
        .run(&runtime)
        .await?;
    session::log_summary(&summary);

    runtime.shutdown().await?;
    Ok(())
}

/// Setup logging to stderr and, when `LOG_DIR` is set, to a file
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(config: &HeadlessConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "maze-sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        info!("Log file: {}/maze-sim.log", dir.display());
    }
    Ok(guard)
}

fn load_content(config: &HeadlessConfig) -> Result<(GameConfig, BrainCatalog)> {
    let bundled = ContentFactory::bundled();

    let game_config = match &config.game_config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => bundled.load_config()?,
    };
    let catalog = match &config.brain_presets_path {
        Some(path) => BrainLoader::load(path)?,
        None => bundled.load_brains()?,
    };

    info!(
        presets = catalog.presets().len(),
        noise_threshold = game_config.ai.noise_threshold,
        "content loaded"
    );
    Ok((game_config, catalog))
}
