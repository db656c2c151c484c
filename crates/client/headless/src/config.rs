//! Driver configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    pub seed: u64,
    pub maze_width: i32,
    pub maze_height: i32,
    pub ticks: u64,
    pub agents: usize,
    pub tick_interval: Duration,
    /// Ticks the player spends on each cell of its walk.
    pub ticks_per_step: u64,
    pub game_config_path: Option<PathBuf>,
    pub brain_presets_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            maze_width: 12,
            maze_height: 12,
            ticks: 200,
            agents: 3,
            tick_interval: Duration::from_millis(100),
            ticks_per_step: 5,
            game_config_path: None,
            brain_presets_path: None,
            log_dir: None,
        }
    }
}

impl HeadlessConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MAZE_SEED` - Level seed (default: 0)
    /// - `MAZE_WIDTH` / `MAZE_HEIGHT` - Maze size in cells (default: 12)
    /// - `SIM_TICKS` - Ticks to simulate (default: 200)
    /// - `SIM_AGENTS` - Number of agents (default: 3)
    /// - `TICK_MILLIS` - Tick length in milliseconds (default: 100)
    /// - `PLAYER_STEP_TICKS` - Ticks per player cell (default: 5)
    /// - `GAME_CONFIG_PATH` - TOML game config (default: bundled)
    /// - `BRAIN_PRESETS_PATH` - RON brain presets (default: bundled)
    /// - `LOG_DIR` - Also write logs to `<LOG_DIR>/maze-sim.log`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("MAZE_SEED") {
            config.seed = seed;
        }
        if let Some(width) = read_env::<i32>("MAZE_WIDTH") {
            config.maze_width = width;
        }
        if let Some(height) = read_env::<i32>("MAZE_HEIGHT") {
            config.maze_height = height;
        }
        if let Some(ticks) = read_env::<u64>("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(agents) = read_env::<usize>("SIM_AGENTS") {
            config.agents = agents;
        }
        if let Some(millis) = read_env::<u64>("TICK_MILLIS") {
            config.tick_interval = Duration::from_millis(millis.max(1));
        }
        if let Some(ticks) = read_env::<u64>("PLAYER_STEP_TICKS") {
            config.ticks_per_step = ticks.max(1);
        }

        config.game_config_path = env::var_os("GAME_CONFIG_PATH").map(PathBuf::from);
        config.brain_presets_path = env::var_os("BRAIN_PRESETS_PATH").map(PathBuf::from);
        config.log_dir = env::var_os("LOG_DIR").map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
