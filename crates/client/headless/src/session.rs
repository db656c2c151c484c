//! Seeded session driver.
//!
//! Walks the player along the maze's solution path, leaving footsteps behind
//! it, spawns agents in the cells farthest from the start and lets the
//! runtime tick until the budget is spent.
use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use game_content::BrainCatalog;
use game_core::{ActionKind, CellCoord, GameConfig, MazeGraph, Pose, SoundEmitter};
use runtime::{AgentSpawn, Runtime, RuntimeHandle, TickReport, Topic};

use crate::config::HeadlessConfig;

/// Totals gathered over a session.
#[derive(Debug, Default)]
pub struct SessionSummary {
    pub ticks: u64,
    pub committed: HashMap<ActionKind, usize>,
    pub completed: usize,
    pub player_damage: f32,
}

impl SessionSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        for (_, action, _) in &report.committed {
            *self.committed.entry(*action).or_default() += 1;
        }
        self.completed += report.completed.len();
        self.player_damage += report.player_damage;
    }
}

pub struct Session<'a> {
    config: &'a HeadlessConfig,
    game_config: &'a GameConfig,
    catalog: &'a BrainCatalog,
    cell_size: f32,
}

impl<'a> Session<'a> {
    pub fn new(
        config: &'a HeadlessConfig,
        game_config: &'a GameConfig,
        catalog: &'a BrainCatalog,
        cell_size: f32,
    ) -> Self {
        Self {
            config,
            game_config,
            catalog,
            cell_size,
        }
    }

    pub async fn run(&self, runtime: &Runtime) -> Result<SessionSummary> {
        let handle = runtime.handle();
        let maze = handle.maze();
        let loggers = spawn_event_loggers(&handle);

        self.spawn_agents(&handle, &maze).await?;

        let route = player_route(&maze);
        let mut summary = SessionSummary::default();
        let mut remaining = self.config.ticks;
        let mut steps = route.windows(2).cycle();

        while remaining > 0 {
            let Some(&[here, next]) = steps.next() else {
                // Single-cell maze: nowhere to walk.
                self.place_player(&handle, &maze, maze.start(), maze.start()).await?;
                for report in runtime.run_ticks(remaining).await? {
                    summary.record(&report);
                }
                break;
            };
            self.place_player(&handle, &maze, here, next).await?;

            let batch = remaining.min(self.config.ticks_per_step);
            for report in runtime.run_ticks(batch).await? {
                summary.record(&report);
            }
            remaining -= batch;
        }

        drop(handle);
        for logger in loggers {
            logger.abort();
        }
        Ok(summary)
    }

    async fn spawn_agents(&self, handle: &RuntimeHandle, maze: &MazeGraph) -> Result<()> {
        let presets = self.catalog.presets();
        for (i, coord) in farthest_cells(maze, self.config.agents).into_iter().enumerate() {
            let mut spawn = AgentSpawn::at(maze.cell_center(coord, self.cell_size));
            if let Some(preset) = presets.get(i % presets.len().max(1)) {
                spawn = spawn.with_preset(preset.clone());
            }
            let agent = handle
                .spawn_agent(spawn)
                .await
                .with_context(|| format!("failed to spawn agent at {coord}"))?;
            debug!(%agent, %coord, "agent placed");
        }
        Ok(())
    }

    /// Moves the player onto `here`, facing `next`, and plays a footstep.
    async fn place_player(
        &self,
        handle: &RuntimeHandle,
        maze: &MazeGraph,
        here: CellCoord,
        next: CellCoord,
    ) -> Result<()> {
        let position = maze.cell_center(here, self.cell_size);
        let forward = maze.cell_center(next, self.cell_size) - position;
        handle.place_player(Pose::new(position, forward)).await?;

        let footstep = SoundEmitter::footstep(position, &self.game_config.sound)?;
        handle.emit_sound(footstep).await?;
        Ok(())
    }
}

/// Solution path there and back again, as consecutive cells.
fn player_route(maze: &MazeGraph) -> Vec<CellCoord> {
    let path = maze
        .shortest_path(maze.start(), maze.end())
        .unwrap_or_else(|| vec![maze.start()]);
    path.iter()
        .chain(path.iter().rev().skip(1))
        .copied()
        .collect()
}

/// The `count` cells with the longest walk from the start, farthest first.
fn farthest_cells(maze: &MazeGraph, count: usize) -> Vec<CellCoord> {
    let width = maze.width() as usize;
    let mut cells: Vec<(u32, usize)> = maze
        .distances_from(maze.start())
        .into_iter()
        .enumerate()
        .filter_map(|(index, distance)| Some((distance?, index)))
        .collect();
    cells.sort_by_key(|&(distance, index)| (Reverse(distance), index));

    cells
        .into_iter()
        .take(count)
        .map(|(_, index)| CellCoord::new((index % width) as u32, (index / width) as u32))
        .collect()
}

fn spawn_event_loggers(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    handle
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, mut rx)| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => debug!(?topic, ?event, "event"),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(?topic, skipped, "event logger lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}

pub fn log_summary(summary: &SessionSummary) {
    info!(
        ticks = summary.ticks,
        completed = summary.completed,
        player_damage = summary.player_damage,
        "session finished"
    );
    for (action, count) in &summary.committed {
        info!(%action, count, "commits");
    }
}
