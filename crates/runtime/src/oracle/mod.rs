//! Shared handles to the external capabilities the simulation consumes.
//!
//! The host supplies a path planner, spatial queries and an entity registry.
//! [`OracleManager`] bundles them behind `Arc`s so the simulation worker can
//! build [`game_core::Env`] views each tick and action tasks can keep their
//! own clones. [`MazeWorld`] is the in-process implementation used when no
//! engine is attached.
mod world;

use std::sync::Arc;

use game_core::{EntityRegistry, Env, GameEnv, PathPlanner, SpatialQuery};

pub use world::MazeWorld;

/// Manages all capability implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    planner: Arc<dyn PathPlanner>,
    spatial: Arc<dyn SpatialQuery>,
    entities: Arc<dyn EntityRegistry>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        planner: Arc<dyn PathPlanner>,
        spatial: Arc<dyn SpatialQuery>,
        entities: Arc<dyn EntityRegistry>,
    ) -> Self {
        Self {
            planner,
            spatial,
            entities,
        }
    }

    /// Uses one object for every capability.
    pub fn from_world<W>(world: Arc<W>) -> Self
    where
        W: PathPlanner + SpatialQuery + EntityRegistry + 'static,
    {
        Self {
            planner: world.clone(),
            spatial: world.clone(),
            entities: world,
        }
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            self.planner.as_ref(),
            self.spatial.as_ref(),
            self.entities.as_ref(),
        )
    }

    pub fn planner(&self) -> &dyn PathPlanner {
        self.planner.as_ref()
    }

    pub fn entities(&self) -> &dyn EntityRegistry {
        self.entities.as_ref()
    }
}
