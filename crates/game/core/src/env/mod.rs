//! Traits describing the external capabilities the simulation consumes.
//!
//! The host engine owns path planning, spatial queries and the entity table.
//! The [`Env`] aggregate bundles borrowed implementations so considerations
//! can query them without hard coupling to concrete types. Any capability may
//! be absent (e.g. during scene warm-up); accessors then report
//! [`CapabilityError::MissingCapability`].
mod entities;
mod error;
mod planner;
mod rng;
mod spatial;

pub use entities::{EntityRegistry, EntityTag};
pub use error::{Capability, CapabilityError};
pub use planner::PathPlanner;
pub use rng::{RngSource, derive_seed, seeded_rng};
pub use spatial::{LayerMask, RayHit, SpatialQuery};

/// Aggregates the borrowed capabilities an agent's perception needs.
pub struct Env<'a, P, S, E>
where
    P: PathPlanner + ?Sized,
    S: SpatialQuery + ?Sized,
    E: EntityRegistry + ?Sized,
{
    planner: Option<&'a P>,
    spatial: Option<&'a S>,
    entities: Option<&'a E>,
}

impl<P, S, E> Clone for Env<'_, P, S, E>
where
    P: PathPlanner + ?Sized,
    S: SpatialQuery + ?Sized,
    E: EntityRegistry + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, S, E> Copy for Env<'_, P, S, E>
where
    P: PathPlanner + ?Sized,
    S: SpatialQuery + ?Sized,
    E: EntityRegistry + ?Sized,
{
}

pub type GameEnv<'a> =
    Env<'a, dyn PathPlanner + 'a, dyn SpatialQuery + 'a, dyn EntityRegistry + 'a>;

impl<'a> GameEnv<'a> {
    /// Borrows every capability from one world object.
    pub fn from_world<W>(world: &'a W) -> Self
    where
        W: PathPlanner + SpatialQuery + EntityRegistry + 'a,
    {
        Self::with_all(world, world, world)
    }
}

impl<'a, P, S, E> Env<'a, P, S, E>
where
    P: PathPlanner + ?Sized,
    S: SpatialQuery + ?Sized,
    E: EntityRegistry + ?Sized,
{
    pub fn new(planner: Option<&'a P>, spatial: Option<&'a S>, entities: Option<&'a E>) -> Self {
        Self {
            planner,
            spatial,
            entities,
        }
    }

    pub fn with_all(planner: &'a P, spatial: &'a S, entities: &'a E) -> Self {
        Self::new(Some(planner), Some(spatial), Some(entities))
    }

    pub fn empty() -> Self {
        Self {
            planner: None,
            spatial: None,
            entities: None,
        }
    }

    /// Returns the path planner, or an error if not available.
    pub fn planner(&self) -> Result<&'a P, CapabilityError> {
        self.planner
            .ok_or(CapabilityError::MissingCapability(Capability::PathPlanner))
    }

    /// Returns the spatial query service, or an error if not available.
    pub fn spatial(&self) -> Result<&'a S, CapabilityError> {
        self.spatial
            .ok_or(CapabilityError::MissingCapability(Capability::SpatialQuery))
    }

    /// Returns the entity registry, or an error if not available.
    pub fn entities(&self) -> Result<&'a E, CapabilityError> {
        self.entities
            .ok_or(CapabilityError::MissingCapability(Capability::EntityRegistry))
    }
}
