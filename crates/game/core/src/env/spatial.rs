use glam::Vec2;

use crate::state::EntityId;

bitflags::bitflags! {
    /// Layers a raycast may collide with.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayerMask: u8 {
        /// Static maze geometry.
        const WALLS = 0b01;
        /// Player and NPC bodies.
        const ACTORS = 0b10;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::all()
    }
}

/// First collider struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Entity owning the collider; `None` for static geometry.
    pub entity: Option<EntityId>,
    pub point: Vec2,
    pub distance: f32,
}

/// Physics-style ray queries against the world.
pub trait SpatialQuery: Send + Sync {
    /// Casts a ray from `origin` along `direction` up to `max_distance`.
    ///
    /// `direction` need not be normalized. The collider of `ignore`, usually
    /// the caster, is skipped; any other collider containing `origin` is hit
    /// at distance zero.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
        ignore: Option<EntityId>,
    ) -> Option<RayHit>;
}
