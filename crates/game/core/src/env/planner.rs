use glam::Vec2;

use crate::state::EntityId;

/// Navigation service that moves agents toward destinations.
///
/// Pathfinding internals are owned by the host; the simulation only issues
/// move requests and polls progress.
pub trait PathPlanner: Send + Sync {
    /// Requests that `agent` travel to `destination`.
    ///
    /// Returns `false` if the request was rejected (unknown agent or a
    /// destination off the navigable surface).
    fn request_move(&self, agent: EntityId, destination: Vec2) -> bool;

    /// Path distance still to travel for the current request.
    ///
    /// `0.0` once the destination is reached or when no request is active.
    fn remaining_distance(&self, agent: EntityId) -> f32;

    /// Returns true if `agent` currently stands on the navigable surface.
    fn is_on_navigable_surface(&self, agent: EntityId) -> bool;

    /// Advances simulated movement by `dt` seconds.
    ///
    /// Engine-backed planners move agents on their own and keep the default.
    fn advance(&self, _dt: f32) {}
}
