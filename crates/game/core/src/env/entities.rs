use crate::state::{EntityId, Pose};

/// Tag used to look entities up by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityTag {
    Player,
    Npc,
}

/// Entity table of the host world.
pub trait EntityRegistry: Send + Sync {
    /// Adds (or replaces) an entity with the given tag and pose.
    fn register(&self, entity: EntityId, tag: EntityTag, pose: Pose);

    /// Removes an entity; unknown ids are ignored.
    fn remove(&self, entity: EntityId);

    /// First entity carrying `tag`, lowest id first.
    fn find_by_tag(&self, tag: EntityTag) -> Option<EntityId>;

    /// Current pose of `entity`.
    fn pose(&self, entity: EntityId) -> Option<Pose>;
}
