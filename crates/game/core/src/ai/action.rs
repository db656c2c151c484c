/// Behaviours an agent can commit to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Walk to a random reachable point nearby.
    Wander,
    /// Chase the player while keeping it in sight.
    FollowPlayer,
    /// Investigate the last heard sound.
    GoToSoundPosition,
    /// Strike the player at close range.
    AttackPlayer,
    /// Stand still and recover energy.
    Rest,
}

impl ActionKind {
    /// Returns true if the action needs a sound target captured at commit time.
    pub const fn needs_sound_target(self) -> bool {
        matches!(self, Self::GoToSoundPosition)
    }
}
