use utility_ai::{Choice, Reasoner};

use super::action::ActionKind;
use super::consideration::ConsiderationKind;

/// One action together with the considerations that gate it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSpec {
    pub action: ActionKind,
    pub considerations: Vec<ConsiderationKind>,
}

impl ActionSpec {
    pub fn new(action: ActionKind, considerations: impl Into<Vec<ConsiderationKind>>) -> Self {
        Self {
            action,
            considerations: considerations.into(),
        }
    }
}

/// Named, ordered set of actions an agent chooses between.
///
/// List order breaks ties, so the first action wins among equal scores.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrainPreset {
    pub name: String,
    pub actions: Vec<ActionSpec>,
}

impl BrainPreset {
    pub const STALKER: &'static str = "stalker";

    /// The default NPC: wanders, investigates noises, chases and attacks the
    /// player, and rests when exhausted.
    pub fn stalker() -> Self {
        use ActionKind::*;
        use ConsiderationKind::*;

        Self {
            name: Self::STALKER.to_owned(),
            actions: vec![
                ActionSpec::new(Wander, [HasEnergy, NoNoiseHeard, PlayerNotOnSight]),
                ActionSpec::new(FollowPlayer, [PlayerOnSight, NotCloseToPlayer, HasEnergy]),
                ActionSpec::new(GoToSoundPosition, [NoiseHeard, PlayerNotOnSight]),
                ActionSpec::new(AttackPlayer, [PlayerOnSight, CloseToPlayer]),
                ActionSpec::new(Rest, [HasNoEnergy, PlayerNotOnSight, NoNoiseHeard]),
            ],
        }
    }
}

impl Default for BrainPreset {
    fn default() -> Self {
        Self::stalker()
    }
}

/// Builds the scoring reasoner for `preset`, preserving action order.
pub fn build_reasoner(preset: &BrainPreset) -> Reasoner<ActionKind, ConsiderationKind> {
    Reasoner::new(
        preset
            .actions
            .iter()
            .map(|spec| Choice::new(spec.action, spec.considerations.clone()))
            .collect(),
    )
}
