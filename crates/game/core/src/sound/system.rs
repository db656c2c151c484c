use std::collections::BTreeMap;

use glam::Vec2;

use super::emitter::{SoundEmitter, sample_intensity};

/// Handle to a receiver registered with a [`SoundPropagationSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverId(pub u32);

/// Hearing state of one agent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundReceiver {
    pub position: Vec2,
    /// Intensity sampled by the latest propagation; never accumulated.
    pub intensity: f32,
    /// Source of the latest emission, retained across silent ticks.
    pub last_heard_position: Option<Vec2>,
}

/// Registry of receivers owned by one simulation session.
#[derive(Clone, Debug, Default)]
pub struct SoundPropagationSystem {
    receivers: BTreeMap<ReceiverId, SoundReceiver>,
    next_id: u32,
}

impl SoundPropagationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, position: Vec2) -> ReceiverId {
        let id = ReceiverId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.receivers.insert(
            id,
            SoundReceiver {
                position,
                ..SoundReceiver::default()
            },
        );
        id
    }

    pub fn unregister(&mut self, id: ReceiverId) -> Option<SoundReceiver> {
        self.receivers.remove(&id)
    }

    /// Moves a receiver; returns false if `id` is not registered.
    pub fn set_position(&mut self, id: ReceiverId, position: Vec2) -> bool {
        match self.receivers.get_mut(&id) {
            Some(receiver) => {
                receiver.position = position;
                true
            }
            None => false,
        }
    }

    pub fn receiver(&self, id: ReceiverId) -> Option<&SoundReceiver> {
        self.receivers.get(&id)
    }

    pub fn receivers(&self) -> impl Iterator<Item = (ReceiverId, &SoundReceiver)> {
        self.receivers.iter().map(|(id, r)| (*id, r))
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Runs one propagation tick over `emitters` and returns how many played.
    ///
    /// Every receiver's intensity starts the tick at zero. Each playing
    /// emitter, in slice order, then overwrites the intensity and the last
    /// heard position of every receiver.
    pub fn propagate(&mut self, emitters: &[SoundEmitter]) -> usize {
        for receiver in self.receivers.values_mut() {
            receiver.intensity = 0.0;
        }

        let mut played = 0;
        for emitter in emitters.iter().filter(|e| e.playing) {
            played += 1;
            for receiver in self.receivers.values_mut() {
                receiver.intensity = sample_intensity(emitter, receiver.position);
                receiver.last_heard_position = Some(emitter.position);
            }
        }
        played
    }
}
