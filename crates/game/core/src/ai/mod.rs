//! Utility-AI vocabulary of the NPCs.
//!
//! Considerations read an [`AgentView`] (the agent's vitals, pose, hearing and
//! borrowed world capabilities) and are combined per action by the
//! `utility-ai` crate. Presets describe which considerations gate which
//! action and can be loaded from data.
mod action;
mod consideration;
mod preset;
mod view;

pub use action::ActionKind;
pub use consideration::ConsiderationKind;
pub use preset::{ActionSpec, BrainPreset, build_reasoner};
pub use view::AgentView;
