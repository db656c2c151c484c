//! Sound emitters, receivers and the session-owned propagation registry.
//!
//! Propagation is sampled once per simulation tick. A receiver's intensity is
//! rewritten by every playing emitter in turn, so with several simultaneous
//! emitters the last one processed decides the value; it is not summed.
mod emitter;
mod error;
mod system;

pub use emitter::{SoundEmitter, SoundProfile, sample_intensity};
pub use error::SoundError;
pub use system::{ReceiverId, SoundPropagationSystem, SoundReceiver};
