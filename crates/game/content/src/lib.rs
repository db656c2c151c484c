//! Data-driven content definitions and loaders.
//!
//! This crate reads the tunable parts of a session from data files:
//! - Game configuration (TOML): AI constants, agent defaults, action timings,
//!   sound presets
//! - Brain presets (RON): which considerations gate which NPC action
//!
//! Content is handed to the runtime at build time and never appears in agent
//! state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BrainCatalog, BrainLoader, ConfigLoader, ContentFactory, LoadResult};
