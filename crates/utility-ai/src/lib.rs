//! Lightweight utility AI scoring library.
//!
//! This library provides a minimal, deterministic utility-AI core: candidate
//! choices are scored by multiplying the outputs of their considerations and
//! the best-scoring choice wins.
//!
//! - **Normalized inputs**: Every consideration output is clamped to `[0, 1]`
//!   by the framework, never by the consideration itself
//! - **Compensated product**: Choices with many considerations are not
//!   penalized relative to choices with few
//! - **Zero pruning**: A product that reaches exactly `0` stops evaluation
//! - **Stable selection**: Ties resolve to the first choice in list order
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Consideration`]: Core trait for all scoring inputs
//! - [`Choice`]: A payload (usually an action identifier) plus its considerations
//! - [`Reasoner`]: An ordered set of choices with argmax selection
//! - [`score`]: The clamping and compensation formulas

pub mod choice;
pub mod consideration;
pub mod reasoner;
pub mod score;

// Re-export core types for ergonomic API
pub use choice::Choice;
pub use consideration::{Consideration, FnConsideration, evaluate};
pub use reasoner::{Decision, Reasoner};
pub use score::{clamp_score, compensate};
