//! Perfect maze generation and topology queries.
//!
//! A [`MazeGraph`] is carved once per level by a randomized depth-first
//! search and is read-only afterwards. Its open passages always form a
//! spanning tree over the grid: `width * height - 1` open edges, every cell
//! reachable from every other, no cycles.
mod cell;
mod error;
mod generate;
mod graph;

pub use cell::{CellCoord, Direction, MazeCell, Walls};
pub use error::MazeError;
pub use graph::MazeGraph;
