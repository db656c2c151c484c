use arrayvec::ArrayVec;

use super::cell::{CellCoord, Direction, MazeCell};
use super::error::MazeError;
use super::graph::MazeGraph;
use crate::env::{RngSource, seeded_rng};

impl MazeGraph {
    /// Generates a perfect maze with the session generator for `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimension`] if either dimension is not
    /// positive; nothing is allocated in that case.
    pub fn generate(width: i32, height: i32, seed: u64) -> Result<Self, MazeError> {
        let mut rng = seeded_rng(seed);
        Self::generate_with(width, height, &mut rng)
    }

    /// Randomized iterative depth-first carve driven by `rng`.
    ///
    /// Neighbour candidates are collected in [`Direction::ALL`] order, so the
    /// layout depends only on the random stream.
    pub fn generate_with<R>(width: i32, height: i32, rng: &mut R) -> Result<Self, MazeError>
    where
        R: RngSource + ?Sized,
    {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimension {
                width: i64::from(width),
                height: i64::from(height),
            });
        }
        let (w, h) = (width as u32, height as u32);

        let mut cells = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            for x in 0..w {
                cells.push(MazeCell::sealed(CellCoord::new(x, y)));
            }
        }

        let start = CellCoord::new(
            rng.next_int(0, width) as u32,
            rng.next_int(0, height) as u32,
        );
        let mut graph = MazeGraph::from_parts(w, h, cells, start, start);

        let mut end = start;
        let mut stack = vec![start];
        graph.cell_mut(start).visited = true;

        while let Some(&current) = stack.last() {
            let candidates: ArrayVec<(Direction, CellCoord), 4> = Direction::ALL
                .into_iter()
                .filter_map(|d| graph.neighbor(current, d).map(|n| (d, n)))
                .filter(|&(_, n)| graph.cell(n).is_some_and(|c| !c.visited))
                .collect();

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let (direction, next) = candidates[rng.next_index(candidates.len())];
            graph.cell_mut(current).walls.remove(direction.wall());
            let neighbor = graph.cell_mut(next);
            neighbor.walls.remove(direction.opposite().wall());
            neighbor.visited = true;

            stack.push(next);
            end = next;
        }

        graph.set_end(end);
        Ok(graph)
    }

    fn cell_mut(&mut self, coord: CellCoord) -> &mut MazeCell {
        // Only called with coordinates produced by `neighbor` or the start pick.
        let index = self.index(coord).unwrap_or_default();
        &mut self.cells_mut()[index]
    }
}
