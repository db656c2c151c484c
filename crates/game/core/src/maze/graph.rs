use std::collections::VecDeque;

use arrayvec::ArrayVec;
use glam::Vec2;
use sha2::{Digest, Sha256};

use super::cell::{CellCoord, Direction, MazeCell};

/// Generated maze: a grid of cells whose open passages form a spanning tree.
///
/// Constructed only by [`MazeGraph::generate`] / [`MazeGraph::generate_with`];
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeGraph {
    width: u32,
    height: u32,
    cells: Vec<MazeCell>,
    start: CellCoord,
    end: CellCoord,
}

impl MazeGraph {
    pub(super) fn from_parts(
        width: u32,
        height: u32,
        cells: Vec<MazeCell>,
        start: CellCoord,
        end: CellCoord,
    ) -> Self {
        Self {
            width,
            height,
            cells,
            start,
            end,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Seed cell of the carve.
    pub fn start(&self) -> CellCoord {
        self.start
    }

    /// Last cell carved into before the stack emptied.
    pub fn end(&self) -> CellCoord {
        self.end
    }

    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&MazeCell> {
        self.index(coord).and_then(|i| self.cells.get(i))
    }

    pub(super) fn cells_mut(&mut self) -> &mut [MazeCell] {
        &mut self.cells
    }

    pub(super) fn set_end(&mut self, end: CellCoord) {
        self.end = end;
    }

    pub(super) fn index(&self, coord: CellCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Grid neighbour of `coord` in `direction`, bounds-checked.
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let x = u32::try_from(i64::from(coord.x) + dx).ok()?;
        let y = u32::try_from(i64::from(coord.y) + dy).ok()?;
        let next = CellCoord::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Returns true if `a` and `b` are adjacent and no wall separates them.
    pub fn is_open(&self, a: CellCoord, b: CellCoord) -> bool {
        let Some(direction) = a.direction_to(b) else {
            return false;
        };
        match (self.cell(a), self.cell(b)) {
            (Some(from), Some(to)) => {
                !from.has_wall(direction) && !to.has_wall(direction.opposite())
            }
            _ => false,
        }
    }

    /// Neighbours reachable from `coord` without crossing a wall.
    pub fn open_neighbors(&self, coord: CellCoord) -> ArrayVec<CellCoord, 4> {
        let mut out = ArrayVec::new();
        let Some(cell) = self.cell(coord) else {
            return out;
        };
        for direction in Direction::ALL {
            if cell.has_wall(direction) {
                continue;
            }
            if let Some(next) = self.neighbor(coord, direction) {
                out.push(next);
            }
        }
        out
    }

    /// Number of open edges between adjacent cell pairs.
    ///
    /// Only north and east sides are counted so each edge is seen once.
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::North, Direction::East]
                    .into_iter()
                    .filter(|&d| {
                        self.neighbor(cell.coord, d)
                            .is_some_and(|n| self.is_open(cell.coord, n))
                    })
                    .count()
            })
            .sum()
    }

    /// Breadth-first distances (in cells) from `origin`; `None` for unreachable.
    pub fn distances_from(&self, origin: CellCoord) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.cells.len()];
        let Some(start) = self.index(origin) else {
            return dist;
        };
        dist[start] = Some(0);

        let mut queue = VecDeque::from([(origin, 0u32)]);
        while let Some((coord, d)) = queue.pop_front() {
            for next in self.open_neighbors(coord) {
                if let Some(i) = self.index(next)
                    && dist[i].is_none()
                {
                    dist[i] = Some(d + 1);
                    queue.push_back((next, d + 1));
                }
            }
        }
        dist
    }

    /// Cells on the unique passage from `from` to `to`, both inclusive.
    pub fn shortest_path(&self, from: CellCoord, to: CellCoord) -> Option<Vec<CellCoord>> {
        let origin = self.index(from)?;
        let target = self.index(to)?;

        let mut parent: Vec<Option<CellCoord>> = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        seen[origin] = true;

        let mut queue = VecDeque::from([from]);
        while let Some(coord) = queue.pop_front() {
            if coord == to {
                break;
            }
            for next in self.open_neighbors(coord) {
                if let Some(i) = self.index(next)
                    && !seen[i]
                {
                    seen[i] = true;
                    parent[i] = Some(coord);
                    queue.push_back(next);
                }
            }
        }

        if !seen[target] {
            return None;
        }

        let mut path = vec![to];
        let mut cursor = to;
        while cursor != from {
            cursor = parent[self.index(cursor)?]?;
            path.push(cursor);
        }
        path.reverse();
        Some(path)
    }

    /// World-space centre of `coord` for square cells of side `cell_size`.
    pub fn cell_center(&self, coord: CellCoord, cell_size: f32) -> Vec2 {
        Vec2::new(
            (coord.x as f32 + 0.5) * cell_size,
            (coord.y as f32 + 0.5) * cell_size,
        )
    }

    /// Cell containing world point `point`, if inside the maze.
    pub fn cell_at(&self, point: Vec2, cell_size: f32) -> Option<CellCoord> {
        if cell_size <= 0.0 || !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let coord = CellCoord::new(
            (point.x / cell_size).floor() as u32,
            (point.y / cell_size).floor() as u32,
        );
        self.contains(coord).then_some(coord)
    }

    /// Nearest cell to `point`, clamping points outside the grid to its edge.
    pub fn clamp_to_cell(&self, point: Vec2, cell_size: f32) -> CellCoord {
        let max = Vec2::new(self.width as f32, self.height as f32) * cell_size;
        let clamped = point.clamp(Vec2::ZERO, max - Vec2::splat(cell_size * 0.5));
        self.cell_at(clamped, cell_size).unwrap_or(self.start)
    }

    /// SHA-256 digest of dimensions, wall layout and start/end cells.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        for cell in &self.cells {
            hasher.update([cell.walls.bits()]);
        }
        for coord in [self.start, self.end] {
            hasher.update(coord.x.to_le_bytes());
            hasher.update(coord.y.to_le_bytes());
        }
        hasher.finalize().into()
    }
}
