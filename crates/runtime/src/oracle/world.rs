//! Reference world backed by a generated [`MazeGraph`].
//!
//! Implements the three external capabilities the simulation consumes:
//! - [`PathPlanner`]: BFS over open cell edges, bodies glide between cell
//!   centres at a fixed speed when [`PathPlanner::advance`] is called
//! - [`SpatialQuery`]: grid traversal against cell walls plus ray/circle
//!   tests against bodies
//! - [`EntityRegistry`]: tagged bodies keyed by [`EntityId`]
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use game_core::{
    CellCoord, Direction, EntityId, EntityRegistry, EntityTag, LayerMask, MazeGraph, PathPlanner,
    Pose, RayHit, SpatialQuery, Vec2,
};

#[derive(Clone, Debug)]
struct Body {
    tag: EntityTag,
    pose: Pose,
    /// Remaining waypoints, next first.
    path: VecDeque<Vec2>,
}

/// Maze-backed world with movable circular bodies.
pub struct MazeWorld {
    maze: Arc<MazeGraph>,
    cell_size: f32,
    speed: f32,
    body_radius: f32,
    bodies: RwLock<BTreeMap<EntityId, Body>>,
}

impl MazeWorld {
    pub const DEFAULT_BODY_RADIUS: f32 = 0.3;

    /// Creates a world over `maze` with square cells of `cell_size` and
    /// bodies moving `speed` units per second.
    pub fn new(maze: Arc<MazeGraph>, cell_size: f32, speed: f32) -> Self {
        Self {
            maze,
            cell_size,
            speed,
            body_radius: Self::DEFAULT_BODY_RADIUS,
            bodies: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn maze(&self) -> &Arc<MazeGraph> {
        &self.maze
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World-space centre of `coord`.
    pub fn cell_center(&self, coord: CellCoord) -> Vec2 {
        self.maze.cell_center(coord, self.cell_size)
    }

    fn wall_hit(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let mut cell = self.maze.cell_at(origin, self.cell_size)?;
        let cs = self.cell_size;

        let axis = |o: f32, d: f32, c: u32| -> (f32, f32) {
            if d > 0.0 {
                (((c + 1) as f32 * cs - o) / d, cs / d)
            } else if d < 0.0 {
                ((c as f32 * cs - o) / d, cs / -d)
            } else {
                (f32::INFINITY, f32::INFINITY)
            }
        };
        let (mut t_x, delta_x) = axis(origin.x, dir.x, cell.x);
        let (mut t_y, delta_y) = axis(origin.y, dir.y, cell.y);
        let step_x = if dir.x > 0.0 { Direction::East } else { Direction::West };
        let step_y = if dir.y > 0.0 { Direction::North } else { Direction::South };

        loop {
            let (t, side) = if t_x < t_y { (t_x, step_x) } else { (t_y, step_y) };
            if t > max_distance {
                return None;
            }
            let walled = self.maze.cell(cell).is_none_or(|c| c.has_wall(side));
            if walled {
                return Some(t);
            }
            cell = self.maze.neighbor(cell, side)?;
            if side == step_x {
                t_x += delta_x;
            } else {
                t_y += delta_y;
            }
        }
    }

    fn body_hit(
        &self,
        origin: Vec2,
        dir: Vec2,
        max_distance: f32,
        ignore: Option<EntityId>,
        bodies: &BTreeMap<EntityId, Body>,
    ) -> Option<(EntityId, f32)> {
        let r2 = self.body_radius * self.body_radius;
        let mut best: Option<(EntityId, f32)> = None;

        for (&entity, body) in bodies {
            if ignore == Some(entity) {
                continue;
            }
            let m = origin - body.pose.position;
            let c = m.length_squared() - r2;
            let t = if c <= 0.0 {
                // Origin inside this body
                0.0
            } else {
                let b = m.dot(dir);
                let disc = b * b - c;
                if disc < 0.0 {
                    continue;
                }
                let t = -b - disc.sqrt();
                if t < 0.0 || t > max_distance {
                    continue;
                }
                t
            };
            if best.is_none_or(|(_, bt)| t < bt) {
                best = Some((entity, t));
            }
        }
        best
    }
}

impl PathPlanner for MazeWorld {
    fn request_move(&self, agent: EntityId, destination: Vec2) -> bool {
        let Some(goal) = self.maze.cell_at(destination, self.cell_size) else {
            return false;
        };
        let mut bodies = self.bodies.write().unwrap_or_else(PoisonError::into_inner);
        let Some(body) = bodies.get_mut(&agent) else {
            return false;
        };
        let from = self.maze.clamp_to_cell(body.pose.position, self.cell_size);
        let Some(cells) = self.maze.shortest_path(from, goal) else {
            return false;
        };

        body.path = cells
            .into_iter()
            .skip(1)
            .map(|c| self.maze.cell_center(c, self.cell_size))
            .collect();
        body.path.push_back(destination);
        true
    }

    fn remaining_distance(&self, agent: EntityId) -> f32 {
        let bodies = self.bodies.read().unwrap_or_else(PoisonError::into_inner);
        let Some(body) = bodies.get(&agent) else {
            return 0.0;
        };
        let mut cursor = body.pose.position;
        let mut total = 0.0;
        for &waypoint in &body.path {
            total += cursor.distance(waypoint);
            cursor = waypoint;
        }
        total
    }

    fn is_on_navigable_surface(&self, agent: EntityId) -> bool {
        self.pose(agent)
            .is_some_and(|pose| self.maze.cell_at(pose.position, self.cell_size).is_some())
    }

    fn advance(&self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let mut bodies = self.bodies.write().unwrap_or_else(PoisonError::into_inner);
        for body in bodies.values_mut() {
            let mut budget = self.speed * dt;
            while budget > 0.0 {
                let Some(&next) = body.path.front() else {
                    break;
                };
                let offset = next - body.pose.position;
                let distance = offset.length();
                if let Some(heading) = offset.try_normalize() {
                    body.pose.forward = heading;
                }
                if distance <= budget {
                    body.pose.position = next;
                    body.path.pop_front();
                    budget -= distance;
                } else {
                    body.pose.position += offset / distance * budget;
                    budget = 0.0;
                }
            }
        }
    }
}

impl SpatialQuery for MazeWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
        ignore: Option<EntityId>,
    ) -> Option<RayHit> {
        let dir = direction.try_normalize()?;

        let wall = if mask.contains(LayerMask::WALLS) {
            self.wall_hit(origin, dir, max_distance)
        } else {
            None
        };
        let body = if mask.contains(LayerMask::ACTORS) {
            let bodies = self.bodies.read().unwrap_or_else(PoisonError::into_inner);
            self.body_hit(origin, dir, max_distance, ignore, &bodies)
        } else {
            None
        };

        let (entity, distance) = match (wall, body) {
            (Some(w), Some((e, b))) if b < w => (Some(e), b),
            (Some(w), _) => (None, w),
            (None, Some((e, b))) => (Some(e), b),
            (None, None) => return None,
        };
        Some(RayHit {
            entity,
            point: origin + dir * distance,
            distance,
        })
    }
}

impl EntityRegistry for MazeWorld {
    fn register(&self, entity: EntityId, tag: EntityTag, pose: Pose) {
        let mut bodies = self.bodies.write().unwrap_or_else(PoisonError::into_inner);
        bodies.insert(
            entity,
            Body {
                tag,
                pose,
                path: VecDeque::new(),
            },
        );
    }

    fn remove(&self, entity: EntityId) {
        let mut bodies = self.bodies.write().unwrap_or_else(PoisonError::into_inner);
        bodies.remove(&entity);
    }

    fn find_by_tag(&self, tag: EntityTag) -> Option<EntityId> {
        let bodies = self.bodies.read().unwrap_or_else(PoisonError::into_inner);
        bodies
            .iter()
            .find(|(_, body)| body.tag == tag)
            .map(|(&id, _)| id)
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        let bodies = self.bodies.read().unwrap_or_else(PoisonError::into_inner);
        bodies.get(&entity).map(|body| body.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> MazeWorld {
        // 1x5 maze: a straight north-south corridor with every interior wall open
        let maze = MazeGraph::generate(1, 5, 3).unwrap();
        MazeWorld::new(Arc::new(maze), 2.0, 4.0)
    }

    #[test]
    fn request_move_follows_cell_centres() {
        let world = corridor();
        let start = world.cell_center(CellCoord::new(0, 0));
        let goal = world.cell_center(CellCoord::new(0, 4));
        world.register(EntityId(1), EntityTag::Npc, Pose::at(start));

        assert!(world.request_move(EntityId(1), goal));
        assert!((world.remaining_distance(EntityId(1)) - 8.0).abs() < 1e-4);

        world.advance(1.0);
        assert!((world.remaining_distance(EntityId(1)) - 4.0).abs() < 1e-4);
        world.advance(5.0);
        assert_eq!(world.remaining_distance(EntityId(1)), 0.0);
        assert_eq!(world.pose(EntityId(1)).unwrap().position, goal);
    }

    #[test]
    fn rejects_moves_off_the_maze_or_for_unknown_bodies() {
        let world = corridor();
        world.register(EntityId(1), EntityTag::Npc, Pose::at(Vec2::new(1.0, 1.0)));

        assert!(!world.request_move(EntityId(1), Vec2::new(50.0, 1.0)));
        assert!(!world.request_move(EntityId(9), Vec2::new(1.0, 3.0)));
        assert!(world.is_on_navigable_surface(EntityId(1)));
        assert!(!world.is_on_navigable_surface(EntityId(9)));
    }

    #[test]
    fn raycast_hits_body_before_boundary() {
        let world = corridor();
        world.register(EntityId::PLAYER, EntityTag::Player, Pose::at(Vec2::new(1.0, 7.0)));
        world.register(EntityId(1), EntityTag::Npc, Pose::at(Vec2::new(1.0, 1.0)));

        let hit = world
            .raycast(Vec2::new(1.0, 1.0), Vec2::Y, 20.0, LayerMask::all(), Some(EntityId(1)))
            .unwrap();
        assert_eq!(hit.entity, Some(EntityId::PLAYER));
        assert!((hit.distance - (6.0 - MazeWorld::DEFAULT_BODY_RADIUS)).abs() < 1e-4);

        let hit = world
            .raycast(Vec2::new(1.0, 1.0), Vec2::Y, 20.0, LayerMask::WALLS, None)
            .unwrap();
        assert_eq!(hit.entity, None);
        assert!((hit.distance - 9.0).abs() < 1e-4);
    }

    #[test]
    fn raycast_hits_overlapping_body_other_than_caster() {
        let world = corridor();
        world.register(EntityId::PLAYER, EntityTag::Player, Pose::at(Vec2::new(1.0, 1.2)));
        world.register(EntityId(1), EntityTag::Npc, Pose::at(Vec2::new(1.0, 1.0)));

        let hit = world
            .raycast(Vec2::new(1.0, 1.0), Vec2::Y, 20.0, LayerMask::all(), Some(EntityId(1)))
            .unwrap();
        assert_eq!(hit.entity, Some(EntityId::PLAYER));
        assert_eq!(hit.distance, 0.0);

        // Without a caster to skip, the NPC's own collider is hit first
        let hit = world
            .raycast(Vec2::new(1.0, 1.0), Vec2::Y, 20.0, LayerMask::all(), None)
            .unwrap();
        assert_eq!(hit.entity, Some(EntityId(1)));
    }

    #[test]
    fn raycast_stops_at_side_walls() {
        let world = corridor();
        let hit = world
            .raycast(Vec2::new(1.0, 3.0), Vec2::X, 20.0, LayerMask::all(), None)
            .unwrap();
        assert_eq!(hit.entity, None);
        assert!((hit.distance - 1.0).abs() < 1e-4);
        assert!(
            world
                .raycast(Vec2::new(1.0, 3.0), Vec2::X, 0.5, LayerMask::all(), None)
                .is_none()
        );
    }

    #[test]
    fn find_by_tag_prefers_lowest_id() {
        let world = corridor();
        world.register(EntityId(4), EntityTag::Npc, Pose::default());
        world.register(EntityId(2), EntityTag::Npc, Pose::default());
        assert_eq!(world.find_by_tag(EntityTag::Npc), Some(EntityId(2)));
        assert_eq!(world.find_by_tag(EntityTag::Player), None);

        world.remove(EntityId(2));
        assert_eq!(world.find_by_tag(EntityTag::Npc), Some(EntityId(4)));
    }
}
