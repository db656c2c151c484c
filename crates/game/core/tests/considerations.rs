use game_core::{
    ActionKind, AgentState, AgentTemplate, AgentView, AiTuning, BrainPreset, ConsiderationKind,
    EntityId, EntityRegistry, EntityTag, Env, GameEnv, LayerMask, PathPlanner, Pose, RayHit,
    ReceiverId, SightProfile, SoundReceiver, SpatialQuery, Vec2, build_reasoner,
};
use proptest::prelude::*;
use strum::IntoEnumIterator;
use utility_ai::{Choice, evaluate};

/// Fixed world with an optional player and a flag for line of sight.
struct Scene {
    player: Option<Pose>,
    occluded: bool,
}

impl Scene {
    fn empty() -> Self {
        Self {
            player: None,
            occluded: false,
        }
    }

    fn player_at(x: f32, y: f32) -> Self {
        Self {
            player: Some(Pose::at(Vec2::new(x, y))),
            occluded: false,
        }
    }

    fn occluded(mut self) -> Self {
        self.occluded = true;
        self
    }
}

impl PathPlanner for Scene {
    fn request_move(&self, _agent: EntityId, _destination: Vec2) -> bool {
        true
    }

    fn remaining_distance(&self, _agent: EntityId) -> f32 {
        0.0
    }

    fn is_on_navigable_surface(&self, _agent: EntityId) -> bool {
        true
    }
}

impl SpatialQuery for Scene {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max: f32,
        _mask: LayerMask,
        _ignore: Option<EntityId>,
    ) -> Option<RayHit> {
        let player = self.player?;
        let distance = origin.distance(player.position);
        if distance > max {
            return None;
        }
        if self.occluded {
            return Some(RayHit {
                entity: None,
                point: origin + direction.normalize() * distance * 0.5,
                distance: distance * 0.5,
            });
        }
        Some(RayHit {
            entity: Some(EntityId::PLAYER),
            point: player.position,
            distance,
        })
    }
}

impl EntityRegistry for Scene {
    fn register(&self, _entity: EntityId, _tag: EntityTag, _pose: Pose) {}

    fn remove(&self, _entity: EntityId) {}

    fn find_by_tag(&self, tag: EntityTag) -> Option<EntityId> {
        (tag == EntityTag::Player && self.player.is_some()).then_some(EntityId::PLAYER)
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        entity.is_player().then_some(self.player).flatten()
    }
}

fn agent(energy: f32) -> AgentState {
    let template = AgentTemplate {
        max_energy: 100.0,
        energy,
        health: 100.0,
        sight: SightProfile::new(10.0, 90.0),
    };
    AgentState::new(EntityId(1), &template, ReceiverId(0))
}

fn hearing(intensity: f32) -> SoundReceiver {
    SoundReceiver {
        position: Vec2::ZERO,
        intensity,
        last_heard_position: None,
    }
}

fn view<'a>(
    scene: &'a Scene,
    agent: &'a AgentState,
    intensity: f32,
    tuning: &'a AiTuning,
) -> AgentView<'a> {
    let env = GameEnv::from_world(scene);
    AgentView::new(agent, Pose::at(Vec2::ZERO), hearing(intensity), env, tuning)
}

fn score(kind: ConsiderationKind, view: &AgentView<'_>) -> f64 {
    evaluate(&kind, view)
}

#[test]
fn sight_requires_range_cone_and_clear_ray() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);

    let ahead = Scene::player_at(0.0, 5.0);
    let v = view(&ahead, &npc, 0.0, &tuning);
    assert_eq!(score(ConsiderationKind::PlayerOnSight, &v), 1.0);
    assert_eq!(score(ConsiderationKind::PlayerNotOnSight, &v), tuning.sight_epsilon);

    let behind = Scene::player_at(0.0, -5.0);
    let v = view(&behind, &npc, 0.0, &tuning);
    assert_eq!(score(ConsiderationKind::PlayerOnSight, &v), tuning.sight_epsilon);
    assert_eq!(score(ConsiderationKind::PlayerNotOnSight, &v), 1.0);

    let far = Scene::player_at(0.0, 15.0);
    let v = view(&far, &npc, 0.0, &tuning);
    assert_eq!(score(ConsiderationKind::PlayerOnSight, &v), tuning.sight_epsilon);

    let walled = Scene::player_at(0.0, 5.0).occluded();
    let v = view(&walled, &npc, 0.0, &tuning);
    assert_eq!(score(ConsiderationKind::PlayerOnSight, &v), tuning.sight_epsilon);
}

#[test]
fn missing_player_uses_safe_defaults() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let empty = Scene::empty();
    let v = view(&empty, &npc, 0.0, &tuning);

    assert_eq!(score(ConsiderationKind::PlayerOnSight, &v), 0.0);
    assert_eq!(score(ConsiderationKind::CloseToPlayer, &v), 0.0);
    assert_eq!(score(ConsiderationKind::PlayerNotOnSight, &v), 1.0);
    assert_eq!(score(ConsiderationKind::NotCloseToPlayer, &v), 1.0);
}

#[test]
fn missing_capabilities_use_safe_defaults() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let v = AgentView::new(&npc, Pose::default(), hearing(0.0), Env::empty(), &tuning);

    assert_eq!(score(ConsiderationKind::PlayerOnSight, &v), 0.0);
    assert_eq!(score(ConsiderationKind::PlayerNotOnSight, &v), 1.0);
    assert_eq!(score(ConsiderationKind::NotCloseToPlayer, &v), 1.0);
}

#[test]
fn noise_threshold_is_exclusive_for_heard() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let scene = Scene::empty();

    let quiet = view(&scene, &npc, 0.2, &tuning);
    assert_eq!(score(ConsiderationKind::NoiseHeard, &quiet), 0.0);
    assert_eq!(score(ConsiderationKind::NoNoiseHeard, &quiet), 1.0);

    let loud = view(&scene, &npc, 0.7, &tuning);
    assert!((score(ConsiderationKind::NoiseHeard, &loud) - 0.7).abs() < 1e-6);
    assert_eq!(score(ConsiderationKind::NoNoiseHeard, &loud), 0.0);
}

#[test]
fn energy_scores_are_ratio_and_complement() {
    let tuning = AiTuning::default();
    let npc = agent(25.0);
    let scene = Scene::empty();
    let v = view(&scene, &npc, 0.0, &tuning);

    assert!((score(ConsiderationKind::HasEnergy, &v) - 0.25).abs() < 1e-9);
    assert!((score(ConsiderationKind::HasNoEnergy, &v) - 0.75).abs() < 1e-9);
}

#[test]
fn not_close_keeps_offset_formula() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let scene = Scene::player_at(0.0, 8.0);
    let v = view(&scene, &npc, 0.0, &tuning);

    // x = 0.8: close = 0.2, not close = 1 - (1.3 - 0.8) = 0.5
    assert!((score(ConsiderationKind::CloseToPlayer, &v) - 0.2).abs() < 1e-6);
    assert!((score(ConsiderationKind::NotCloseToPlayer, &v) - 0.5).abs() < 1e-6);
}

#[test]
fn wander_beats_attack_when_alone_and_rested() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let scene = Scene::player_at(0.0, -40.0);
    let v = view(&scene, &npc, 0.0, &tuning);

    let mut reasoner = build_reasoner(&BrainPreset::stalker());
    let decision = reasoner.decide(&v).unwrap();

    assert_eq!(reasoner.payload(decision.index), Some(&ActionKind::Wander));
    assert_eq!(decision.score, 1.0);
    let attack = reasoner
        .last_scores()
        .find(|(kind, _)| **kind == ActionKind::AttackPlayer)
        .map(|(_, s)| s)
        .unwrap();
    assert!(attack < decision.score);
}

#[test]
fn chases_and_attacks_a_visible_player() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let preset = BrainPreset::stalker();

    let mid = Scene::player_at(0.0, 9.0);
    let mut reasoner = build_reasoner(&preset);
    let decision = reasoner.decide(&view(&mid, &npc, 0.0, &tuning)).unwrap();
    assert_eq!(reasoner.payload(decision.index), Some(&ActionKind::FollowPlayer));

    let close = Scene::player_at(0.0, 1.0);
    let decision = reasoner.decide(&view(&close, &npc, 0.0, &tuning)).unwrap();
    assert_eq!(reasoner.payload(decision.index), Some(&ActionKind::AttackPlayer));
}

#[test]
fn exhausted_agent_rests_and_noise_is_investigated() {
    let tuning = AiTuning::default();
    let scene = Scene::empty();
    let mut reasoner = build_reasoner(&BrainPreset::stalker());

    let tired = agent(0.0);
    let decision = reasoner.decide(&view(&scene, &tired, 0.0, &tuning)).unwrap();
    assert_eq!(reasoner.payload(decision.index), Some(&ActionKind::Rest));

    let rested = agent(100.0);
    let decision = reasoner.decide(&view(&scene, &rested, 0.9, &tuning)).unwrap();
    assert_eq!(reasoner.payload(decision.index), Some(&ActionKind::GoToSoundPosition));
}

#[test]
fn zero_consideration_zeroes_the_action() {
    let tuning = AiTuning::default();
    let npc = agent(100.0);
    let scene = Scene::empty();
    let v = view(&scene, &npc, 0.0, &tuning);

    let mut choice = Choice::new(
        ActionKind::GoToSoundPosition,
        vec![ConsiderationKind::HasEnergy, ConsiderationKind::NoiseHeard],
    );
    assert_eq!(choice.evaluate(&v), 0.0);
}

proptest! {
    #[test]
    fn every_consideration_stays_in_unit_range(
        energy in -50.0f32..200.0,
        intensity in -1.0f32..5.0,
        px in -50.0f32..50.0,
        py in -50.0f32..50.0,
        facing in -3.2f32..3.2,
        range in 0.0f32..30.0,
        angle in 0.0f32..360.0,
        occluded in any::<bool>(),
    ) {
        let tuning = AiTuning::default();
        let template = AgentTemplate {
            max_energy: 100.0,
            energy,
            health: 100.0,
            sight: SightProfile::new(range, angle),
        };
        let npc = AgentState::new(EntityId(3), &template, ReceiverId(1));
        let mut scene = Scene::player_at(px, py);
        scene.occluded = occluded;
        let env = GameEnv::from_world(&scene);
        let pose = Pose::new(Vec2::ZERO, Vec2::from_angle(facing));
        let v = AgentView::new(&npc, pose, hearing(intensity), env, &tuning);

        for kind in ConsiderationKind::iter() {
            let clamped = evaluate(&kind, &v);
            prop_assert!((0.0..=1.0).contains(&clamped), "{kind} scored {clamped}");
        }
    }
}
