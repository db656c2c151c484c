use std::time::Duration;

use game_core::{ActionKind, CellCoord, EntityId, Pose, SoundEmitter, SoundProfile, Vec2};
use runtime::{
    ActionOutcome, AgentSpawn, BrainEvent, BrainState, CombatEvent, Event, Runtime, RuntimeError,
    SoundEvent, Topic,
};

const CELL: f32 = 2.0;

/// A 1x4 maze is always a straight corridor along +Y.
async fn corridor() -> Runtime {
    Runtime::builder()
        .seed(7)
        .maze_size(1, 4)
        .build()
        .await
        .expect("corridor runtime should build")
}

fn center(runtime: &Runtime, y: u32) -> Vec2 {
    runtime
        .handle()
        .maze()
        .cell_center(CellCoord::new(0, y), CELL)
}

fn loud(position: Vec2) -> SoundEmitter {
    SoundEmitter::new(
        position,
        SoundProfile {
            radius: 20.0,
            intensity: 1.0,
            decay: 1.0,
            decay_delay: 1.0,
        },
    )
    .expect("valid emitter")
}

#[tokio::test(start_paused = true)]
async fn idle_agent_wanders_with_full_score() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();

    let report = runtime.step().await.unwrap();
    assert_eq!(report.committed, vec![(agent, ActionKind::Wander, 1.0)]);
    assert_eq!(report.agents, 1);

    let snapshot = handle.agent(agent).await.unwrap();
    assert!(matches!(
        snapshot.brain,
        BrainState::Executing {
            action: ActionKind::Wander,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn executing_agent_does_not_decide_again() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    // Attacking holds the task for the whole cooldown.
    handle
        .place_player(Pose::at(center(&runtime, 1)))
        .await
        .unwrap();
    handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();

    assert_eq!(runtime.step().await.unwrap().committed.len(), 1);
    assert!(runtime.step().await.unwrap().committed.is_empty());
}

#[tokio::test(start_paused = true)]
async fn finished_wander_is_reported_and_replaced() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();
    runtime.step().await.unwrap();

    // Longer than the maximum travel time of a wander leg.
    tokio::time::sleep(Duration::from_secs(25)).await;

    let report = runtime.step().await.unwrap();
    assert_eq!(report.completed.len(), 1);
    let (id, action, _) = report.completed[0];
    assert_eq!((id, action), (agent, ActionKind::Wander));
    assert_eq!(report.committed.len(), 1, "brain decides again once idle");
}

#[tokio::test(start_paused = true)]
async fn heard_noise_sends_agent_to_its_position() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();
    let mut sounds = handle.subscribe(Topic::Sound);

    let source = center(&runtime, 3);
    handle.emit_sound(loud(source)).await.unwrap();
    let report = runtime.step().await.unwrap();

    assert_eq!(report.sounds_played, 1);
    let (_, action, score) = report.committed[0];
    assert_eq!(action, ActionKind::GoToSoundPosition);
    // Intensity 0.7, compensated over two considerations.
    assert!((score - 0.805).abs() < 1e-4, "score {score}");

    let snapshot = handle.agent(agent).await.unwrap();
    let hearing = snapshot.hearing.unwrap();
    assert!((hearing.intensity - 0.7).abs() < 1e-5);
    assert_eq!(hearing.last_heard_position, Some(source));

    match sounds.recv().await.unwrap() {
        Event::Sound(SoundEvent::NoiseHeard {
            agent: heard_by,
            source: heard_at,
            ..
        }) => {
            assert_eq!(heard_by, agent);
            assert_eq!(heard_at, Some(source));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn sound_intensity_does_not_persist() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();

    handle.emit_sound(loud(center(&runtime, 2))).await.unwrap();
    runtime.step().await.unwrap();
    runtime.step().await.unwrap();

    let hearing = handle.agent(agent).await.unwrap().hearing.unwrap();
    assert_eq!(hearing.intensity, 0.0);
    assert!(hearing.last_heard_position.is_some());
}

#[tokio::test(start_paused = true)]
async fn visible_player_in_reach_is_attacked() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    handle
        .place_player(Pose::at(center(&runtime, 1)))
        .await
        .unwrap();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();
    let mut combat = handle.subscribe(Topic::Combat);

    let report = runtime.step().await.unwrap();
    assert_eq!(report.committed[0].0, agent);
    assert_eq!(report.committed[0].1, ActionKind::AttackPlayer);

    // Let the task strike before the next tick applies its effects.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let report = runtime.step().await.unwrap();
    assert_eq!(report.player_damage, 10.0);

    match combat.recv().await.unwrap() {
        Event::Combat(CombatEvent::PlayerAttacked { attacker, damage, .. }) => {
            assert_eq!(attacker, agent);
            assert_eq!(damage, 10.0);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let energy = handle.agent(agent).await.unwrap().state.energy();
    assert_eq!(energy, 95.0);
}

#[tokio::test(start_paused = true)]
async fn distant_visible_player_is_followed() {
    let runtime = Runtime::builder()
        .seed(7)
        .maze_size(1, 8)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle
        .place_player(Pose::at(center(&runtime, 4)))
        .await
        .unwrap();
    handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();

    let report = runtime.step().await.unwrap();
    assert_eq!(report.committed[0].1, ActionKind::FollowPlayer);
}

#[tokio::test(start_paused = true)]
async fn lethal_damage_aborts_the_running_action() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();
    let mut brain = handle.subscribe(Topic::Brain);
    let mut combat = handle.subscribe(Topic::Combat);
    runtime.step().await.unwrap();

    assert_eq!(handle.damage_agent(agent, 40.0).await.unwrap(), 60.0);
    assert_eq!(handle.damage_agent(agent, 100.0).await.unwrap(), 0.0);

    assert!(matches!(
        brain.recv().await.unwrap(),
        Event::Brain(BrainEvent::ActionCommitted { .. })
    ));
    assert!(matches!(
        brain.recv().await.unwrap(),
        Event::Brain(BrainEvent::ActionAborted {
            action: ActionKind::Wander,
            ..
        })
    ));

    let mut died = false;
    while let Ok(event) = combat.try_recv() {
        died |= matches!(
            event,
            Event::Combat(CombatEvent::AgentDied { agent: id, .. }) if id == agent
        );
    }
    assert!(died);

    assert!(matches!(
        handle.agent(agent).await,
        Err(RuntimeError::UnknownAgent(id)) if id == agent
    ));
    assert_eq!(runtime.step().await.unwrap().agents, 0);
}

#[tokio::test(start_paused = true)]
async fn despawned_agent_is_unknown() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    let agent = handle
        .spawn_agent(AgentSpawn::at(center(&runtime, 0)))
        .await
        .unwrap();

    handle.despawn_agent(agent).await.unwrap();
    assert!(matches!(
        handle.despawn_agent(agent).await,
        Err(RuntimeError::UnknownAgent(_))
    ));
    assert!(matches!(
        handle.damage_agent(EntityId(42), 1.0).await,
        Err(RuntimeError::UnknownAgent(EntityId(42)))
    ));
}

#[tokio::test(start_paused = true)]
async fn spawning_outside_the_maze_is_rejected() {
    let runtime = corridor().await;
    let result = runtime
        .handle()
        .spawn_agent(AgentSpawn::at(Vec2::new(-1.0, 3.0)))
        .await;
    assert!(matches!(result, Err(RuntimeError::InvalidSpawn(_))));
}

#[tokio::test]
async fn invalid_maze_dimensions_fail_the_build() {
    let result = Runtime::builder().maze_size(0, 5).build().await;
    assert!(matches!(result, Err(RuntimeError::Maze(_))));
}

#[tokio::test(start_paused = true)]
async fn same_seed_produces_same_first_decisions() {
    async fn first_tick(seed: u64) -> (Vec<(EntityId, ActionKind, f64)>, [u8; 32]) {
        let runtime = Runtime::builder()
            .seed(seed)
            .maze_size(6, 6)
            .build()
            .await
            .unwrap();
        let handle = runtime.handle();
        let maze = handle.maze();
        handle
            .place_player(Pose::at(maze.cell_center(maze.end(), CELL)))
            .await
            .unwrap();
        for coord in [maze.start(), CellCoord::new(0, 0), CellCoord::new(5, 5)] {
            handle
                .spawn_agent(AgentSpawn::at(maze.cell_center(coord, CELL)))
                .await
                .unwrap();
        }
        handle
            .emit_sound(loud(maze.cell_center(CellCoord::new(3, 3), CELL)))
            .await
            .unwrap();
        let report = runtime.step().await.unwrap();
        drop(handle);
        runtime.shutdown().await.unwrap();
        (report.committed, maze.fingerprint())
    }

    assert_eq!(first_tick(11).await, first_tick(11).await);
}

#[tokio::test(start_paused = true)]
async fn run_ticks_paces_with_the_tick_interval() {
    let runtime = corridor().await;
    let start = tokio::time::Instant::now();
    let reports = runtime.run_ticks(5).await.unwrap();

    assert_eq!(reports.len(), 5);
    assert_eq!(reports.last().map(|r| r.clock.0), Some(5));
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn shutdown_stops_the_worker() {
    let runtime = corridor().await;
    let handle = runtime.handle();
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[test]
fn outcomes_display_their_names() {
    assert_eq!(ActionOutcome::TimedOut.to_string(), "TimedOut");
}
