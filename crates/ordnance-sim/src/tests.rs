//! Tests for the simulation engine, frame-end ordering and effect lifecycles.

use std::sync::Arc;

use ordnance_core::components::{JamsMissiles, Targetable};
use ordnance_core::config::{ConfigError, GuidedMissileInfo, LaserZapInfo, PaletteEffectInfo};
use ordnance_core::enums::{ExplosionCause, LightingEffect};
use ordnance_core::events::WorldEvent;
use ordnance_core::render::Renderable;
use ordnance_core::types::{ActorId, Color, Target, WPos};
use ordnance_lighting::{Palette, PaletteSet};

use crate::effects::guided_missile::GuidedMissile;
use crate::engine::{SimConfig, SimulationEngine};
use crate::error::SimError;
use crate::test_support::owner;
use crate::world::actor_id;

const SHOOTER_POS: WPos = WPos::new(4096, 4096, 0);
const TARGET_POS: WPos = WPos::new(20480, 12288, 0);

fn engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.sequences_mut().add("dragon", "idle", 4);
    engine.sequences_mut().add("smokey", "idle", 2);
    engine
}

fn spawn_shooter(engine: &mut SimulationEngine) -> ActorId {
    actor_id(engine.actors_mut().spawn((SHOOTER_POS, owner(1, 0))))
}

fn spawn_target(engine: &mut SimulationEngine, pos: WPos) -> ActorId {
    actor_id(engine.actors_mut().spawn((pos, Targetable, owner(2, 0))))
}

fn dragon() -> Arc<GuidedMissileInfo> {
    Arc::new(GuidedMissileInfo {
        image: Some("dragon".to_string()),
        inaccuracy: 512,
        lock_on_probability: 80,
        contrail_length: 8,
        ..Default::default()
    })
}

// ---- Determinism ----

fn run_volley(seed: u64, ticks: usize) -> Vec<(String, String)> {
    let mut engine = engine(seed);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    engine.actors_mut().spawn((
        WPos::new(8192, 6144, 0),
        JamsMissiles {
            range: 4096,
            allied_missiles: false,
            chance: 50,
        },
        owner(2, 0),
    ));

    let info = dragon();
    let mut frames = Vec::new();
    for tick in 0..ticks {
        if tick % 10 == 0 {
            engine
                .launch(&info, "Dragon", shooter, Target::Actor(target))
                .unwrap();
        }
        let events = engine.tick();
        frames.push((
            serde_json::to_string(&events).unwrap(),
            serde_json::to_string(&engine.render()).unwrap(),
        ));
    }
    frames
}

#[test]
fn test_determinism_same_seed() {
    let a = run_volley(12345, 300);
    let b = run_volley(12345, 300);
    for (tick, (frame_a, frame_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(frame_a, frame_b, "frames diverged at tick {tick} with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let a = run_volley(111, 150);
    let b = run_volley(222, 150);
    assert!(
        a.iter().zip(&b).any(|(frame_a, frame_b)| frame_a != frame_b),
        "different seeds should produce different flights"
    );
}

// ---- Frame-end ordering ----

#[test]
fn test_detonation_then_impact_then_removal() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    let info = Arc::new(GuidedMissileInfo {
        range_limit: 2,
        ..Default::default()
    });
    let id = engine
        .launch(&info, "Dragon", shooter, Target::Actor(target))
        .unwrap();
    assert!(engine.effect_as::<GuidedMissile>(id).is_some());

    assert!(engine.tick().is_empty());
    assert!(engine.tick().is_empty());
    let events = engine.tick();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        WorldEvent::Detonation {
            cause: ExplosionCause::RangeLimit,
            ticks: 3,
            armed: true,
            ..
        }
    ));
    match &events[1] {
        WorldEvent::Impact(impact) => {
            assert_eq!(impact.weapon, "Dragon");
            assert_eq!(impact.source, shooter);
        }
        other => panic!("expected impact, got {other:?}"),
    }
    assert_eq!(engine.effect_count(), 0);
    assert!(engine.effect(id).is_none());
    assert!(engine.tick().is_empty());
}

#[test]
fn test_dud_raises_no_impact() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    let info = Arc::new(GuidedMissileInfo {
        arm: 10,
        range_limit: 2,
        ..Default::default()
    });
    engine
        .launch(&info, "Dragon", shooter, Target::Actor(target))
        .unwrap();

    let events: Vec<WorldEvent> = (0..5).flat_map(|_| engine.tick()).collect();
    assert!(matches!(
        events.as_slice(),
        [WorldEvent::Detonation { armed: false, .. }]
    ));
    assert_eq!(engine.effect_count(), 0);
}

#[test]
fn test_removing_one_effect_keeps_the_rest_in_order() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    let short = Arc::new(GuidedMissileInfo {
        range_limit: 1,
        ..Default::default()
    });
    let long = Arc::new(LaserZapInfo {
        beam_duration: 5,
        ..Default::default()
    });
    engine
        .launch(&long, "Laser", shooter, Target::Actor(target))
        .unwrap();
    engine
        .launch(&short, "Dragon", shooter, Target::Actor(target))
        .unwrap();
    engine
        .launch(&long, "Laser", shooter, Target::Actor(target))
        .unwrap();

    engine.tick();
    assert_eq!(engine.effect_names(), vec!["laser-zap", "guided-missile", "laser-zap"]);
    engine.tick();
    assert_eq!(engine.effect_names(), vec!["laser-zap", "laser-zap"]);
}

// ---- Effect lifecycles ----

#[test]
fn test_trail_smoke_lifecycle() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    let info = Arc::new(GuidedMissileInfo {
        trail: Some("smokey".to_string()),
        trail_interval: 100,
        ..Default::default()
    });
    engine
        .launch(&info, "Dragon", shooter, Target::Actor(target))
        .unwrap();

    engine.tick();
    assert_eq!(engine.effect_names(), vec!["guided-missile", "smoke"]);
    let smoke_drawn = engine
        .render()
        .iter()
        .any(|r| matches!(r, Renderable::Sprite(s) if s.image == "smokey"));
    assert!(smoke_drawn);

    engine.tick();
    assert_eq!(engine.effect_count(), 2);
    engine.tick();
    assert_eq!(engine.effect_names(), vec!["guided-missile"]);
}

#[test]
fn test_contrail_fades_after_detonation() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    let info = Arc::new(GuidedMissileInfo {
        contrail_length: 4,
        contrail_delay: 0,
        range_limit: 2,
        ..Default::default()
    });
    engine
        .launch(&info, "Dragon", shooter, Target::Actor(target))
        .unwrap();

    for _ in 0..3 {
        engine.tick();
    }
    assert_eq!(engine.effect_names(), vec!["contrail-fader"]);
    assert!(matches!(engine.render().as_slice(), [Renderable::Contrail(_)]));

    for _ in 0..4 {
        engine.tick();
    }
    assert_eq!(engine.effect_names(), vec!["contrail-fader"]);
    engine.tick();
    assert_eq!(engine.effect_count(), 0);
}

#[test]
fn test_laser_zap_lifecycle() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let target = spawn_target(&mut engine, TARGET_POS);
    let info = Arc::new(LaserZapInfo::default());
    engine
        .launch(&info, "Laser", shooter, Target::Actor(target))
        .unwrap();

    let events = engine.tick();
    match events.as_slice() {
        [WorldEvent::Impact(impact)] => assert_eq!(impact.pos, TARGET_POS),
        other => panic!("expected a single impact, got {other:?}"),
    }
    match engine.render().first() {
        Some(Renderable::Beam(beam)) => {
            assert_eq!(beam.source, SHOOTER_POS);
            assert_eq!(beam.length, TARGET_POS - SHOOTER_POS);
        }
        other => panic!("expected beam, got {other:?}"),
    }

    for _ in 0..8 {
        assert!(engine.tick().is_empty());
    }
    assert_eq!(engine.effect_count(), 1);
    engine.tick();
    assert_eq!(engine.effect_count(), 0);
}

// ---- Launch errors ----

#[test]
fn test_launch_errors() {
    let mut engine = engine(1);
    let info = Arc::new(GuidedMissileInfo::default());
    let target = spawn_target(&mut engine, TARGET_POS);

    let gone = spawn_shooter(&mut engine);
    let entity = crate::world::entity(gone).unwrap();
    engine.actors_mut().despawn(entity).unwrap();
    assert!(matches!(
        engine.launch(&info, "Dragon", gone, Target::Actor(target)),
        Err(SimError::UnknownActor(id)) if id == gone
    ));

    let ownerless = actor_id(engine.actors_mut().spawn((SHOOTER_POS,)));
    assert!(matches!(
        engine.launch(&info, "Dragon", ownerless, Target::Actor(target)),
        Err(SimError::MissingOwner(_))
    ));

    let nowhere = actor_id(engine.actors_mut().spawn((owner(1, 0),)));
    assert!(matches!(
        engine.launch(&info, "Dragon", nowhere, Target::Actor(target)),
        Err(SimError::MissingPosition(_))
    ));

    let shooter = spawn_shooter(&mut engine);
    assert!(matches!(
        engine.launch(&info, "Dragon", shooter, Target::Invalid),
        Err(SimError::InvalidTarget)
    ));
    assert_eq!(engine.effect_count(), 0);
}

#[test]
fn test_terrain_target_launch() {
    let mut engine = engine(1);
    let shooter = spawn_shooter(&mut engine);
    let info = Arc::new(GuidedMissileInfo::default());
    let id = engine
        .launch(&info, "Dragon", shooter, Target::Terrain(TARGET_POS))
        .unwrap();
    let missile = engine.effect_as::<GuidedMissile>(id).unwrap();
    assert_eq!(missile.target_position(), TARGET_POS);
    assert_eq!(missile.pos(), SHOOTER_POS);
}

// ---- Lighting ----

#[test]
fn test_lighting_fades_in_to_initial_effect() {
    let mut engine = SimulationEngine::new(SimConfig {
        lighting: Some(PaletteEffectInfo {
            initial_effect: LightingEffect::Night,
            ..Default::default()
        }),
        ..Default::default()
    });
    engine.world_loaded();

    let base = Color::rgb(200, 100, 50);
    let mut palettes = PaletteSet::new();
    palettes.insert("terrain".to_string(), Palette::filled(base));

    let mut frame = palettes.clone();
    engine.adjust_palettes(&mut frame);
    assert_eq!(frame["terrain"].color(0), Color::rgb(0, 0, 0));

    for _ in 0..10 {
        engine.tick_render();
    }
    let mut frame = palettes.clone();
    engine.adjust_palettes(&mut frame);
    assert_eq!(frame["terrain"].color(0), Color::rgb(70, 45, 30));
    assert_eq!(
        engine.lighting().map(|l| l.to()),
        Some(LightingEffect::Night)
    );
}

#[test]
fn test_without_lighting_palettes_untouched() {
    let mut engine = engine(1);
    engine.world_loaded();
    engine.tick_render();
    let mut palettes = PaletteSet::new();
    palettes.insert("terrain".to_string(), Palette::filled(Color::rgb(1, 2, 3)));
    let before = palettes.clone();
    engine.adjust_palettes(&mut palettes);
    assert_eq!(palettes, before);
    assert!(engine.lighting().is_none());
}

// ---- Config ----

#[test]
fn test_sim_config_from_json() {
    let config = SimConfig::from_json(r#"{ "seed": 9, "lighting": { "day_night_cycle": true } }"#)
        .unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.map_width, 64);
    assert_eq!(config.default_terrain, "Clear");
    assert!(config.lighting.unwrap().day_night_cycle);

    assert!(SimConfig::from_json(r#"{ "lighting": { "day_length": -1 } }"#).is_err());
    assert!(SimConfig::from_json("not json").is_err());
}

#[test]
fn test_sim_config_rejects_empty_map() {
    for json in [
        r#"{ "map_width": 0 }"#,
        r#"{ "map_width": -4 }"#,
        r#"{ "map_height": -1 }"#,
    ] {
        let err = SimConfig::from_json(json).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { field, .. } if field.starts_with("map_")),
            "{json}: {err}"
        );
    }
    assert!(SimConfig::from_json(r#"{ "map_width": 1, "map_height": 1 }"#).is_ok());
}
