//! Headless walk through the haunted house
//!
//! Builds the box layout and the standard doors and switches, then drives
//! the simulation with a scripted input timeline at 60 fps, logging the
//! camera, door transitions and interactions.
//!
//! Usage: `hollow_walk [config.toml|config.ron]`

mod layout;

use hollow_engine::foundation::logging;
use hollow_engine::prelude::*;
use log::{debug, info};

const FRAME: f64 = 1.0 / 60.0;
const DURATION: f64 = 12.0;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),
}

#[derive(Debug, Clone, Copy)]
enum ScriptAction {
    Hold(KeyCode),
    Release(KeyCode),
    Press(KeyCode),
    Look(f64, f64),
}

/// Timeline in seconds since start
const SCRIPT: &[(f64, ScriptAction)] = &[
    // Turn toward the front door and walk up to it
    (1.0, ScriptAction::Look(122.5, 0.0)),
    (1.0, ScriptAction::Hold(KeyCode::W)),
    (2.4, ScriptAction::Release(KeyCode::W)),
    (3.5, ScriptAction::Press(KeyCode::E)),
    // Walk through once it has swung open
    (5.5, ScriptAction::Hold(KeyCode::W)),
    (7.0, ScriptAction::Release(KeyCode::W)),
    (7.5, ScriptAction::Press(KeyCode::F)),
    (8.0, ScriptAction::Look(-400.0, 40.0)),
    (8.5, ScriptAction::Press(KeyCode::E)),
    (9.0, ScriptAction::Press(KeyCode::C)),
    (10.0, ScriptAction::Press(KeyCode::C)),
    (10.5, ScriptAction::Hold(KeyCode::Space)),
    (10.6, ScriptAction::Release(KeyCode::Space)),
];

fn load_config() -> Result<SimulationConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            SimulationConfig::load_from_file(&path)
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn apply(world: &mut World, action: ScriptAction) {
    debug!("Script: {:?}", action);
    let input = world.input_mut();
    match action {
        ScriptAction::Hold(key) => input.handle_key_input(key, true),
        ScriptAction::Release(key) => input.handle_key_input(key, false),
        ScriptAction::Press(key) => input.press(key),
        ScriptAction::Look(dx, dy) => input.look(dx, dy),
    }
}

fn main() -> Result<(), AppError> {
    logging::init();

    let config = load_config()?;
    let house = layout::haunted_house();
    let mut world = WorldBuilder::new(config).with_geometry(&house).build()?;
    world.input_mut().pointer.locked = true;

    let mut timer = Timer::new();
    let mut next_action = 0;
    let mut elapsed = 0.0;

    while elapsed < DURATION {
        while let Some(&(at, action)) = SCRIPT.get(next_action) {
            if at > elapsed {
                break;
            }
            apply(&mut world, action);
            next_action += 1;
        }

        for event in world.advance(FRAME) {
            info!("{:?}", event);
        }
        elapsed += FRAME;
        timer.update();

        if timer.frame_count() % 60 == 0 {
            let view = world.active_view();
            info!(
                "t={:.1}s view={:?} pos=({:.2}, {:.2}, {:.2}) on_floor={} target={:?}",
                elapsed,
                world.view_mode(),
                view.position.x,
                view.position.y,
                view.position.z,
                world.player().on_floor,
                world.interaction_target().map(|target| target.name.as_str()),
            );
        }
    }

    let lights_on = world
        .house()
        .switches()
        .iter()
        .filter(|switch| switch.light().is_on())
        .count();
    info!(
        "Simulated {} frames ({} substeps) in {:.3}s wall time; flashlight on: {}, ceiling lights on: {}",
        timer.frame_count(),
        world.substep_count(),
        timer.total_time(),
        world.flashlight().is_on(),
        lights_on
    );

    Ok(())
}
