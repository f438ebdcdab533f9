//! # World
//!
//! Owns every piece of simulation state and advances it once per host
//! frame. The host feeds input into [`World::input_mut`], calls
//! [`World::advance`] with the raw frame delta, then reads
//! [`World::active_view`] for rendering.
//!
//! Each frame is split into a fixed number of substeps. Within a substep
//! the order is: player step, out-of-bounds check, interaction raycast,
//! door animation, door event processing. A collider rebuild triggered in
//! one substep is therefore seen by the player step of the next.

use log::{debug, info};

use crate::core::{ConfigError, SimulationConfig};
use crate::foundation::math::Vec2;
use crate::foundation::time::SubstepClock;
use crate::house::{DoorEvent, Flashlight, House, HouseBuilder, HouseError};
use crate::input::{InputState, KeyCode};
use crate::interaction::{InteractionRaycaster, InteractionTarget};
use crate::physics::collision::Triangle;
use crate::player::{CameraPose, MoveIntent, Player, PlayerController, ViewMode};
use crate::scene::GeometryProvider;
use crate::spatial::{CollisionQuery, TriangleOctree};

/// Errors raised while building a world
#[derive(thiserror::Error, Debug)]
pub enum WorldError {
    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// House assembly failed
    #[error("House error: {0}")]
    House(#[from] HouseError),
}

/// Builder for [`World`]
#[derive(Default)]
pub struct WorldBuilder {
    config: SimulationConfig,
    static_geometry: Vec<Triangle>,
    house: Option<House>,
}

impl WorldBuilder {
    /// Start from a configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Add static collision geometry
    pub fn with_geometry(mut self, provider: &dyn GeometryProvider) -> Self {
        self.static_geometry.extend(provider.extract_triangles());
        self
    }

    /// Use a custom house instead of the standard layout
    pub fn with_house(mut self, house: House) -> Self {
        self.house = Some(house);
        self
    }

    /// Validate the configuration and assemble the world
    pub fn build(self) -> Result<World, WorldError> {
        self.config.validate()?;

        let house = match self.house {
            Some(house) => house,
            None => HouseBuilder::new(self.config.octree.clone())
                .with_doors(&self.config.doors)
                .with_ceiling_lights()
                .build()?,
        };

        let static_world = TriangleOctree::build(self.static_geometry, self.config.octree.clone());
        let controller = PlayerController::new(self.config.physics.clone(), self.config.player.clone());
        let player = controller.spawn();
        let camera = CameraPose::new(player.eye());
        let raycaster = InteractionRaycaster::new(&self.config.interaction, &self.config.player);
        let clock = SubstepClock::new(
            self.config.physics.max_frame_delta,
            self.config.physics.steps_per_frame,
        );

        info!(
            "World built: {} static triangles, spawn at {:?}",
            static_world.triangle_count(),
            player.eye()
        );

        Ok(World {
            config: self.config,
            static_world,
            house,
            player,
            camera,
            view_mode: ViewMode::default(),
            flashlight: Flashlight::default(),
            input: InputState::new(),
            raycaster,
            controller,
            clock,
            substep_count: 0,
        })
    }
}

/// The walking simulation
pub struct World {
    config: SimulationConfig,
    static_world: TriangleOctree,
    house: House,
    player: Player,
    camera: CameraPose,
    view_mode: ViewMode,
    flashlight: Flashlight,
    input: InputState,
    raycaster: InteractionRaycaster,
    controller: PlayerController,
    clock: SubstepClock,
    substep_count: u64,
}

impl World {
    /// Advance the simulation by one host frame
    ///
    /// Returns the door transitions completed during the frame.
    pub fn advance(&mut self, delta_time: f64) -> Vec<DoorEvent> {
        self.apply_look();
        self.handle_presses();

        let sub_dt = self.clock.substep_delta(delta_time);
        let intent = MoveIntent::from_input(&self.input);
        let mut completed = Vec::new();

        for _ in 0..self.clock.steps() {
            let layers: [&dyn CollisionQuery; 2] = [self.house.registry(), &self.static_world];
            self.controller
                .step(&mut self.player, &mut self.camera, &intent, &layers, sub_dt);
            self.controller
                .teleport_if_out_of_bounds(&mut self.player, &mut self.camera);

            self.raycaster
                .update(&self.camera, &self.input.pointer, &self.house);

            self.house.animate_doors(sub_dt);
            completed.extend(self.house.process_door_events());
            self.substep_count += 1;
        }

        completed
    }

    fn apply_look(&mut self) {
        let look = self.input.take_look();
        if look != Vec2::zeros() {
            self.camera.rotate(
                -look.x * InputState::LOOK_SENSITIVITY,
                -look.y * InputState::LOOK_SENSITIVITY,
            );
        }
    }

    fn handle_presses(&mut self) {
        for key in self.input.take_presses() {
            match key {
                KeyCode::F => {
                    self.flashlight.toggle();
                    debug!("Flashlight {}", if self.flashlight.is_on() { "on" } else { "off" });
                }
                KeyCode::C => {
                    self.view_mode = self.view_mode.toggled();
                    debug!("View mode: {:?}", self.view_mode);
                }
                KeyCode::E => {
                    if let Some(name) = self.raycaster.check_interactions(&mut self.house) {
                        debug!("Interacted with '{}'", name);
                    }
                }
                _ => {}
            }
        }
    }

    /// Append static geometry and rebuild the static octree
    pub fn add_static_geometry(&mut self, provider: &dyn GeometryProvider) {
        let mut triangles = self.static_world.triangles().to_vec();
        triangles.extend(provider.extract_triangles());
        self.static_world = TriangleOctree::build(triangles, self.config.octree.clone());
        info!(
            "Static world rebuilt with {} triangles",
            self.static_world.triangle_count()
        );
    }

    /// First-person camera
    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    /// Camera the renderer should draw from
    pub fn active_view(&self) -> CameraPose {
        match self.view_mode {
            ViewMode::Perspective => self.camera,
            ViewMode::Orthographic => self.controller.follow_camera(&self.player),
        }
    }

    /// Current view mode
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Player state
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player state for scripted teleports
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Doors, switches and door colliders
    pub fn house(&self) -> &House {
        &self.house
    }

    /// Mutable house access for scripted interactions
    pub fn house_mut(&mut self) -> &mut House {
        &mut self.house
    }

    /// Static collision geometry
    pub fn static_world(&self) -> &TriangleOctree {
        &self.static_world
    }

    /// Hand-held light
    pub fn flashlight(&self) -> &Flashlight {
        &self.flashlight
    }

    /// Interactable currently aimed at
    pub fn interaction_target(&self) -> Option<&InteractionTarget> {
        self.raycaster.target()
    }

    /// Input snapshot
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input snapshot for the host to write into
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Validated configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Substeps run since the world was built
    pub fn substep_count(&self) -> u64 {
        self.substep_count
    }
}
