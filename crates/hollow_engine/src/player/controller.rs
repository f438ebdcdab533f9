//! Player movement integrator
//!
//! One call to [`PlayerController::step`] is one physics substep, always in
//! the same order: input, gravity and damping, translation, collision
//! resolution, camera sync. Substeps are never batched, since their small
//! size is what keeps penetration into thin geometry bounded.

use log::{info, trace};

use crate::core::{PhysicsConfig, PlayerConfig};
use crate::physics::collision::CollisionResult;
use crate::spatial::{resolve_capsule_layers, CollisionQuery};

use super::camera::CameraPose;
use super::{MoveIntent, Player};

/// Advances a [`Player`] through collision geometry
#[derive(Debug, Clone)]
pub struct PlayerController {
    physics: PhysicsConfig,
    player: PlayerConfig,
}

impl PlayerController {
    /// Create a controller from validated configuration
    pub fn new(physics: PhysicsConfig, player: PlayerConfig) -> Self {
        Self { physics, player }
    }

    /// Integrator constants
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// A fresh player at the spawn capsule
    pub fn spawn(&self) -> Player {
        Player::new(self.player.spawn.to_capsule())
    }

    /// A fresh player at the spawn position with the respawn radius
    pub fn respawn(&self) -> Player {
        let mut capsule = self.player.spawn.to_capsule();
        capsule.radius = self.player.respawn_radius;
        Player::new(capsule)
    }

    /// Accelerate along the camera's ground-plane axes and handle jumping
    pub fn apply_input(&self, player: &mut Player, intent: &MoveIntent, camera: &CameraPose, delta_time: f64) {
        let speed = if player.on_floor {
            self.physics.ground_speed
        } else {
            self.physics.air_speed
        };
        let speed_delta = delta_time * speed;

        player.velocity += camera.horizontal_forward() * (intent.forward * speed_delta);
        player.velocity += camera.horizontal_right() * (intent.right * speed_delta);

        if intent.jump && player.on_floor {
            player.velocity.y = self.physics.jump_speed;
        }
    }

    /// Apply gravity and damping, then move the collider by the velocity
    pub fn integrate(&self, player: &mut Player, delta_time: f64) {
        let mut damping = (-self.physics.damping_rate * delta_time).exp() - 1.0;
        if !player.on_floor {
            player.velocity.y += self.physics.gravity * delta_time;
            damping *= self.physics.air_damping_scale;
        }

        player.velocity += player.velocity * damping;
        player.collider.translate(&(player.velocity * delta_time));
    }

    /// Push the collider out of every layer, highest priority first
    ///
    /// A lower layer never pushes the collider back into a surface reported
    /// by a higher one, so a door keeps its push-out while the ground below
    /// still holds the player up. Any contact whose normal is (within
    /// tolerance) straight up counts as floor; every other contact removes
    /// the velocity component along its normal. Returns the contact of the
    /// highest-priority layer that reported one.
    pub fn resolve_collisions(
        &self,
        player: &mut Player,
        layers: &[&dyn CollisionQuery],
    ) -> Option<CollisionResult> {
        player.on_floor = false;
        let contacts = resolve_capsule_layers(layers, &mut player.collider);

        for contact in &contacts {
            if contact.normal.y >= 1.0 - self.physics.floor_normal_tolerance {
                player.on_floor = true;
            } else {
                let into_surface = contact.normal.dot(&player.velocity);
                player.velocity -= contact.normal * into_surface;
            }
        }

        contacts.first().copied()
    }

    /// Run one full substep and sync the first-person camera
    pub fn step(
        &self,
        player: &mut Player,
        camera: &mut CameraPose,
        intent: &MoveIntent,
        layers: &[&dyn CollisionQuery],
        delta_time: f64,
    ) {
        self.apply_input(player, intent, camera, delta_time);
        self.integrate(player, delta_time);
        let contact = self.resolve_collisions(player, layers);
        camera.position = player.collider.end;

        trace!(
            "substep dt={:.5} pos={:?} vel={:?} floor={} contact={:?}",
            delta_time,
            player.collider.end,
            player.velocity,
            player.on_floor,
            contact
        );
    }

    /// Reset the player and camera to spawn when the camera fell too low
    pub fn teleport_if_out_of_bounds(&self, player: &mut Player, camera: &mut CameraPose) -> bool {
        if camera.position.y > self.player.out_of_bounds_y {
            return false;
        }

        info!(
            "Player fell out of bounds at {:?}, respawning",
            camera.position
        );
        *player = self.respawn();
        camera.position = player.collider.end;
        camera.reset_rotation();
        true
    }

    /// Orthographic follow camera for the current player position
    pub fn follow_camera(&self, player: &Player) -> CameraPose {
        CameraPose::looking_at(
            player.collider.end + self.player.follow_camera_offset,
            player.collider.start,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::physics::collision::{Capsule, Ray, RayHit};
    use approx::assert_relative_eq;

    /// Reports the same contact for every capsule
    struct FixedContact(Option<CollisionResult>);

    impl CollisionQuery for FixedContact {
        fn capsule_intersect(&self, _capsule: &Capsule) -> Option<CollisionResult> {
            self.0
        }

        fn ray_intersect(&self, _ray: &Ray, _max_distance: f64) -> Option<RayHit> {
            None
        }
    }

    fn controller() -> PlayerController {
        PlayerController::new(PhysicsConfig::default(), PlayerConfig::default())
    }

    #[test]
    fn test_jump_sets_vertical_speed_only_when_grounded() {
        let controller = controller();
        let camera = CameraPose::default();
        let jump = MoveIntent { jump: true, ..Default::default() };

        let mut player = controller.spawn();
        player.velocity.y = -1.0;
        controller.apply_input(&mut player, &jump, &camera, 0.01);
        assert_relative_eq!(player.velocity.y, -1.0);

        player.on_floor = true;
        controller.apply_input(&mut player, &jump, &camera, 0.01);
        assert_relative_eq!(player.velocity.y, 5.0);
    }

    #[test]
    fn test_air_control_is_weaker() {
        let controller = controller();
        let camera = CameraPose::default();
        let forward = MoveIntent { forward: 1.0, ..Default::default() };

        let mut grounded = controller.spawn();
        grounded.on_floor = true;
        controller.apply_input(&mut grounded, &forward, &camera, 0.01);
        let mut airborne = controller.spawn();
        controller.apply_input(&mut airborne, &forward, &camera, 0.01);

        assert_relative_eq!(grounded.velocity, Vec3::new(0.0, 0.0, -0.15), epsilon = 1e-12);
        assert_relative_eq!(airborne.velocity, Vec3::new(0.0, 0.0, -0.08), epsilon = 1e-12);
    }

    #[test]
    fn test_airborne_integration_applies_gravity_and_light_damping() {
        let controller = controller();
        let mut player = controller.spawn();
        player.velocity = Vec3::new(1.0, 0.0, 0.0);
        let start = player.collider.start;
        let dt: f64 = 0.01;

        controller.integrate(&mut player, dt);

        let damping = ((-4.0 * dt).exp() - 1.0) * 0.1;
        let expected = Vec3::new(1.0, -9.81 * dt, 0.0) * (1.0 + damping);
        assert_relative_eq!(player.velocity, expected, epsilon = 1e-12);
        assert_relative_eq!(player.collider.start, start + expected * dt, epsilon = 1e-12);
    }

    #[test]
    fn test_wall_contact_slides_velocity() {
        let controller = controller();
        let mut player = controller.spawn();
        player.velocity = Vec3::new(2.0, 0.0, -3.0);
        let wall = FixedContact(Some(CollisionResult::new(Vec3::new(-1.0, 0.0, 0.0), 0.1)));
        let before = player.collider.start;

        let contact = controller.resolve_collisions(&mut player, &[&wall]);

        assert!(contact.is_some());
        assert!(!player.on_floor);
        assert_relative_eq!(player.velocity, Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-12);
        assert_relative_eq!(player.collider.start, before + Vec3::new(-0.1, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_door_contact_keeps_priority_over_floor() {
        let controller = controller();
        let mut player = controller.spawn();
        player.velocity = Vec3::new(0.0, -0.5, -2.0);
        let before = player.collider.start;
        let door = FixedContact(Some(CollisionResult::new(Vec3::new(0.0, 0.0, 1.0), 0.05)));
        let floor = FixedContact(Some(CollisionResult::new(Vec3::new(0.0, 1.0, 0.0), 0.02)));
        let nothing = FixedContact(None);

        let contact = controller.resolve_collisions(&mut player, &[&door, &floor]).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 0.0, 1.0));
        assert!(player.on_floor);
        assert_relative_eq!(player.velocity, Vec3::new(0.0, -0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(
            player.collider.start,
            before + Vec3::new(0.0, 0.02, 0.05),
            epsilon = 1e-12
        );

        let contact = controller.resolve_collisions(&mut player, &[&nothing, &floor]).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0));
        assert!(player.on_floor);

        assert!(controller.resolve_collisions(&mut player, &[&nothing]).is_none());
        assert!(!player.on_floor);
    }

    #[test]
    fn test_out_of_bounds_resets_to_spawn() {
        let controller = controller();
        let mut player = controller.spawn();
        assert_eq!(player.collider.radius, 0.2);
        player.collider.translate(&Vec3::new(4.0, -8.0, 1.0));
        player.velocity = Vec3::new(1.0, -20.0, 0.5);
        player.on_floor = true;
        let mut camera = CameraPose::new(player.eye());
        camera.rotate(1.0, -0.5);

        assert!(controller.teleport_if_out_of_bounds(&mut player, &mut camera));
        assert_eq!(player.collider.start, Vec3::new(0.0, 0.5, 10.0));
        assert_eq!(player.collider.end, Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(player.collider.radius, 0.35);
        assert_eq!(player.velocity, Vec3::zeros());
        assert!(!player.on_floor);
        assert_eq!(camera.position, Vec3::new(0.0, 2.0, 10.0));
        assert_eq!((camera.yaw, camera.pitch), (0.0, 0.0));

        // In bounds: untouched
        assert!(!controller.teleport_if_out_of_bounds(&mut player, &mut camera));
    }

    #[test]
    fn test_follow_camera_looks_at_capsule_start() {
        let controller = controller();
        let player = controller.spawn();
        let camera = controller.follow_camera(&player);
        assert_relative_eq!(camera.position, Vec3::new(1.0, 2.0, 12.0));
        let to_start = (player.collider.start - camera.position).normalize();
        assert_relative_eq!(camera.forward(), to_start, epsilon = 1e-12);
    }
}
