//! Door scenarios
//!
//! A closed door must block a doorway the static geometry leaves open while
//! the ground below keeps holding the player up, and toggling it through the
//! interact key must produce exactly one collider rebuild per completed swing.

use super::{ground_plane, FRAME};
use crate::core::{DoorConfig, PhysicsConfig, PlayerConfig, SimulationConfig};
use crate::foundation::math::{Transform, Vec3};
use crate::house::{Door, DoorEvent, DoorState, House, HouseBuilder};
use crate::input::KeyCode;
use crate::physics::collision::Capsule;
use crate::player::{CameraPose, MoveIntent, Player, PlayerController};
use crate::scene::{GeometryProvider, SceneNode, TriangleMesh};
use crate::spatial::{CollisionQuery, OctreeConfig, TriangleOctree};
use crate::world::{World, WorldBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Wall in the z = 0 plane with a 1 m wide opening around x = 0
    fn wall_with_doorway() -> TriangleOctree {
        let slab = TriangleMesh::cuboid(Vec3::new(4.5, 3.0, 0.1));
        let mut wall = SceneNode::group("wall");
        wall.add_child(SceneNode::with_mesh(
            "left",
            slab.clone(),
            Transform::from_position(Vec3::new(-2.75, 1.5, 0.0)),
        ));
        wall.add_child(SceneNode::with_mesh(
            "right",
            slab,
            Transform::from_position(Vec3::new(2.75, 1.5, 0.0)),
        ));
        TriangleOctree::from_triangles(wall.extract_triangles())
    }

    /// Door whose closed panel fills the opening of [`wall_with_doorway`]
    fn doorway_house() -> House {
        let door = Door::new("doorway", Vec3::new(0.6, 1.1, 0.0), 0.0, &DoorConfig::default());
        House::build(vec![door], Vec::new(), OctreeConfig::default()).unwrap()
    }

    /// Throw a capsule at the doorway and return its final state
    fn run_through_doorway(house: &House, wall: &TriangleOctree) -> Player {
        let controller = PlayerController::new(PhysicsConfig::default(), PlayerConfig::default());
        let mut player = Player::new(Capsule::new(
            Vec3::new(0.0, 0.6, 0.6),
            Vec3::new(0.0, 1.8, 0.6),
            0.2,
        ));
        player.velocity = Vec3::new(0.0, 0.0, -3.0);
        let mut camera = CameraPose::new(player.eye());
        let layers: [&dyn CollisionQuery; 2] = [house.registry(), wall];

        for _ in 0..150 {
            controller.step(&mut player, &mut camera, &MoveIntent::default(), &layers, 0.002);
            // The opening itself never touches the static wall
            assert!(wall.capsule_intersect(&player.collider).is_none());
        }
        player
    }

    fn open_fully(house: &mut House, name: &str) -> Vec<DoorEvent> {
        assert!(house.interact(name));
        let mut events = Vec::new();
        for _ in 0..200 {
            house.animate_doors(0.01);
            events.extend(house.process_door_events());
        }
        events
    }

    #[test]
    fn test_closed_door_blocks_open_doorway() {
        let wall = wall_with_doorway();
        let house = doorway_house();

        let player = run_through_doorway(&house, &wall);

        // Stopped against the door face at z = 0.05
        assert_relative_eq!(player.collider.start.z, 0.25, epsilon = 1e-6);
        assert!(player.velocity.z.abs() < 1e-9);
        assert!(!player.on_floor);
    }

    #[test]
    fn test_open_door_lets_capsule_through() {
        let wall = wall_with_doorway();
        let mut house = doorway_house();
        let events = open_fully(&mut house, "doorway");
        assert_eq!(events, vec![DoorEvent::Opened("doorway".into())]);

        let player = run_through_doorway(&house, &wall);
        assert!(player.collider.start.z < -0.1, "stopped at z = {}", player.collider.start.z);
    }

    /// Player on the ground at the spawn point, facing a closed door 2 m ahead
    fn world_facing_door() -> World {
        let house = HouseBuilder::new(OctreeConfig::default())
            .with_door(Door::new("hall_door", Vec3::new(0.6, 1.1, 8.0), 0.0, &DoorConfig::default()))
            .build()
            .unwrap();
        let mut world = WorldBuilder::new(SimulationConfig::default())
            .with_geometry(&ground_plane())
            .with_house(house)
            .build()
            .unwrap();
        for _ in 0..30 {
            world.advance(FRAME);
        }
        world
    }

    fn press_interact(world: &mut World) -> Vec<DoorEvent> {
        world.input_mut().handle_key_input(KeyCode::E, true);
        let events = world.advance(FRAME);
        world.input_mut().handle_key_input(KeyCode::E, false);
        events
    }

    #[test]
    fn test_interact_key_opens_door_once() {
        let mut world = world_facing_door();
        assert_eq!(world.interaction_target().map(|t| t.name.as_str()), Some("hall_door"));

        let mut events = press_interact(&mut world);
        assert_eq!(world.house().door("hall_door").unwrap().state(), DoorState::Opening);
        for _ in 0..120 {
            events.extend(world.advance(FRAME));
        }

        let door = world.house().door("hall_door").unwrap();
        assert_eq!(events, vec![DoorEvent::Opened("hall_door".into())]);
        assert_eq!(door.state(), DoorState::Open);
        assert_eq!(door.rotation(), door.open_angle());
        assert_eq!(world.house().registry().rebuild_count(), 2);
    }

    #[test]
    fn test_mid_swing_reversal_emits_no_spurious_event() {
        let mut world = world_facing_door();

        let mut events = press_interact(&mut world);
        for _ in 0..30 {
            events.extend(world.advance(FRAME));
        }
        assert!(events.is_empty());
        assert_eq!(world.house().registry().rebuild_count(), 1);

        // Still aiming at the swinging panel
        assert_eq!(world.interaction_target().map(|t| t.name.as_str()), Some("hall_door"));
        events.extend(press_interact(&mut world));
        assert_eq!(world.house().door("hall_door").unwrap().state(), DoorState::Closing);
        for _ in 0..60 {
            events.extend(world.advance(FRAME));
        }

        let door = world.house().door("hall_door").unwrap();
        assert_eq!(events, vec![DoorEvent::Closed("hall_door".into())]);
        assert_eq!(door.state(), DoorState::Closed);
        assert_eq!(door.rotation(), door.closed_angle());
        assert_eq!(world.house().registry().rebuild_count(), 2);
    }

    #[test]
    fn test_walking_into_closed_door_keeps_player_on_ground() {
        let mut world = world_facing_door();
        let radius = world.player().collider.radius;

        world.input_mut().hold(KeyCode::W);
        for _ in 0..240 {
            world.advance(FRAME);
            let player = world.player();
            assert!(player.on_floor);
            assert_relative_eq!(player.collider.start.y - radius, 0.0, epsilon = 1e-6);
        }
        // Stopped against the door face at z = 8.05
        assert_relative_eq!(world.player().collider.start.z, 8.25, epsilon = 1e-6);

        // Resting against the door without input
        world.input_mut().handle_key_input(KeyCode::W, false);
        for _ in 0..120 {
            world.advance(FRAME);
            let player = world.player();
            assert!(player.on_floor);
            assert_relative_eq!(player.collider.start.y - radius, 0.0, epsilon = 1e-6);
        }
        assert_relative_eq!(world.player().collider.start.z, 8.25, epsilon = 1e-6);
        assert_eq!(world.house().door("hall_door").unwrap().state(), DoorState::Closed);
    }
}
