//! Box-built collision layout of the haunted house
//!
//! The footprint is an L: the living room and hall occupy x in [-4, 4],
//! z in [-4, 0]; the bedroom wing continues to z = 4 for x in [-4, 1].
//! Openings are left where the standard doors hang.

use hollow_engine::foundation::math::{Transform, Vec3};
use hollow_engine::scene::{SceneNode, TriangleMesh};

const WALL_HEIGHT: f64 = 3.7;
const WALL_THICKNESS: f64 = 0.2;

/// Wall running along X from `x0` to `x1` at depth `z`
fn wall_x(name: &str, x0: f64, x1: f64, z: f64) -> SceneNode {
    SceneNode::with_mesh(
        name,
        TriangleMesh::cuboid(Vec3::new(x1 - x0, WALL_HEIGHT, WALL_THICKNESS)),
        Transform::from_position(Vec3::new((x0 + x1) * 0.5, WALL_HEIGHT * 0.5, z)),
    )
}

/// Wall running along Z from `z0` to `z1` at `x`
fn wall_z(name: &str, z0: f64, z1: f64, x: f64) -> SceneNode {
    SceneNode::with_mesh(
        name,
        TriangleMesh::cuboid(Vec3::new(WALL_THICKNESS, WALL_HEIGHT, z1 - z0)),
        Transform::from_position(Vec3::new(x, WALL_HEIGHT * 0.5, (z0 + z1) * 0.5)),
    )
}

/// Ground, walls and furniture blocks
pub fn haunted_house() -> SceneNode {
    let mut root = SceneNode::group("haunted_house");
    root.add_child(SceneNode::with_mesh(
        "ground",
        TriangleMesh::plane(40.0, 40.0),
        Transform::identity(),
    ));

    let mut walls = SceneNode::group("walls");
    walls
        .add_child(wall_x("back", -4.0, 4.0, -4.0))
        .add_child(wall_z("west", -4.0, 4.0, -4.0))
        .add_child(wall_z("east", -4.0, 0.0, 4.0))
        // Front of the hall, front door opening at x in [2, 3]
        .add_child(wall_x("front_left", 1.0, 2.0, 0.0))
        .add_child(wall_x("front_right", 3.0, 4.0, 0.0))
        // Bedroom wing
        .add_child(wall_x("bedroom_front", -4.0, 1.0, 4.0))
        .add_child(wall_z("bedroom_east", 0.0, 4.0, 1.0))
        // Between living room and bedroom, bedroom door opening at x in [-1, 0]
        .add_child(wall_x("bedroom_hall_west", -4.0, -1.0, 0.0))
        .add_child(wall_x("bedroom_hall_east", 0.0, 1.0, 0.0))
        // Between hall and living room, living door opening at z in [-2.5, -1.5]
        .add_child(wall_z("living_hall_back", -4.0, -2.5, 1.0))
        .add_child(wall_z("living_hall_front", -1.5, 0.0, 1.0));
    root.add_child(walls);

    let mut furniture = SceneNode::group("furniture");
    furniture
        .add_child(SceneNode::with_mesh(
            "table",
            TriangleMesh::cuboid(Vec3::new(1.2, 0.8, 0.8)),
            Transform::from_position(Vec3::new(-2.0, 0.4, -2.0)),
        ))
        .add_child(SceneNode::with_mesh(
            "bed",
            TriangleMesh::cuboid(Vec3::new(1.8, 0.6, 1.4)),
            Transform::from_position(Vec3::new(-2.7, 0.3, 2.0)),
        ))
        .add_child(SceneNode::with_mesh(
            "wardrobe",
            TriangleMesh::cuboid(Vec3::new(0.6, 2.0, 1.2)),
            Transform::from_position(Vec3::new(-0.6, 1.0, 2.0)),
        ));
    root.add_child(furniture);

    root
}
