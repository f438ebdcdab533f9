//! Scenario tests driving the simulation through whole frames

mod door_scenarios;

use crate::foundation::logging;
use crate::scene::TriangleMesh;

/// One frame at 60 fps
const FRAME: f64 = 1.0 / 60.0;

/// Flat ground at y = 0 reaching well past the spawn point
fn ground_plane() -> TriangleMesh {
    logging::try_init_for_tests();
    TriangleMesh::plane(40.0, 40.0)
}
