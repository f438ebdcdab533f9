//! Abstract collision query interface
//!
//! The movement integrator and the interaction raycaster only need to ask
//! "what does this capsule touch" and "what does this ray hit first". Both
//! the static world octree and the door collider registry answer through
//! this trait, so the integrator can query them in priority order without
//! knowing which structure sits behind each one.

use crate::foundation::math::constants::GEOMETRY_EPSILON;
use crate::physics::collision::{Capsule, CollisionResult, Ray, RayHit};

/// Narrow-phase queries against indexed triangle geometry
pub trait CollisionQuery {
    /// Push-out needed to separate `capsule` from the geometry, if it touches it
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult>;

    /// Nearest hit along `ray` no farther than `max_distance`
    fn ray_intersect(&self, ray: &Ray, max_distance: f64) -> Option<RayHit>;
}

/// Push a capsule out of a list of structures in priority order
///
/// Each structure is queried with the capsule already pushed out of the
/// structures before it. A later push-out never moves the capsule back into
/// a surface reported by an earlier structure: the part of its correction
/// pointing into an earlier contact normal is removed. Returns the applied
/// contacts in layer order and leaves `capsule` at the resolved position.
pub fn resolve_capsule_layers(
    layers: &[&dyn CollisionQuery],
    capsule: &mut Capsule,
) -> Vec<CollisionResult> {
    let mut applied: Vec<CollisionResult> = Vec::with_capacity(layers.len());

    for layer in layers {
        if let Some(contact) = layer.capsule_intersect(capsule) {
            let mut correction = contact.correction();
            for earlier in &applied {
                let into_earlier = correction.dot(&earlier.normal);
                if into_earlier < 0.0 {
                    correction -= earlier.normal * into_earlier;
                }
            }

            let contact = match correction.try_normalize(GEOMETRY_EPSILON) {
                Some(normal) => CollisionResult::new(normal, correction.norm()),
                None => CollisionResult::new(contact.normal, 0.0),
            };
            capsule.translate(&contact.correction());
            applied.push(contact);
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
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

    fn capsule() -> Capsule {
        Capsule::new(Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, 1.7, 0.0), 0.2)
    }

    #[test]
    fn test_lower_layer_still_resolves_floor() {
        let door = FixedContact(Some(CollisionResult::new(Vec3::new(0.0, 0.0, 1.0), 0.05)));
        let floor = FixedContact(Some(CollisionResult::new(Vec3::new(0.0, 1.0, 0.0), 0.02)));
        let mut resolved = capsule();

        let contacts = resolve_capsule_layers(&[&door, &floor], &mut resolved);

        assert_eq!(contacts.len(), 2);
        assert_relative_eq!(contacts[0].normal, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(contacts[1].normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(resolved.start, Vec3::new(0.0, 0.22, 0.05), epsilon = 1e-12);
    }

    #[test]
    fn test_lower_layer_never_pushes_back_into_higher_one() {
        let door = FixedContact(Some(CollisionResult::new(Vec3::new(0.0, 0.0, 1.0), 0.05)));
        let wall = FixedContact(Some(CollisionResult::new(
            Vec3::new(0.0, 0.6, -0.8),
            0.1,
        )));
        let mut resolved = capsule();

        let contacts = resolve_capsule_layers(&[&door, &wall], &mut resolved);

        // Only the vertical part of the wall push survives
        assert_relative_eq!(contacts[1].normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(contacts[1].depth, 0.06, epsilon = 1e-12);
        assert_relative_eq!(resolved.start, Vec3::new(0.0, 0.26, 0.05), epsilon = 1e-12);

        let opposing = FixedContact(Some(CollisionResult::new(Vec3::new(0.0, 0.0, -1.0), 0.1)));
        let mut resolved = capsule();
        let contacts = resolve_capsule_layers(&[&door, &opposing], &mut resolved);
        assert_relative_eq!(contacts[1].depth, 0.0);
        assert_relative_eq!(contacts[1].normal, Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(resolved.start, Vec3::new(0.0, 0.2, 0.05), epsilon = 1e-12);
    }

    #[test]
    fn test_no_contacts_leaves_capsule_in_place() {
        let nothing = FixedContact(None);
        let mut resolved = capsule();
        assert!(resolve_capsule_layers(&[&nothing, &nothing], &mut resolved).is_empty());
        assert_eq!(resolved, capsule());
    }
}
