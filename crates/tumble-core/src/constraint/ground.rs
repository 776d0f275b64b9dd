// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::body::{BodyHandle, BodySet};
use crate::collider::Collider;
use crate::constraint::{PositionConstraint, Violation};
use crate::shape::{Cuboid, Plane, Shape};

/// "The lowest corner of a cuboid must not fall below a plane."
///
/// The eight corners are mapped through the body's predicted pose; the
/// deepest one along the world plane normal determines the penetration.
/// Resolution is translation only: no contact torque, no angular correction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GroundContact {
    body: BodyHandle,
    floor: BodyHandle,
    cuboid: Cuboid,
    plane: Plane,
}

impl GroundContact {
    /// Contact between `cuboid` on `body` and `plane` on `floor`.
    pub fn new(body: BodyHandle, cuboid: Cuboid, floor: BodyHandle, plane: Plane) -> Self {
        Self {
            body,
            floor,
            cuboid,
            plane,
        }
    }
}

impl PositionConstraint for GroundContact {
    fn participants(&self) -> (BodyHandle, BodyHandle) {
        (self.body, self.floor)
    }

    fn evaluate(&self, bodies: &BodySet) -> Option<Violation> {
        let body = bodies.get(self.body)?;
        let floor = bodies.get(self.floor)?;
        let (normal, height) = self.plane.in_world(&floor.pose());
        let lowest = self.cuboid.min_height(&body.pose(), &normal);
        let magnitude = height - lowest;
        if magnitude > 0.0 {
            Some(Violation {
                gradient: normal,
                magnitude,
            })
        } else {
            None
        }
    }
}

/// Every (cuboid, plane) collider pair in collider order.
///
/// Pairs where both shapes sit on the same body are skipped. Nothing is
/// allocated; the iterator borrows `colliders`.
pub fn ground_contacts(colliders: &[Collider]) -> impl Iterator<Item = GroundContact> + '_ {
    colliders
        .iter()
        .filter_map(|c| match c.shape() {
            Shape::Cuboid(cuboid) => Some((c.body(), *cuboid)),
            Shape::Plane(_) => None,
        })
        .flat_map(move |(body, cuboid)| {
            colliders
                .iter()
                .filter_map(|c| match c.shape() {
                    Shape::Plane(plane) => Some((c.body(), *plane)),
                    Shape::Cuboid(_) => None,
                })
                .filter(move |(floor, _)| *floor != body)
                .map(move |(floor, plane)| GroundContact::new(body, cuboid, floor, plane))
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::body::RigidBody;
    use crate::math::{Quat, Vec3};
    use crate::transform::Transform;

    fn scene(z: f64) -> (BodySet, Vec<Collider>) {
        let mut bodies = BodySet::new();
        let cube = bodies.insert(
            RigidBody::new(1.0, Vec3::new(0.0, 0.0, z), Quat::identity(), Vec3::ZERO, Vec3::ZERO)
                .expect("body"),
        );
        let floor = bodies.insert(RigidBody::fixed(Transform::identity()));
        let cuboid = Cuboid::cube(0.5).expect("cuboid");
        let colliders = vec![
            Collider::new(cube, Shape::Cuboid(cuboid)),
            Collider::new(floor, Shape::Plane(Plane::ground(0.0))),
        ];
        (bodies, colliders)
    }

    #[test]
    fn enumerates_cuboid_plane_pairs() {
        let (_, colliders) = scene(1.0);
        let contacts: Vec<_> = ground_contacts(&colliders).collect();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].participants().1.index(), 1);
    }

    #[test]
    fn resting_above_plane_is_satisfied() {
        let (bodies, colliders) = scene(0.75);
        let contact = ground_contacts(&colliders).next().expect("pair");
        assert!(contact.evaluate(&bodies).is_none());
    }

    #[test]
    fn penetration_depth_is_reported() {
        let (bodies, colliders) = scene(0.25);
        let contact = ground_contacts(&colliders).next().expect("pair");
        let v = contact.evaluate(&bodies).expect("violated");
        assert_eq!(v.gradient, Vec3::UNIT_Z);
        assert!((v.magnitude - 0.25).abs() < 1e-12);
    }

    #[test]
    fn same_body_pairs_are_skipped() {
        let mut bodies = BodySet::new();
        let only = bodies.insert(RigidBody::fixed(Transform::identity()));
        let colliders = [
            Collider::new(only, Shape::Cuboid(Cuboid::cube(1.0).expect("cuboid"))),
            Collider::new(only, Shape::Plane(Plane::ground(0.0))),
        ];
        assert_eq!(ground_contacts(&colliders).count(), 0);
    }
}
