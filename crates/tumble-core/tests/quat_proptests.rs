// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
use proptest::prelude::*;

use tumble_core::math::{approx_eq, Quat, Vec3};
use tumble_core::{derive_angular_velocity, BodySet, RigidBody, SubStepIntegrator, Transform};

fn vec3(range: f64) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn orientation() -> impl Strategy<Value = Quat> {
    (vec3(1.0), -6.0..6.0f64).prop_map(|(axis, angle)| Quat::from_axis_angle(axis, angle))
}

proptest! {
    #[test]
    fn derived_velocity_ignores_quaternion_sign(
        current in orientation(),
        previous in orientation(),
        dt in 1e-4..1.0f64,
    ) {
        let delta = current.multiply(&previous.inverse()).normalize();
        prop_assume!(delta.real().abs() > 1e-6);

        let prev = Transform::new(Vec3::ZERO, previous);
        let pos = derive_angular_velocity(&Transform::new(Vec3::ZERO, current), &prev, dt);
        let neg = derive_angular_velocity(&Transform::new(Vec3::ZERO, -current), &prev, dt);
        let scale = pos.length().max(1.0);
        prop_assert!(pos.sub(&neg).length() <= 1e-9 * scale, "{:?} vs {:?}", pos, neg);
    }

    #[test]
    fn integrate_keeps_unit_orientation(
        start in orientation(),
        omega in vec3(20.0),
        velocity in vec3(10.0),
        sub_steps in 1u32..20,
        dt in 1e-3..(1.0 / 30.0),
    ) {
        let mut bodies = BodySet::new();
        let h = bodies.insert(
            RigidBody::new(1.0, Vec3::ZERO, start, velocity, omega).expect("body"),
        );
        let integrator = SubStepIntegrator::new(sub_steps).expect("sub-steps");
        for _ in 0..10 {
            integrator.integrate(&mut bodies, &[], dt).expect("integrate");
        }
        let norm = bodies.get(h).expect("body").pose().rotation().norm();
        prop_assert!(approx_eq(norm, 1.0, 1e-5));
    }

    #[test]
    fn static_body_never_moves(force in vec3(100.0), start in orientation()) {
        let pose = Transform::new(Vec3::new(1.0, 2.0, 3.0), start);
        let mut bodies = BodySet::new();
        let h = bodies.insert(RigidBody::fixed(pose).with_external_force(force));
        SubStepIntegrator::new(5)
            .expect("sub-steps")
            .integrate(&mut bodies, &[], 0.1)
            .expect("integrate");
        prop_assert_eq!(bodies.get(h).expect("body").pose(), pose);
    }
}
