// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f64::consts::PI;

use crate::body::{BodyHandle, RigidBody};
use crate::collider::Collider;
use crate::error::SimError;
use crate::integrator::SubStepIntegrator;
use crate::math::{Prng, Quat, Vec3};
use crate::shape::{Cuboid, Plane, Shape};
use crate::transform::Transform;
use crate::world::World;

/// In-memory knobs shared by every demo scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneParams {
    /// Integrator sub-steps per frame.
    pub sub_step_count: u32,
    /// Gravitational acceleration; each body's external force is
    /// `mass * gravity`.
    pub gravity: Vec3,
    /// Height of the static ground plane along `+z`.
    pub plane_height: f64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            sub_step_count: 10,
            gravity: Vec3::new(0.0, 0.0, -9.81),
            plane_height: 0.0,
        }
    }
}

/// A built world plus the handles a driver needs to read poses back.
#[derive(Debug, Clone)]
pub struct Scene {
    /// The simulation.
    pub world: World,
    /// Dynamic cubes in creation order.
    pub cubes: Vec<BodyHandle>,
    /// The static floor body carrying the ground plane.
    pub floor: BodyHandle,
}

/// Empty world with a static floor at `params.plane_height`.
///
/// # Errors
/// [`SimError::InvalidSubStepCount`] for zero sub-steps.
pub fn build_world(params: &SceneParams) -> Result<Scene, SimError> {
    let mut world = World::new(SubStepIntegrator::new(params.sub_step_count)?);
    let floor = world.add_body(RigidBody::fixed(Transform::identity()));
    world.add_collider(Collider::new(
        floor,
        Shape::Plane(Plane::ground(params.plane_height)),
    ))?;
    Ok(Scene {
        world,
        cubes: Vec::new(),
        floor,
    })
}

fn add_cube(scene: &mut Scene, body: RigidBody, half_extent: f64) -> Result<BodyHandle, SimError> {
    let handle = scene.world.add_body(body);
    scene
        .world
        .add_collider(Collider::new(handle, Shape::Cuboid(Cuboid::cube(half_extent)?)))?;
    scene.cubes.push(handle);
    Ok(handle)
}

/// One unit cube launched sideways while spinning, falling onto the floor.
///
/// # Errors
/// See [`tumbling_cube_with`].
pub fn tumbling_cube() -> Result<Scene, SimError> {
    tumbling_cube_with(&SceneParams::default())
}

/// [`tumbling_cube`] with custom parameters.
///
/// Mass 1, position `(0, -2, 4)`, orientation `π/8` about
/// `normalize(ey + 0.5 ex)`, velocity `(0, 4, 0)`, angular velocity
/// `(1, 2, 0.5)`.
///
/// # Errors
/// [`SimError::InvalidSubStepCount`] for zero sub-steps.
pub fn tumbling_cube_with(params: &SceneParams) -> Result<Scene, SimError> {
    let mut scene = build_world(params)?;
    let mass = 1.0;
    let body = RigidBody::new(
        mass,
        Vec3::new(0.0, -2.0, 4.0),
        Quat::from_axis_angle(Vec3::UNIT_Y.add(&Vec3::UNIT_X.scale(0.5)), PI / 8.0),
        Vec3::new(0.0, 4.0, 0.0),
        Vec3::new(1.0, 2.0, 0.5),
    )?
    .with_external_force(params.gravity.scale(mass));
    add_cube(&mut scene, body, 0.5)?;
    Ok(scene)
}

/// `count` cubes scattered above the floor from a seeded PRNG.
///
/// The same `seed` always yields the same scene.
///
/// # Errors
/// [`SimError::InvalidSubStepCount`] for zero sub-steps.
pub fn scattered_cubes(seed: u64, count: usize, params: &SceneParams) -> Result<Scene, SimError> {
    let mut scene = build_world(params)?;
    let mut prng = Prng::from_seed_u64(seed);
    for i in 0..count {
        let mass = prng.next_range(0.5, 2.0);
        let half_extent = prng.next_range(0.25, 0.75);
        #[allow(clippy::cast_precision_loss)]
        let lift = 2.0 + 1.5 * i as f64;
        let position = Vec3::new(
            prng.next_range(-3.0, 3.0),
            prng.next_range(-3.0, 3.0),
            params.plane_height + lift,
        );
        let body = RigidBody::new(
            mass,
            position,
            prng.next_orientation(),
            prng.next_vec3(1.0),
            prng.next_vec3(3.0),
        )?
        .with_external_force(params.gravity.scale(mass));
        add_cube(&mut scene, body, half_extent)?;
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn tumbling_cube_matches_reference_setup() {
        let scene = tumbling_cube().expect("scene");
        assert_eq!(scene.cubes.len(), 1);
        assert_eq!(scene.world.integrator().sub_step_count(), 10);
        let cube = scene.world.body(scene.cubes[0]).expect("cube");
        assert_eq!(cube.pose().translation(), Vec3::new(0.0, -2.0, 4.0));
        assert_eq!(cube.external_force(), Vec3::new(0.0, 0.0, -9.81));
        assert!(scene.world.body(scene.floor).is_some_and(RigidBody::is_static));
    }

    #[test]
    fn scattered_scene_is_seed_stable() {
        let params = SceneParams::default();
        let a = scattered_cubes(11, 4, &params).expect("scene");
        let b = scattered_cubes(11, 4, &params).expect("scene");
        let c = scattered_cubes(12, 4, &params).expect("scene");
        assert_eq!(a.world.snapshot(), b.world.snapshot());
        assert_ne!(a.world.snapshot(), c.world.snapshot());
        assert_eq!(a.world.colliders().len(), 5);
    }
}
