// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sub-stepped position-based integrator.

use crate::body::BodySet;
use crate::collider::Collider;
use crate::constraint::{ground_contacts, project, PositionConstraint};
use crate::error::SimError;
use crate::telemetry;

/// Outcome of one [`SubStepIntegrator::integrate`] call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepReport {
    /// Sub-steps executed.
    pub sub_steps: u32,
    /// Duration of each sub-step.
    pub sub_step_dt: f64,
    /// Constraint projections that moved at least one body.
    pub contacts_resolved: u32,
    /// Deepest penetration removed during the call (`0` when none).
    pub max_penetration: f64,
}

impl StepReport {
    fn new(sub_steps: u32, sub_step_dt: f64) -> Self {
        Self {
            sub_steps,
            sub_step_dt,
            contacts_resolved: 0,
            max_penetration: 0.0,
        }
    }

    fn record(&mut self, depth: f64) {
        self.contacts_resolved += 1;
        self.max_penetration = self.max_penetration.max(depth);
    }
}

/// Advances bodies by an outer time step split into `N` equal sub-steps.
///
/// Each sub-step runs, in fixed order over bodies and constraints:
/// 1. snapshot `previous_pose := pose`;
/// 2. predict (`apply_prediction`);
/// 3. project every ground contact once against the predicted poses;
/// 4. rebuild velocities from the pose delta (`reconcile_velocity`).
///
/// Sub-steps are strictly sequential. Identical inputs produce bit-identical
/// poses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SubStepIntegrator {
    sub_step_count: u32,
}

impl SubStepIntegrator {
    /// Creates an integrator running `sub_step_count` sub-steps per call.
    ///
    /// # Errors
    /// [`SimError::InvalidSubStepCount`] when `sub_step_count == 0`.
    pub fn new(sub_step_count: u32) -> Result<Self, SimError> {
        if sub_step_count == 0 {
            return Err(SimError::InvalidSubStepCount);
        }
        Ok(Self { sub_step_count })
    }

    /// Sub-steps per outer step.
    pub fn sub_step_count(&self) -> u32 {
        self.sub_step_count
    }

    /// Advances every body in `bodies` by `dt`, enforcing the constraints
    /// generated from `colliders`.
    ///
    /// # Errors
    /// - [`SimError::InvalidTimeStep`] when `dt` is not finite and positive.
    /// - [`SimError::UnknownBody`] when a collider refers outside `bodies`.
    ///
    /// Both are checked once, before any state is touched.
    pub fn integrate(
        &self,
        bodies: &mut BodySet,
        colliders: &[Collider],
        dt: f64,
    ) -> Result<StepReport, SimError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidTimeStep(dt));
        }
        for collider in colliders {
            bodies.validate(collider.body())?;
        }

        let h = dt / f64::from(self.sub_step_count);
        let _span = tracing::debug_span!("integrate", dt, sub_steps = self.sub_step_count).entered();
        let mut report = StepReport::new(self.sub_step_count, h);

        for _ in 0..self.sub_step_count {
            for body in bodies.iter_mut() {
                body.snapshot_previous();
            }
            for body in bodies.iter_mut() {
                body.apply_prediction(h);
            }
            for contact in ground_contacts(colliders) {
                if let Some(correction) = project(bodies, &contact) {
                    telemetry::contact_resolved(contact.participants().0, correction.depth);
                    report.record(correction.depth);
                }
            }
            for body in bodies.iter_mut() {
                body.reconcile_velocity(h);
            }
        }

        telemetry::step_summary(&report);
        Ok(report)
    }
}

/// Rejects NaN or infinite body state.
///
/// Meant for drivers and test harnesses between frames; `integrate` does not
/// call it.
///
/// # Errors
/// [`SimError::NonFiniteState`] naming the first offending body.
pub fn check_finite(bodies: &BodySet) -> Result<(), SimError> {
    match bodies.iter().find(|(_, b)| !b.is_finite()) {
        Some((handle, _)) => Err(SimError::NonFiniteState {
            body: handle.index(),
        }),
        None => Ok(()),
    }
}
