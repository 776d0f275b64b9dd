// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recorded world history with step-back / step-forward navigation.
//!
//! Every stepped state is kept, so stepping back and forward again replays
//! recorded states instead of re-integrating. Editing the current state via
//! [`Timeline::branch`] discards the recorded future.

use std::collections::VecDeque;

use crate::body::BodyHandle;
use crate::error::SimError;
use crate::integrator::StepReport;
use crate::telemetry;
use crate::transform::Transform;
use crate::world::World;

/// Relative distance from a whole frame number below which a time is read as
/// exactly that frame.
const FRAME_SNAP: f64 = 1e-9;

/// Cursor over a sequence of recorded [`World`] states.
#[derive(Debug, Clone)]
pub struct Timeline {
    states: VecDeque<World>,
    cursor: usize,
    dt: f64,
    capacity: Option<usize>,
}

impl Timeline {
    /// Starts a timeline at `world`, advancing by `dt` per frame.
    ///
    /// # Errors
    /// [`SimError::InvalidTimeStep`] when `dt` is not finite and positive.
    pub fn new(world: World, dt: f64) -> Result<Self, SimError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidTimeStep(dt));
        }
        let mut states = VecDeque::new();
        states.push_back(world);
        Ok(Self {
            states,
            cursor: 0,
            dt,
            capacity: None,
        })
    }

    /// Keeps at most `capacity` states (at least one), dropping the oldest.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity.max(1));
        self.evict();
        self
    }

    /// State under the cursor.
    pub fn current(&self) -> &World {
        // The deque is never empty and the cursor always indexes into it.
        &self.states[self.cursor]
    }

    /// Frame number of the state under the cursor.
    pub fn frame(&self) -> u64 {
        self.current().frame()
    }

    /// Index of the cursor inside the retained states.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; a timeline holds at least its starting state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Frame time used when integrating new states.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Moves one frame forward.
    ///
    /// Returns `Some(report)` when a new state had to be integrated and
    /// `None` when a recorded one was replayed.
    ///
    /// # Errors
    /// Propagates integration errors; the timeline is unchanged on error.
    pub fn step_forward(&mut self) -> Result<Option<StepReport>, SimError> {
        if self.cursor + 1 < self.states.len() {
            self.cursor += 1;
            return Ok(None);
        }
        let mut next = self.current().clone();
        let report = next.step(self.dt)?;
        self.states.push_back(next);
        self.cursor = self.states.len() - 1;
        self.evict();
        Ok(Some(report))
    }

    /// Moves one frame back; returns `false` at the oldest retained state.
    pub fn step_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let from = self.frame();
        self.cursor -= 1;
        telemetry::frame_rewound(from, self.frame());
        true
    }

    /// Moves the cursor to `frame`, integrating forward if it lies in the
    /// future.
    ///
    /// # Errors
    /// - [`SimError::FrameEvicted`] when `frame` is older than every retained
    ///   state.
    /// - Integration errors while simulating forward.
    pub fn seek(&mut self, frame: u64) -> Result<(), SimError> {
        let earliest = self.states.front().map_or(0, World::frame);
        if frame < earliest {
            return Err(SimError::FrameEvicted(frame));
        }
        while self.frame() < frame {
            self.step_forward()?;
        }
        while self.frame() > frame {
            self.step_back();
        }
        Ok(())
    }

    /// Mutable access to the current state; drops every recorded state after
    /// the cursor since it no longer follows from the edited one.
    pub fn branch(&mut self) -> &mut World {
        self.states.truncate(self.cursor + 1);
        &mut self.states[self.cursor]
    }

    /// Pose of `body` at `time` seconds, interpolated between the two
    /// recorded frames around it.
    ///
    /// Returns `None` when the body is unknown or the time is not covered by
    /// retained states.
    pub fn interpolated_pose(&self, body: BodyHandle, time: f64) -> Option<Transform> {
        if !time.is_finite() || time < 0.0 {
            return None;
        }
        let mut position = time / self.dt;
        // `k * dt / dt` can land a few ulps off `k`; treat that as frame `k`.
        let nearest = position.round();
        if (position - nearest).abs() <= FRAME_SNAP * nearest.max(1.0) {
            position = nearest;
        }
        let base = position.floor();
        let t = position - base;
        let earliest = self.states.front()?.frame();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let base = base as u64;
        let index = usize::try_from(base.checked_sub(earliest)?).ok()?;
        let a = self.states.get(index)?.pose(body)?;
        match self.states.get(index + 1).and_then(|w| w.pose(body)) {
            Some(b) => Some(a.interpolate(&b, t)),
            None if t == 0.0 => Some(a),
            None => None,
        }
    }

    fn evict(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        let excess = self.states.len().saturating_sub(capacity);
        if excess == 0 {
            return;
        }
        self.states.drain(..excess);
        self.cursor = self.cursor.saturating_sub(excess);
        telemetry::states_evicted(excess, self.states.front().map_or(0, World::frame));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::demo;

    fn timeline() -> Timeline {
        let scene = demo::tumbling_cube().expect("scene");
        Timeline::new(scene.world, demo::FRAME_TIME).expect("timeline")
    }

    #[test]
    fn replay_after_step_back_is_identical() {
        let mut tl = timeline();
        for _ in 0..5 {
            assert!(tl.step_forward().expect("step").is_some());
        }
        let at_five = tl.current().snapshot();
        assert!(tl.step_back());
        assert!(tl.step_back());
        assert_eq!(tl.frame(), 3);
        assert!(tl.step_forward().expect("step").is_none());
        assert!(tl.step_forward().expect("step").is_none());
        assert_eq!(tl.current().snapshot(), at_five);
    }

    #[test]
    fn step_back_saturates_at_start() {
        let mut tl = timeline();
        assert!(!tl.step_back());
        assert_eq!(tl.frame(), 0);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut tl = timeline().with_capacity(3);
        for _ in 0..6 {
            tl.step_forward().expect("step");
        }
        assert_eq!(tl.len(), 3);
        assert_eq!(tl.frame(), 6);
        assert_eq!(tl.seek(1), Err(SimError::FrameEvicted(1)));
        assert!(tl.seek(4).is_ok());
        assert_eq!(tl.frame(), 4);
    }

    #[test]
    fn branch_discards_future() {
        let mut tl = timeline();
        tl.seek(4).expect("seek");
        tl.seek(2).expect("seek");
        assert_eq!(tl.len(), 5);
        let _ = tl.branch();
        assert_eq!(tl.len(), 3);
    }

    #[test]
    fn interpolated_pose_hits_recorded_frames() {
        let mut tl = timeline();
        tl.seek(2).expect("seek");
        let cube = demo::tumbling_cube().expect("scene").cubes[0];
        let recorded = tl.current().pose(cube);
        assert_eq!(tl.interpolated_pose(cube, 2.0 * demo::FRAME_TIME), recorded);
        let mid = tl
            .interpolated_pose(cube, 1.5 * demo::FRAME_TIME)
            .expect("covered");
        assert!((mid.rotation().norm() - 1.0).abs() < 1e-12);
        assert!(tl.interpolated_pose(cube, 10.0).is_none());
    }

    #[test]
    fn interpolated_pose_at_newest_frame_with_rounded_time() {
        let mut tl = timeline();
        tl.seek(125).expect("seek");
        let cube = demo::tumbling_cube().expect("scene").cubes[0];
        // 125 * dt / dt rounds to just above 125 and there is no frame 126 yet.
        assert!((125.0 * demo::FRAME_TIME) / demo::FRAME_TIME > 125.0);
        assert_eq!(
            tl.interpolated_pose(cube, 125.0 * demo::FRAME_TIME),
            tl.current().pose(cube)
        );
        assert!(tl.current().pose(cube).is_some());
    }
}
