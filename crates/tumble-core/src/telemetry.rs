// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Structured solver events routed through `tracing`.
//!
//! Nothing is emitted unless a subscriber is installed by the host.

use tracing::{debug, trace};

use crate::body::BodyHandle;
use crate::integrator::StepReport;

#[inline]
pub(crate) fn contact_resolved(body: BodyHandle, depth: f64) {
    trace!(body = body.index(), depth, "contact resolved");
}

#[inline]
pub(crate) fn step_summary(report: &StepReport) {
    debug!(
        sub_steps = report.sub_steps,
        sub_step_dt = report.sub_step_dt,
        contacts = report.contacts_resolved,
        max_penetration = report.max_penetration,
        "integrate finished"
    );
}

pub(crate) fn frame_rewound(from: u64, to: u64) {
    debug!(from, to, "timeline rewound");
}

pub(crate) fn states_evicted(count: usize, earliest_frame: u64) {
    debug!(count, earliest_frame, "timeline evicted oldest states");
}
