// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! World snapshot identity.
//!
//! Determinism contract
//! - The hash is a BLAKE3 digest over a canonical byte stream of the frame
//!   counter followed by every body in insertion order.
//! - Per body: inverse mass, translation, rotation `(x, y, z, w)`, velocity,
//!   angular velocity and external force, each `f64` encoded as its
//!   little-endian IEEE-754 bit pattern. `-0.0` and `0.0` therefore hash differently, which is what
//!   a bit-reproducibility check wants.
//! - The previous pose is left out: every sub-step overwrites it before it is
//!   read, so it never influences the next frame.
//! - The body count is encoded as an 8-byte little-endian prefix.
//!
//! Changing any of these rules changes every recorded hash.
use blake3::Hasher;

use crate::body::BodySet;

/// 32-byte BLAKE3 digest.
pub type Hash = [u8; 32];

/// Identity of a world state at a given frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of outer steps taken so far.
    pub frame: u64,
    /// Canonical hash over the frame and all body state.
    pub hash: Hash,
}

impl Snapshot {
    /// Lower-case hex rendering of the hash.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

fn update_f64s(hasher: &mut Hasher, values: &[f64]) {
    for v in values {
        hasher.update(&v.to_bits().to_le_bytes());
    }
}

pub(crate) fn compute_state_hash(bodies: &BodySet, frame: u64) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(&frame.to_le_bytes());
    hasher.update(&(bodies.len() as u64).to_le_bytes());
    for (_, body) in bodies.iter() {
        let pose = body.pose();
        update_f64s(&mut hasher, &[body.inverse_mass()]);
        update_f64s(&mut hasher, &pose.translation().to_array());
        update_f64s(&mut hasher, &pose.rotation().to_array());
        update_f64s(&mut hasher, &body.velocity().to_array());
        update_f64s(&mut hasher, &body.angular_velocity().to_array());
        update_f64s(&mut hasher, &body.external_force().to_array());
    }
    hasher.finalize().into()
}
