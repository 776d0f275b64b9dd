// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{Quat, Vec3};

/// Stateful `xoroshiro128+` generator used to scatter demo scenes.
///
/// Not cryptographically secure. Matching seeds yield identical sequences on
/// every supported platform, so scattered scenes are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

impl Prng {
    /// Constructs a PRNG from a single 64-bit seed via SplitMix64 expansion.
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let mut state = [splitmix64(&mut sm_state), splitmix64(&mut sm_state)];
        if state == [0, 0] {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }

    /// Returns the next float in `[0, 1)`.
    ///
    /// The high 52 bits fill the mantissa of a float in `[1, 2)`.
    pub fn next_f64(&mut self) -> f64 {
        let bits = (self.next_u64() >> 12) | 0x3ff0_0000_0000_0000;
        f64::from_bits(bits) - 1.0
    }

    /// Returns the next float in `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        debug_assert!(min <= max, "invalid range: {min}..{max}");
        min + (max - min) * self.next_f64()
    }

    /// Returns a vector with each component drawn from `[-extent, extent)`.
    pub fn next_vec3(&mut self, extent: f64) -> Vec3 {
        Vec3::new(
            self.next_range(-extent, extent),
            self.next_range(-extent, extent),
            self.next_range(-extent, extent),
        )
    }

    /// Returns a unit quaternion built from a random axis and angle.
    pub fn next_orientation(&mut self) -> Quat {
        let axis = self.next_vec3(1.0);
        let angle = self.next_range(0.0, core::f64::consts::TAU);
        Quat::from_axis_angle(axis, angle)
    }
}
