// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Narrow-phase particle-particle collision response
//!
//! Equal-mass, frictionless, perfectly elastic contact. Along the contact
//! normal the two particles simply exchange their velocity components; the
//! tangential components are untouched. This exchange conserves momentum and
//! kinetic energy exactly because every particle has the same mass.
//!
//! After the velocity update the pair is pushed apart along the normal, each
//! by half the penetration depth, so they do not stick together on the next
//! step.

use crate::particle::Particle;
use log::trace;

/// Result of a single pair check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// The pair overlapped and was resolved
    Resolved {
        /// Overlap depth removed by the positional correction
        penetration: f64,
    },
    /// Centers are at least `r1 + r2` apart
    Separated,
    /// Centers coincide; no contact normal exists, so the pair is skipped
    Coincident,
}

impl ContactOutcome {
    /// Whether velocities and positions were changed
    pub fn is_resolved(&self) -> bool {
        matches!(self, ContactOutcome::Resolved { .. })
    }
}

/// Pairwise elastic collision resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        CollisionResolver
    }

    /// Resolve the contact between `a` and `b` if they overlap
    ///
    /// No-op unless `0 < distance < r_a + r_b`. Mutates only the velocities and
    /// positions of the two particles.
    pub fn try_resolve(&self, a: &mut Particle, b: &mut Particle) -> ContactOutcome {
        let delta = b.position() - a.position();
        let distance = delta.length();
        let min_distance = a.radius() + b.radius();

        if distance >= min_distance {
            return ContactOutcome::Separated;
        }
        let normal = match delta.normalized() {
            Some(n) if distance > 0.0 => n,
            _ => {
                trace!("skipping coincident particle pair at {:?}", a.position());
                return ContactOutcome::Coincident;
            }
        };
        let tangent = normal.perpendicular();

        let (va, vb) = (a.velocity(), b.velocity());
        let (a_n, a_t) = (va.dot(normal), va.dot(tangent));
        let (b_n, b_t) = (vb.dot(normal), vb.dot(tangent));

        // Swap normal components, keep tangential ones
        a.set_velocity(normal * b_n + tangent * a_t);
        b.set_velocity(normal * a_n + tangent * b_t);

        let penetration = min_distance - distance;
        let correction = normal * (penetration * 0.5);
        a.set_position(a.position() - correction);
        b.set_position(b.position() + correction);

        ContactOutcome::Resolved { penetration }
    }
}
