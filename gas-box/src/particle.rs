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
//! Particle state, integration and wall response
//!
//! A particle is a unit-mass disc. Each step it is advanced with
//! semi-implicit Euler (velocity first, then position) and then pushed back
//! inside the container, one axis at a time.
//!
//! # Wall response
//!
//! The wall check is a discrete approximation: a particle that overshoots a
//! wall is clamped onto the wall face rather than reflected from the exact
//! crossing point. For large `dt * speed` this under-simulates the reflected
//! path, but containment is always exact after the call.

use crate::bounds::SimulationBounds;
use crate::error::{Error, Result};
use crate::events::{WallHit, WallHits, WallSide};
use crate::math::Vec2;

/// A circular, unit-mass gas particle
///
/// # Examples
///
/// ```
/// use gas_box::math::Vec2;
/// use gas_box::particle::Particle;
///
/// let mut p = Particle::new(0.5, 1.0).unwrap();
/// p.reset(Vec2::ZERO, Vec2::new(1.0, 0.0));
/// p.integrate(0.1, Vec2::ZERO, 100.0);
/// assert!((p.position().x - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    radius: f64,
    elasticity: f64,
}

impl Particle {
    /// Create a particle at rest at the origin
    ///
    /// # Errors
    ///
    /// `Error::InvalidParam` if `radius` is not finite and positive or
    /// `elasticity` is outside [0, 1].
    pub fn new(radius: f64, elasticity: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !(0.0..=1.0).contains(&elasticity) {
            return Err(Error::InvalidParam("elasticity must be in [0, 1]".into()));
        }
        Ok(Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            elasticity,
        })
    }

    /// Re-initialize position and velocity, used when a pool slot is activated
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
    }

    /// World-space centre
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Radius, fixed at creation
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Wall restitution coefficient
    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Speed squared, proportional to kinetic energy for unit mass
    pub fn speed_squared(&self) -> f64 {
        self.velocity.length_squared()
    }

    /// Speed (velocity magnitude)
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Kinetic energy `0.5 * |v|²` with unit mass
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.speed_squared()
    }

    /// Advance by `dt` under constant `gravity`
    ///
    /// Velocity is capped at `max_speed` before the position update so a
    /// degenerate configuration cannot blow up numerically.
    pub fn integrate(&mut self, dt: f64, gravity: Vec2, max_speed: f64) {
        self.velocity += gravity * dt;
        self.velocity = self.velocity.clamp_length(max_speed);
        self.position += self.velocity * dt;
    }

    /// Bounce off any wall the particle has crossed
    ///
    /// Each axis is checked independently. On a hit the pre-bounce speed along
    /// that axis is recorded as the impulse, the component is reversed and
    /// scaled by the elasticity, and the position is clamped onto the wall.
    pub fn resolve_wall_collision(&mut self, bounds: &SimulationBounds) -> WallHits {
        let r = self.radius;
        let x = resolve_axis(
            &mut self.position.x,
            &mut self.velocity.x,
            bounds.min.x + r,
            bounds.max.x - r,
            self.elasticity,
        )
        .map(|(impulse, low)| WallHit {
            side: if low { WallSide::Left } else { WallSide::Right },
            impulse,
        });
        let y = resolve_axis(
            &mut self.position.y,
            &mut self.velocity.y,
            bounds.min.y + r,
            bounds.max.y - r,
            self.elasticity,
        )
        .map(|(impulse, low)| WallHit {
            side: if low { WallSide::Bottom } else { WallSide::Top },
            impulse,
        });
        WallHits { x, y }
    }

    /// Clamp the position inside `bounds` without touching the velocity
    ///
    /// Used after contact correction, which can nudge a particle sitting on
    /// a wall slightly past it. Returns true if the position changed.
    pub fn confine(&mut self, bounds: &SimulationBounds) -> bool {
        let r = self.radius;
        let before = self.position;
        self.position.x = self.position.x.max(bounds.min.x + r).min(bounds.max.x - r);
        self.position.y = self.position.y.max(bounds.min.y + r).min(bounds.max.y - r);
        self.position != before
    }
}

/// Returns the impulse and whether the low wall was hit
fn resolve_axis(
    position: &mut f64,
    velocity: &mut f64,
    lo: f64,
    hi: f64,
    elasticity: f64,
) -> Option<(f64, bool)> {
    let low = *position < lo;
    if !low && *position <= hi {
        return None;
    }
    let impulse = velocity.abs();
    *velocity *= -elasticity;
    // max/min rather than f64::clamp: never panics even if lo > hi
    *position = position.max(lo).min(hi);
    Some((impulse, low))
}
