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
//! Preallocated particle pool
//!
//! All particle slots are allocated once at startup. The first
//! `active_count` slots form the active set; slots past it are free and
//! simply ignored by the simulation. Changing the particle count re-slots
//! existing particles instead of allocating, so nothing is reallocated
//! mid-run.

use crate::bounds::SimulationBounds;
use crate::error::{Error, Result};
use crate::math::Vec2;
use crate::particle::Particle;
use log::{info, warn};
use rand::Rng;
use std::f64::consts::TAU;

/// Statistics for monitoring pool usage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolStats {
    /// Number of activation calls
    pub activations: usize,
    /// Activation requests that asked for more than the capacity
    pub clamped_requests: usize,
    /// Largest active count ever reached
    pub peak_active: usize,
}

/// Fixed-capacity arena of particle slots with an explicit active count
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    active: usize,
    stats: PoolStats,
}

impl ParticlePool {
    /// Allocate `capacity` inactive slots sharing `radius` and `elasticity`
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `capacity` is zero, `Error::InvalidParam` if
    /// the particle parameters are invalid.
    pub fn new(capacity: usize, radius: f64, elasticity: f64) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("pool capacity must be > 0".into()));
        }
        let template = Particle::new(radius, elasticity)?;
        info!(
            "Created particle pool: {} slots, radius {}, elasticity {}",
            capacity, radius, elasticity
        );
        Ok(ParticlePool {
            slots: vec![template; capacity],
            active: 0,
            stats: PoolStats::default(),
        })
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of active slots
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// The active particles, in slot order
    pub fn active(&self) -> &[Particle] {
        &self.slots[..self.active]
    }

    /// Mutable view of the active particles
    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.active]
    }

    /// Usage statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Activate `count` particles laid out on a grid inside `area`
    ///
    /// Each activated particle gets a uniformly random direction and speed
    /// `speed`. Slots past `count` become inactive. Requests beyond the pool
    /// capacity are clamped. Returns the number of active particles.
    pub fn activate<R: Rng>(
        &mut self,
        count: usize,
        area: &SimulationBounds,
        speed: f64,
        rng: &mut R,
    ) -> usize {
        let count = if count > self.capacity() {
            warn!(
                "Requested {} particles but pool holds {}; clamping",
                count,
                self.capacity()
            );
            self.stats.clamped_requests += 1;
            self.capacity()
        } else {
            count
        };

        for (particle, position) in self.slots.iter_mut().zip(grid_layout(count, area)) {
            let direction = Vec2::from_angle(rng.gen_range(0.0..TAU));
            particle.reset(position, direction * speed);
        }

        self.active = count;
        self.stats.activations += 1;
        self.stats.peak_active = self.stats.peak_active.max(count);
        info!("Activated {} of {} particles", count, self.capacity());
        count
    }
}

/// Cell centres of a near-square grid holding `count` points inside `area`
///
/// Uses `ceil(sqrt(count))` columns and as many rows as needed, filling row
/// by row from the lower-left corner.
pub fn grid_layout(count: usize, area: &SimulationBounds) -> impl Iterator<Item = Vec2> {
    let columns = (count as f64).sqrt().ceil().max(1.0) as usize;
    let rows = ((count + columns - 1) / columns).max(1);
    let spacing = Vec2::new(area.width() / columns as f64, area.height() / rows as f64);
    let origin = area.min;

    (0..count).map(move |i| {
        let column = (i % columns) as f64 + 0.5;
        let row = (i / columns) as f64 + 0.5;
        origin + Vec2::new(column * spacing.x, row * spacing.y)
    })
}
