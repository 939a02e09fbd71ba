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
//! Simulation configuration
//!
//! Every tunable of the kernel lives in [`SimulationConfig`]. Hosts build it
//! with `Default` plus the `with_*` helpers, and the kernel calls
//! [`SimulationConfig::validate`] once at construction.

use crate::error::{Error, Result};
use crate::math::Vec2;

/// Standard gravity at the Earth's surface (m/s²), pointing down
pub const STANDARD_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Default multiplier applied to the particle radius to get the grid cell size
///
/// Slightly above 2 so a cell always spans a full particle diameter.
pub const DEFAULT_CELL_SIZE_MULTIPLIER: f64 = 2.1;

/// Default container size, centred on the origin
pub const DEFAULT_AREA_SIZE: Vec2 = Vec2::new(8.0, 4.0);

/// Default velocity magnitude ceiling
pub const DEFAULT_MAX_SPEED: f64 = 10_000.0;

/// Configuration for a gas-in-a-box simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of preallocated particle slots
    pub max_particles: usize,
    /// Radius shared by every particle
    pub radius: f64,
    /// Wall restitution in [0, 1]; 1 is perfectly elastic
    pub elasticity: f64,
    /// Constant acceleration applied to every particle
    pub gravity: Vec2,
    /// Grid cell size as a multiple of the radius (>= 2)
    pub cell_size_multiplier: f64,
    /// Ceiling on velocity magnitude after gravity is applied
    pub max_speed: f64,
    /// Initial speed before the activation speed multiplier
    pub base_speed: f64,
    /// Pressure sampling window in seconds
    pub pressure_window: f64,
    /// Seed for initial direction sampling; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_particles: 10_000,
            radius: 0.1,
            elasticity: 1.0,
            gravity: STANDARD_GRAVITY,
            cell_size_multiplier: DEFAULT_CELL_SIZE_MULTIPLIER,
            max_speed: DEFAULT_MAX_SPEED,
            base_speed: 5.0,
            pressure_window: 1.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration for a pool of `max_particles` slots
    pub fn new(max_particles: usize, radius: f64, elasticity: f64) -> Self {
        SimulationConfig {
            max_particles,
            radius,
            elasticity,
            ..Default::default()
        }
    }

    /// Set the gravity vector
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity
    pub fn without_gravity(self) -> Self {
        self.with_gravity(Vec2::ZERO)
    }

    /// Set the cell-size multiplier
    pub fn with_cell_size_multiplier(mut self, multiplier: f64) -> Self {
        self.cell_size_multiplier = multiplier;
        self
    }

    /// Set the velocity magnitude ceiling
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set the initial particle speed
    pub fn with_base_speed(mut self, base_speed: f64) -> Self {
        self.base_speed = base_speed;
        self
    }

    /// Set the pressure sampling window
    pub fn with_pressure_window(mut self, window: f64) -> Self {
        self.pressure_window = window;
        self
    }

    /// Use a fixed seed for reproducible initial directions
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Grid cell size derived from the radius
    pub fn cell_size(&self) -> f64 {
        self.radius * self.cell_size_multiplier
    }

    /// Validate the configuration
    ///
    /// Rejects anything that would make the spatial hash or wall containment
    /// undefined. A zero cell size in particular would divide by zero when
    /// mapping positions to cells.
    pub fn validate(&self) -> Result<()> {
        if self.max_particles == 0 {
            return Err(Error::InvalidConfig("max_particles must be > 0".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(Error::InvalidConfig(format!(
                "elasticity must be in [0, 1], got {}",
                self.elasticity
            )));
        }
        if !self.gravity.is_valid() {
            return Err(Error::InvalidConfig("gravity must be finite".into()));
        }
        if !self.cell_size_multiplier.is_finite() || self.cell_size_multiplier < 2.0 {
            return Err(Error::InvalidConfig(format!(
                "cell_size_multiplier must be >= 2 so neighbor scans cannot miss a contact, got {}",
                self.cell_size_multiplier
            )));
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(Error::InvalidConfig("max_speed must be finite and > 0".into()));
        }
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(Error::InvalidConfig("base_speed must be finite and >= 0".into()));
        }
        if !self.pressure_window.is_finite() || self.pressure_window <= 0.0 {
            return Err(Error::InvalidConfig("pressure_window must be finite and > 0".into()));
        }
        Ok(())
    }
}
