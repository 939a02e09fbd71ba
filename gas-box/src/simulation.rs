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
//! Host-facing simulation facade
//!
//! [`GasBox`] bundles the world with its two metric trackers and is the
//! single place where wall events reach the pressure tracker and container
//! resizes reach its perimeter. A host render loop only needs to call
//! [`GasBox::step`] once per frame and read the accessors.

use crate::bounds::SimulationBounds;
use crate::config::{SimulationConfig, DEFAULT_AREA_SIZE};
use crate::error::Result;
use crate::math::Vec2;
use crate::metrics::{PressureTracker, TemperatureTracker};
use crate::particle::Particle;
use crate::world::{SimulationWorld, StepStats};

/// Per-frame summary returned by [`GasBox::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummary {
    /// World step counters
    pub stats: StepStats,
    /// Sum of wall impulses this step
    pub wall_impulse: f64,
    /// New pressure sample if a window completed this step
    pub pressure_sample: Option<f64>,
    /// Temperature after this step
    pub temperature: f64,
}

/// A gas in a box: world plus pressure and temperature readouts
///
/// # Examples
///
/// ```
/// use gas_box::config::SimulationConfig;
/// use gas_box::math::Vec2;
/// use gas_box::simulation::GasBox;
///
/// let config = SimulationConfig::new(200, 0.05, 1.0).with_seed(1);
/// let mut gas = GasBox::new(config).unwrap();
/// gas.activate(100, Vec2::ZERO, Vec2::new(8.0, 4.0), 1.0).unwrap();
///
/// for _ in 0..120 {
///     gas.step(1.0 / 60.0).unwrap();
/// }
/// assert_eq!(gas.particles().len(), 100);
/// assert!(gas.temperature() > 0.0);
/// ```
pub struct GasBox {
    world: SimulationWorld,
    pressure: PressureTracker,
    temperature: TemperatureTracker,
}

impl GasBox {
    /// Create an inactive simulation with the default container
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let bounds = SimulationBounds::from_center_size(Vec2::ZERO, DEFAULT_AREA_SIZE);
        Self::with_bounds(config, bounds)
    }

    /// Create an inactive simulation inside `bounds`
    pub fn with_bounds(config: SimulationConfig, bounds: SimulationBounds) -> Result<Self> {
        let window = config.pressure_window;
        let world = SimulationWorld::new(config, bounds)?;
        let mut pressure = PressureTracker::new(window, world.bounds())?;
        pressure.sync_bounds(&world);
        Ok(GasBox {
            world,
            pressure,
            temperature: TemperatureTracker::new(),
        })
    }

    /// Activate `count` particles inside the area at `center` with `size`
    ///
    /// Returns the number of active particles after clamping to capacity.
    pub fn activate(
        &mut self,
        count: usize,
        center: Vec2,
        size: Vec2,
        speed_multiplier: f64,
    ) -> Result<usize> {
        let active = self.world.activate(count, center, size, speed_multiplier)?;
        self.pressure.sync_bounds(&self.world);
        self.temperature.update(self.world.particles());
        Ok(active)
    }

    /// Advance one frame of `dt` seconds and update both metrics
    pub fn step(&mut self, dt: f64) -> Result<StepSummary> {
        let report = self.world.step(dt)?;
        let stats = report.stats;
        let wall_impulse = report.total_impulse();
        self.pressure.record_events(report.events);

        let pressure_sample = self.pressure.advance(dt);
        let temperature = self.temperature.update(self.world.particles());

        Ok(StepSummary {
            stats,
            wall_impulse,
            pressure_sample,
            temperature,
        })
    }

    /// Resize the container live
    pub fn set_bounds(&mut self, center: Vec2, size: Vec2) -> Result<()> {
        self.world.set_bounds(center, size)?;
        self.pressure.sync_bounds(&self.world);
        Ok(())
    }

    /// Active particles
    pub fn particles(&self) -> &[Particle] {
        self.world.particles()
    }

    /// Pressure of the last completed sampling window
    pub fn pressure(&self) -> f64 {
        self.pressure.latest()
    }

    /// Current temperature (mean squared speed)
    pub fn temperature(&self) -> f64 {
        self.temperature.temperature()
    }

    /// Current container bounds
    pub fn bounds(&self) -> &SimulationBounds {
        self.world.bounds()
    }

    /// The underlying world
    pub fn world(&self) -> &SimulationWorld {
        &self.world
    }

    /// The pressure tracker
    pub fn pressure_tracker(&self) -> &PressureTracker {
        &self.pressure
    }
}
