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
//! Pressure from wall impulses

use crate::bounds::SimulationBounds;
use crate::error::{Error, Result};
use crate::events::WallImpulseEvent;
use crate::world::SimulationWorld;
use log::{debug, info, warn};

/// Accumulates wall impulses and reports pressure once per window
///
/// `pressure = impulse_sum / perimeter`: the impulse collected during one
/// window divided by the container perimeter. The window length only sets
/// how often a sample is taken.
///
/// # Examples
///
/// ```
/// use gas_box::bounds::SimulationBounds;
/// use gas_box::math::Vec2;
/// use gas_box::metrics::PressureTracker;
///
/// let bounds = SimulationBounds::from_center_size(Vec2::ZERO, Vec2::new(3.0, 2.0));
/// let mut tracker = PressureTracker::new(1.0, &bounds).unwrap();
/// tracker.record_impulse(5.0);
/// assert_eq!(tracker.advance(1.0), Some(0.5));
/// ```
#[derive(Debug, Clone)]
pub struct PressureTracker {
    window: f64,
    elapsed: f64,
    impulse_sum: f64,
    perimeter: f64,
    pressure: f64,
    samples: u64,
    bounds_revision: Option<u64>,
}

impl PressureTracker {
    /// Create a tracker with a sampling `window` (seconds) for `bounds`
    pub fn new(window: f64, bounds: &SimulationBounds) -> Result<Self> {
        if !window.is_finite() || window <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "pressure window must be finite and > 0, got {}",
                window
            )));
        }
        let perimeter = bounds.perimeter();
        info!("Container perimeter set to {:.3}", perimeter);
        Ok(PressureTracker {
            window,
            elapsed: 0.0,
            impulse_sum: 0.0,
            perimeter,
            pressure: 0.0,
            samples: 0,
            bounds_revision: None,
        })
    }

    /// Add one wall impulse to the current window
    pub fn record_impulse(&mut self, impulse: f64) {
        self.impulse_sum += impulse;
    }

    /// Add every impulse of a step
    pub fn record_events(&mut self, events: &[WallImpulseEvent]) {
        self.impulse_sum += events.iter().map(|e| e.impulse).sum::<f64>();
    }

    /// Recompute the perimeter after the container changed
    pub fn update_perimeter(&mut self, bounds: &SimulationBounds) {
        self.perimeter = bounds.perimeter();
        info!("Perimeter updated: {:.3}", self.perimeter);
    }

    /// Pick up a bounds change from the world, if any
    ///
    /// Returns true when the perimeter was recomputed.
    pub fn sync_bounds(&mut self, world: &SimulationWorld) -> bool {
        let revision = world.bounds_revision();
        if self.bounds_revision == Some(revision) {
            return false;
        }
        self.bounds_revision = Some(revision);
        if (world.bounds().perimeter() - self.perimeter).abs() > f64::EPSILON {
            self.update_perimeter(world.bounds());
            true
        } else {
            false
        }
    }

    /// Advance the window clock by `dt`
    ///
    /// When the window fills, the pressure is computed, the accumulator is
    /// reset and the new value is returned.
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        self.elapsed += dt;
        if self.elapsed < self.window {
            return None;
        }

        self.pressure = if self.perimeter > 0.0 {
            self.impulse_sum / self.perimeter
        } else {
            warn!("Perimeter is zero; reporting zero pressure");
            0.0
        };
        self.samples += 1;
        debug!("Pressure: {:.2}", self.pressure);

        self.impulse_sum = 0.0;
        self.elapsed = 0.0;
        Some(self.pressure)
    }

    /// Pressure of the last completed window
    pub fn latest(&self) -> f64 {
        self.pressure
    }

    /// Number of completed windows
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Perimeter currently used for normalization
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    /// Impulse collected so far in the current window
    pub fn accumulated(&self) -> f64 {
        self.impulse_sum
    }

    /// Sampling window in seconds
    pub fn window(&self) -> f64 {
        self.window
    }
}
