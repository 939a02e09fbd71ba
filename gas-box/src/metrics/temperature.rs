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
//! Temperature as mean squared speed

use crate::particle::Particle;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mean of `|v|²` over `particles`, or `None` if there are none
///
/// Proportional to the mean kinetic energy for unit-mass particles.
pub fn mean_squared_speed(particles: &[Particle]) -> Option<f64> {
    if particles.is_empty() {
        return None;
    }
    #[cfg(feature = "parallel")]
    let total: f64 = particles.par_iter().map(Particle::speed_squared).sum();
    #[cfg(not(feature = "parallel"))]
    let total: f64 = particles.iter().map(Particle::speed_squared).sum();

    Some(total / particles.len() as f64)
}

/// Per-step temperature readout
///
/// No smoothing: every update replaces the value. An empty active set leaves
/// the previous value in place.
#[derive(Debug, Clone, Default)]
pub struct TemperatureTracker {
    temperature: f64,
}

impl TemperatureTracker {
    /// Create a tracker reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the active particles and return the current value
    pub fn update(&mut self, particles: &[Particle]) -> f64 {
        if let Some(t) = mean_squared_speed(particles) {
            self.temperature = t;
        }
        self.temperature
    }

    /// Last computed temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn moving(velocity: Vec2) -> Particle {
        let mut p = Particle::new(0.1, 1.0).unwrap();
        p.reset(Vec2::ZERO, velocity);
        p
    }

    #[test]
    fn test_mean_squared_speed() {
        let particles = vec![moving(Vec2::new(3.0, 4.0)), moving(Vec2::new(1.0, 0.0))];
        assert_eq!(mean_squared_speed(&particles), Some(13.0));
        assert_eq!(mean_squared_speed(&[]), None);
    }

    #[test]
    fn test_tracker_keeps_value_when_empty() {
        let mut tracker = TemperatureTracker::new();
        assert_eq!(tracker.temperature(), 0.0);

        tracker.update(&[moving(Vec2::new(0.0, 2.0))]);
        assert_eq!(tracker.temperature(), 4.0);

        assert_eq!(tracker.update(&[]), 4.0);
    }
}
