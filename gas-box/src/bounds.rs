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
//! Container bounds

use crate::error::{Error, Result};
use crate::math::Vec2;

/// Axis-aligned rectangular container
///
/// Owned by the simulation world; particles look it up every step instead of
/// holding their own copy, so a resize can never desync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBounds {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl SimulationBounds {
    /// Create bounds from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        SimulationBounds { min, max }
    }

    /// Create bounds centred on `center` with the given `size`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        SimulationBounds::new(center - half, center + half)
    }

    /// Container width
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Container height
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Width and height as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Geometric centre
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// `2 * (width + height)`
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// Whether a particle of `radius` centred at `position` lies fully inside
    pub fn contains(&self, position: Vec2, radius: f64) -> bool {
        position.x >= self.min.x + radius
            && position.x <= self.max.x - radius
            && position.y >= self.min.y + radius
            && position.y <= self.max.y - radius
    }

    /// Check that particles of `radius` fit inside on both axes
    ///
    /// Bounds narrower than a particle diameter would make the wall clamp
    /// oscillate between the two faces every step.
    pub fn validate_for_radius(&self, radius: f64) -> Result<()> {
        let valid = self.min.is_valid()
            && self.max.is_valid()
            && self.width() >= 2.0 * radius
            && self.height() >= 2.0 * radius;
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidBounds {
                width: self.width(),
                height: self.height(),
                radius,
            })
        }
    }
}
