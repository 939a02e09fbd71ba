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
//! Wall impulse events
//!
//! Wall bounces are the only collisions the kernel reports. Each bounce
//! produces one event carrying the momentum change magnitude (unit mass), which
//! the pressure tracker accumulates. Particle-particle contacts are internal
//! and never reported.

use std::fmt;

/// Which wall of the container was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// `x = min.x`
    Left,
    /// `x = max.x`
    Right,
    /// `y = min.y`
    Bottom,
    /// `y = max.y`
    Top,
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WallSide::Left => "left",
            WallSide::Right => "right",
            WallSide::Bottom => "bottom",
            WallSide::Top => "top",
        };
        f.pad(name)
    }
}

/// A single wall bounce as seen by the particle that bounced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Wall that was hit
    pub side: WallSide,
    /// Magnitude of the velocity component along the wall normal before the bounce
    pub impulse: f64,
}

/// Wall hits from one wall-collision check, at most one per axis
///
/// Both axes fire together when a particle reaches a corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallHits {
    /// Hit on the left or right wall
    pub x: Option<WallHit>,
    /// Hit on the bottom or top wall
    pub y: Option<WallHit>,
}

impl WallHits {
    /// Iterate over the hits, X axis first
    pub fn iter(&self) -> impl Iterator<Item = WallHit> {
        self.x.into_iter().chain(self.y)
    }

    /// Number of hits (0, 1 or 2)
    pub fn len(&self) -> usize {
        self.x.is_some() as usize + self.y.is_some() as usize
    }

    /// True if no wall was hit
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// A wall bounce tagged with the pool slot of the particle that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallImpulseEvent {
    /// Pool slot index of the bouncing particle
    pub slot: usize,
    /// Wall that was hit
    pub side: WallSide,
    /// Momentum change magnitude, always >= 0
    pub impulse: f64,
}

impl WallImpulseEvent {
    /// Tag a particle-local hit with its slot
    pub fn from_hit(slot: usize, hit: WallHit) -> Self {
        WallImpulseEvent {
            slot,
            side: hit.side,
            impulse: hit.impulse,
        }
    }
}
