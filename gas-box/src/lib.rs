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
//! # Gas Box
//!
//! A 2D "gas-in-a-box" simulation kernel: equal-mass circular particles
//! moving under gravity inside a rectangular container, bouncing off the
//! walls and off each other, with pressure and temperature derived from the
//! resulting state.
//!
//! ## Features
//!
//! - **Preallocated pool**: a fixed arena of particle slots with an explicit
//!   active count; no allocation per frame
//! - **Broad phase**: uniform-cell spatial hash, rebuilt every step
//! - **Narrow phase**: equal-mass elastic collisions with overlap correction
//! - **Metrics**: pressure from wall impulses, temperature from mean squared speed
//! - **Parallelization**: optional Rayon integration for the per-particle phase
//!
//! ## Example
//!
//! ```rust
//! use gas_box::config::SimulationConfig;
//! use gas_box::math::Vec2;
//! use gas_box::simulation::GasBox;
//!
//! let config = SimulationConfig::new(500, 0.1, 1.0).with_seed(42);
//! let mut gas = GasBox::new(config).unwrap();
//! gas.activate(100, Vec2::ZERO, Vec2::new(8.0, 4.0), 1.0).unwrap();
//!
//! let summary = gas.step(1.0 / 60.0).unwrap();
//! assert_eq!(summary.stats.integrated, 100);
//! ```

#![warn(missing_docs)]

/// Two-dimensional vector math
pub mod math;

/// Error types
pub mod error;

/// Simulation configuration
pub mod config;

/// Container bounds
pub mod bounds;

/// Wall impulse events
pub mod events;

/// Particle state and wall response
pub mod particle;

/// Broad-phase spatial hash
pub mod spatial;

/// Narrow-phase collision response
pub mod collision;

/// Preallocated particle pool
pub mod pool;

/// Simulation world and step pipeline
pub mod world;

/// Pressure and temperature observables
pub mod metrics;

/// Host-facing facade
pub mod simulation;

pub use error::{Error, Result};
pub use simulation::GasBox;
pub use world::SimulationWorld;
