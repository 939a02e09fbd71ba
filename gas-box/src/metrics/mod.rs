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
//! Derived observables
//!
//! Read-only aggregators over the world's particles and wall events:
//!
//! - [`PressureTracker`]: wall impulse per unit perimeter, summed over a
//!   fixed sampling window
//! - [`TemperatureTracker`]: mean squared speed of the active particles,
//!   recomputed every step

mod pressure;
mod temperature;

pub use pressure::PressureTracker;
pub use temperature::{mean_squared_speed, TemperatureTracker};
