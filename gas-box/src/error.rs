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
//! Error types for the simulation kernel
//!
//! All fallible operations are construction-time or configuration-time
//! validation. Stepping never fails on degenerate particle states; those are
//! skipped as well-defined no-ops.

use thiserror::Error;

/// Crate-wide result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the simulation kernel
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration that would leave the kernel in an undefined state
    /// (zero radius, zero pool size, zero cell size, ...)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Container bounds that cannot hold a particle of the configured radius
    #[error("invalid bounds: width {width} x height {height} cannot contain particles of radius {radius}")]
    InvalidBounds {
        /// Requested container width
        width: f64,
        /// Requested container height
        height: f64,
        /// Configured particle radius
        radius: f64,
    },

    /// Negative or non-finite step duration
    #[error("invalid timestep: {0} (must be finite and >= 0)")]
    InvalidTimestep(f64),

    /// Other invalid API argument
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
