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
//! Simulation world
//!
//! The world owns the particle pool, the container bounds and the spatial
//! grid, and drives the per-step pipeline:
//!
//! 1. integrate every active particle, then bounce it off the walls
//! 2. rebuild the spatial grid from the new positions
//! 3. resolve every overlapping pair found through the grid, once per pair,
//!    keeping the corrected positions inside the walls
//!
//! Wall bounces are collected into an event buffer that is handed back from
//! [`SimulationWorld::step`] and stays readable until the next step.
//!
//! With the `parallel` feature, phase 1 runs on the Rayon thread pool. Each
//! particle is touched by exactly one worker and hits are gathered in slot
//! order, so the events match a sequential run exactly. Phase 3 is always
//! sequential: resolution order matters when three or more particles overlap,
//! and resolving pairs in slot order keeps it reproducible.

use crate::bounds::SimulationBounds;
use crate::collision::{CollisionResolver, ContactOutcome};
use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::events::WallImpulseEvent;
use crate::math::Vec2;
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::spatial::SpatialGrid;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "parallel")]
use crate::events::WallHits;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counters for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particles integrated
    pub integrated: usize,
    /// Wall bounces (one per axis hit)
    pub wall_hits: usize,
    /// Broad-phase candidate pairs examined (each unordered pair counted once)
    pub candidate_pairs: usize,
    /// Pairs that overlapped and were resolved
    pub resolved_pairs: usize,
    /// Pairs skipped because their centers coincided
    pub degenerate_pairs: usize,
}

/// What one call to [`SimulationWorld::step`] produced
#[derive(Debug, Clone, Copy)]
pub struct StepReport<'a> {
    /// Wall bounces in slot order
    pub events: &'a [WallImpulseEvent],
    /// Step counters
    pub stats: StepStats,
}

impl StepReport<'_> {
    /// Sum of the wall impulses of this step
    pub fn total_impulse(&self) -> f64 {
        self.events.iter().map(|e| e.impulse).sum()
    }
}

/// The simulation state and step driver
pub struct SimulationWorld {
    config: SimulationConfig,
    pool: ParticlePool,
    bounds: SimulationBounds,
    bounds_revision: u64,
    grid: SpatialGrid,
    resolver: CollisionResolver,
    events: Vec<WallImpulseEvent>,
    last_stats: StepStats,
    rng: ChaCha8Rng,
    #[cfg(feature = "parallel")]
    hit_buffer: Vec<WallHits>,
}

impl SimulationWorld {
    /// Create a world with an inactive pool inside `bounds`
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or `bounds` cannot contain a
    /// particle of the configured radius.
    pub fn new(config: SimulationConfig, bounds: SimulationBounds) -> Result<Self> {
        config.validate()?;
        bounds.validate_for_radius(config.radius)?;

        let pool = ParticlePool::new(config.max_particles, config.radius, config.elasticity)?;
        let grid = SpatialGrid::new(config.cell_size());
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(SimulationWorld {
            config,
            pool,
            bounds,
            bounds_revision: 0,
            grid,
            resolver: CollisionResolver::new(),
            events: Vec::new(),
            last_stats: StepStats::default(),
            rng,
            #[cfg(feature = "parallel")]
            hit_buffer: Vec::new(),
        })
    }

    /// The configuration the world was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current container bounds
    pub fn bounds(&self) -> &SimulationBounds {
        &self.bounds
    }

    /// Incremented every time the bounds change
    ///
    /// Metrics compare this with the revision they last saw to learn about
    /// perimeter changes.
    pub fn bounds_revision(&self) -> u64 {
        self.bounds_revision
    }

    /// The active particles, in slot order
    pub fn particles(&self) -> &[Particle] {
        self.pool.active()
    }

    /// The underlying pool
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// The spatial grid as of the last step
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Wall events from the last step
    pub fn wall_events(&self) -> &[WallImpulseEvent] {
        &self.events
    }

    /// Counters from the last step
    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Mutable access to one active particle, for hosts placing particles by hand
    pub fn particle_mut(&mut self, slot: usize) -> Option<&mut Particle> {
        self.pool.active_mut().get_mut(slot)
    }

    /// Activate `count` particles on a grid inside the area at `center` with `size`
    ///
    /// The area becomes the new container. Every activated particle gets a
    /// random direction and speed `base_speed * speed_multiplier`. Requests
    /// beyond the pool capacity are clamped. Returns the active count.
    pub fn activate(
        &mut self,
        count: usize,
        center: Vec2,
        size: Vec2,
        speed_multiplier: f64,
    ) -> Result<usize> {
        if !speed_multiplier.is_finite() || speed_multiplier < 0.0 {
            return Err(Error::InvalidParam(format!(
                "speed_multiplier must be finite and >= 0, got {}",
                speed_multiplier
            )));
        }
        let area = SimulationBounds::from_center_size(center, size);
        self.replace_bounds(area)?;

        let speed = self.config.base_speed * speed_multiplier;
        let active = self.pool.activate(count, &area, speed, &mut self.rng);
        self.events.clear();
        self.grid.clear();
        Ok(active)
    }

    /// Resize the container around `center`
    ///
    /// Particles are not moved; any particle now outside is clamped back on
    /// the next step.
    pub fn set_bounds(&mut self, center: Vec2, size: Vec2) -> Result<()> {
        self.replace_bounds(SimulationBounds::from_center_size(center, size))
    }

    fn replace_bounds(&mut self, bounds: SimulationBounds) -> Result<()> {
        bounds.validate_for_radius(self.config.radius)?;
        if bounds != self.bounds {
            self.bounds = bounds;
            self.bounds_revision += 1;
            info!(
                "Bounds updated to {:.3} x {:.3} at ({:.3}, {:.3})",
                bounds.width(),
                bounds.height(),
                bounds.center().x,
                bounds.center().y
            );
        }
        Ok(())
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// An empty active set makes this a no-op; a single particle skips
    /// collision resolution.
    ///
    /// # Errors
    ///
    /// `Error::InvalidTimestep` if `dt` is negative or not finite. The world
    /// is left untouched in that case.
    pub fn step(&mut self, dt: f64) -> Result<StepReport<'_>> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidTimestep(dt));
        }
        self.events.clear();
        let mut stats = StepStats::default();

        if self.pool.active_count() > 0 {
            self.integrate_and_bounce(dt);
            stats.integrated = self.pool.active_count();
            stats.wall_hits = self.events.len();

            self.grid
                .rebuild(self.pool.active().iter().map(Particle::position).enumerate());

            if self.pool.active_count() > 1 {
                self.resolve_collisions(&mut stats);
            }
        }

        self.last_stats = stats;
        Ok(StepReport {
            events: &self.events,
            stats,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn integrate_and_bounce(&mut self, dt: f64) {
        let gravity = self.config.gravity;
        let max_speed = self.config.max_speed;
        let bounds = self.bounds;

        for (slot, particle) in self.pool.active_mut().iter_mut().enumerate() {
            particle.integrate(dt, gravity, max_speed);
            let hits = particle.resolve_wall_collision(&bounds);
            self.events
                .extend(hits.iter().map(|hit| WallImpulseEvent::from_hit(slot, hit)));
        }
    }

    #[cfg(feature = "parallel")]
    fn integrate_and_bounce(&mut self, dt: f64) {
        let gravity = self.config.gravity;
        let max_speed = self.config.max_speed;
        let bounds = self.bounds;

        self.pool
            .active_mut()
            .par_iter_mut()
            .map(|particle| {
                particle.integrate(dt, gravity, max_speed);
                particle.resolve_wall_collision(&bounds)
            })
            .collect_into_vec(&mut self.hit_buffer);

        for (slot, hits) in self.hit_buffer.iter().enumerate() {
            self.events
                .extend(hits.iter().map(|hit| WallImpulseEvent::from_hit(slot, hit)));
        }
    }

    fn resolve_collisions(&mut self, stats: &mut StepStats) {
        let bounds = self.bounds;
        let particles = self.pool.active_mut();

        for i in 0..particles.len() {
            let position = particles[i].position();
            for j in self.grid.query_neighbors(position) {
                // Only the higher slot resolves, so each pair is handled once
                if j <= i {
                    continue;
                }
                stats.candidate_pairs += 1;
                let (a, b) = pair_mut(particles, i, j);
                match self.resolver.try_resolve(a, b) {
                    ContactOutcome::Resolved { .. } => {
                        stats.resolved_pairs += 1;
                        // Overlap correction must not push a pair through a wall
                        a.confine(&bounds);
                        b.confine(&bounds);
                    }
                    ContactOutcome::Coincident => stats.degenerate_pairs += 1,
                    ContactOutcome::Separated => {}
                }
            }
        }
    }
}

/// Two distinct mutable elements, `i < j`
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(radius: f64) -> SimulationWorld {
        let config = SimulationConfig::new(16, radius, 1.0)
            .without_gravity()
            .with_seed(3);
        let bounds = SimulationBounds::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        SimulationWorld::new(config, bounds).unwrap()
    }

    fn place(world: &mut SimulationWorld, slots: &[(Vec2, Vec2)]) {
        world
            .activate(slots.len(), Vec2::ZERO, Vec2::new(10.0, 10.0), 1.0)
            .unwrap();
        for (i, (position, velocity)) in slots.iter().enumerate() {
            world.particle_mut(i).unwrap().reset(*position, *velocity);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bounds = SimulationBounds::from_center_size(Vec2::ZERO, Vec2::new(4.0, 4.0));
        assert!(SimulationWorld::new(SimulationConfig::new(10, 0.0, 1.0), bounds).is_err());
        assert!(SimulationWorld::new(SimulationConfig::new(0, 0.1, 1.0), bounds).is_err());
    }

    #[test]
    fn test_bounds_too_small_rejected() {
        let bounds = SimulationBounds::from_center_size(Vec2::ZERO, Vec2::new(0.5, 4.0));
        let err = SimulationWorld::new(SimulationConfig::new(10, 0.5, 1.0), bounds);
        assert!(matches!(err, Err(Error::InvalidBounds { .. })));
    }

    #[test]
    fn test_empty_step_is_noop() {
        let mut w = world(0.1);
        let report = w.step(0.016).unwrap();
        assert!(report.events.is_empty());
        assert_eq!(report.stats, StepStats::default());
        assert!(w.grid().is_empty());
    }

    #[test]
    fn test_invalid_timestep_rejected() {
        let mut w = world(0.1);
        assert!(matches!(w.step(-0.1), Err(Error::InvalidTimestep(_))));
        assert!(w.step(f64::NAN).is_err());
        assert!(w.step(0.0).is_ok());
    }

    #[test]
    fn test_single_particle_skips_collisions() {
        let mut w = world(0.1);
        place(&mut w, &[(Vec2::ZERO, Vec2::new(1.0, 0.0))]);
        let stats = w.step(0.1).unwrap().stats;
        assert_eq!(stats.integrated, 1);
        assert_eq!(stats.candidate_pairs, 0);
        assert!((w.particles()[0].position().x - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_overlapping_pair_resolved_once() {
        let mut w = world(0.5);
        place(
            &mut w,
            &[
                (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
                (Vec2::new(0.9, 0.0), Vec2::new(-1.0, 0.0)),
            ],
        );

        let stats = w.step(0.01).unwrap().stats;

        assert_eq!(stats.candidate_pairs, 1);
        assert_eq!(stats.resolved_pairs, 1);
        let p = w.particles();
        assert!((p[0].velocity().x + 1.0).abs() < 1e-12);
        assert!((p[1].velocity().x - 1.0).abs() < 1e-12);
        assert!(p[0].position().distance(p[1].position()) >= 1.0 - 1e-9);
    }

    #[test]
    fn test_coincident_pair_counted_as_degenerate() {
        let mut w = world(0.5);
        place(
            &mut w,
            &[
                (Vec2::new(1.0, 1.0), Vec2::ZERO),
                (Vec2::new(1.0, 1.0), Vec2::ZERO),
            ],
        );
        let stats = w.step(0.01).unwrap().stats;
        assert_eq!(stats.degenerate_pairs, 1);
        assert_eq!(stats.resolved_pairs, 0);
    }

    #[test]
    fn test_set_bounds_does_not_move_particles() {
        let mut w = world(0.1);
        place(&mut w, &[(Vec2::new(4.0, 0.0), Vec2::ZERO)]);
        let revision = w.bounds_revision();

        w.set_bounds(Vec2::ZERO, Vec2::new(4.0, 4.0)).unwrap();

        assert_eq!(w.bounds_revision(), revision + 1);
        assert_eq!(w.particles()[0].position(), Vec2::new(4.0, 0.0));

        let report = w.step(0.0).unwrap();
        assert_eq!(report.events.len(), 1);
        assert!((w.particles()[0].position().x - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_set_bounds_rejects_impossible_container() {
        let mut w = world(0.5);
        assert!(w.set_bounds(Vec2::ZERO, Vec2::new(0.9, 5.0)).is_err());
        assert_eq!(w.bounds().width(), 10.0);
    }

    #[test]
    fn test_activate_replaces_bounds() {
        let mut w = world(0.1);
        let n = w.activate(20, Vec2::new(1.0, 1.0), Vec2::new(4.0, 2.0), 2.0).unwrap();
        assert_eq!(n, 16);
        assert_eq!(w.bounds().center(), Vec2::new(1.0, 1.0));
        for p in w.particles() {
            assert!((p.speed() - 10.0).abs() < 1e-9);
        }
        assert!(w.activate(4, Vec2::ZERO, Vec2::new(4.0, 4.0), f64::NAN).is_err());
    }
}
