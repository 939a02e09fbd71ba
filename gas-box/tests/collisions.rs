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
//! Broad- and narrow-phase collision tests

use gas_box::bounds::SimulationBounds;
use gas_box::collision::{CollisionResolver, ContactOutcome};
use gas_box::config::SimulationConfig;
use gas_box::math::Vec2;
use gas_box::particle::Particle;
use gas_box::spatial::SpatialGrid;
use gas_box::SimulationWorld;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn particle(radius: f64, position: Vec2, velocity: Vec2) -> Particle {
    let mut p = Particle::new(radius, 1.0).unwrap();
    p.reset(position, velocity);
    p
}

fn total_kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

#[test]
fn test_head_on_pair_swaps_velocities() {
    let mut a = particle(0.5, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    let mut b = particle(0.5, Vec2::new(0.9, 0.0), Vec2::new(-1.0, 0.0));

    let outcome = CollisionResolver::new().try_resolve(&mut a, &mut b);

    match outcome {
        ContactOutcome::Resolved { penetration } => assert!((penetration - 0.1).abs() < 1e-12),
        other => panic!("expected a resolved contact, got {:?}", other),
    }
    assert!((a.velocity() - Vec2::new(-1.0, 0.0)).length() < 1e-12);
    assert!((b.velocity() - Vec2::new(1.0, 0.0)).length() < 1e-12);
    assert!(a.position().distance(b.position()) >= 1.0 - 1e-12);
}

#[test]
fn test_pair_energy_conserved_for_random_contacts() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let resolver = CollisionResolver::new();

    for _ in 0..1000 {
        let offset = Vec2::from_angle(rng.gen_range(0.0..std::f64::consts::TAU))
            * rng.gen_range(0.01..0.99);
        let mut a = particle(
            0.5,
            Vec2::ZERO,
            Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
        );
        let mut b = particle(
            0.5,
            offset,
            Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
        );
        let before = a.kinetic_energy() + b.kinetic_energy();

        assert!(resolver.try_resolve(&mut a, &mut b).is_resolved());

        let after = a.kinetic_energy() + b.kinetic_energy();
        assert!(
            (after - before).abs() <= 1e-9 * before.max(1.0),
            "energy drifted from {} to {}",
            before,
            after
        );
        assert!(a.position().distance(b.position()) >= 1.0 - 1e-9);
    }
}

#[test]
fn test_grid_never_misses_a_contact() {
    let radius = 0.1;
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let positions: Vec<Vec2> = (0..600)
        .map(|_| Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)))
        .collect();

    let mut grid = SpatialGrid::new(radius * 2.1);
    grid.rebuild(positions.iter().copied().enumerate());

    let mut contacts = 0;
    for (i, &pi) in positions.iter().enumerate() {
        let candidates: Vec<usize> = grid.query_neighbors(pi).collect();
        assert!(candidates.contains(&i), "query must include the particle itself");
        for (j, &pj) in positions.iter().enumerate() {
            if i != j && pi.distance(pj) < 2.0 * radius {
                contacts += 1;
                assert!(
                    candidates.contains(&j),
                    "contact {} - {} missed by the grid",
                    i,
                    j
                );
            }
        }
    }
    assert!(contacts > 0, "fixture should contain at least one contact");
}

#[test]
fn test_each_pair_resolved_at_most_once_per_step() {
    let config = SimulationConfig::new(3, 0.5, 1.0).without_gravity().with_seed(1);
    let bounds = SimulationBounds::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
    let mut world = SimulationWorld::new(config, bounds).unwrap();
    world.activate(3, Vec2::ZERO, Vec2::new(10.0, 10.0), 0.0).unwrap();

    let cluster = [Vec2::new(0.2, 0.2), Vec2::new(0.5, 0.2), Vec2::new(0.35, 0.45)];
    for (slot, position) in cluster.iter().enumerate() {
        world.particle_mut(slot).unwrap().reset(*position, Vec2::ZERO);
    }

    let stats = world.step(0.0).unwrap().stats;

    assert_eq!(stats.candidate_pairs, 3);
    assert!(stats.resolved_pairs >= 1 && stats.resolved_pairs <= 3);
}

#[test]
fn test_elastic_gas_conserves_energy_without_gravity() {
    let config = SimulationConfig::new(300, 0.05, 1.0).without_gravity().with_seed(99);
    let bounds = SimulationBounds::from_center_size(Vec2::ZERO, Vec2::new(6.0, 4.0));
    let mut world = SimulationWorld::new(config, bounds).unwrap();
    world.activate(300, Vec2::ZERO, Vec2::new(6.0, 4.0), 1.0).unwrap();

    let initial = total_kinetic_energy(world.particles());
    let mut resolved = 0;
    for _ in 0..300 {
        resolved += world.step(1.0 / 60.0).unwrap().stats.resolved_pairs;
    }
    let fin = total_kinetic_energy(world.particles());

    assert!(resolved > 0, "fixture should produce particle collisions");
    assert!(
        ((fin - initial) / initial).abs() < 1e-9,
        "kinetic energy drifted from {} to {}",
        initial,
        fin
    );
}
