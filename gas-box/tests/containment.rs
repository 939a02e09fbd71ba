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
//! Containment and wall-bounce tests
//!
//! Every active particle must lie inside the walls after every step, and
//! each wall bounce must report the pre-bounce normal speed as its impulse.

use gas_box::bounds::SimulationBounds;
use gas_box::config::SimulationConfig;
use gas_box::events::WallSide;
use gas_box::math::Vec2;
use gas_box::{GasBox, SimulationWorld};

fn assert_contained(particles: &[gas_box::particle::Particle], bounds: &SimulationBounds) {
    for (slot, p) in particles.iter().enumerate() {
        assert!(
            bounds.contains(p.position(), p.radius()),
            "slot {} escaped to {:?} (bounds {:?})",
            slot,
            p.position(),
            bounds
        );
    }
}

#[test]
fn test_dense_gas_stays_contained() {
    let config = SimulationConfig::new(400, 0.05, 1.0).with_seed(2024);
    let mut gas = GasBox::new(config).unwrap();
    gas.activate(400, Vec2::ZERO, Vec2::new(4.0, 2.0), 2.0).unwrap();

    for _ in 0..600 {
        gas.step(1.0 / 60.0).unwrap();
        assert_contained(gas.particles(), gas.bounds());
    }
}

#[test]
fn test_inelastic_gas_stays_contained() {
    let config = SimulationConfig::new(200, 0.08, 0.3).with_seed(5);
    let mut gas = GasBox::new(config).unwrap();
    gas.activate(200, Vec2::new(1.0, -1.0), Vec2::new(5.0, 3.0), 3.0).unwrap();

    for _ in 0..300 {
        gas.step(1.0 / 30.0).unwrap();
        assert_contained(gas.particles(), gas.bounds());
    }
}

#[test]
fn test_large_timestep_is_clamped_not_escaped() {
    let config = SimulationConfig::new(50, 0.1, 1.0).with_seed(8);
    let mut gas = GasBox::new(config).unwrap();
    gas.activate(50, Vec2::ZERO, Vec2::new(3.0, 3.0), 20.0).unwrap();

    for _ in 0..20 {
        gas.step(0.5).unwrap();
        assert_contained(gas.particles(), gas.bounds());
    }
}

#[test]
fn test_shrinking_container_recontains_on_next_step() {
    let config = SimulationConfig::new(100, 0.05, 1.0).with_seed(13);
    let mut gas = GasBox::new(config).unwrap();
    gas.activate(100, Vec2::ZERO, Vec2::new(8.0, 4.0), 1.0).unwrap();
    gas.step(1.0 / 60.0).unwrap();

    gas.set_bounds(Vec2::ZERO, Vec2::new(2.0, 2.0)).unwrap();
    gas.step(1.0 / 60.0).unwrap();

    assert_contained(gas.particles(), gas.bounds());
}

#[test]
fn test_falling_particle_bounces_with_exact_impulses() {
    let gravity = Vec2::new(0.0, -9.81);
    let dt = 1.0 / 60.0;
    let config = SimulationConfig::new(1, 0.1, 1.0).with_gravity(gravity).with_seed(1);
    let bounds = SimulationBounds::new(Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0));
    let mut world = SimulationWorld::new(config, bounds).unwrap();
    world.activate(1, Vec2::ZERO, Vec2::new(4.0, 4.0), 1.0).unwrap();
    world.particle_mut(0).unwrap().reset(Vec2::ZERO, Vec2::ZERO);

    let mut bounces = 0;
    for _ in 0..600 {
        let before = world.particles()[0].velocity();
        let pre_bounce = before + gravity * dt;

        let events = world.step(dt).unwrap().events.to_vec();
        let after = world.particles()[0].clone();

        assert!(events.len() <= 1, "one axis can bounce at most once per step");
        if let Some(event) = events.first() {
            bounces += 1;
            assert_eq!(event.side, WallSide::Bottom);
            assert!((event.impulse - pre_bounce.y.abs()).abs() < 1e-9);
            assert!(event.impulse >= 0.0);
            // Perfect elasticity reverses the bounced component exactly
            assert!((after.velocity().y + pre_bounce.y).abs() < 1e-9);
        } else {
            assert!((after.velocity().y - pre_bounce.y).abs() < 1e-9);
        }
        let y = after.position().y;
        assert!((-1.9..=1.9).contains(&y), "y = {} left the container", y);
        assert_eq!(after.position().x, 0.0);
    }

    assert!(bounces >= 5, "expected repeated floor bounces, got {}", bounces);
}

#[test]
fn test_first_bounce_is_on_the_floor() {
    let config = SimulationConfig::new(1, 0.1, 1.0).with_seed(1);
    let bounds = SimulationBounds::new(Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0));
    let mut world = SimulationWorld::new(config, bounds).unwrap();
    world.activate(1, Vec2::ZERO, Vec2::new(4.0, 4.0), 0.0).unwrap();

    let side = loop {
        let report = world.step(1.0 / 60.0).unwrap();
        if let Some(event) = report.events.first() {
            break event.side;
        }
    };

    assert_eq!(side, WallSide::Bottom);
    assert!(world.particles()[0].velocity().y > 0.0);
}
