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
//! Gas-in-a-box demo
//!
//! Runs a headless simulation and prints pressure and temperature once per
//! simulated second. Halfway through, the container is squeezed to half its
//! width, which should raise the pressure.
//!
//! # Running
//!
//! ```bash
//! # 300 particles for 10 simulated seconds
//! cargo run --example gas_box --release
//!
//! # Hotter, denser gas without gravity
//! cargo run --example gas_box --release -- --particles 2000 --speed 3 --no-gravity
//! ```

use gas_box::config::SimulationConfig;
use gas_box::events::WallSide;
use gas_box::math::Vec2;
use gas_box::GasBox;
use std::time::Instant;

/// Demo settings
struct DemoConfig {
    particles: usize,
    radius: f64,
    speed_multiplier: f64,
    duration: f64,
    timestep: f64,
    gravity: bool,
    seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            particles: 300,
            radius: 0.05,
            speed_multiplier: 1.0,
            duration: 10.0,
            timestep: 1.0 / 60.0,
            gravity: true,
            seed: 12345,
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i + 1).map(|s| s.parse::<T>()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("Error: {} requires a valid argument", flag);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> DemoConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--particles" => {
                config.particles = parse_value(&args, i, "--particles");
                i += 2;
            }
            "--radius" => {
                config.radius = parse_value(&args, i, "--radius");
                i += 2;
            }
            "--speed" => {
                config.speed_multiplier = parse_value(&args, i, "--speed");
                i += 2;
            }
            "--duration" => {
                config.duration = parse_value(&args, i, "--duration");
                i += 2;
            }
            "--seed" => {
                config.seed = parse_value(&args, i, "--seed");
                i += 2;
            }
            "--no-gravity" => {
                config.gravity = false;
                i += 1;
            }
            other => {
                eprintln!("Warning: ignoring unknown argument '{}'", other);
                i += 1;
            }
        }
    }
    config
}

fn main() {
    let demo = parse_args();

    let mut config = SimulationConfig::new(demo.particles, demo.radius, 1.0).with_seed(demo.seed);
    if !demo.gravity {
        config = config.without_gravity();
    }

    let area = Vec2::new(8.0, 4.0);
    let mut gas = match GasBox::new(config) {
        Ok(gas) => gas,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = gas.activate(demo.particles, Vec2::ZERO, area, demo.speed_multiplier) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("=== Gas Box ===");
    println!("  Particles: {}", gas.particles().len());
    println!("  Radius:    {}", demo.radius);
    println!("  Container: {:.1} x {:.1}", area.x, area.y);
    println!("  Gravity:   {}", if demo.gravity { "on" } else { "off" });

    let steps = (demo.duration / demo.timestep).round() as usize;
    let squeeze_at = steps / 2;
    let start = Instant::now();
    let mut resolved = 0usize;
    let sides = [WallSide::Left, WallSide::Right, WallSide::Bottom, WallSide::Top];
    let mut wall_impulse = [0.0f64; 4];
    let mut time = 0.0;

    for step in 0..steps {
        if step == squeeze_at {
            let squeezed = Vec2::new(area.x / 2.0, area.y);
            match gas.set_bounds(Vec2::ZERO, squeezed) {
                Ok(()) => println!("\n  -> container squeezed to {:.1} x {:.1}", squeezed.x, squeezed.y),
                Err(e) => eprintln!("Warning: {}", e),
            }
        }

        let summary = match gas.step(demo.timestep) {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        time += demo.timestep;
        resolved += summary.stats.resolved_pairs;
        for event in gas.world().wall_events() {
            if let Some(index) = sides.iter().position(|side| *side == event.side) {
                wall_impulse[index] += event.impulse;
            }
        }

        if let Some(pressure) = summary.pressure_sample {
            println!(
                "t = {:5.2} s  pressure = {:8.3}  temperature = {:8.3}",
                time, pressure, summary.temperature
            );
        }
    }

    let elapsed = start.elapsed();
    println!("\n=== Wall impulse ===");
    for (side, impulse) in sides.iter().zip(wall_impulse.iter()) {
        println!("  {:<6} {:10.2}", side, impulse);
    }

    println!("\n=== Done ===");
    println!("  Steps:           {}", steps);
    println!("  Pair collisions: {}", resolved);
    println!(
        "  Wall time:       {:.3} s ({:.1} µs/step)",
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1e6 / steps.max(1) as f64
    );
}
