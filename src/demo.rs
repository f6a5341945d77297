//! Deterministic demo scene for manual verification against a live viewer.
//!
//! Generates a terrain grid, then a long run of frames full of random units
//! with attached shapes. Exists purely to exercise the protocol surface;
//! the same seed always produces the same byte stream.

#[cfg(test)]
#[path = "demo_test.rs"]
mod demo_test;

use std::f64::consts::PI;
use std::io::Write;

use commands::{AreaType, Color, Side, Unit, UnitType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::client::{ClientError, RewindClient};

/// Edge length of one terrain cell in world units.
const AREA_CELL_SIZE: u32 = 32;

/// Step interval for progress logging.
const PROGRESS_EVERY: u32 = 500;

const SIDES: [Side; 3] = [Side::Our, Side::Neutral, Side::Enemy];

const AREA_TYPES: [AreaType; 5] = [
    AreaType::Unknown,
    AreaType::Forest,
    AreaType::Swamp,
    AreaType::Rain,
    AreaType::Cloud,
];

const UNIT_TYPES: [UnitType; 6] = [
    UnitType::Unknown,
    UnitType::Tank,
    UnitType::Ifv,
    UnitType::Arrv,
    UnitType::Helicopter,
    UnitType::Fighter,
];

/// Shape of the generated scene.
#[derive(Debug, Clone, Copy)]
pub struct DemoConfig {
    /// World edge length; the terrain grid is `world_size / 32` cells square.
    pub world_size: u32,
    /// Number of simulated frames after the terrain frame.
    pub steps: u32,
    /// Units drawn per frame, each with an attached line, circle, and
    /// rectangle.
    pub units_per_step: u32,
    /// RNG seed; fixed seed, fixed stream.
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            world_size: 1024,
            steps: 2000,
            units_per_step: 100,
            seed: 123,
        }
    }
}

/// Stream the demo scene: one terrain frame, `steps` unit frames, and a
/// closing message frame.
///
/// # Errors
///
/// Propagates the first [`ClientError`] from the underlying client; the
/// scene is abandoned at that point.
pub fn run<W: Write>(client: &mut RewindClient<W>, config: &DemoConfig) -> Result<(), ClientError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let world = f64::from(config.world_size);
    let cells = i32::try_from(config.world_size / AREA_CELL_SIZE).unwrap_or(i32::MAX);

    tracing::info!(cells, steps = config.steps, "demo scene start");

    client.frame(|client| {
        for x in 0..cells {
            for y in 0..cells {
                let area_type = AREA_TYPES[rng.random_range(0..AREA_TYPES.len())];
                client.area_description(x, y, area_type)?;
            }
        }
        client.message("Hello World")
    })?;

    for step in 0..config.steps {
        client.frame(|client| {
            client.message(format!("Step {step}"))?;
            for _ in 0..config.units_per_step {
                let color = Color::from_rgba8(
                    rng.random(),
                    rng.random(),
                    rng.random(),
                    rng.random(),
                );

                let unit_x = rng.random::<f64>() * world;
                let unit_y = rng.random::<f64>() * f64::from(AREA_CELL_SIZE) + f64::from(step);
                client.living_unit(Unit {
                    x: unit_x,
                    y: unit_y,
                    r: 2.0 + rng.random::<f64>() * 10.0,
                    hp: 10,
                    max_hp: 100,
                    side: SIDES[rng.random_range(0..SIDES.len())],
                    course: PI * rng.random::<f64>(),
                    unit_type: UNIT_TYPES[rng.random_range(0..UNIT_TYPES.len())],
                    rem_cooldown: rng.random_range(0..60),
                    max_cooldown: 60,
                    selected: false,
                })?;

                client.line(
                    unit_x,
                    unit_y,
                    rng.random::<f64>() * world,
                    rng.random::<f64>() * world,
                    color,
                    3,
                )?;

                let circle_x = unit_x + rng.random::<f64>() * 40.0 - 20.0;
                let circle_y = unit_y + rng.random::<f64>() * 40.0 - 20.0;
                client.circle(circle_x, circle_y, 10.0 + rng.random::<f64>() * 10.0, color, 2)?;

                let rect_x1 = circle_x + rng.random::<f64>() * 100.0;
                let rect_y1 = circle_y + rng.random::<f64>() * 100.0;
                client.rect(
                    rect_x1,
                    rect_y1,
                    rect_x1 + rng.random::<f64>() * 40.0,
                    rect_y1 + rng.random::<f64>() * 40.0,
                    color,
                    1,
                )?;
            }
            Ok(())
        })?;

        if (step + 1).is_multiple_of(PROGRESS_EVERY) {
            tracing::info!(step = step + 1, "demo frames emitted");
        }
    }

    client.frame(|client| client.message("Bye!"))?;
    tracing::info!("demo scene complete");
    Ok(())
}
