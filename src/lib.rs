pub mod config;
pub mod connectivity;
pub mod error;
pub mod generator;
pub mod grid;
pub mod model;
pub mod render;
pub mod rng;

use std::time::Instant;

use config::Params;
use error::GridError;
use generator::generate;
use rng::SplitMix64;

pub use connectivity::{ConnectivityMap, component_of};
pub use grid::{Coord, Grid};
pub use model::GridModel;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build a model from `params`, timing each stage.
pub fn run(params: &Params) -> Result<(GridModel, Vec<Timing>), GridError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let mut rng = SplitMix64::new(params.seed);
    let grid = generate(config::validate_size(params.size)?, &mut rng)?;
    timings.push(Timing {
        name: "generate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let model = GridModel::from_grid(grid, rng)?;
    timings.push(Timing {
        name: "build_map",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((model, timings))
}
