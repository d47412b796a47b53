use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use gridgroups::config::{self, Params};
use gridgroups::grid::Grid;
use gridgroups::render;

fn save_png(out_dir: &Path, name: &str, grid: &Grid<bool>, highlight: &[gridgroups::Coord]) -> anyhow::Result<()> {
    let (rgba, side) = render::render_grid(grid, highlight);
    let path = out_dir.join(name);
    image::save_buffer(&path, &rgba, side as u32, side as u32, image::ColorType::Rgba8)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}

fn parse_seed(input: &str) -> anyhow::Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid seed {:?}: expected an unsigned integer", input))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let defaults = Params::default();

    let seed = match args.get(1) {
        Some(s) => parse_seed(s)?,
        None => defaults.seed,
    };
    let size = match args.get(2) {
        Some(s) => config::parse_size(s)?,
        None => defaults.size,
    };
    let out_dir: PathBuf = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;

    info!("Generating {}x{} grid with seed={}", size, size, seed);
    let (model, timings) = gridgroups::run(&Params { size, seed })?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let map = model.connectivity();
    let largest = map.largest().unwrap_or(&[]);
    eprintln!("\nFilled cells:    {}", model.grid().filled_count());
    eprintln!("Groups:          {}", map.group_count());
    eprintln!("Isolated cells:  {}", map.isolated_count());
    eprintln!("Largest group:   {}", largest.len());

    if size <= 40 {
        eprintln!();
        for row in model.grid().to_rows() {
            let line: String = row.iter().map(|&v| if v { '#' } else { '.' }).collect();
            eprintln!("  {}", line);
        }
    }

    save_png(&out_dir, "grid.png", model.grid(), &[])?;
    save_png(&out_dir, "largest_group.png", model.grid(), largest)?;

    eprintln!("\nDone.");
    Ok(())
}
