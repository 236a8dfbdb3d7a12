//! Terminal fire-escape finder.
//!
//! Builds a board (from a map file or at random), then animates the A* search
//! for the exit one step at a time.
//!
//! Run: cargo run --bin fire-escape -- --seed 7 --delay 30

use std::io;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use escape_core::{Grid, GridConfig, Scatter, ScatterConfig};
use escape_demos::{Animation, AnimationConfig, Tick, view};
use escape_paths::{EndpointProblem, SearchError};

/// Find an escape route across a burning floor plan
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file: `.` empty, `#` wall, `F` fire, `S` start, `E` exit
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Rows of a random board
    #[arg(long, default_value_t = 20)]
    rows: i32,

    /// Columns of a random board
    #[arg(long, default_value_t = 20)]
    cols: i32,

    /// Seed for the random board
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wall density of a random board
    #[arg(long, default_value_t = 0.20)]
    walls: f64,

    /// Fire density of a random board
    #[arg(long, default_value_t = 0.05)]
    hazards: f64,

    /// Delay between search steps in milliseconds (0-200)
    #[arg(short, long, default_value_t = 50)]
    delay: u64,

    /// Print only the final board
    #[arg(long)]
    no_animate: bool,
}

fn build_grid(args: &Args) -> Result<Grid, Box<dyn std::error::Error>> {
    if let Some(path) = &args.map {
        let text = std::fs::read_to_string(path)?;
        let grid: Grid = text.parse()?;
        log::info!("loaded {}x{} map from {}", grid.rows(), grid.cols(), path.display());
        return Ok(grid);
    }

    let mut grid = Grid::new(GridConfig {
        rows: args.rows,
        cols: args.cols,
    });
    let config = ScatterConfig {
        wall_ratio: args.walls,
        hazard_ratio: args.hazards,
    };
    match args.seed {
        Some(seed) => Scatter::with_config(StdRng::seed_from_u64(seed), config).fill(&mut grid)?,
        None => Scatter::with_config(rand::rng(), config).fill(&mut grid)?,
    }
    Ok(grid)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = build_grid(&args)?;
    let timing = AnimationConfig::from_millis(args.delay);

    let mut anim = match Animation::new(&grid) {
        Ok(a) => a,
        Err(SearchError::InvalidEndpoints(EndpointProblem::MissingStart)) => {
            eprintln!("Please set a Start Point (S).");
            std::process::exit(1);
        }
        Err(SearchError::InvalidEndpoints(EndpointProblem::MissingEnd)) => {
            eprintln!("Please set an Exit Point (E).");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = if args.no_animate {
        anim.finish()?
    } else {
        let mut stdout = io::stdout();
        view::clear(&mut stdout)?;
        loop {
            let pause = if anim.is_drawing() {
                timing.path_delay()
            } else {
                timing.step_delay
            };
            let tick = anim.tick()?;
            view::draw(&mut stdout, &grid, anim.overlay())?;
            if tick.is_final() {
                break tick;
            }
            thread::sleep(pause);
        }
    };

    if args.no_animate {
        println!("{}", view::render_plain(&grid, anim.overlay()));
    }
    match outcome {
        Tick::Escaped { steps } => println!(
            "Escape route found: {steps} moves, {} cells expanded.",
            anim.engine().expansions()
        ),
        _ => println!("No valid escape path could be found!"),
    }
    Ok(())
}
