use astar_rust::config::{Cli, Config};
use astar_rust::domains::{City, Maze, MazeState, PuzzleBoard};
use astar_rust::engine::{AStarSearch, Status};
use astar_rust::scenario::{self, MazeScenario};
use astar_rust::state::SearchState;

use anyhow::{anyhow, ensure, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;
use std::time::Instant;
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    match config.scenario.as_str() {
        "romania" => {
            let start = City::from_name(&config.start_city).ok_or_else(|| {
                anyhow!("there is no city named {} in the map", config.start_city)
            })?;
            run_search(start, City::Bucharest, config.max_steps)?;
        }
        "puzzle" => {
            let start = PuzzleBoard::from_digits(&config.start_tiles)?;
            run_search(start, PuzzleBoard::GOAL, config.max_steps)?;
        }
        "maze" => {
            let (maze, fixed_route) = match config.maze_path.as_ref() {
                Some(path) => {
                    let scen = MazeScenario::load_from_file(path)?;
                    (scen.to_maze()?, scen.route())
                }
                None => (Maze::demo(), None),
            };
            let (start, goal) = match fixed_route {
                Some(route) => route,
                None => {
                    let mut rng = StdRng::seed_from_u64(config.seed);
                    let route = scenario::random_route(&maze, &mut rng)?;
                    MazeScenario::from_maze(&maze, route).write_to_file("debug.yaml")?;
                    route
                }
            };
            ensure!(
                maze.is_open(start.0, start.1),
                "start {start:?} is not an open cell"
            );
            ensure!(
                maze.is_open(goal.0, goal.1),
                "goal {goal:?} is not an open cell"
            );
            run_search(
                MazeState::new(&maze, start.0, start.1),
                MazeState::new(&maze, goal.0, goal.1),
                config.max_steps,
            )?;
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn run_search<S: SearchState + Display>(start: S, goal: S, max_steps: usize) -> anyhow::Result<()> {
    let timer = Instant::now();
    let mut engine = AStarSearch::new();
    engine.initialize(start, goal);

    while engine.status() == Status::Searching {
        if engine.step_count() >= max_steps {
            info!("Step budget {max_steps} exhausted, cancelling the search");
            engine.request_cancel();
        }
        engine.step();
    }

    match engine.status() {
        Status::Succeeded => {
            info!("Search found the goal state");
            let mut states = 0;
            for state in engine.solution_forward()? {
                info!("{state}");
                states += 1;
            }
            info!("Solution steps {}", states - 1);
            engine.stats().print();
            engine.release_solution()?;
        }
        Status::Failed => error!("Search terminated without reaching the goal state"),
        Status::OutOfMemory => error!("Search terminated, out of memory"),
        Status::NotInitialized | Status::Searching => unreachable!(),
    }
    info!(
        "Search steps {} in {:?}",
        engine.step_count(),
        timer.elapsed()
    );

    Ok(())
}
