use anyhow::{anyhow, ensure, Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

use crate::domains::Maze;

/// A maze search instance as stored on disk: the board as digit rows, with
/// optional fixed endpoints. Rows use terrain digits 1..=9, 9 being a wall.
#[derive(Debug, Serialize, Deserialize)]
pub struct MazeScenario {
    pub rows: Vec<String>,
    pub start: Option<[usize; 2]>,
    pub goal: Option<[usize; 2]>,
}

impl MazeScenario {
    pub fn load_from_file(path: &str) -> Result<MazeScenario> {
        let file = File::open(path).with_context(|| format!("failed to open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("malformed scenario {path}"))?;
        Ok(scenario)
    }

    pub fn to_maze(&self) -> Result<Maze> {
        let height = self.rows.len();
        let width = self.rows.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in self.rows.iter().enumerate() {
            ensure!(
                row.len() == width,
                "row {y} has {} cells, expected {width}",
                row.len()
            );
            for ch in row.chars() {
                let digit = ch
                    .to_digit(10)
                    .ok_or_else(|| anyhow!("invalid terrain digit {ch:?} in row {y}"))?;
                cells.push(digit as u8);
            }
        }
        Maze::new(width, height, cells)
    }

    /// Both endpoints, when the file fixes them.
    pub fn route(&self) -> Option<((usize, usize), (usize, usize))> {
        match (self.start, self.goal) {
            (Some([sx, sy]), Some([gx, gy])) => Some(((sx, sy), (gx, gy))),
            _ => None,
        }
    }

    pub fn from_maze(maze: &Maze, route: ((usize, usize), (usize, usize))) -> MazeScenario {
        let rows = (0..maze.height())
            .map(|y| {
                (0..maze.width())
                    .map(|x| char::from(b'0' + maze.terrain(x, y)))
                    .collect()
            })
            .collect();
        MazeScenario {
            rows,
            start: Some([route.0 .0, route.0 .1]),
            goal: Some([route.1 .0, route.1 .1]),
        }
    }

    pub fn write_to_file(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }
}

/// Draw a start and a goal among the open cells, distinct whenever the maze
/// has more than one.
pub fn random_route<R: Rng + ?Sized>(
    maze: &Maze,
    rng: &mut R,
) -> Result<((usize, usize), (usize, usize))> {
    let mut open = maze.open_cells();
    ensure!(!open.is_empty(), "maze has no open cells");
    open.shuffle(rng);

    let start = open[0];
    let goal = if open.len() > 1 { open[1] } else { start };
    info!("Generated route: start {start:?} goal {goal:?}");
    Ok((start, goal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_read_scenario() {
        let scen =
            MazeScenario::load_from_file("scenarios/maze-7x7.yaml").expect("error loading scenario");

        let maze = scen.to_maze().unwrap();
        assert_eq!(maze.width(), 7);
        assert_eq!(maze.height(), 7);
        assert_eq!(scen.route(), Some(((0, 0), (6, 6))));

        assert!(maze.is_open(0, 0));
        assert!(maze.is_open(6, 6));
        assert!(!maze.is_open(0, 1));
    }

    #[test]
    fn test_ragged_or_bad_rows_are_rejected() {
        let ragged = MazeScenario {
            rows: vec!["111".to_string(), "11".to_string()],
            start: None,
            goal: None,
        };
        assert!(ragged.to_maze().is_err());

        let lettered = MazeScenario {
            rows: vec!["1a1".to_string()],
            start: None,
            goal: None,
        };
        assert!(lettered.to_maze().is_err());
    }

    #[test]
    fn test_from_maze_reproduces_the_board() {
        let maze = Maze::demo();
        let scen = MazeScenario::from_maze(&maze, ((2, 3), (17, 11)));
        assert_eq!(scen.route(), Some(((2, 3), (17, 11))));

        let rebuilt = scen.to_maze().unwrap();
        assert_eq!(rebuilt.width(), maze.width());
        assert_eq!(rebuilt.height(), maze.height());
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                assert_eq!(rebuilt.terrain(x, y), maze.terrain(x, y));
            }
        }
    }

    #[test]
    fn test_random_route_lands_on_open_cells() {
        let maze = Maze::demo();
        let seed = [0u8; 32];
        let mut rng = StdRng::from_seed(seed);

        let (start, goal) = random_route(&maze, &mut rng).unwrap();
        assert!(maze.is_open(start.0, start.1));
        assert!(maze.is_open(goal.0, goal.1));
        assert_ne!(start, goal);
    }

    #[test]
    fn test_single_open_cell_maze_reuses_it() {
        let maze = Maze::new(2, 1, vec![1, 9]).unwrap();
        let mut rng = StdRng::from_seed([7u8; 32]);
        let (start, goal) = random_route(&maze, &mut rng).unwrap();
        assert_eq!(start, (0, 0));
        assert_eq!(goal, (0, 0));
    }
}
