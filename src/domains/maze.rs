use crate::state::{ResourceExhausted, SearchState};

use anyhow::ensure;
use std::fmt;

/// Terrain value marking an impassable cell. Positions outside the board
/// read as walls too.
pub const WALL: u8 = 9;

#[rustfmt::skip]
const DEMO_CELLS: [u8; 400] = [
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,1,
    1,9,9,1,1,9,9,9,1,9,1,9,1,9,1,9,9,9,1,1,
    1,9,9,1,1,9,9,9,1,9,1,9,1,9,1,9,9,9,1,1,
    1,9,1,1,1,1,9,9,1,9,1,9,1,1,1,1,9,9,1,1,
    1,9,1,1,9,1,1,1,1,9,1,1,1,1,9,1,1,1,1,1,
    1,9,9,9,9,1,1,1,1,1,1,9,9,9,9,1,1,1,1,1,
    1,9,9,9,9,9,9,9,9,1,1,1,9,9,9,9,9,9,9,1,
    1,9,1,1,1,1,1,1,1,1,1,9,1,1,1,1,1,1,1,1,
    1,9,1,9,9,9,9,9,9,9,1,1,9,9,9,9,9,9,9,1,
    1,9,1,1,1,1,9,1,1,9,1,1,1,1,1,1,1,1,1,1,
    1,9,9,9,9,9,1,9,1,9,1,9,9,9,9,9,1,1,1,1,
    1,9,1,9,1,9,9,9,1,9,1,9,1,9,1,9,9,9,1,1,
    1,9,1,9,1,9,9,9,1,9,1,9,1,9,1,9,9,9,1,1,
    1,9,1,1,1,1,9,9,1,9,1,9,1,1,1,1,9,9,1,1,
    1,9,1,1,9,1,1,1,1,9,1,1,1,1,9,1,1,1,1,1,
    1,9,9,9,9,1,1,1,1,1,1,9,9,9,9,1,1,1,1,1,
    1,1,9,9,9,9,9,9,9,1,1,1,9,9,9,1,9,9,9,9,
    1,9,1,1,1,1,1,1,1,1,1,9,1,1,1,1,1,1,1,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
];

/// A rectangular terrain grid. Cell values 1..=8 are movement costs and 9
/// is a wall.
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Maze {
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> anyhow::Result<Maze> {
        ensure!(width > 0 && height > 0, "maze dimensions must be positive");
        ensure!(
            cells.len() == width * height,
            "expected {} cells for a {width}x{height} maze, got {}",
            width * height,
            cells.len()
        );
        ensure!(
            cells.iter().all(|&cell| (1..=WALL).contains(&cell)),
            "terrain values must be in 1..=9"
        );
        Ok(Maze {
            width,
            height,
            cells,
        })
    }

    /// The fixed 20x20 demo board.
    pub fn demo() -> Maze {
        Maze {
            width: 20,
            height: 20,
            cells: DEMO_CELLS.to_vec(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn terrain(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return WALL;
        }
        self.cells[y * self.width + x]
    }

    pub fn is_open(&self, x: usize, y: usize) -> bool {
        self.terrain(x, y) < WALL
    }

    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_open(x, y))
            .collect()
    }
}

/// A position on a maze, carrying a reference to the board it belongs to.
#[derive(Clone, Copy)]
pub struct MazeState<'m> {
    maze: &'m Maze,
    pub x: usize,
    pub y: usize,
}

impl<'m> MazeState<'m> {
    pub fn new(maze: &'m Maze, x: usize, y: usize) -> Self {
        MazeState { maze, x, y }
    }
}

impl fmt::Debug for MazeState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl fmt::Display for MazeState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl SearchState for MazeState<'_> {
    fn heuristic(&self, goal: &Self) -> f32 {
        (self.x.abs_diff(goal.x) + self.y.abs_diff(goal.y)) as f32
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self.same_as(goal)
    }

    /// Open orthogonal neighbors, skipping the position we came from.
    fn successors(&self, parent: Option<&Self>) -> Result<Vec<Self>, ResourceExhausted> {
        let mut moves = Vec::with_capacity(4);
        let offsets = [(-1i64, 0i64), (0, -1), (1, 0), (0, 1)];
        for (dx, dy) in offsets {
            let (x, y) = (self.x as i64 + dx, self.y as i64 + dy);
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if !self.maze.is_open(x, y) {
                continue;
            }
            if parent.is_some_and(|p| p.x == x && p.y == y) {
                continue;
            }
            moves.push(MazeState::new(self.maze, x, y));
        }
        Ok(moves)
    }

    /// Leaving a cell costs its own terrain value.
    fn transition_cost(&self, _successor: &Self) -> f32 {
        self.maze.terrain(self.x, self.y) as f32
    }

    fn same_as(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AStarSearch, Status};

    #[test]
    fn test_demo_board_corner_to_corner() {
        let maze = Maze::demo();
        let mut engine = AStarSearch::new();
        engine.initialize(MazeState::new(&maze, 0, 0), MazeState::new(&maze, 19, 19));
        assert_eq!(engine.solve(), Status::Succeeded);

        let path: Vec<(usize, usize)> = engine
            .solution_forward()
            .unwrap()
            .map(|state| (state.x, state.y))
            .collect();
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(19, 19)));
        for hop in path.windows(2) {
            let ((ax, ay), (bx, by)) = (hop[0], hop[1]);
            assert_eq!(ax.abs_diff(bx) + ay.abs_diff(by), 1, "jump {hop:?}");
            assert!(maze.is_open(bx, by));
        }
        // Unit terrain throughout, so no path beats the Manhattan bound.
        assert!(engine.stats().cost >= 38.0);
    }

    #[test]
    fn test_walled_in_start_fails_after_expanding_it() {
        let maze = Maze::new(3, 3, vec![1, 9, 9, 9, 9, 9, 9, 9, 1]).unwrap();
        let mut engine = AStarSearch::new();
        engine.initialize(MazeState::new(&maze, 0, 0), MazeState::new(&maze, 2, 2));

        assert_eq!(engine.solve(), Status::Failed);
        assert_eq!(engine.stats().expanded_nodes, 1);
        assert_eq!(engine.step_count(), 2);
    }

    #[test]
    fn test_outside_the_board_reads_as_wall() {
        let maze = Maze::new(2, 2, vec![1, 1, 1, 1]).unwrap();
        assert_eq!(maze.terrain(2, 0), WALL);
        assert_eq!(maze.terrain(0, 5), WALL);
        assert!(!maze.is_open(2, 2));
    }

    #[test]
    fn test_successors_skip_walls_and_parent() {
        let maze = Maze::new(3, 3, vec![1, 1, 1, 1, 1, 9, 1, 1, 1]).unwrap();
        let center = MazeState::new(&maze, 1, 1);

        let free: Vec<(usize, usize)> = center
            .successors(None)
            .unwrap()
            .iter()
            .map(|s| (s.x, s.y))
            .collect();
        assert_eq!(free, vec![(0, 1), (1, 0), (1, 2)]);

        let parent = MazeState::new(&maze, 1, 0);
        let from_north: Vec<(usize, usize)> = center
            .successors(Some(&parent))
            .unwrap()
            .iter()
            .map(|s| (s.x, s.y))
            .collect();
        assert_eq!(from_north, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_cost_reads_the_departed_cell() {
        let maze = Maze::new(2, 1, vec![3, 1]).unwrap();
        let left = MazeState::new(&maze, 0, 0);
        let right = MazeState::new(&maze, 1, 0);
        assert_eq!(left.transition_cost(&right), 3.0);
        assert_eq!(right.transition_cost(&left), 1.0);
    }

    #[test]
    fn test_manhattan_estimate() {
        let maze = Maze::demo();
        let corner = MazeState::new(&maze, 0, 0);
        let goal = MazeState::new(&maze, 19, 19);
        assert_eq!(corner.heuristic(&goal), 38.0);
        assert_eq!(goal.heuristic(&corner), 38.0);
        assert_eq!(goal.heuristic(&goal), 0.0);
    }

    #[test]
    fn test_maze_validation() {
        assert!(Maze::new(2, 2, vec![1, 1, 1]).is_err());
        assert!(Maze::new(2, 2, vec![0, 1, 1, 1]).is_err());
        assert!(Maze::new(0, 2, vec![]).is_err());
        let maze = Maze::demo();
        let walls = DEMO_CELLS.iter().filter(|&&c| c == WALL).count();
        assert_eq!(maze.open_cells().len(), 400 - walls);
    }
}
