mod maze;
mod puzzle;
mod romania;

pub use maze::{Maze, MazeState, WALL};
pub use puzzle::PuzzleBoard;
pub use romania::City;
