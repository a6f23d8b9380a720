use crate::state::{ResourceExhausted, SearchState};

use anyhow::{anyhow, ensure};
use std::fmt;

const WIDTH: usize = 3;
const CELLS: usize = WIDTH * WIDTH;

/// Board cells on the outer ring in clockwise order.
const RING: [usize; 8] = [0, 1, 2, 5, 8, 7, 6, 3];

/// A 3x3 sliding-tile board. Tiles are 1..=8 with 0 standing for the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleBoard {
    tiles: [u8; CELLS],
}

impl PuzzleBoard {
    /// Classic goal layout, tiles running clockwise around the blank center.
    pub const GOAL: PuzzleBoard = PuzzleBoard {
        tiles: [1, 2, 3, 8, 0, 4, 7, 6, 5],
    };

    pub fn new(tiles: [u8; CELLS]) -> anyhow::Result<PuzzleBoard> {
        let mut seen = [false; CELLS];
        for &tile in &tiles {
            ensure!(
                (tile as usize) < CELLS,
                "tile {tile} out of range, expected 0..=8"
            );
            ensure!(!seen[tile as usize], "tile {tile} appears twice");
            seen[tile as usize] = true;
        }
        Ok(PuzzleBoard { tiles })
    }

    /// Parse a nine digit string such as "134802765", row by row with 0 as
    /// the blank.
    pub fn from_digits(digits: &str) -> anyhow::Result<PuzzleBoard> {
        ensure!(
            digits.len() == CELLS,
            "expected {CELLS} digits, got {}",
            digits.len()
        );
        let mut tiles = [0u8; CELLS];
        for (cell, ch) in digits.chars().enumerate() {
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| anyhow!("invalid tile digit {ch:?}"))?;
            tiles[cell] = digit as u8;
        }
        PuzzleBoard::new(tiles)
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    fn blank(&self) -> usize {
        self.tiles
            .iter()
            .position(|&tile| tile == 0)
            .expect("validated board has a blank")
    }

    fn swapped(&self, a: usize, b: usize) -> PuzzleBoard {
        let mut tiles = self.tiles;
        tiles.swap(a, b);
        PuzzleBoard { tiles }
    }
}

impl fmt::Display for PuzzleBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(WIDTH) {
            for &tile in row {
                if tile == 0 {
                    write!(f, "  ")?;
                } else {
                    write!(f, "{tile} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl SearchState for PuzzleBoard {
    /// Nilsson's sequence score: total Manhattan displacement, plus three
    /// times the ring penalty. The centre scores one when wrong and every
    /// ring tile not followed clockwise by its goal follower scores two.
    /// Informative but not admissible, so found plans may be longer than
    /// optimal.
    fn heuristic(&self, goal: &Self) -> f32 {
        let mut goal_cell = [0usize; CELLS];
        for (cell, &tile) in goal.tiles.iter().enumerate() {
            goal_cell[tile as usize] = cell;
        }
        let mut follower = [None; CELLS];
        for k in 0..RING.len() {
            let tile = goal.tiles[RING[k]];
            follower[tile as usize] = Some(goal.tiles[RING[(k + 1) % RING.len()]]);
        }

        let mut manhattan = 0usize;
        for (cell, &tile) in self.tiles.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let want = goal_cell[tile as usize];
            manhattan += (cell % WIDTH).abs_diff(want % WIDTH);
            manhattan += (cell / WIDTH).abs_diff(want / WIDTH);
        }

        let mut sequence = 0usize;
        if self.tiles[CELLS / 2] != goal.tiles[CELLS / 2] {
            sequence = 1;
        }
        for k in 0..RING.len() {
            let tile = self.tiles[RING[k]];
            if tile == 0 {
                continue;
            }
            let next = self.tiles[RING[(k + 1) % RING.len()]];
            if follower[tile as usize] != Some(next) {
                sequence += 2;
            }
        }

        (manhattan + 3 * sequence) as f32
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self.same_as(goal)
    }

    /// The blank swaps with an orthogonal neighbor: up, down, left, right.
    fn successors(&self, _parent: Option<&Self>) -> Result<Vec<Self>, ResourceExhausted> {
        let blank = self.blank();
        let (x, y) = (blank % WIDTH, blank / WIDTH);
        let mut moves = Vec::with_capacity(4);
        if y > 0 {
            moves.push(self.swapped(blank, blank - WIDTH));
        }
        if y < WIDTH - 1 {
            moves.push(self.swapped(blank, blank + WIDTH));
        }
        if x > 0 {
            moves.push(self.swapped(blank, blank - 1));
        }
        if x < WIDTH - 1 {
            moves.push(self.swapped(blank, blank + 1));
        }
        Ok(moves)
    }

    fn transition_cost(&self, _successor: &Self) -> f32 {
        1.0
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}
