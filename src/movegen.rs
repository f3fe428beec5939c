//! Legal-move generation.
//!
//! Everything here is a pure function of a grid snapshot, the per-square
//! horizontal direction memory and the side to move. Captures are
//! mandatory: when any piece of the side to move can jump, only maximal
//! jump chains are legal.

use crate::moves::Move;
use crate::types::{NUM_SQUARES, PieceColor, Square};

pub type Grid = [PieceColor; NUM_SQUARES];

/// Column delta of each square's last sideways arrival, 0 when unconstrained.
pub type DirectionMemory = [i8; NUM_SQUARES];

/// Capture directions as (row, column) offsets, scanned in this order.
const JUMP_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Borrowed snapshot that produces legal moves for one side.
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    grid: &'a Grid,
    memory: &'a DirectionMemory,
    side: PieceColor,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(grid: &'a Grid, memory: &'a DirectionMemory, side: PieceColor) -> Self {
        Self { grid, memory, side }
    }

    /// All legal moves, square-index ascending.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.jump_possible() {
            for square in Square::all() {
                self.push_jumps(square, &mut moves);
            }
        } else {
            for square in Square::all() {
                for to in self.step_targets(square) {
                    moves.push(Move::from_path(vec![square, to]));
                }
            }
        }
        moves
    }

    /// Same answer as `!legal_moves().is_empty()` without building the list.
    pub fn has_legal_move(&self) -> bool {
        self.jump_possible() || Square::all().any(|sq| self.step_targets(sq).next().is_some())
    }

    /// True iff any piece of the side to move can capture.
    pub fn jump_possible(&self) -> bool {
        Square::all().any(|sq| self.jump_possible_from(sq))
    }

    /// True iff the piece on `square` belongs to the side to move and can
    /// capture.
    pub fn jump_possible_from(&self, square: Square) -> bool {
        self.grid[square.index()] == self.side
            && JUMP_DIRECTIONS
                .iter()
                .any(|&(dr, dc)| capture(self.grid, square, dr, dc, self.side).is_some())
    }

    /// Maximal jump chains starting on `square`.
    pub fn jumps_from(&self, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        self.push_jumps(square, &mut moves);
        moves
    }

    fn push_jumps(&self, square: Square, out: &mut Vec<Move>) {
        if self.grid[square.index()] != self.side {
            return;
        }
        let mut path = vec![square];
        extend_chains(*self.grid, &mut path, self.side, out);
    }

    /// Destinations of single, non-capturing steps from `square`.
    fn step_targets(&self, square: Square) -> impl Iterator<Item = Square> + '_ {
        let k = square.index();
        let movable = self.grid[k] == self.side && self.side.last_row() != Some(square.row());
        let forward = self.side.forward();
        let memory = self.memory[k] as i32;

        (-1..=1)
            .flat_map(|dc| (0..=1).map(move |j| (dc, j)))
            .filter(move |_| movable)
            .filter(move |&(dc, j)| square.is_even() || dc == 0 || j == 0)
            .filter(move |&(dc, j)| j != 0 || memory == 0 || memory != -dc)
            .filter_map(move |(dc, j)| square.offset(dc, j * forward))
            .filter(move |to| self.grid[to.index()] == PieceColor::Empty)
    }
}

/// Over-square and landing square for a capture from `from` in direction
/// (`dr`, `dc`), if the line holds an opposing piece followed by an empty
/// square. Diagonal lines exist only through even squares.
fn capture(grid: &Grid, from: Square, dr: i32, dc: i32, side: PieceColor) -> Option<(Square, Square)> {
    if dr != 0 && dc != 0 && !from.is_even() {
        return None;
    }
    let over = from.offset(dc, dr)?;
    let landing = from.offset(2 * dc, 2 * dr)?;
    (grid[over.index()] == side.opposite() && grid[landing.index()] == PieceColor::Empty)
        .then_some((over, landing))
}

/// Appends every maximal continuation of `path` on the hypothetical
/// `grid`, where the jumper already stands on the last square of `path`.
fn extend_chains(grid: Grid, path: &mut Vec<Square>, side: PieceColor, out: &mut Vec<Move>) {
    let from = path[path.len() - 1];
    for &(dr, dc) in &JUMP_DIRECTIONS {
        let Some((over, landing)) = capture(&grid, from, dr, dc, side) else {
            continue;
        };

        let mut next = grid;
        next[from.index()] = PieceColor::Empty;
        next[over.index()] = PieceColor::Empty;
        next[landing.index()] = side;

        path.push(landing);
        let before = out.len();
        extend_chains(next, path, side, out);
        if out.len() == before {
            out.push(Move::from_path(path.clone()));
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INITIAL_LAYOUT;

    fn grid(text: &str) -> Grid {
        let mut grid = [PieceColor::Empty; NUM_SQUARES];
        let cells: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(cells.len(), NUM_SQUARES);
        for (cell, c) in grid.iter_mut().zip(cells) {
            *cell = PieceColor::from_char(c).unwrap();
        }
        grid
    }

    fn names(moves: &[Move]) -> Vec<String> {
        moves.iter().map(Move::to_string).collect()
    }

    #[test]
    fn opening_has_only_simple_moves_into_the_center() {
        let grid = grid(INITIAL_LAYOUT);
        let memory = [0; NUM_SQUARES];
        let generator = MoveGenerator::new(&grid, &memory, PieceColor::White);

        let moves = generator.legal_moves();

        assert!(!generator.jump_possible());
        assert_eq!(names(&moves), vec!["b2-c3", "c2-c3", "d2-c3", "d3-c3"]);
    }

    #[test]
    fn odd_squares_never_step_diagonally() {
        // White on b2 (index 6, even) and c2 (index 7, odd).
        let grid = grid("----- -ww-- ----- ----- ----b");
        let memory = [0; NUM_SQUARES];
        let moves = MoveGenerator::new(&grid, &memory, PieceColor::White).legal_moves();

        assert_eq!(names(&moves), vec!["b2-a2", "b2-a3", "b2-b3", "b2-c3", "c2-c3", "c2-d2"]);
    }

    #[test]
    fn farthest_row_pieces_have_no_steps() {
        let grid = grid("b---- ----- ----- ----- w----");
        let memory = [0; NUM_SQUARES];

        assert!(!MoveGenerator::new(&grid, &memory, PieceColor::White).has_legal_move());
        assert!(!MoveGenerator::new(&grid, &memory, PieceColor::Black).has_legal_move());
    }

    #[test]
    fn sideways_memory_blocks_only_the_reverse_step() {
        let grid = grid("-w--- ----- ----- ----- ----b");
        let mut memory = [0; NUM_SQUARES];
        memory[1] = 1;

        let moves = MoveGenerator::new(&grid, &memory, PieceColor::White).legal_moves();

        assert_eq!(names(&moves), vec!["b1-b2", "b1-c1"]);
    }

    #[test]
    fn capture_is_mandatory() {
        let grid = grid("w-w-- -b--- ----- ----- ----b");
        let memory = [0; NUM_SQUARES];
        let moves = MoveGenerator::new(&grid, &memory, PieceColor::White).legal_moves();

        assert_eq!(names(&moves), vec!["a1-c3", "c1-a3"]);
        assert!(moves.iter().all(Move::is_jump));
    }

    #[test]
    fn chains_follow_each_branch_to_its_end() {
        // White a1; Black b1 and d1 and c2.
        let grid = grid("wb-b- --b-- ----- ----- -----");
        let memory = [0; NUM_SQUARES];
        let moves = MoveGenerator::new(&grid, &memory, PieceColor::White).legal_moves();

        assert_eq!(names(&moves), vec!["a1-c1-e1", "a1-c1-c3"]);
    }

    #[test]
    fn sibling_branches_keep_their_own_length() {
        // White c3; Black b3, d3, e4 and d5.
        let grid = grid("----- ----- -bwb- ----b ---b-");
        let memory = [0; NUM_SQUARES];
        let moves = MoveGenerator::new(&grid, &memory, PieceColor::White).legal_moves();

        assert_eq!(names(&moves), vec!["c3-a3", "c3-e3-e5-c5"]);
    }

    #[test]
    fn chain_may_return_to_its_starting_square() {
        let grid = grid("wb--- -bb-- ----- ----- -----");
        let memory = [0; NUM_SQUARES];
        let moves = MoveGenerator::new(&grid, &memory, PieceColor::White).legal_moves();

        assert_eq!(
            names(&moves),
            vec!["a1-c1-a3", "a1-c1-c3-a1", "a1-c3-c1-a1"]
        );
    }
}
