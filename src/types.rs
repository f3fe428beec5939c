use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: usize = 5;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Opening layout in board notation: White fills rows 1-2 and the right of
/// row 3, Black the rest, the center is empty.
pub const INITIAL_LAYOUT: &str = "wwwwwwwwwwbb-wwbbbbbbbbbb";

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    #[default]
    Empty,
    White,
    Black,
}

impl PieceColor {
    /// White and Black swap; Empty stays Empty.
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
            Self::Empty => Self::Empty,
        }
    }

    /// Notation character: `w`, `b` or `-`.
    pub fn to_char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
            Self::Empty => '-',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' | 'W' => Some(Self::White),
            'b' | 'B' => Some(Self::Black),
            '-' => Some(Self::Empty),
            _ => None,
        }
    }

    /// Row step that moves a piece of this color toward the opponent.
    pub(crate) fn forward(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
            Self::Empty => 0,
        }
    }

    /// Farthest row (0-based) for this color.
    pub(crate) fn last_row(self) -> Option<usize> {
        match self {
            Self::White => Some(BOARD_SIZE - 1),
            Self::Black => Some(0),
            Self::Empty => None,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Empty => "Empty",
        };
        f.write_str(name)
    }
}

/// A board square. Column `a..e` and row `1..5` map to the linear index
/// `row * 5 + col`, row 0 at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < NUM_SQUARES).then_some(Self(index as u8))
    }

    /// Zero-based column and row.
    pub fn from_col_row(col: usize, row: usize) -> Option<Self> {
        if col < BOARD_SIZE && row < BOARD_SIZE {
            Some(Self((row * BOARD_SIZE + col) as u8))
        } else {
            None
        }
    }

    /// Square named by a column letter and a row digit, e.g. `('c', '3')`.
    pub fn from_chars(col: char, row: char) -> Option<Self> {
        let col = (col.to_ascii_lowercase() as u32).checked_sub('a' as u32)? as usize;
        let row = (row as u32).checked_sub('1' as u32)? as usize;
        Self::from_col_row(col, row)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn col(self) -> usize {
        self.index() % BOARD_SIZE
    }

    pub fn row(self) -> usize {
        self.index() / BOARD_SIZE
    }

    /// Squares on the board's diagonal lines.
    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    /// Square reached by the given column and row offsets, if on the board.
    pub fn offset(self, dc: i32, dr: i32) -> Option<Self> {
        let col = self.col() as i32 + dc;
        let row = self.row() as i32 + dr;
        if col < 0 || row < 0 {
            return None;
        }
        Self::from_col_row(col as usize, row as usize)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'a' + self.col() as u8) as char;
        let row = (b'1' + self.row() as u8) as char;
        write!(f, "{col}{row}")
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Board notation, row-major from the bottom row.
    pub board: String,
    pub whose_move: PieceColor,
    pub white_count: u8,
    pub black_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `None` before the first move or after undoing every move.
    /// - Otherwise the notation of the most recent applied move.
    pub last_move: Option<String>,
    pub legal_moves: Vec<String>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: PieceColor,
    pub white_count: u8,
    pub black_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip_through_linear_index() {
        let a1 = Square::from_chars('a', '1').unwrap();
        let e5 = Square::from_chars('e', '5').unwrap();
        let c3 = Square::from_chars('C', '3').unwrap();

        assert_eq!(a1.index(), 0);
        assert_eq!(e5.index(), 24);
        assert_eq!(c3.index(), 12);
        assert_eq!(c3.to_string(), "c3");
        assert_eq!(Square::from_index(13).unwrap().to_string(), "d3");
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert_eq!(Square::from_chars('f', '1'), None);
        assert_eq!(Square::from_chars('a', '6'), None);
        assert_eq!(Square::from_chars('a', '0'), None);
        assert_eq!(Square::from_index(25), None);
        assert_eq!(Square::from_index(0).unwrap().offset(-1, 0), None);
        assert_eq!(Square::from_index(24).unwrap().offset(0, 1), None);
    }

    #[test]
    fn opposite_swaps_players_and_keeps_empty() {
        assert_eq!(PieceColor::White.opposite(), PieceColor::Black);
        assert_eq!(PieceColor::Black.opposite(), PieceColor::White);
        assert_eq!(PieceColor::Empty.opposite(), PieceColor::Empty);
    }
}
