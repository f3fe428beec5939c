use std::fmt;

use crate::error::QirkatError;
use crate::movegen::{DirectionMemory, Grid, MoveGenerator};
use crate::moves::Move;
use crate::types::{BOARD_SIZE, INITIAL_LAYOUT, NUM_SQUARES, PieceColor, Square};

/// One applied move and the direction memory it overwrote.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UndoEntry {
    mv: Move,
    memory: DirectionMemory,
}

/// Qirkat board state: grid, side to move, per-square sideways memory and
/// the undo log.
///
/// Mutated only through [`Board::make_move`], [`Board::undo`],
/// [`Board::clear`] and [`Board::set_from_notation`]. Every mutation bumps
/// [`Board::generation`], which observers poll instead of subscribing.
#[derive(Debug)]
pub struct Board {
    grid: Grid,
    whose_move: PieceColor,
    memory: DirectionMemory,
    game_over: bool,
    history: Vec<UndoEntry>,
    generation: u64,
}

impl Board {
    /// Creates the opening position with White to move.
    pub fn new() -> Self {
        let mut board = Self {
            grid: [PieceColor::Empty; NUM_SQUARES],
            whose_move: PieceColor::White,
            memory: [0; NUM_SQUARES],
            game_over: false,
            history: Vec::new(),
            generation: 0,
        };
        board.clear();
        board
    }

    /// Board described by `notation` with `next_to_move` on move.
    pub fn from_notation(notation: &str, next_to_move: PieceColor) -> Result<Self, QirkatError> {
        let mut board = Self::new();
        board.set_from_notation(notation, next_to_move)?;
        Ok(board)
    }

    /// Resets to the opening position.
    pub fn clear(&mut self) {
        self.grid = parse_grid(INITIAL_LAYOUT).unwrap_or_else(|e| unreachable!("{e}"));
        self.whose_move = PieceColor::White;
        self.reset_derived();
    }

    /// Sets the grid from 25 characters over `w`, `b` and `-` (whitespace
    /// ignored), row-major from the bottom row. All squares start with
    /// unconstrained sideways movement and the undo log is dropped.
    pub fn set_from_notation(&mut self, notation: &str, next_to_move: PieceColor) -> Result<(), QirkatError> {
        if next_to_move == PieceColor::Empty {
            return Err(QirkatError::BadPlayerColor);
        }
        self.grid = parse_grid(notation)?;
        self.whose_move = next_to_move;
        self.reset_derived();
        Ok(())
    }

    /// Copies position, side to move and direction memory from `other`.
    /// The undo log starts empty.
    pub fn copy_from(&mut self, other: &Board) {
        self.grid = other.grid;
        self.whose_move = other.whose_move;
        self.memory = other.memory;
        self.game_over = other.game_over;
        self.history.clear();
        self.generation += 1;
    }

    pub fn get(&self, square: Square) -> PieceColor {
        self.grid[square.index()]
    }

    fn set(&mut self, square: Square, color: PieceColor) {
        self.grid[square.index()] = color;
    }

    pub fn whose_move(&self) -> PieceColor {
        self.whose_move
    }

    /// True iff the side to move has no legal move.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_count(&self, color: PieceColor) -> usize {
        self.grid.iter().filter(|&&cell| cell == color).count()
    }

    /// Column delta of the last sideways step into `square`, 0 if none.
    pub fn horizontal_memory(&self, square: Square) -> i8 {
        self.memory[square.index()]
    }

    /// Number of moves that [`Board::undo`] can take back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Most recently applied move still on the undo log.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|entry| &entry.mv)
    }

    /// Counter bumped by every state change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        self.generator().legal_moves()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    pub fn jump_possible(&self) -> bool {
        self.generator().jump_possible()
    }

    pub fn jump_possible_from(&self, square: Square) -> bool {
        self.generator().jump_possible_from(square)
    }

    /// Maximal capture chains for the side to move starting on `square`.
    pub fn jumps_from(&self, square: Square) -> Vec<Move> {
        self.generator().jumps_from(square)
    }

    /// True iff `mv` is absent, or is a chain of captures that is legal
    /// now. With `allow_partial`, a chain that stops before one of the
    /// legal chains ends is accepted too.
    pub fn check_jump(&self, mv: Option<&Move>, allow_partial: bool) -> bool {
        let Some(mv) = mv else {
            return true;
        };
        if !mv.is_jump() {
            return false;
        }
        self.legal_moves().iter().any(|legal| {
            legal == mv || (allow_partial && legal.squares().starts_with(mv.squares()))
        })
    }

    /// Applies `mv` if it is legal. Returns `false` and leaves the board
    /// untouched otherwise.
    pub fn make_move(&mut self, mv: &Move) -> bool {
        if !self.is_legal(mv) {
            return false;
        }
        self.apply(mv);
        true
    }

    /// Applies a move already known to be legal. Search feeds generator
    /// output straight through here.
    pub(crate) fn apply(&mut self, mv: &Move) {
        let mover = self.whose_move;
        self.history.push(UndoEntry {
            mv: mv.clone(),
            memory: self.memory,
        });

        if mv.is_jump() {
            for ((from, to), over) in mv.steps().zip(mv.captured()) {
                self.set(from, PieceColor::Empty);
                self.set(over, PieceColor::Empty);
                self.set(to, mover);
                self.memory[over.index()] = 0;
            }
            self.memory[mv.destination().index()] = 0;
        } else {
            let (from, to) = (mv.from(), mv.to());
            self.memory[to.index()] = if from.row() == to.row() {
                to.col() as i8 - from.col() as i8
            } else {
                0
            };
            self.set(from, PieceColor::Empty);
            self.set(to, mover);
        }
        self.memory[mv.from().index()] = 0;

        self.whose_move = mover.opposite();
        self.refresh_game_over();
        self.generation += 1;
    }

    /// Takes back the last applied move. Returns it, or `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<Move> {
        let UndoEntry { mv, memory } = self.history.pop()?;
        let mover = self.whose_move.opposite();
        let victim = self.whose_move;

        // Landing squares first: a chain may pass over or end on squares
        // that held a captured piece or the mover itself.
        for &square in &mv.squares()[1..] {
            self.set(square, PieceColor::Empty);
        }
        for square in mv.captured() {
            self.set(square, victim);
        }
        self.set(mv.from(), mover);

        self.memory = memory;
        self.whose_move = mover;
        self.refresh_game_over();
        self.generation += 1;
        Some(mv)
    }

    /// Read-only capability over this board.
    pub fn constant_view(&self) -> BoardView<'_> {
        BoardView { board: self }
    }

    /// Grid in board notation, row-major from the bottom row.
    pub fn notation(&self) -> String {
        self.grid.iter().map(|cell| cell.to_char()).collect()
    }

    /// Board picture with the column legend underneath.
    pub fn to_string_with_legend(&self) -> String {
        format!("{self}\na b c d e ")
    }

    fn generator(&self) -> MoveGenerator<'_> {
        MoveGenerator::new(&self.grid, &self.memory, self.whose_move)
    }

    fn reset_derived(&mut self) {
        self.memory = [0; NUM_SQUARES];
        self.history.clear();
        self.refresh_game_over();
        self.generation += 1;
    }

    fn refresh_game_over(&mut self) {
        self.game_over = !self.generator().has_legal_move();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone shares no history with its source: the undo log starts empty.
impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid,
            whose_move: self.whose_move,
            memory: self.memory,
            game_over: self.game_over,
            history: Vec::new(),
            generation: self.generation,
        }
    }
}

/// Boards are equal when grid and side to move match. Direction memory
/// and history are ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid && self.whose_move == other.whose_move
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            f.write_str(" ")?;
            for col in 0..BOARD_SIZE {
                write!(f, " {}", self.grid[row * BOARD_SIZE + col].to_char())?;
            }
            if row != 0 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// Query-only handle on a [`Board`]. Holds a shared borrow, so the board
/// cannot change while a view exists and the view has no mutators.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
}

impl BoardView<'_> {
    pub fn get(&self, square: Square) -> PieceColor {
        self.board.get(square)
    }

    pub fn whose_move(&self) -> PieceColor {
        self.board.whose_move()
    }

    pub fn game_over(&self) -> bool {
        self.board.game_over()
    }

    pub fn piece_count(&self, color: PieceColor) -> usize {
        self.board.piece_count(color)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.board.is_legal(mv)
    }

    pub fn jump_possible(&self) -> bool {
        self.board.jump_possible()
    }

    pub fn notation(&self) -> String {
        self.board.notation()
    }

    pub fn generation(&self) -> u64 {
        self.board.generation()
    }

    /// Independent copy of the viewed board, with an empty undo log.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.board, f)
    }
}

fn parse_grid(notation: &str) -> Result<Grid, QirkatError> {
    let cells: Vec<PieceColor> = notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| PieceColor::from_char(c).ok_or_else(|| QirkatError::BadBoardNotation(notation.to_string())))
        .collect::<Result<_, _>>()?;

    cells
        .try_into()
        .map_err(|_| QirkatError::BadBoardNotation(notation.to_string()))
}
