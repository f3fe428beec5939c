/// Errors surfaced by board setup, notation parsing, the game driver and
/// configuration loading.
///
/// `Board::make_move` never returns one of these: an illegal move is
/// ignored there and reported through its `bool` result.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QirkatError {
    /// Board notation with wrong length or unknown characters.
    #[error("bad board description: {0}")]
    BadBoardNotation(String),

    /// `Empty` passed where a side to move is required.
    #[error("bad player color")]
    BadPlayerColor,

    #[error("bad move notation: {0}")]
    BadMoveNotation(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(crate::types::PieceColor),

    #[error("no move available")]
    NoMoveAvailable,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
