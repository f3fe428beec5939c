use crate::board::Board;
use crate::types::PieceColor;

/// Score magnitude of a decided game: positive for White, negative for
/// Black. Larger than any material difference.
pub const WINNING_VALUE: i32 = i32::MAX - 1;

/// Static score from White's point of view.
///
/// Material difference while play continues. Once the side to move is
/// stuck the game is decided and the score jumps to `±WINNING_VALUE`,
/// signed by whichever color has more pieces (Black on a tie).
pub fn static_score(board: &Board) -> i32 {
    let white = board.piece_count(PieceColor::White) as i32;
    let black = board.piece_count(PieceColor::Black) as i32;

    if board.game_over() {
        if white > black {
            WINNING_VALUE
        } else {
            -WINNING_VALUE
        }
    } else {
        white - black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_is_balanced() {
        assert_eq!(static_score(&Board::new()), 0);
    }

    #[test]
    fn material_difference_while_playing() {
        let board = Board::from_notation("ww--- ----- --b-- ----- -----", PieceColor::White).unwrap();

        assert!(!board.game_over());
        assert_eq!(static_score(&board), 1);
    }

    #[test]
    fn decided_positions_score_as_wins() {
        let white_won = Board::from_notation("----- ----- --w-- ----- -----", PieceColor::Black).unwrap();
        let black_won = Board::from_notation("----- ----- --b-- ----- -----", PieceColor::White).unwrap();

        assert!(white_won.game_over());
        assert_eq!(static_score(&white_won), WINNING_VALUE);
        assert!(black_won.game_over());
        assert_eq!(static_score(&black_won), -WINNING_VALUE);
    }
}
