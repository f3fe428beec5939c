use crate::ai::AiSelector;
use crate::board::{Board, BoardView};
use crate::config::EngineConfig;
use crate::error::QirkatError;
use crate::moves::Move;
use crate::types::{GameResult, GameState, PieceColor};

/// Source of moves for one side: the engine, a scripted list, or an
/// adapter over human input.
pub trait MoveSelector: Send + Sync {
    /// A move for `color` on `board`, or `None` when it has none.
    fn select_move(&self, board: BoardView<'_>, color: PieceColor) -> Option<Move>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: BoardView<'_>, _color: PieceColor) -> Option<Move> {
        board.legal_moves().into_iter().next()
    }
}

/// One game between a human side, fed through [`GameInstance::play`], and a
/// selector playing `ai_color`.
pub struct GameInstance {
    board: Board,
    ai_color: PieceColor,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(ai_color: PieceColor, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            ai_color,
            selector,
        }
    }

    pub fn new_with_ai(ai_color: PieceColor, depth: u8) -> Self {
        Self::new(ai_color, Box::new(AiSelector::new(depth)))
    }

    pub fn from_config(ai_color: PieceColor, config: &EngineConfig) -> Result<Self, QirkatError> {
        config.validate()?;
        config.init_logging();
        Ok(Self::new(ai_color, Box::new(AiSelector::from_config(config))))
    }

    pub fn board(&self) -> BoardView<'_> {
        self.board.constant_view()
    }

    pub fn ai_color(&self) -> PieceColor {
        self.ai_color
    }

    pub fn human_color(&self) -> PieceColor {
        self.ai_color.opposite()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.game_over()
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.board.game_over() && self.board.whose_move() == self.ai_color
    }

    /// Applies the human side's move given in move notation. A lone `-`
    /// passes and is accepted only on the human turn with no legal move.
    pub fn play(&mut self, text: &str) -> Result<Option<Move>, QirkatError> {
        let parsed = Move::parse(text)?;

        let human = self.human_color();
        if self.board.whose_move() != human {
            return Err(QirkatError::NotYourTurn(human));
        }
        let Some(mv) = parsed else {
            return if self.board.legal_moves().is_empty() {
                Ok(None)
            } else {
                Err(QirkatError::IllegalMove("-".to_string()))
            };
        };
        if self.board.game_over() {
            return Err(QirkatError::GameOver);
        }
        if !self.board.make_move(&mv) {
            return Err(QirkatError::IllegalMove(mv.to_string()));
        }
        Ok(Some(mv))
    }

    /// Asks the selector for a move and applies it.
    pub fn do_ai_move(&mut self) -> Result<Move, QirkatError> {
        if self.board.game_over() {
            return Err(QirkatError::GameOver);
        }
        if self.board.whose_move() != self.ai_color {
            return Err(QirkatError::NotYourTurn(self.ai_color));
        }

        let selected = self
            .selector
            .select_move(self.board.constant_view(), self.ai_color)
            .ok_or(QirkatError::NoMoveAvailable)?;

        if !self.board.make_move(&selected) {
            return Err(QirkatError::IllegalMove(selected.to_string()));
        }
        Ok(selected)
    }

    /// Takes back the most recent move, whichever side made it.
    pub fn undo(&mut self) -> Option<Move> {
        self.board.undo()
    }

    pub fn legal_moves(&self) -> Vec<String> {
        self.board.legal_moves().iter().map(Move::to_string).collect()
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.notation(),
            whose_move: self.board.whose_move(),
            white_count: self.board.piece_count(PieceColor::White) as u8,
            black_count: self.board.piece_count(PieceColor::Black) as u8,
            is_game_over: self.board.game_over(),
            last_move: self.board.last_move().map(Move::to_string),
            legal_moves: self.legal_moves(),
        }
    }

    /// Winner is the side that is not stuck; `Empty` while play continues.
    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            winner: if self.board.game_over() {
                self.board.whose_move().opposite()
            } else {
                PieceColor::Empty
            },
            white_count: self.board.piece_count(PieceColor::White) as u8,
            black_count: self.board.piece_count(PieceColor::Black) as u8,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, notation: &str, to_move: PieceColor) {
        self.board
            .set_from_notation(notation, to_move)
            .expect("test board notation must be valid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INITIAL_LAYOUT;

    struct FixedMoveSelector {
        mv: &'static str,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: BoardView<'_>, _color: PieceColor) -> Option<Move> {
            self.mv.parse().ok()
        }
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new(PieceColor::Black, Box::new(FirstLegalMoveSelector));
        let state = game.to_game_state();

        assert_eq!(state.board, INITIAL_LAYOUT);
        assert_eq!(state.whose_move, PieceColor::White);
        assert_eq!(state.white_count, 12);
        assert_eq!(state.black_count, 12);
        assert!(!state.is_game_over);
        assert_eq!(state.last_move, None);
        assert_eq!(state.legal_moves, vec!["b2-c3", "c2-c3", "d2-c3", "d3-c3"]);
    }

    #[test]
    fn illegal_player_move_returns_error() {
        let mut game = GameInstance::new(PieceColor::Black, Box::new(FirstLegalMoveSelector));

        let err = game.play("a1-a2").unwrap_err();

        assert_eq!(err, QirkatError::IllegalMove("a1-a2".to_string()));
        assert_eq!(game.to_game_state().board, INITIAL_LAYOUT);
    }

    #[test]
    fn player_cannot_move_on_ai_turn() {
        let mut game = GameInstance::new(PieceColor::White, Box::new(FirstLegalMoveSelector));

        assert_eq!(game.play("c2-c3"), Err(QirkatError::NotYourTurn(PieceColor::Black)));
        assert!(game.is_ai_turn());
    }

    #[test]
    fn pass_is_only_accepted_without_legal_moves() {
        let mut game = GameInstance::new(PieceColor::Black, Box::new(FirstLegalMoveSelector));
        assert!(game.play("-").is_err());

        game.set_board_for_test("----- ----- ----- ----- w---b", PieceColor::White);
        assert_eq!(game.play("-"), Ok(None));
    }

    #[test]
    fn pass_on_ai_turn_is_rejected() {
        let mut game = GameInstance::new(PieceColor::White, Box::new(FirstLegalMoveSelector));

        assert_eq!(game.play("-"), Err(QirkatError::NotYourTurn(PieceColor::Black)));

        game.set_board_for_test("----- ----- ----- ----- w---b", PieceColor::White);
        assert_eq!(game.play("-"), Err(QirkatError::NotYourTurn(PieceColor::Black)));
    }

    #[test]
    fn ai_and_player_alternate() {
        let mut game = GameInstance::new(PieceColor::Black, Box::new(FirstLegalMoveSelector));

        assert_eq!(game.play("c2-c3"), Ok(Some("c2-c3".parse().unwrap())));
        let reply = game.do_ai_move().unwrap();

        assert_eq!(reply.to_string(), "c4-c2");
        assert_eq!(game.to_game_state().last_move.as_deref(), Some("c4-c2"));
        assert_eq!(game.to_game_state().white_count, 11);
    }

    #[test]
    fn illegal_ai_selection_is_rejected() {
        let mut game = GameInstance::new(PieceColor::White, Box::new(FixedMoveSelector { mv: "a1-a2" }));

        assert_eq!(game.do_ai_move(), Err(QirkatError::IllegalMove("a1-a2".to_string())));
        assert_eq!(game.to_game_state().board, INITIAL_LAYOUT);
    }

    #[test]
    fn winning_capture_ends_game() {
        let mut game = GameInstance::new(PieceColor::White, Box::new(FixedMoveSelector { mv: "a1-c3" }));
        game.set_board_for_test("w---- -b--- ----- ----- -----", PieceColor::White);

        game.do_ai_move().unwrap();

        assert!(game.is_game_over());
        assert_eq!(game.do_ai_move(), Err(QirkatError::GameOver));
        let result = game.to_game_result();
        assert_eq!(result.winner, PieceColor::White);
        assert_eq!(result.white_count, 1);
        assert_eq!(result.black_count, 0);
    }

    #[test]
    fn undo_takes_back_one_ply() {
        let mut game = GameInstance::new(PieceColor::Black, Box::new(FirstLegalMoveSelector));
        game.play("d3-c3").unwrap();

        assert_eq!(game.undo(), Some("d3-c3".parse().unwrap()));
        assert_eq!(game.to_game_state().board, INITIAL_LAYOUT);
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn engine_selector_plays_a_legal_reply() {
        let mut game = GameInstance::new_with_ai(PieceColor::Black, 3);
        game.play("d2-c3").unwrap();

        let reply = game.do_ai_move().unwrap();

        assert!(reply.is_jump());
        assert_eq!(game.board().whose_move(), PieceColor::White);
    }
}
