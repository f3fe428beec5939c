use web_time::Instant;

use crate::ai::eval::static_score;
use crate::board::Board;
use crate::config::EngineConfig;
use crate::log;
use crate::moves::Move;
use crate::types::PieceColor;

/// Plies searched before falling back to the static score.
pub const DEFAULT_SEARCH_DEPTH: u8 = 8;
const INFTY: i32 = i32::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen move; `None` when the position has no legal move.
    pub best_move: Option<Move>,
    /// Root score from White's point of view.
    pub score: i32,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Scores are always from White's point of view: the maximizing levels
/// (`sense == 1`) pick moves for White, the minimizing ones for Black.
pub struct Searcher {
    max_depth: u8,
    pruning: bool,
    nodes: u64,
}

impl Searcher {
    /// Searcher for `max_depth` plies (at least one).
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
            pruning: true,
            nodes: 0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.search_depth)
    }

    /// Plain minimax over the same tree, without cutoffs. Slow; it exists to
    /// check that pruning never changes the answer.
    pub fn exhaustive(max_depth: u8) -> Self {
        Self {
            pruning: false,
            ..Self::new(max_depth)
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Best move for `color` on `board`, or `None` when there is no legal
    /// move. Callers are expected to check for game over first.
    pub fn choose_move(&mut self, board: &Board, color: PieceColor) -> Option<Move> {
        self.search(board, color).best_move
    }

    /// Runs the search on a private copy of `board`. `color` picks the root
    /// polarity; `Empty` searches for the side to move.
    pub fn search(&mut self, board: &Board, color: PieceColor) -> SearchResult {
        let start_time = Instant::now();
        self.nodes = 0;

        let color = match color {
            PieceColor::Empty => board.whose_move(),
            color => color,
        };
        let sense = if color == PieceColor::White { 1 } else { -1 };

        let mut work = board.clone();
        let (score, best_move) = self.find_move(&mut work, self.max_depth, true, sense, -INFTY, INFTY);
        debug_assert_eq!(&work, board, "make/undo left the search board changed");

        if crate::logger::is_enabled() {
            let chosen = best_move.as_ref().map_or_else(|| "-".to_string(), Move::to_string);
            log!(
                "{} moves {} (score {}, {} nodes, depth {}, {} ms)",
                color,
                chosen,
                score,
                self.nodes,
                self.max_depth,
                start_time.elapsed().as_millis()
            );
        }

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    /// Value of `board` searched `depth` plies deep. The move achieving it
    /// is returned only when `save_move` is set, which the root does.
    /// Levels with `sense == 1` maximize and raise `alpha`; levels with
    /// `sense == -1` minimize and lower `beta`.
    fn find_move(
        &mut self,
        board: &mut Board,
        depth: u8,
        save_move: bool,
        sense: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 || board.game_over() {
            return (static_score(board), None);
        }

        let mut moves = board.legal_moves();
        let mut best_score = if sense == 1 { -INFTY } else { INFTY };
        let mut best_index = None;

        for (index, mv) in moves.iter().enumerate() {
            board.apply(mv);
            let (score, _) = self.find_move(board, depth - 1, false, -sense, alpha, beta);
            board.undo();

            if sense == 1 {
                if score > best_score {
                    best_score = score;
                    best_index = Some(index);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_index = Some(index);
                }
                beta = beta.min(best_score);
            }

            if self.pruning && beta <= alpha {
                break;
            }
        }

        if !save_move {
            return (best_score, None);
        }
        let Some(index) = best_index else {
            unreachable!("search tracked no move among {} legal moves", moves.len());
        };
        (best_score, Some(moves.swap_remove(index)))
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}
