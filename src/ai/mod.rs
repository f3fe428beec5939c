pub mod eval;
pub mod search;

use crate::board::BoardView;
use crate::config::{EngineConfig, MAX_SEARCH_DEPTH};
use crate::game::MoveSelector;
use crate::moves::Move;
use crate::types::PieceColor;

use search::{DEFAULT_SEARCH_DEPTH, Searcher};

/// Move selector backed by the alpha-beta searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiSelector {
    depth: u8,
}

impl AiSelector {
    /// Selector searching `depth` plies, clamped to `1..=MAX_SEARCH_DEPTH`.
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.clamp(1, MAX_SEARCH_DEPTH),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.search_depth)
    }
}

impl Default for AiSelector {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl MoveSelector for AiSelector {
    fn select_move(&self, board: BoardView<'_>, color: PieceColor) -> Option<Move> {
        Searcher::new(self.depth).choose_move(&board.snapshot(), color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn depth_is_clamped_to_the_supported_range() {
        assert_eq!(AiSelector::new(0).depth(), 1);
        assert_eq!(AiSelector::new(5).depth(), 5);
        assert_eq!(AiSelector::new(255).depth(), MAX_SEARCH_DEPTH);
        assert_eq!(AiSelector::default().depth(), DEFAULT_SEARCH_DEPTH);
    }

    #[test]
    fn selector_returns_a_legal_move() {
        let board = Board::new();

        let mv = AiSelector::new(2).select_move(board.constant_view(), PieceColor::White).unwrap();

        assert!(board.is_legal(&mv));
    }
}
