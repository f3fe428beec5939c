use std::fmt;
use std::str::FromStr;

use crate::error::QirkatError;
use crate::types::Square;

/// A single step or a chain of captures.
///
/// Stored as the full square path: `[from, to]` for a step or a single
/// jump, `[from, to, to2, ...]` for a multi-jump. Each jump step lands two
/// cells along a line and captures the piece on the midpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    path: Vec<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Simple,
    Jump,
}

impl Move {
    /// One-square step, or `None` if the squares are not neighbours.
    pub fn simple(from: Square, to: Square) -> Option<Move> {
        (step_kind(from, to) == Some(StepKind::Simple)).then(|| Self { path: vec![from, to] })
    }

    /// One capture, or `None` if `to` is not two cells along a line from
    /// `from`.
    pub fn jump(from: Square, to: Square) -> Option<Move> {
        (step_kind(from, to) == Some(StepKind::Jump)).then(|| Self { path: vec![from, to] })
    }

    /// Prefixes `first` to the chain `tail`. Both must be jumps and `first`
    /// must land where `tail` starts.
    pub fn chain(first: Move, tail: Move) -> Option<Move> {
        if !first.is_jump() || !tail.is_jump() || first.destination() != tail.from() {
            return None;
        }
        let mut path = first.path;
        path.extend_from_slice(&tail.path[1..]);
        Some(Self { path })
    }

    /// Builds a move from a path produced by the generator.
    pub(crate) fn from_path(path: Vec<Square>) -> Self {
        debug_assert!(path.len() >= 2);
        Self { path }
    }

    pub fn from(&self) -> Square {
        self.path[0]
    }

    /// Landing square of the first step.
    pub fn to(&self) -> Square {
        self.path[1]
    }

    /// Final square of the whole move.
    pub fn destination(&self) -> Square {
        self.path[self.path.len() - 1]
    }

    pub fn is_jump(&self) -> bool {
        step_kind(self.from(), self.to()) == Some(StepKind::Jump)
    }

    /// Square captured by the first step, if it is a jump.
    pub fn jumped(&self) -> Option<Square> {
        jumped_between(self.from(), self.to())
    }

    /// The rest of a jump chain after its first step.
    pub fn jump_tail(&self) -> Option<Move> {
        (self.path.len() > 2).then(|| Self {
            path: self.path[1..].to_vec(),
        })
    }

    pub fn squares(&self) -> &[Square] {
        &self.path
    }

    pub fn steps(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }

    /// Every square emptied by captures, in chain order.
    pub fn captured(&self) -> impl Iterator<Item = Square> + '_ {
        self.steps().filter_map(|(from, to)| jumped_between(from, to))
    }

    /// Parses move notation. A lone `-` is a pass and yields `None`.
    pub fn parse(text: &str) -> Result<Option<Move>, QirkatError> {
        let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if text == "-" {
            return Ok(None);
        }

        let mut path = Vec::new();
        for part in text.split('-') {
            let mut chars = part.chars();
            let square = match (chars.next(), chars.next(), chars.next()) {
                (Some(col), Some(row), None) => Square::from_chars(col, row),
                _ => None,
            };
            path.push(square.ok_or_else(|| QirkatError::InvalidSquare(part.to_string()))?);
        }

        if path.len() < 2 {
            return Err(QirkatError::BadMoveNotation(text));
        }

        let kinds: Vec<Option<StepKind>> = path.windows(2).map(|w| step_kind(w[0], w[1])).collect();
        let valid = match kinds.as_slice() {
            [Some(_)] => true,
            chain => chain.iter().all(|kind| *kind == Some(StepKind::Jump)),
        };
        if !valid {
            return Err(QirkatError::BadMoveNotation(text));
        }

        Ok(Some(Self { path }))
    }
}

impl FromStr for Move {
    type Err = QirkatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s)?.ok_or_else(|| QirkatError::BadMoveNotation(s.to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, square) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{square}")?;
        }
        Ok(())
    }
}

fn step_kind(from: Square, to: Square) -> Option<StepKind> {
    let dc = to.col().abs_diff(from.col());
    let dr = to.row().abs_diff(from.row());
    match (dc, dr) {
        (0, 0) => None,
        (0 | 1, 0 | 1) => Some(StepKind::Simple),
        (0 | 2, 0 | 2) => Some(StepKind::Jump),
        _ => None,
    }
}

fn jumped_between(from: Square, to: Square) -> Option<Square> {
    if step_kind(from, to) != Some(StepKind::Jump) {
        return None;
    }
    Square::from_col_row((from.col() + to.col()) / 2, (from.row() + to.row()) / 2)
}
