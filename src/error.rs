use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A move the pile cannot accept. The pile is left untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidMove {
    /// Moves must take between 1 and `MAX_TAKE` matches.
    OutOfRange { taken: u32 },
    /// The move asks for more matches than are left.
    InsufficientPile { taken: u32, remaining: u32 },
    /// The pile is already empty, so the game is over.
    PileEmpty,
}

impl Display for InvalidMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMove::OutOfRange { taken } => {
                write!(f, "cannot take {} matches, a move takes 1 to 4", taken)
            }
            InvalidMove::InsufficientPile { taken, remaining } => write!(
                f,
                "cannot take {} matches, only {} left",
                taken, remaining
            ),
            InvalidMove::PileEmpty => write!(f, "the pile is empty, the game is over"),
        }
    }
}

impl std::error::Error for InvalidMove {}
