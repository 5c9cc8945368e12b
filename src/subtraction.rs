use crate::pile::MAX_TAKE;
use crate::Impartial;
use serde::{Deserialize, Serialize};

/// A single pile of matches seen as an impartial game: a move removes
/// between 1 and `MAX_TAKE` matches.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Subtraction {
    pub matches: usize,
}

impl Subtraction {
    pub fn new(matches: usize) -> Subtraction {
        Subtraction { matches }
    }
}

impl Impartial for Subtraction {
    fn get_max_nimber(&self) -> Option<usize> {
        // mex over at most MAX_TAKE successors
        Some(self.matches.min(MAX_TAKE as usize))
    }

    fn get_moves(&self) -> Vec<Subtraction> {
        // i corresponds to the number of matches to remove
        (1..=self.matches.min(MAX_TAKE as usize))
            .map(|i| Subtraction::new(self.matches - i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Evaluator;

    #[test]
    fn moves_never_overdraw() {
        assert_eq!(Subtraction::new(0).get_moves(), vec![]);
        assert_eq!(
            Subtraction::new(2).get_moves(),
            vec![Subtraction::new(1), Subtraction::new(0)]
        );
        assert_eq!(Subtraction::new(9).get_moves().len(), 4);
    }

    #[test]
    fn nimbers_repeat_every_five() {
        let eval = Evaluator::new();
        for matches in 0..200 {
            assert_eq!(
                eval.get_nimber(&Subtraction::new(matches)),
                Some(matches % 5)
            );
        }
    }
}
