use crate::error::InvalidMove;
use serde::{Deserialize, Serialize};

/// The most matches a single move may take.
pub const MAX_TAKE: u32 = 4;

/// Period of the robot strategy: positions that are a multiple of this are
/// lost for the side to move.
const PERIOD: u32 = MAX_TAKE + 1;

/// Returns how many matches the robot takes from a pile of `remaining`.
///
/// The robot leaves a multiple of 5 behind whenever it can. When it is
/// already facing one it takes a single match and hopes for a mistake.
pub fn robot_take(remaining: u32) -> u32 {
    match remaining % PERIOD {
        0 => 1,
        take => take,
    }
}

/// The shared pile of matches for a single game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    remaining: u32,
}

impl Pile {
    pub fn new(count: u32) -> Pile {
        Pile { remaining: count }
    }

    /// Resets the pile to `count` matches.
    pub fn initialize(&mut self, count: u32) {
        self.remaining = count;
    }

    /// Removes `taken` matches on behalf of the player.
    ///
    /// Rejects moves outside `1..=MAX_TAKE`, moves on an empty pile and
    /// moves that would take more than is left.
    pub fn apply_player_move(&mut self, taken: u32) -> Result<(), InvalidMove> {
        if !(1..=MAX_TAKE).contains(&taken) {
            return Err(InvalidMove::OutOfRange { taken });
        }
        self.take(taken)?;
        log::debug!("player takes {}, {} left", taken, self.remaining);
        Ok(())
    }

    /// Plays the robot's move and returns how many matches it took.
    pub fn apply_robot_move(&mut self) -> Result<u32, InvalidMove> {
        let taken = robot_take(self.remaining);
        self.take(taken)?;
        log::debug!("robot takes {}, {} left", taken, self.remaining);
        Ok(taken)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_over(&self) -> bool {
        self.remaining == 0
    }

    fn take(&mut self, taken: u32) -> Result<(), InvalidMove> {
        if self.is_over() {
            return Err(InvalidMove::PileEmpty);
        }
        self.remaining = self
            .remaining
            .checked_sub(taken)
            .ok_or(InvalidMove::InsufficientPile {
                taken,
                remaining: self.remaining,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn robot_takes_one_from_a_multiple_of_five() {
        let mut pile = Pile::new(7);
        pile.apply_player_move(2).unwrap();
        assert_eq!(pile.remaining(), 5);
        assert_eq!(pile.apply_robot_move(), Ok(1));
        assert_eq!(pile.remaining(), 4);
    }

    #[test]
    fn robot_takes_one_from_ten() {
        let mut pile = Pile::new(13);
        pile.apply_player_move(3).unwrap();
        assert_eq!(pile.remaining(), 10);
        assert_eq!(pile.apply_robot_move(), Ok(1));
        assert_eq!(pile.remaining(), 9);
    }

    #[test]
    fn player_empties_the_pile_in_one_move() {
        let mut pile = Pile::new(4);
        pile.apply_player_move(4).unwrap();
        assert_eq!(pile.remaining(), 0);
        assert!(pile.is_over());
    }

    #[test]
    fn player_empties_the_pile_after_robot_reply() {
        let mut pile = Pile::new(6);
        pile.apply_player_move(1).unwrap();
        assert_eq!(pile.remaining(), 5);
        assert_eq!(pile.apply_robot_move(), Ok(1));
        assert_eq!(pile.remaining(), 4);
        pile.apply_player_move(4).unwrap();
        assert_eq!(pile.remaining(), 0);
        assert!(pile.is_over());
    }

    // Overdrawing is rejected rather than driving the pile negative.
    #[test]
    fn player_move_larger_than_pile_is_rejected() {
        let mut pile = Pile::new(2);
        assert_eq!(
            pile.apply_player_move(3),
            Err(InvalidMove::InsufficientPile {
                taken: 3,
                remaining: 2
            })
        );
        assert_eq!(pile.remaining(), 2);
    }

    #[test]
    fn player_move_out_of_range_is_rejected() {
        let mut pile = Pile::new(20);
        assert_eq!(
            pile.apply_player_move(0),
            Err(InvalidMove::OutOfRange { taken: 0 })
        );
        assert_eq!(
            pile.apply_player_move(5),
            Err(InvalidMove::OutOfRange { taken: 5 })
        );
        assert_eq!(pile.remaining(), 20);
    }

    #[test]
    fn no_moves_on_an_empty_pile() {
        let mut pile = Pile::new(0);
        assert!(pile.is_over());
        assert_eq!(pile.apply_player_move(1), Err(InvalidMove::PileEmpty));
        assert_eq!(pile.apply_robot_move(), Err(InvalidMove::PileEmpty));
        assert_eq!(pile.remaining(), 0);
    }

    #[test]
    fn initialize_resets_the_pile() {
        let mut pile = Pile::default();
        assert!(pile.is_over());
        pile.initialize(11);
        assert_eq!(pile.remaining(), 11);
        assert!(!pile.is_over());
    }

    proptest! {
        #[test]
        fn initialize_reads_back(count in 0u32..100_000) {
            let mut pile = Pile::default();
            pile.initialize(count);
            prop_assert_eq!(pile.remaining(), count);
            prop_assert_eq!(pile.is_over(), count == 0);
        }

        #[test]
        fn player_move_subtracts(remaining in 1u32..10_000, taken in 1u32..=MAX_TAKE) {
            prop_assume!(taken <= remaining);
            let mut pile = Pile::new(remaining);
            pile.apply_player_move(taken).unwrap();
            prop_assert_eq!(pile.remaining(), remaining - taken);
            prop_assert_eq!(pile.is_over(), pile.remaining() == 0);
        }

        #[test]
        fn robot_move_is_legal_and_deterministic(remaining in 1u32..10_000) {
            let mut first = Pile::new(remaining);
            let mut second = Pile::new(remaining);
            let taken = first.apply_robot_move().unwrap();
            prop_assert!((1..=MAX_TAKE).contains(&taken));
            prop_assert_eq!(Ok(taken), second.apply_robot_move());
            prop_assert_eq!(first.remaining(), remaining - taken);
            prop_assert_eq!(taken, robot_take(remaining));
        }

        #[test]
        fn robot_leaves_a_multiple_of_five_when_it_can(remaining in 1u32..10_000) {
            prop_assume!(remaining % 5 != 0);
            let mut pile = Pile::new(remaining);
            pile.apply_robot_move().unwrap();
            prop_assert_eq!(pile.remaining() % 5, 0);
        }
    }
}
