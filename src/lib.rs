mod entry;
use dashmap::DashMap;
use entry::Entry;
use std::hash::Hash;
use std::{
    hash::{DefaultHasher, Hasher},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

pub mod analysis;
pub mod error;
pub mod logging;
pub mod pile;
pub mod session;
pub mod subtraction;


pub use error::InvalidMove;
pub use pile::{robot_take, Pile, MAX_TAKE};
pub use session::{RobotReply, Session, Side, Turn};
pub use subtraction::Subtraction;

use crate::entry::{EntryData, ProcessingData};

/// Provides the interface for evaluating an impartial game with the `Evaluator`.
pub trait Impartial: Sized + Clone + Hash + Eq {
    /// Returns the components (subgames) of the game, if it splits into a sum.
    fn get_parts(&self) -> Option<Vec<Self>> {
        None
    }

    /// Returns the maximum nimber this game could have, if known.
    fn get_max_nimber(&self) -> Option<usize> {
        None
    }

    /// Returns the list of successor game states (i.e., possible moves).
    fn get_moves(&self) -> Vec<Self>;
}

/// Evaluates impartial games via memoized recursive computation of nimbers.
///
/// Clones share the same cache and cancellation flag.
#[derive(Debug, Clone)]
pub struct Evaluator<G>
where
    G: Impartial,
{
    cache: Arc<DashMap<G, Entry<G>>>,
    cancel_flag: Arc<AtomicBool>,
}

impl<G> Default for Evaluator<G>
where
    G: Impartial,
{
    fn default() -> Self {
        Evaluator::new()
    }
}

impl<G> Evaluator<G>
where
    G: Impartial,
{
    /// Constructs a new, empty evaluator.
    pub fn new() -> Evaluator<G> {
        Evaluator {
            cache: Arc::new(DashMap::new()),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns all positions whose nimber is fully known.
    pub fn get_nimbers(&self) -> Vec<(G, usize)> {
        self.cache
            .iter()
            .filter_map(|e| Some((e.key().clone(), e.nimber()?)))
            .collect()
    }

    /// Returns the number of entries stored in the evaluator cache.
    pub fn get_cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Returns a handle to the evaluator's cancellation flag.
    /// Can be set externally to abort ongoing computation.
    pub fn get_cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel_flag.clone()
    }

    /// Computes the nimber of the given game.
    /// Returns `None` if cancelled mid-computation.
    pub fn get_nimber(&self, g: &G) -> Option<usize> {
        self.get_bounded_nimber(g, usize::MAX)
    }

    /// Computes the nimber of a game, but aborts early if it can be proven
    /// that the nimber exceeds the provided upper bound.
    pub fn get_bounded_nimber(&self, g: &G, bound: usize) -> Option<usize> {
        let parts = g.get_parts().unwrap_or_else(|| vec![g.clone()]);
        self.get_bounded_nimber_by_parts(&remove_pairs(parts), bound)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Computes the nimber of a specific game part with an upper bound.
    /// Returns `None` if cancelled or if nimber exceeds the bound.
    fn get_bounded_nimber_of_part(&self, part: &G, bound: usize) -> Option<usize> {
        let known = self
            .cache
            .entry(part.clone())
            .or_insert_with(|| Entry::new(part.get_max_nimber()))
            .nimber();
        if let Some(nimber) = known {
            return Some(nimber);
        }

        self.destub(part);

        loop {
            if self.is_cancelled() {
                return None;
            }

            let nimber = self.cache.get(part)?.get_smallest_possible_nimber()?;

            if nimber > bound {
                return None;
            }

            if !self.try_rule_out_nimber(part, nimber)? {
                if let Some(mut entry) = self.cache.get_mut(part) {
                    entry.data = EntryData::Done { nimber };
                }
                return Some(nimber);
            }
        }
    }

    /// Attempts to prove that the given `nimber` cannot be the nimber of `game`.
    /// Returns `Some(true)` if it was successfully ruled out,
    /// `Some(false)` if the `nimber` is actually valid,
    /// and `None` if cancelled before a conclusion.
    fn try_rule_out_nimber(&self, game: &G, nimber: usize) -> Option<bool> {
        let max_nimber = self.cache.get(game)?.max_nimber;
        if max_nimber.is_some_and(|max| max < nimber) {
            return Some(false);
        }

        let mut still_unprocessed_moves = vec![];
        let mut ruled_out_nimber = false;

        while !self.is_cancelled() {
            let parts_opt = self.cache.get_mut(game)?.pop_unprocessed_move()?;

            let Some(parts) = parts_opt else { break };

            match self.get_bounded_nimber_by_parts(&parts, nimber) {
                Some(move_nimber) => {
                    self.cache.get_mut(game)?.mark_impossible(move_nimber);
                    if nimber == move_nimber {
                        ruled_out_nimber = true;
                        break;
                    }
                }
                None => {
                    still_unprocessed_moves.push(parts);
                }
            }
        }

        self.cache
            .get_mut(game)?
            .append_unprocessed_moves(still_unprocessed_moves);

        // an interrupted scan proves nothing
        if self.is_cancelled() {
            return None;
        }
        Some(ruled_out_nimber)
    }

    /// Computes the nimber of a sum of game parts under a bound.
    ///
    /// The result is computed as the XOR of the nimbers of each part,
    /// stopping early if it becomes clear the nimber would exceed the bound.
    fn get_bounded_nimber_by_parts(&self, parts: &[G], bound: usize) -> Option<usize> {
        let Some((last, rest)) = parts.split_last() else {
            return Some(0);
        };
        let mut modifier = 0;
        for part in rest {
            modifier ^= self.get_bounded_nimber_of_part(part, usize::MAX)?;
        }
        // The bound is adjusted with `| modifier` to ensure that the final XOR result
        // isn't incorrectly pruned: if any intermediate nimber exceeds the original bound,
        // but the XOR still stays within it, we don't want a false early exit.
        let nimber = modifier ^ self.get_bounded_nimber_of_part(last, bound | modifier)?;
        if nimber > bound {
            return None;
        }
        Some(nimber)
    }

    /// Initializes the move list for a game that is still a stub.
    ///
    /// For each move, the resulting game parts are reduced by canceling out
    /// symmetric pairs (since they XOR to 0).
    fn destub(&self, game: &G) {
        let is_stub = self.cache.get(game).is_some_and(|entry| entry.is_stub());
        if !is_stub {
            return;
        }

        let mut moves = game.get_moves();
        moves.sort_unstable_by_key(hash_of);
        moves.dedup();

        let unprocessed_moves: Vec<Vec<G>> = moves
            .into_iter()
            .map(|_move| match _move.get_parts() {
                Some(parts) => remove_pairs(parts),
                None => vec![_move],
            })
            .collect();

        if let Some(mut entry) = self.cache.get_mut(game) {
            entry.data = EntryData::Processing {
                data: ProcessingData::new(unprocessed_moves),
            };
        }
    }
}

fn hash_of<G: Hash>(g: &G) -> u64 {
    let mut hasher = DefaultHasher::new();
    g.hash(&mut hasher);
    hasher.finish()
}

/// Removes pairs of equal elements from a list of parts.
/// Used to cancel out symmetric subgames when computing nimbers.
fn remove_pairs<G>(mut vec: Vec<G>) -> Vec<G>
where
    G: Impartial,
{
    vec.sort_by_cached_key(hash_of);

    let mut read = 0;
    let mut write = 0;

    while read + 1 < vec.len() {
        if vec[read] == vec[read + 1] {
            read += 2;
        } else {
            vec.swap(read, write);
            read += 1;
            write += 1;
        }
    }
    if read < vec.len() {
        vec.swap(read, write);
        write += 1;
    }
    vec.truncate(write);
    vec
}
