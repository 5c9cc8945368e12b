use crate::Impartial;
use std::collections::BTreeSet;

/// Cache record for a single game position.
#[derive(Debug, Clone)]
pub(crate) struct Entry<G>
where
    G: Impartial,
{
    pub data: EntryData<G>,
    pub max_nimber: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) enum EntryData<G>
where
    G: Impartial,
{
    /// Seen, but its moves have not been generated yet.
    Stub,
    Processing { data: ProcessingData<G> },
    Done { nimber: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct ProcessingData<G>
where
    G: Impartial,
{
    /// Nimbers already reached by some move, so this position cannot have them.
    impossible_nimbers: BTreeSet<usize>,
    /// Moves whose nimber is still unknown, each given as its reduced parts.
    unprocessed_moves: Vec<Vec<G>>,
}

impl<G> ProcessingData<G>
where
    G: Impartial,
{
    pub fn new(unprocessed_moves: Vec<Vec<G>>) -> ProcessingData<G> {
        ProcessingData {
            impossible_nimbers: BTreeSet::new(),
            unprocessed_moves,
        }
    }

    /// Smallest nimber that no processed move has reached yet (the mex so far).
    fn smallest_possible_nimber(&self) -> usize {
        (0..)
            .find(|n| !self.impossible_nimbers.contains(n))
            .unwrap_or(usize::MAX)
    }
}

impl<G> Entry<G>
where
    G: Impartial,
{
    pub fn new(max_nimber: Option<usize>) -> Entry<G> {
        Entry {
            data: EntryData::Stub,
            max_nimber,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.data, EntryData::Stub)
    }

    pub fn nimber(&self) -> Option<usize> {
        match self.data {
            EntryData::Done { nimber } => Some(nimber),
            _ => None,
        }
    }

    pub fn get_smallest_possible_nimber(&self) -> Option<usize> {
        match &self.data {
            EntryData::Stub => None,
            EntryData::Processing { data } => Some(data.smallest_possible_nimber()),
            EntryData::Done { nimber } => Some(*nimber),
        }
    }

    /// Takes the next move still to be examined.
    /// Returns `None` when the entry is not being processed.
    pub fn pop_unprocessed_move(&mut self) -> Option<Option<Vec<G>>> {
        match &mut self.data {
            EntryData::Processing { data } => Some(data.unprocessed_moves.pop()),
            _ => None,
        }
    }

    pub fn mark_impossible(&mut self, nimber: usize) {
        if let EntryData::Processing { data } = &mut self.data {
            data.impossible_nimbers.insert(nimber);
        }
    }

    pub fn append_unprocessed_moves(&mut self, mut moves: Vec<Vec<G>>) {
        if let EntryData::Processing { data } = &mut self.data {
            data.unprocessed_moves.append(&mut moves);
        }
    }
}
