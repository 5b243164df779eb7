use std::collections::BTreeSet;

/// Barrier over the decodes of one face snapshot.
///
/// `members` is the face's full entry set at rebuild time, ascending. The batch becomes ready
/// only once every member has a decode outcome, success or failure.
#[derive(Clone, Debug)]
pub(crate) struct Batch {
    generation: u64,
    members: Vec<u64>,
    awaiting: BTreeSet<u64>,
}

impl Batch {
    pub(crate) fn new(generation: u64, members: Vec<u64>) -> Self {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        let awaiting = members.iter().copied().collect();
        Self {
            generation,
            members,
            awaiting,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn members(&self) -> &[u64] {
        &self.members
    }

    /// Mark `index` resolved; returns `false` if it was not awaited.
    pub(crate) fn resolve(&mut self, index: u64) -> bool {
        self.awaiting.remove(&index)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.awaiting.len()
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.awaiting.is_empty()
    }
}
