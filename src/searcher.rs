use space::Neighbor;
use std::{vec, vec::Vec};

/// Contains all the state used when scanning the candidate set for one query.
///
/// Reusing a `Searcher` across queries avoids reallocating the result list.
#[derive(Clone, Debug)]
pub struct Searcher<Unit> {
    /// The furthest candidates seen so far, furthest first.
    pub(super) furthest: Vec<Neighbor<Unit>>,
}

impl<Unit> Searcher<Unit> {
    pub fn new() -> Self {
        Default::default()
    }

    pub(super) fn clear(&mut self) {
        self.furthest.clear();
    }
}

impl<Unit: PartialOrd> Searcher<Unit> {
    /// Offers a candidate to the running top-`cap` furthest list.
    ///
    /// A candidate equal to the current worst of a full list is rejected, so
    /// the earlier one wins ties. NaN distances always rank last.
    pub(super) fn insert(&mut self, candidate: Neighbor<Unit>, cap: usize) {
        let pos = self
            .furthest
            .partition_point(|n| !outranks(&candidate.distance, &n.distance));
        if pos != cap {
            if self.furthest.len() == cap {
                self.furthest.pop();
            }
            self.furthest.insert(pos, candidate);
        }
    }
}

fn outranks<Unit: PartialOrd>(a: &Unit, b: &Unit) -> bool {
    let is_nan = |x: &Unit| x.partial_cmp(x).is_none();
    a > b || (is_nan(b) && !is_nan(a))
}

impl<Unit> Default for Searcher<Unit> {
    fn default() -> Self {
        Self { furthest: vec![] }
    }
}
