use core::cmp::Ordering;
use std::collections::BinaryHeap;
use std::vec::Vec;

/// Index carried by the sentinels a [`TopCandidates`] is seeded with.
pub(crate) const SENTINEL: usize = !0;

/// A point's score along the current projection line.
#[derive(Copy, Clone, Debug)]
pub struct Candidate<A> {
    pub score: A,
    pub index: usize,
}

impl<A> Candidate<A> {
    fn is_sentinel(&self) -> bool {
        self.index == SENTINEL
    }
}

// The heap is a max-heap over this ordering, so "greater" means "evicted
// sooner": a lower score, and among equal scores the higher index. Sentinels
// carry the highest index, so they leave before any real point.
impl<A: PartialOrd> Ord for Candidate<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl<A: PartialOrd> PartialOrd for Candidate<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: PartialOrd> PartialEq for Candidate<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A: PartialOrd> Eq for Candidate<A> {}

/// Keeps the `m` highest scoring candidates of a single projection round.
///
/// The heap always holds exactly `m` entries. It starts out with `m`
/// sentinels scored at negative infinity and every offered candidate that
/// beats the current minimum replaces it.
#[derive(Clone, Debug)]
pub struct TopCandidates<A> {
    heap: BinaryHeap<Candidate<A>>,
}

impl<A: num_traits::Float> TopCandidates<A> {
    pub fn new(m: usize) -> Self {
        let sentinel = Candidate {
            score: A::neg_infinity(),
            index: SENTINEL,
        };
        Self {
            heap: core::iter::repeat(sentinel).take(m).collect(),
        }
    }

    /// Offers a candidate. NaN scores are treated as negative infinity.
    pub fn offer(&mut self, score: A, index: usize) {
        let score = if score.is_nan() {
            A::neg_infinity()
        } else {
            score
        };
        let accept = match self.heap.peek() {
            Some(worst) => worst.is_sentinel() || score > worst.score,
            None => false,
        };
        if accept {
            self.heap.pop();
            self.heap.push(Candidate { score, index });
        }
    }

    /// Consumes the selection, returning it best first.
    ///
    /// Sentinels only remain if fewer than `m` candidates were offered.
    pub fn into_best_first(self) -> Vec<Candidate<A>> {
        self.heap.into_sorted_vec()
    }
}
