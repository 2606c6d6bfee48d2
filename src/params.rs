use crate::metric::Euclidean;

/// Number of projection rounds used by [`Params::default`].
pub const DEFAULT_PROJECTIONS: usize = 5;
/// Number of candidates kept per projection used by [`Params::default`].
pub const DEFAULT_CANDIDATES_PER_PROJECTION: usize = 5;

/// Training configuration: the metric plus `l` and `m`.
///
/// `l` is the number of projection rounds and `m` the number of candidates
/// kept from each round, so a trained structure holds `l * m` candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params<Met = Euclidean> {
    pub(crate) metric: Met,
    pub(crate) l: usize,
    pub(crate) m: usize,
}

impl<Met: Default> Default for Params<Met> {
    fn default() -> Self {
        Self::from_metric(Met::default())
    }
}

impl<Met> Params<Met> {
    pub fn from_metric(metric: Met) -> Self {
        Self {
            metric,
            l: DEFAULT_PROJECTIONS,
            m: DEFAULT_CANDIDATES_PER_PROJECTION,
        }
    }

    /// Sets `l`, the number of projection rounds.
    pub fn projections(self, l: usize) -> Self {
        let mut this = self;
        this.l = l;
        this
    }

    /// Sets `m`, the number of candidates kept per projection round.
    pub fn candidates_per_projection(self, m: usize) -> Self {
        let mut this = self;
        this.m = m;
        this
    }

    pub fn metric(&self) -> &Met {
        &self.metric
    }

    pub fn l(&self) -> usize {
        self.l
    }

    pub fn m(&self) -> usize {
        self.m
    }
}
