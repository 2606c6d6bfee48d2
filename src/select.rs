use crate::candidates::{TopCandidates, SENTINEL};
use crate::error::{Error, Result};
use crate::metric::{norm, Euclidean, Metric, Scalar};
use crate::params::Params;
use crate::searcher::Searcher;
use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};
use num_traits::Zero;
use space::Neighbor;

/// Index reported in result slots that no candidate filled.
pub const INVALID_INDEX: usize = !0;

type Unit<A, Met> = <Met as Metric<A>>::Unit;

/// The output of [`DrusillaSelect::search`].
///
/// Both matrices are `k × q`: column `i` holds the results for query `i`,
/// furthest neighbor first.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResults<Unit> {
    /// Indices into the reference set the structure was trained on.
    pub neighbors: Array2<usize>,
    pub distances: Array2<Unit>,
}

/// Approximate furthest neighbor search over a small candidate set.
///
/// Training projects the reference set onto `l` data-dependent directions and
/// keeps the `m` points along each direction most likely to be somebody's
/// furthest neighbor. Queries then scan those `l * m` candidates exhaustively.
///
/// `train` takes `&mut self` and `search` takes `&self`, so a trained
/// structure can be shared between threads for searching.
#[derive(Clone, Debug)]
pub struct DrusillaSelect<A = f64, Met = Euclidean> {
    /// `d × (l * m)` matrix of candidate points, empty before training.
    candidate_set: Array2<A>,
    /// The reference index of every candidate column.
    candidate_indices: Vec<usize>,
    params: Params<Met>,
}

impl<A: Scalar, Met: Default> DrusillaSelect<A, Met> {
    /// Creates an untrained structure that will select `l * m` candidates.
    pub fn new(l: usize, m: usize) -> Result<Self> {
        Self::with_params(
            Params::default()
                .projections(l)
                .candidates_per_projection(m),
        )
    }

    /// Creates a structure and trains it on `reference` (one point per column).
    pub fn from_reference<S>(reference: &ArrayBase<S, Ix2>, l: usize, m: usize) -> Result<Self>
    where
        S: Data<Elem = A>,
    {
        let mut this = Self::new(l, m)?;
        this.train(reference, 0, 0)?;
        Ok(this)
    }
}

impl<A: Scalar, Met> DrusillaSelect<A, Met> {
    /// Creates an untrained structure with the specified params.
    pub fn with_params(params: Params<Met>) -> Result<Self> {
        if params.l == 0 {
            return Err(Error::ZeroParameter { name: "l" });
        }
        if params.m == 0 {
            return Err(Error::ZeroParameter { name: "m" });
        }
        Ok(Self::from_parts(Array2::zeros((0, 0)), vec![], params))
    }

    pub(crate) fn from_parts(
        candidate_set: Array2<A>,
        candidate_indices: Vec<usize>,
        params: Params<Met>,
    ) -> Self {
        Self {
            candidate_set,
            candidate_indices,
            params,
        }
    }

    pub fn params(&self) -> &Params<Met> {
        &self.params
    }

    pub fn l(&self) -> usize {
        self.params.l
    }

    pub fn m(&self) -> usize {
        self.params.m
    }

    pub fn is_trained(&self) -> bool {
        self.candidate_set.ncols() != 0
    }

    /// The selected candidate points, one per column.
    pub fn candidate_set(&self) -> ArrayView2<'_, A> {
        self.candidate_set.view()
    }

    /// The reference index of each column of [`DrusillaSelect::candidate_set`].
    pub fn candidate_indices(&self) -> &[usize] {
        &self.candidate_indices
    }

    /// Selects a new candidate set from `reference`, one point per column.
    ///
    /// Passing `0` for `l` or `m` keeps the currently stored value. All prior
    /// candidates are discarded. On error nothing is changed.
    pub fn train<S>(&mut self, reference: &ArrayBase<S, Ix2>, l: usize, m: usize) -> Result<()>
    where
        S: Data<Elem = A>,
    {
        let (l, m, mean) = self.resolve(reference.view(), l, m)?;
        self.fit(reference.view(), mean, l, m);
        Ok(())
    }

    /// Same as [`DrusillaSelect::train`], but takes the reference set out of
    /// `reference` instead of borrowing it.
    ///
    /// On success `reference` is left with zero columns. On error it is
    /// untouched.
    pub fn train_owned(&mut self, reference: &mut Array2<A>, l: usize, m: usize) -> Result<()> {
        let (l, m, mean) = self.resolve(reference.view(), l, m)?;
        let dimension = reference.nrows();
        let reference = std::mem::replace(reference, Array2::zeros((dimension, 0)));
        self.fit(reference.view(), mean, l, m);
        Ok(())
    }

    /// Applies the `0` means "keep" rule to `l` and `m`, checks them against
    /// the reference set and returns them with its centroid.
    fn resolve(
        &self,
        reference: ArrayView2<'_, A>,
        l: usize,
        m: usize,
    ) -> Result<(usize, usize, Array1<A>)> {
        let l = if l > 0 { l } else { self.params.l };
        let m = if m > 0 { m } else { self.params.m };

        // `l * m >= 1`, so an empty reference (no centroid) is also too small.
        let requested = l.saturating_mul(m);
        let available = reference.ncols();
        let mean = match reference.mean_axis(Axis(1)) {
            Some(mean) if requested <= available => mean,
            _ => {
                return Err(Error::TooManyCandidates {
                    requested,
                    available,
                })
            }
        };
        if let Some(column) = reference
            .columns()
            .into_iter()
            .position(|point| point.iter().any(|x| !x.is_finite()))
        {
            return Err(Error::NonFinite { column });
        }
        Ok((l, m, mean))
    }

    fn fit(&mut self, reference: ArrayView2<'_, A>, mean: Array1<A>, l: usize, m: usize) {
        let (dimension, len) = reference.dim();
        debug!(
            "selecting {} candidates from {} points of dimension {} (l = {}, m = {})",
            l * m,
            len,
            dimension,
            l,
            m
        );

        let centered = &reference - &mean.view().insert_axis(Axis(1));

        // The centroid is subtracted a second time here. Pivot order depends
        // on it.
        let mut norms: Array1<A> = centered
            .columns()
            .into_iter()
            .map(|point| norm((&point - &mean).view()))
            .collect();

        let mut candidate_set = Array2::zeros((dimension, l * m));
        let mut candidate_indices = vec![SENTINEL; l * m];
        let mut offsets = Array1::zeros(len);
        let mut distortions = Array1::zeros(len);
        let mut selected = vec![false; len];

        for round in 0..l {
            let pivot = argmax(norms.view());
            let pivot_point = centered.column(pivot);
            let pivot_norm = norm(pivot_point);
            let line = if pivot_norm > A::zero() {
                pivot_point.mapv(|x| x / pivot_norm)
            } else {
                Array1::zeros(dimension)
            };

            let mut top = TopCandidates::new(m);
            for ix in 0..len {
                let (offset, distortion) = if norms[ix] > A::zero() {
                    let point = centered.column(ix);
                    let offset = point.dot(&line);
                    (offset, residual_norm(point, line.view(), offset))
                } else {
                    (A::zero(), A::zero())
                };
                offsets[ix] = offset;
                distortions[ix] = distortion;
                if !selected[ix] {
                    top.offer(offset.abs() - distortion.abs(), ix);
                }
            }

            // At least len - round * m >= m points were offered, so no
            // sentinel survives.
            for (slot, candidate) in top.into_best_first().into_iter().enumerate() {
                let column = round * m + slot;
                candidate_set
                    .column_mut(column)
                    .assign(&reference.column(candidate.index));
                candidate_indices[column] = candidate.index;
                norms[candidate.index] = A::zero();
                selected[candidate.index] = true;
            }

            let mut excluded = 0;
            for ix in 0..len {
                if is_far(offsets[ix], distortions[ix]) && norms[ix] > A::zero() {
                    norms[ix] = A::zero();
                    excluded += 1;
                }
            }
            trace!(
                "round {}: pivot {}, excluded {} points from later rounds",
                round,
                pivot,
                excluded
            );
        }

        self.candidate_set = candidate_set;
        self.candidate_indices = candidate_indices;
        self.params.l = l;
        self.params.m = m;
    }
}

impl<A: Scalar, Met: Metric<A>> DrusillaSelect<A, Met> {
    /// Finds the `k` approximate furthest neighbors of every query (one per
    /// column).
    pub fn search<S>(&self, queries: &ArrayBase<S, Ix2>, k: usize) -> Result<SearchResults<Unit<A, Met>>>
    where
        S: Data<Elem = A>,
    {
        self.check_query(queries.nrows(), k)?;

        let mut neighbors = Array2::from_elem((k, queries.ncols()), INVALID_INDEX);
        let mut distances = Array2::from_elem((k, queries.ncols()), <Unit<A, Met> as Zero>::zero());
        let mut searcher = Searcher::new();
        for (query_ix, query) in queries.columns().into_iter().enumerate() {
            let furthest = self.scan(query, k, &mut searcher);
            for (slot, neighbor) in furthest.iter().enumerate() {
                neighbors[[slot, query_ix]] = neighbor.index;
                distances[[slot, query_ix]] = neighbor.distance;
            }
        }
        debug!(
            "searched {} queries against {} candidates (k = {})",
            queries.ncols(),
            self.candidate_set.ncols(),
            k
        );

        Ok(SearchResults {
            neighbors,
            distances,
        })
    }

    /// Finds the `k` approximate furthest neighbors of a single `query`.
    ///
    /// Returns the filled part of `searcher`, furthest first, with indices
    /// into the reference set.
    pub fn furthest<'s, S>(
        &self,
        query: &ArrayBase<S, Ix1>,
        k: usize,
        searcher: &'s mut Searcher<Unit<A, Met>>,
    ) -> Result<&'s [Neighbor<Unit<A, Met>>]>
    where
        S: Data<Elem = A>,
    {
        self.check_query(query.len(), k)?;
        Ok(self.scan(query.view(), k, searcher))
    }

    fn check_query(&self, dimension: usize, k: usize) -> Result<()> {
        if !self.is_trained() {
            return Err(Error::NotTrained);
        }
        let candidates = self.params.l * self.params.m;
        if k > candidates {
            return Err(Error::TooManyNeighbors { k, candidates });
        }
        if dimension != self.candidate_set.nrows() {
            return Err(Error::DimensionMismatch {
                expected: self.candidate_set.nrows(),
                found: dimension,
            });
        }
        Ok(())
    }

    fn scan<'s>(
        &self,
        query: ArrayView1<'_, A>,
        k: usize,
        searcher: &'s mut Searcher<Unit<A, Met>>,
    ) -> &'s [Neighbor<Unit<A, Met>>] {
        searcher.clear();
        for (index, point) in self.candidate_set.columns().into_iter().enumerate() {
            let distance = self.params.metric.distance(query, point);
            searcher.insert(Neighbor { index, distance }, k);
        }
        // Candidate columns to reference indices.
        for neighbor in &mut searcher.furthest {
            neighbor.index = self.candidate_indices[neighbor.index];
        }
        &searcher.furthest
    }
}

/// First index of the largest value.
fn argmax<A: Scalar>(values: ArrayView1<'_, A>) -> usize {
    let mut best = 0;
    for (ix, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = ix;
        }
    }
    best
}

/// Distance from `point` to its projection onto the unit vector `line`.
fn residual_norm<A: Scalar>(point: ArrayView1<'_, A>, line: ArrayView1<'_, A>, offset: A) -> A {
    point
        .iter()
        .zip(line.iter())
        .fold(A::zero(), |acc, (&p, &u)| {
            let residual = p - offset * u;
            acc + residual * residual
        })
        .sqrt()
}

/// Whether a point is at least π/8 away from the projection line. A point with
/// no offset along the line counts as far.
fn is_far<A: Scalar>(offset: A, distortion: A) -> bool {
    let offset = offset.abs();
    offset == A::zero() || (distortion / offset).atan() >= A::FRAC_PI_8()
}
