use ndarray::{ArrayView1, NdFloat};
use num_traits::{FloatConst, FromPrimitive, Zero};

/// Floating point element type usable for reference and query points.
pub trait Scalar: NdFloat + FloatConst + FromPrimitive {}

impl<A> Scalar for A where A: NdFloat + FloatConst + FromPrimitive {}

/// A distance between a query point and a candidate point.
///
/// Furthest neighbor search assumes the metric is symmetric and satisfies the
/// triangle inequality, but this is never checked.
pub trait Metric<A> {
    type Unit: Copy + PartialOrd + Zero;
    fn distance(&self, query: ArrayView1<'_, A>, point: ArrayView1<'_, A>) -> Self::Unit;
}

/// Euclidean (L2) distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl<A: Scalar> Metric<A> for Euclidean {
    type Unit = A;

    fn distance(&self, query: ArrayView1<'_, A>, point: ArrayView1<'_, A>) -> A {
        query
            .iter()
            .zip(point.iter())
            .fold(A::zero(), |acc, (&q, &p)| {
                let diff = q - p;
                acc + diff * diff
            })
            .sqrt()
    }
}

/// Length of a vector.
pub(crate) fn norm<A: Scalar>(v: ArrayView1<'_, A>) -> A {
    v.dot(&v).sqrt()
}
