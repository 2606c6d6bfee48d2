//! Approximate furthest neighbor search.
//!
//! [`DrusillaSelect`] picks a small candidate set from the reference points
//! by projecting them onto a handful of data-dependent directions, then
//! answers k-furthest-neighbor queries by scanning only those candidates.
//!
//! ```
//! use drusilla_select::DrusillaSelect;
//! use ndarray::array;
//!
//! // One point per column.
//! let reference = array![[0.0, 1.0, 0.5, 9.0], [0.0, 0.5, 1.0, 9.0]];
//! let ds = DrusillaSelect::<f64>::from_reference(&reference, 2, 1).unwrap();
//!
//! let results = ds.search(&array![[0.0], [0.0]], 1).unwrap();
//! assert_eq!(results.neighbors[[0, 0]], 3);
//! ```

pub use error::{Error, ErrorKind, Result};
pub use metric::{Euclidean, Metric, Scalar};
pub use params::Params;
pub use searcher::Searcher;
pub use select::{DrusillaSelect, SearchResults, INVALID_INDEX};

pub mod details {
    pub use super::candidates::{Candidate, TopCandidates};
    pub use super::params::{DEFAULT_CANDIDATES_PER_PROJECTION, DEFAULT_PROJECTIONS};
    pub use space::Neighbor;
}

mod candidates;
mod error;
mod metric;
mod params;
mod searcher;
mod select;
#[cfg(feature = "serde")]
mod serde_impl;
