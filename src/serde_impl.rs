use crate::metric::Scalar;
use crate::params::Params;
use crate::select::DrusillaSelect;
use ndarray::Array2;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::vec::Vec;

// Only the selection is persisted. The metric is rebuilt from `Default`.
impl<A, Met> Serialize for DrusillaSelect<A, Met>
where
    A: Scalar + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DrusillaSelect", 4)?;
        state.serialize_field("candidate_set", &self.candidate_set())?;
        state.serialize_field("candidate_indices", self.candidate_indices())?;
        state.serialize_field("l", &self.l())?;
        state.serialize_field("m", &self.m())?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "DrusillaSelect")]
struct State<A> {
    candidate_set: Array2<A>,
    candidate_indices: Vec<usize>,
    l: usize,
    m: usize,
}

impl<'de, A, Met> Deserialize<'de> for DrusillaSelect<A, Met>
where
    A: Scalar + Deserialize<'de>,
    Met: Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let State {
            candidate_set,
            candidate_indices,
            l,
            m,
        } = State::deserialize(deserializer)?;

        if l == 0 || m == 0 {
            return Err(de::Error::custom("l and m must be greater than 0"));
        }
        if candidate_indices.len() != candidate_set.ncols() {
            return Err(de::Error::invalid_length(
                candidate_indices.len(),
                &"one candidate index per candidate column",
            ));
        }
        if candidate_set.ncols() != 0 && Some(candidate_set.ncols()) != l.checked_mul(m) {
            return Err(de::Error::custom(format_args!(
                "candidate set has {} columns but l * m = {} * {}",
                candidate_set.ncols(),
                l,
                m
            )));
        }

        let params = Params::default()
            .projections(l)
            .candidates_per_projection(m);
        Ok(DrusillaSelect::from_parts(
            candidate_set,
            candidate_indices,
            params,
        ))
    }
}
