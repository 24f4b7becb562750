use crate::{util::pyobj_to_arrayd, GymObsFilter};
use anyhow::Result;
use ndarray::ArrayD;
use pyo3::PyObject;
use serde::{Deserialize, Serialize};
use simple_pg_core::{
    record::{Record, RecordValue},
    Obs,
};
use std::marker::PhantomData;

/// Configuration of [`ArrayObsFilter`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ArrayObsFilterConfig {
    /// If `true`, the observation is put in the [`Record`] returned from [`GymObsFilter::filt`].
    #[serde(default)]
    pub record_obs: bool,
}

/// An observation filter converting an array of any numeric dtype.
///
/// Elements are cast to `f32` and the array is converted into `O`
/// with [`From`]`<ArrayD<f32>>`.
pub struct ArrayObsFilter<O> {
    record_obs: bool,
    phantom: PhantomData<O>,
}

impl<O> Default for ArrayObsFilter<O> {
    fn default() -> Self {
        Self {
            record_obs: false,
            phantom: PhantomData,
        }
    }
}

impl<O> GymObsFilter<O> for ArrayObsFilter<O>
where
    O: Obs + From<ArrayD<f32>>,
{
    type Config = ArrayObsFilterConfig;

    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            record_obs: config.record_obs,
            phantom: PhantomData,
        })
    }

    fn filt(&mut self, obs: PyObject) -> Result<(O, Record)> {
        let obs = pyobj_to_arrayd(obs)?;
        let record = match self.record_obs {
            true => {
                let vec = obs.iter().copied().collect();
                Record::from_slice(&[("obs", RecordValue::Array1(vec))])
            }
            false => Record::empty(),
        };
        Ok((obs.into(), record))
    }
}
