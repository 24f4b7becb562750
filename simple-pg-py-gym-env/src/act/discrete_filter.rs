use crate::GymActFilter;
use anyhow::Result;
use pyo3::{IntoPy, PyObject};
use serde::{Deserialize, Serialize};
use simple_pg_core::{
    record::{Record, RecordValue},
    Act,
};
use std::marker::PhantomData;

/// Configuration of [`DiscreteActFilter`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DiscreteActFilterConfig {}

/// Converts a discrete action into a Python integer.
#[derive(Clone, Debug)]
pub struct DiscreteActFilter<A> {
    phantom: PhantomData<A>,
}

impl<A> Default for DiscreteActFilter<A> {
    fn default() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<A: Act> GymActFilter<A> for DiscreteActFilter<A> {
    type Config = DiscreteActFilterConfig;

    fn build(_config: &Self::Config) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self::default())
    }

    fn filt(&mut self, act: A) -> Result<(PyObject, Record)> {
        let ix = act.index();
        let record = Record::from_slice(&[("act", RecordValue::Scalar(ix as f32))]);
        let act = pyo3::Python::with_gil(|py| ix.into_py(py));
        Ok((act, record))
    }
}
