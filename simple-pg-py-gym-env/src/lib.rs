//! A wrapper of [Gymnasium](https://gymnasium.farama.org) environments on Python.
//!
//! [`GymEnv`] drives a Gymnasium environment through [`PyO3`](https://github.com/PyO3/pyo3).
//! Only environments with a continuous (`Box`) observation space and a `Discrete`
//! action space are accepted; [`GymEnv`] fails to build for anything else.
//!
//! ## Observation
//!
//! Observations are created in Python and converted to Rust objects by a
//! [`GymObsFilter`]. [`ArrayObsFilter`] extracts a numpy array as [`ndarray::ArrayD`]
//! and converts it into the observation type `O` with `O: From<ArrayD<T>>`.
//!
//! ## Action
//!
//! Actions are converted to Python objects by a [`GymActFilter`].
//! [`DiscreteActFilter`] passes the index of the action ([`Act::index`]) as a Python integer.
//!
//! [`Act::index`]: simple_pg_core::Act::index
mod act;
mod base;
mod config;
mod obs;
pub mod util;
pub use act::{DiscreteActFilter, DiscreteActFilterConfig};
pub use base::{GymActFilter, GymEnv, GymInfo, GymObsFilter};
pub use config::GymEnvConfig;
pub use obs::{ArrayObsFilter, ArrayObsFilterConfig};
