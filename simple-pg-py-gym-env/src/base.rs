//! Wrapper of Gymnasium environments implemented in Python.
use crate::GymEnvConfig;
use anyhow::{Context, Result};
use log::{info, trace};
use pyo3::{
    types::{IntoPyDict, PyTuple},
    PyAny, PyObject, Python, ToPyObject,
};
use serde::{de::DeserializeOwned, Serialize};
use simple_pg_core::{error::PgError, record::Record, Act, Env, Info, Obs, Step};
use std::{marker::PhantomData, time::Duration};

/// Information given at every step of the interaction with the environment.
///
/// Currently, it is empty and used to match the type signature.
pub struct GymInfo {}

impl Info for GymInfo {}

/// Converts [`PyObject`] to [`GymEnv`]`::Obs`.
pub trait GymObsFilter<O: Obs> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Build filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts PyObject into an observation.
    fn filt(&mut self, obs: PyObject) -> Result<(O, Record)>;

    /// Called when resetting the environment.
    ///
    /// This method is useful for stateful filters.
    fn reset(&mut self, obs: PyObject) -> Result<O> {
        let (obs, _) = self.filt(obs)?;
        Ok(obs)
    }

    /// Returns default configuration.
    fn default_config() -> Self::Config {
        Self::Config::default()
    }
}

/// Converts [`GymEnv`]`::Act` to [`PyObject`].
pub trait GymActFilter<A: Act> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Build filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts an action into PyObject.
    fn filt(&mut self, act: A) -> Result<(PyObject, Record)>;

    /// Called when resetting the environment.
    fn reset(&mut self) {}

    /// Returns default configuration.
    fn default_config() -> Self::Config {
        Self::Config::default()
    }
}

// `isinstance(obj, gymnasium.spaces.<class_name>)`
fn is_space(py: Python, obj: &PyAny, class_name: &str) -> Result<bool> {
    let spaces = py.import("gymnasium.spaces")?;
    let class = spaces.getattr(class_name)?;
    let builtins = py.import("builtins")?;
    Ok(builtins
        .getattr("isinstance")?
        .call1((obj, class))?
        .extract()?)
}

/// An environment in [Gymnasium](https://gymnasium.farama.org).
///
/// The observation space must be `Box` and the action space must be `Discrete`.
pub struct GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    env: PyObject,

    render_mode: Option<String>,

    // Dimension of observation vectors.
    obs_dim: usize,

    // The number of actions.
    n_actions: usize,

    count_steps: usize,

    max_steps: Option<usize>,

    obs_filter: OF,

    act_filter: AF,

    wait: Duration,

    /// Initial seed.
    ///
    /// This value will be used at the first call of the reset method.
    initial_seed: Option<i64>,

    phantom: PhantomData<(O, A)>,
}

impl<O, A, OF, AF> GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// Dimension of observation vectors, `observation_space.shape[0]`.
    pub fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    /// The number of actions, `action_space.n`.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }
}

impl<O, A, OF, AF> Env for GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    type Obs = O;
    type Act = A;
    type Info = GymInfo;
    type Config = GymEnvConfig<O, A, OF, AF>;

    /// Constructs [`GymEnv`] with `gymnasium.make()`.
    ///
    /// * `seed` - The seed value of the random number generator.
    ///   This value will be used at the first call of the reset method.
    ///
    /// Fails with [`PgError::UnsupportedObservationSpace`] or
    /// [`PgError::UnsupportedActionSpace`] if the spaces are not `Box` and `Discrete`.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Python::with_gil(|py| -> Result<Self> {
            // sys.argv is used by pyglet library, which is responsible for rendering.
            // Depending on the python interpreter, however, sys.argv can be empty.
            let locals = [("sys", py.import("sys")?)].into_py_dict(py);
            let _ = py.eval("sys.argv.insert(0, 'simple_pg')", None, Some(locals))?;
            let ver = py.eval("sys.version", None, Some(locals))?;
            info!("Initialize GymEnv {}", config.name);
            info!("Python version = {}", ver);

            let gym = py.import("gymnasium")?;
            let kwargs = config
                .render_mode
                .clone()
                .map(|mode| vec![("render_mode", mode)].into_py_dict(py));
            let env = gym
                .getattr("make")?
                .call((config.name.as_str(),), kwargs)?;

            let observation_space = env.getattr("observation_space")?;
            if !is_space(py, observation_space, "Box")? {
                let space = observation_space.to_string();
                return Err(PgError::UnsupportedObservationSpace(space).into());
            }
            let action_space = env.getattr("action_space")?;
            if !is_space(py, action_space, "Discrete")? {
                let space = action_space.to_string();
                return Err(PgError::UnsupportedActionSpace(space).into());
            }
            info!("Observation space = {}", observation_space);
            info!("Action space = {}", action_space);

            let shape: Vec<usize> = observation_space.getattr("shape")?.extract()?;
            let obs_dim = shape.iter().product();
            let n_actions = action_space.getattr("n")?.extract()?;

            let obs_filter_config = config
                .obs_filter_config
                .as_ref()
                .context("obs_filter_config is not set.")?;
            let act_filter_config = config
                .act_filter_config
                .as_ref()
                .context("act_filter_config is not set.")?;

            Ok(GymEnv {
                env: env.into(),
                render_mode: config.render_mode.clone(),
                obs_dim,
                n_actions,
                count_steps: 0,
                max_steps: config.max_steps,
                obs_filter: OF::build(obs_filter_config)?,
                act_filter: AF::build(act_filter_config)?,
                wait: config.wait,
                initial_seed: Some(seed),
                phantom: PhantomData,
            })
        })
    }

    /// Resets the environment and returns an observation.
    ///
    /// The seed given to [`GymEnv::build`] is passed to `env.reset()` the first time.
    fn reset(&mut self) -> Result<O> {
        trace!("GymEnv::reset()");
        self.act_filter.reset();
        self.count_steps = 0;

        Python::with_gil(|py| -> Result<O> {
            let ret = match self.initial_seed.take() {
                Some(seed) => {
                    let kwargs = vec![("seed", seed)].into_py_dict(py);
                    self.env.call_method(py, "reset", (), Some(kwargs))?
                }
                None => self.env.call_method0(py, "reset")?,
            };
            let ret: &PyTuple = ret.extract(py)?;
            let obs = ret.get_item(0).to_object(py);
            self.obs_filter.reset(obs)
        })
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// The returned [`Record`] merges the records of the observation and action filters.
    fn step(&mut self, a: &A) -> Result<(Step<Self>, Record)> {
        trace!("GymEnv::step()");

        Python::with_gil(|py| -> Result<(Step<Self>, Record)> {
            let (a_py, record_a) = self.act_filter.filt(a.clone())?;
            let ret = self.env.call_method(py, "step", (a_py,), None)?;
            let step: &PyTuple = ret.extract(py)?;
            let (obs, record_o) = self.obs_filter.filt(step.get_item(0).to_object(py))?;
            let reward: f32 = step.get_item(1).extract()?;
            let is_terminated: bool = step.get_item(2).extract()?;
            let mut is_truncated: bool = step.get_item(3).extract()?;

            self.count_steps += 1;
            if let Some(max_steps) = self.max_steps {
                if self.count_steps >= max_steps {
                    is_truncated = true;
                }
            }

            let step = Step::new(
                obs,
                a.clone(),
                reward,
                is_terminated,
                is_truncated,
                GymInfo {},
            );
            Ok((step, record_o.merge(record_a)))
        })
    }

    /// Calls `env.render()` if a render mode is given in the configuration.
    fn render(&mut self) -> Result<()> {
        if self.render_mode.is_none() {
            return Ok(());
        }

        Python::with_gil(|py| -> Result<()> {
            self.env.call_method0(py, "render")?;
            Ok(())
        })?;
        std::thread::sleep(self.wait);
        Ok(())
    }
}
