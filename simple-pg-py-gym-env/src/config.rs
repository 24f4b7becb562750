//! Configuration of [`GymEnv`](super::GymEnv).
use crate::{GymActFilter, GymObsFilter};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use simple_pg_core::{Act, Obs};
use std::{
    fs::File,
    io::{BufReader, Write},
    marker::PhantomData,
    path::Path,
    time::Duration,
};

/// Configuration of [`GymEnv`](super::GymEnv).
#[derive(Serialize, Deserialize, Debug)]
pub struct GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// The name of the environment, e.g., `CartPole-v1`.
    pub name: String,

    /// Render mode given to `gymnasium.make()`, e.g., `human`.
    pub render_mode: Option<String>,

    /// Wait time after rendering.
    pub wait: Duration,

    /// Episodes are truncated after this number of steps.
    pub max_steps: Option<usize>,

    /// Configuration of the observation filter.
    pub obs_filter_config: Option<OF::Config>,

    /// Configuration of the action filter.
    pub act_filter_config: Option<AF::Config>,

    #[serde(skip)]
    phantom: PhantomData<(O, A)>,
}

impl<O, A, OF, AF> Clone for GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            render_mode: self.render_mode.clone(),
            wait: self.wait,
            max_steps: self.max_steps,
            obs_filter_config: self.obs_filter_config.clone(),
            act_filter_config: self.act_filter_config.clone(),
            phantom: PhantomData,
        }
    }
}

impl<O, A, OF, AF> Default for GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    fn default() -> Self {
        Self {
            name: "CartPole-v1".to_string(),
            render_mode: None,
            wait: Duration::from_millis(0),
            max_steps: None,
            obs_filter_config: Some(OF::default_config()),
            act_filter_config: Some(AF::default_config()),
            phantom: PhantomData,
        }
    }
}

impl<O, A, OF, AF> GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// Sets the name of the environment.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the render mode.
    pub fn render_mode(mut self, render_mode: Option<String>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the observation filter config.
    pub fn obs_filter_config(mut self, v: OF::Config) -> Self {
        self.obs_filter_config = Some(v);
        self
    }

    /// Constructs [`GymEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GymEnvConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
