//! Stub environment, policy and agent used for tests.
//!
//! [`DummyEnv`] plays episodes of a fixed length with a scheduled reward at each
//! step, independently of the actions taken. This makes the contents of
//! collected batches predictable.
use crate::{
    record::{Record, RecordValue},
    Act, Agent, Env, Info, Obs, Policy, Step, TrajectoryBatch,
};
use anyhow::{bail, Result};

/// Dummy observation.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub Vec<f32>);

impl Obs for DummyObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<DummyObs> for Vec<f32> {
    fn from(obs: DummyObs) -> Self {
        obs.0
    }
}

/// Dummy action.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub usize);

impl Act for DummyAct {
    fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for DummyAct {
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

/// Dummy info.
#[derive(Clone, Debug)]
pub struct DummyInfo;

impl Info for DummyInfo {}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Reward at each step of an episode. The length of an episode is the length of this vector.
    pub rewards: Vec<f32>,

    /// Dimension of observations.
    pub obs_dim: usize,
}

impl DummyEnvConfig {
    /// Episodes of `episode_len` steps, each step giving `reward`.
    pub fn constant(episode_len: usize, reward: f32) -> Self {
        Self {
            rewards: vec![reward; episode_len],
            obs_dim: 4,
        }
    }

    /// Sets the dimension of observations.
    pub fn obs_dim(mut self, v: usize) -> Self {
        self.obs_dim = v;
        self
    }
}

/// Dummy env.
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: usize,

    /// The number of calls of [`Env::reset`].
    pub n_resets: usize,

    /// The number of calls of [`Env::render`].
    pub n_renders: usize,
}

impl DummyEnv {
    fn obs(&self) -> DummyObs {
        let len = self.config.rewards.len() as f32;
        let v = (0..self.config.obs_dim)
            .map(|i| match i {
                0 => self.t as f32 / len,
                _ => 1.0 / (i as f32 + 1.0),
            })
            .collect();
        DummyObs(v)
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Act = DummyAct;
    type Obs = DummyObs;
    type Info = DummyInfo;

    /// Fails if no reward is scheduled, i.e., episodes would have no step.
    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        if config.rewards.is_empty() {
            bail!("DummyEnvConfig.rewards must not be empty");
        }

        Ok(Self {
            config: config.clone(),
            t: 0,
            n_resets: 0,
            n_renders: 0,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.t = 0;
        self.n_resets += 1;
        Ok(self.obs())
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let reward = self.config.rewards[self.t];
        self.t += 1;
        let is_terminated = self.t >= self.config.rewards.len();
        let step = Step::new(self.obs(), a.clone(), reward, is_terminated, false, DummyInfo);
        let record = Record::from_slice(&[("reward", RecordValue::Scalar(reward))]);
        Ok((step, record))
    }

    fn render(&mut self) -> Result<()> {
        self.n_renders += 1;
        Ok(())
    }
}

/// A deterministic policy always taking the same action.
pub struct FixedPolicy(pub usize);

impl Policy<DummyEnv> for FixedPolicy {
    fn sample(&mut self, _obs: &DummyObs) -> Result<DummyAct> {
        Ok(DummyAct(self.0))
    }
}

/// An agent with no parameters, counting optimization steps.
///
/// Its loss is the negative mean of the weights in a batch.
#[derive(Default)]
pub struct DummyAgent {
    train: bool,

    /// The number of optimization steps.
    pub n_opts: usize,

    /// The sizes of the batches given to the optimization steps.
    pub batch_sizes: Vec<usize>,
}

impl Policy<DummyEnv> for DummyAgent {
    fn sample(&mut self, _obs: &DummyObs) -> Result<DummyAct> {
        Ok(DummyAct(0))
    }
}

impl Agent<DummyEnv> for DummyAgent {
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt_with_record(&mut self, batch: &TrajectoryBatch<DummyEnv>) -> Result<Record> {
        self.n_opts += 1;
        self.batch_sizes.push(batch.len());
        let loss = -batch.weights.iter().sum::<f32>() / batch.len() as f32;
        Ok(Record::from_scalar("loss", loss))
    }
}
