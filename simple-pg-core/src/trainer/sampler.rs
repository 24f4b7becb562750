//! Collection of trajectory batches.
//!
//! [`BatchSampler`] runs a policy in an environment and packs the visited
//! observations and the taken actions into a [`TrajectoryBatch`]. A batch
//! always consists of whole episodes: collection stops at the first episode
//! boundary at which the number of collected steps exceeds the minimum batch size.
use crate::{Env, Policy, TrajectoryBatch};
use anyhow::Result;
use log::{info, trace};

/// Collects batches of whole episodes from an environment.
pub struct BatchSampler<E: Env> {
    /// The environment being sampled from.
    env: E,

    /// Minimum number of steps in a batch.
    batch_size: usize,

    /// If `true`, the first episode of every batch is rendered.
    render: bool,
}

impl<E: Env> BatchSampler<E> {
    /// Creates a new sampler with the given environment.
    pub fn new(env: E, batch_size: usize) -> Self {
        Self {
            env,
            batch_size,
            render: false,
        }
    }

    /// Enables rendering of the first episode of every batch.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Returns a reference to the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Collects a batch with the given policy.
    ///
    /// The return of each episode is assigned as the weight of all of its steps.
    pub fn sample_batch<P: Policy<E>>(&mut self, policy: &mut P) -> Result<TrajectoryBatch<E>> {
        let mut batch = TrajectoryBatch::with_capacity(self.batch_size + 1);
        let mut ep_rews = vec![];
        let mut obs = self.env.reset()?;
        let mut finished_rendering = false;

        loop {
            if self.render && !finished_rendering {
                self.env.render()?;
            }

            let act = policy.sample(&obs)?;
            let (step, _) = self.env.step(&act)?;
            trace!("reward = {}", step.reward);
            batch.push(obs, act);
            ep_rews.push(step.reward);

            if step.is_done() {
                let (_ep_ret, ep_len) = batch.finish_episode(&ep_rews);
                info!("Episode length {}", ep_len);
                ep_rews.clear();
                finished_rendering = true;

                if batch.len() > self.batch_size {
                    break;
                }
                obs = self.env.reset()?;
            } else {
                obs = step.obs;
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyEnv, DummyEnvConfig, FixedPolicy};

    fn sampler(config: DummyEnvConfig, batch_size: usize) -> BatchSampler<DummyEnv> {
        let env = DummyEnv::build(&config, 0).unwrap();
        BatchSampler::new(env, batch_size)
    }

    #[test]
    fn test_two_step_episodes() -> Result<()> {
        let mut sampler = sampler(DummyEnvConfig::constant(2, 1.0), 3);
        let batch = sampler.sample_batch(&mut FixedPolicy(0))?;

        assert!(batch.n_episodes() >= 2);
        assert!(batch.len() >= 4);
        assert_eq!(batch.len(), 4);
        assert!(batch.weights.iter().all(|&w| w == 2.0));
        assert_eq!(batch.returns, vec![2.0, 2.0]);
        assert_eq!(batch.lengths, vec![2, 2]);
        Ok(())
    }

    #[test]
    fn test_stops_only_at_episode_boundary() -> Result<()> {
        for (batch_size, expected) in [(7, 10), (8, 10), (9, 10), (10, 15), (0, 5)] {
            let mut sampler = sampler(DummyEnvConfig::constant(5, 0.5), batch_size);
            let batch = sampler.sample_batch(&mut FixedPolicy(1))?;
            assert_eq!(batch.len(), expected, "batch_size = {}", batch_size);
            assert_eq!(batch.len() % 5, 0);
            assert_eq!(batch.weights.len(), batch.len());
            assert_eq!(batch.acts.len(), batch.len());
        }
        Ok(())
    }

    #[test]
    fn test_weights_are_undiscounted_returns() -> Result<()> {
        let config = DummyEnvConfig {
            rewards: vec![1.0, -2.0, 0.5],
            obs_dim: 2,
        };
        let mut sampler = sampler(config, 4);
        let batch = sampler.sample_batch(&mut FixedPolicy(0))?;

        assert_eq!(batch.len(), 6);
        assert!(batch.weights.iter().all(|&w| w == -0.5));
        assert_eq!(batch.mean_return(), -0.5);
        assert_eq!(batch.mean_length(), 3.0);
        Ok(())
    }

    #[test]
    fn test_observations_precede_actions() -> Result<()> {
        let mut sampler = sampler(DummyEnvConfig::constant(3, 1.0).obs_dim(1), 2);
        let batch = sampler.sample_batch(&mut FixedPolicy(0))?;

        // The observation on which an action is taken is recorded, not the next one.
        let firsts: Vec<f32> = batch.obs.iter().map(|o| o.0[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0 / 3.0, 2.0 / 3.0]);
        Ok(())
    }

    #[test]
    fn test_render_first_episode_only() -> Result<()> {
        let mut sampler = sampler(DummyEnvConfig::constant(4, 1.0), 10).render(true);
        let _ = sampler.sample_batch(&mut FixedPolicy(0))?;
        assert_eq!(sampler.env().n_renders, 4);
        assert_eq!(sampler.env().n_resets, 3);
        Ok(())
    }
}
