//! Vanilla policy gradient agent.
use super::{pg_loss, CategoricalActor, SimplePgConfig};
use crate::{model::SubModel1, util::OutDim};
use anyhow::Result;
use candle_core::{Device, Tensor};
use log::debug;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{de::DeserializeOwned, Serialize};
use simple_pg_core::{
    error::PgError,
    record::{Record, RecordValue},
    Agent, Env, Obs, Policy, TrajectoryBatch,
};
use std::{convert::TryFrom, fmt::Debug, marker::PhantomData};

/// Vanilla policy gradient agent.
///
/// Observations are converted into `f32` vectors and actions are built from
/// their indices in the discrete action set.
pub struct SimplePg<E, P>
where
    E: Env,
    P: SubModel1<Input = Tensor, Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    E::Obs: Into<Vec<f32>>,
    E::Act: From<usize>,
{
    actor: CategoricalActor<P>,
    train: bool,
    device: Device,
    rng: SmallRng,
    n_opts: usize,
    phantom: PhantomData<E>,
}

impl<E, P> SimplePg<E, P>
where
    E: Env,
    P: SubModel1<Input = Tensor, Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    E::Obs: Into<Vec<f32>>,
    E::Act: From<usize>,
{
    /// Constructs [`SimplePg`] agent.
    pub fn build(config: SimplePgConfig<P::Config>) -> Result<Self> {
        let device = config.device.unwrap_or_default();
        let device = Device::try_from(device)?;
        let actor = CategoricalActor::build(config.actor_config, device.clone())?;

        Ok(Self {
            actor,
            train: false,
            device,
            rng: SmallRng::seed_from_u64(config.seed),
            n_opts: 0,
            phantom: PhantomData,
        })
    }

    /// Stacks observations into a tensor of shape `[n, obs_dim]`.
    fn obs_to_tensor(&self, obs: &[E::Obs]) -> Result<Tensor> {
        let n = obs.len();
        let dim = obs.first().map(|o| o.len()).unwrap_or(0);
        let data = obs
            .iter()
            .flat_map(|o| Into::<Vec<f32>>::into(o.clone()))
            .collect::<Vec<_>>();
        Ok(Tensor::from_vec(data, &[n, dim], &self.device)?)
    }

    fn opt_(&mut self, batch: &TrajectoryBatch<E>) -> Result<f32> {
        if batch.is_empty() {
            return Err(PgError::EmptyBatch.into());
        }

        let n = batch.len();
        let obs = self.obs_to_tensor(&batch.obs)?;
        let act = {
            let ixs = batch
                .act_indices()
                .into_iter()
                .map(|ix| ix as i64)
                .collect::<Vec<_>>();
            Tensor::from_vec(ixs, &[n], &self.device)?
        };
        let weights = Tensor::from_slice(&batch.weights[..], &[n], &self.device)?;

        let logp = self.actor.logp(&obs, &act)?;
        let loss = pg_loss(&logp, &weights)?;
        self.actor.backward_step(&loss)?;
        self.n_opts += 1;

        let loss = loss.to_scalar::<f32>()?;
        debug!("n_opts = {}, loss = {}", self.n_opts, loss);
        Ok(loss)
    }

    /// The number of optimization steps performed so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }

    /// All parameters of the policy as a flat vector.
    pub fn params(&self) -> Result<Vec<f32>> {
        self.actor.params()
    }
}

impl<E, P> Policy<E> for SimplePg<E, P>
where
    E: Env,
    P: SubModel1<Input = Tensor, Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    E::Obs: Into<Vec<f32>>,
    E::Act: From<usize>,
{
    /// Samples an action in training mode, takes the most probable one otherwise.
    fn sample(&mut self, obs: &E::Obs) -> Result<E::Act> {
        let obs = self.obs_to_tensor(std::slice::from_ref(obs))?;
        let act = match self.train {
            true => self.actor.sample(&obs, &mut self.rng)?,
            false => self.actor.greedy(&obs)?,
        };
        let ix = act.to_vec1::<i64>()?[0];
        Ok((ix as usize).into())
    }
}

impl<E, P> Agent<E> for SimplePg<E, P>
where
    E: Env,
    P: SubModel1<Input = Tensor, Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    E::Obs: Into<Vec<f32>>,
    E::Act: From<usize>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt_with_record(&mut self, batch: &TrajectoryBatch<E>) -> Result<Record> {
        let loss = self.opt_(batch)?;
        Ok(Record::from_slice(&[("loss", RecordValue::Scalar(loss))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlp::{Mlp, MlpConfig};
    use simple_pg_core::dummy::{DummyAct, DummyEnv, DummyObs};

    type Pg = SimplePg<DummyEnv, Mlp>;

    fn agent(lr: f64) -> Pg {
        let config = SimplePgConfig::default()
            .policy_config(MlpConfig::new(2, vec![4], 3, false))
            .learning_rate(lr);
        Pg::build(config).unwrap()
    }

    fn batch() -> TrajectoryBatch<DummyEnv> {
        let mut batch = TrajectoryBatch::default();
        batch.push(DummyObs(vec![0.0, 1.0]), DummyAct(2));
        batch.push(DummyObs(vec![0.5, 1.0]), DummyAct(1));
        batch.finish_episode(&[1.0, 1.0]);
        batch
    }

    #[test]
    fn test_sampled_actions_in_range() -> Result<()> {
        let mut agent = agent(0.01);
        agent.train();
        for _ in 0..20 {
            let act = agent.sample(&DummyObs(vec![0.3, -0.3]))?;
            assert!(act.0 < 3);
        }
        Ok(())
    }

    #[test]
    fn test_eval_mode_is_deterministic() -> Result<()> {
        let mut agent = agent(0.01);
        agent.eval();
        assert!(!agent.is_train());
        let obs = DummyObs(vec![0.3, -0.3]);
        let a0 = agent.sample(&obs)?;
        for _ in 0..5 {
            assert_eq!(agent.sample(&obs)?, a0);
        }
        Ok(())
    }

    #[test]
    fn test_empty_batch_is_error() {
        let mut agent = agent(0.01);
        let batch = TrajectoryBatch::<DummyEnv>::default();
        let err = agent.opt_with_record(&batch).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PgError>(),
            Some(PgError::EmptyBatch)
        ));
        assert_eq!(agent.n_opts(), 0);
    }

    #[test]
    fn test_opt_changes_params() -> Result<()> {
        let mut agent = agent(0.01);
        let before = agent.params()?;
        let record = agent.opt_with_record(&batch())?;
        assert!(record.get_scalar("loss")?.is_finite());
        assert_ne!(before, agent.params()?);
        assert_eq!(agent.n_opts(), 1);
        Ok(())
    }

    #[test]
    fn test_recorded_loss_is_computed_before_update() -> Result<()> {
        let mut agent = agent(0.1);
        let batch = batch();

        // -mean(logp(a|o) * w) with the parameters before the update
        let obs = agent.obs_to_tensor(&batch.obs)?;
        let act = Tensor::from_vec(vec![2i64, 1], &[2], &agent.device)?;
        let logp = agent.actor.logp(&obs, &act)?.to_vec1::<f32>()?;
        let expected = -(logp[0] * 2.0 + logp[1] * 2.0) / 2.0;
        let weights = Tensor::from_slice(&batch.weights[..], &[2], &agent.device)?;
        let loss = pg_loss(&agent.actor.logp(&obs, &act)?, &weights)?.to_scalar::<f32>()?;
        assert!((loss - expected).abs() < 1e-6);

        let record = agent.opt_with_record(&batch)?;
        assert!((record.get_scalar("loss")? - expected).abs() < 1e-6);

        // The update changes the loss on the same batch.
        let logp = agent.actor.logp(&obs, &act)?;
        let after = pg_loss(&logp, &weights)?.to_scalar::<f32>()?;
        assert!((after - expected).abs() > 1e-6);
        Ok(())
    }

    #[test]
    fn test_zero_learning_rate_keeps_params() -> Result<()> {
        let mut agent = agent(0.0);
        let before = agent.params()?;
        for _ in 0..3 {
            agent.opt(&batch())?;
        }
        assert_eq!(before, agent.params()?);
        Ok(())
    }
}
