//! Categorical policy over discrete actions.
use crate::{
    model::SubModel1,
    opt::{Optimizer, OptimizerConfig},
    util::{flat_params, OutDim},
};
use anyhow::{Context, Result};
use candle_core::{shape::D, DType, Device, Tensor};
use candle_nn::{
    ops::{log_softmax, softmax},
    VarBuilder, VarMap,
};
use log::trace;
use rand::{distributions::WeightedIndex, Rng};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use simple_pg_core::error::PgError;
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`CategoricalActor`].
pub struct CategoricalActorConfig<P: OutDim> {
    policy_config: Option<P>,
    opt_config: OptimizerConfig,
}

impl<P: OutDim> Default for CategoricalActorConfig<P> {
    fn default() -> Self {
        Self {
            policy_config: None,
            opt_config: OptimizerConfig::default(),
        }
    }
}

impl<P> CategoricalActorConfig<P>
where
    P: DeserializeOwned + Serialize + OutDim,
{
    /// Sets configuration of the network producing logits.
    pub fn policy_config(mut self, v: P) -> Self {
        self.policy_config = Some(v);
        self
    }

    /// Sets the number of actions.
    pub fn out_dim(mut self, v: usize) -> Self {
        if let Some(policy_config) = &mut self.policy_config {
            policy_config.set_out_dim(v);
        }
        self
    }

    /// Sets optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Overrides the learning rate of the optimizer.
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.opt_config = self.opt_config.learning_rate(lr);
        self
    }

    /// Returns optimizer configuration.
    pub fn get_opt_config(&self) -> &OptimizerConfig {
        &self.opt_config
    }

    /// Constructs [`CategoricalActorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CategoricalActorConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Samples an action index for each row of `logits`, returns i64 tensor.
///
/// `logits` has shape `[batch_size, n_actions]`.
pub fn sample_categorical(logits: &Tensor, rng: &mut impl Rng) -> Result<Tensor> {
    let device = logits.device();
    let probs = softmax(logits, D::Minus1)?.to_vec2::<f32>()?;
    let n_samples = probs.len();
    let data = probs
        .into_iter()
        .map(|p| -> Result<i64> {
            let dist = WeightedIndex::new(&p)
                .map_err(|e| PgError::InvalidProbabilities(format!("{:?}: {}", p, e)))?;
            Ok(rng.sample(dist) as i64)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Tensor::from_vec(data, &[n_samples], device)?)
}

/// Surrogate loss of the policy gradient, `-mean(logp * weights)`.
///
/// Minimizing it increases the log-probabilities of actions with large weights.
pub fn pg_loss(logp: &Tensor, weights: &Tensor) -> Result<Tensor> {
    Ok(logp.mul(weights)?.mean_all()?.neg()?)
}

/// Stochastic policy over a discrete set of actions.
///
/// The model `P` maps a batch of observations to unnormalized log-probabilities
/// (logits) of the actions.
pub struct CategoricalActor<P>
where
    P: SubModel1<Input = Tensor, Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    varmap: VarMap,

    // The number of actions.
    out_dim: usize,

    policy: P,
    opt: Optimizer,
}

impl<P> CategoricalActor<P>
where
    P: SubModel1<Input = Tensor, Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Constructs [`CategoricalActor`].
    pub fn build(config: CategoricalActorConfig<P::Config>, device: Device) -> Result<Self> {
        let policy_config = config
            .policy_config
            .context("policy_config is not set.")?;
        let out_dim = policy_config.get_out_dim();
        let varmap = VarMap::new();
        let policy = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            P::build(vb.pp("actor"), policy_config)?
        };
        let opt = config.opt_config.build(varmap.all_vars())?;

        Ok(Self {
            varmap,
            out_dim,
            policy,
            opt,
        })
    }

    /// Returns the logits of actions, shape `[batch_size, n_actions]`.
    pub fn forward(&self, obs: &Tensor) -> Result<Tensor> {
        let logits = self.policy.forward(obs)?;
        debug_assert_eq!(logits.dims()[1], self.out_dim);
        Ok(logits)
    }

    /// Log-probabilities of the given actions on the given observations.
    ///
    /// `act` is an i64 tensor of action indices, shape `[batch_size]`.
    pub fn logp(&self, obs: &Tensor, act: &Tensor) -> Result<Tensor> {
        let logits = self.forward(obs)?;
        let logp = log_softmax(&logits, D::Minus1)?;
        Ok(logp.gather(&act.unsqueeze(1)?, 1)?.squeeze(1)?)
    }

    /// Samples actions from the policy, returns i64 tensor.
    pub fn sample(&self, obs: &Tensor, rng: &mut impl Rng) -> Result<Tensor> {
        let logits = self.forward(obs)?.detach();
        trace!("logits = {}", logits);
        sample_categorical(&logits, rng)
    }

    /// Actions with the highest probabilities, returns i64 tensor.
    pub fn greedy(&self, obs: &Tensor) -> Result<Tensor> {
        let logits = self.forward(obs)?.detach();
        Ok(logits.argmax(D::Minus1)?.to_dtype(DType::I64)?)
    }

    /// Takes a gradient step minimizing the given loss.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        self.opt.backward_step(loss)
    }

    /// The number of actions.
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// All parameters as a flat vector, ordered by variable names.
    pub fn params(&self) -> Result<Vec<f32>> {
        flat_params(&self.varmap)
    }
}
