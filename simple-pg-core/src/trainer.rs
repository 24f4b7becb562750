//! Train [`Agent`].
mod config;
mod sampler;
use crate::{
    record::{Record, RecordValue::Scalar, Recorder},
    Agent, Env,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;
pub use sampler::BatchSampler;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages training loop.
///
/// # Training loop
///
/// For each of `epochs` epochs:
///
/// 1. [`BatchSampler`] runs the agent in the environment until the number of
///    collected steps exceeds `batch_size` at the end of an episode. Each step
///    is weighted by the return of its episode.
/// 2. The agent performs a single optimization step with the batch
///    ([`Agent::opt_with_record`]).
/// 3. The epoch index, the loss, the mean return and the mean episode length
///    are logged and written to the [`Recorder`].
///
/// There is no early stopping and no checkpointing.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[BatchSampler]
///     C -->|"TrajectoryBatch&lt;E: Env&gt;"|A
///     A -->|Record|D[Recorder]
/// ```
pub struct Trainer {
    /// The number of epochs.
    epochs: usize,

    /// Minimum number of steps in a batch.
    batch_size: usize,

    /// Rendering of the first episode in each epoch.
    render: bool,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            epochs: config.epochs,
            batch_size: config.batch_size,
            render: config.render,
        }
    }

    /// Performs a single epoch: collects a batch and updates the agent once.
    ///
    /// The returned record has `loss`, `mean_return`, `mean_ep_len`, `n_episodes`
    /// and `n_steps`, together with the values recorded by the agent.
    pub fn train_epoch<E, A>(&self, agent: &mut A, sampler: &mut BatchSampler<E>) -> Result<Record>
    where
        E: Env,
        A: Agent<E>,
    {
        let batch = sampler.sample_batch(agent)?;
        let record_agent = agent.opt_with_record(&batch)?;

        let mut record = Record::from_slice(&[
            ("mean_return", Scalar(batch.mean_return())),
            ("mean_ep_len", Scalar(batch.mean_length())),
            ("n_episodes", Scalar(batch.n_episodes() as f32)),
            ("n_steps", Scalar(batch.len() as f32)),
        ]);
        record.merge_inplace(record_agent);
        Ok(record)
    }

    /// Train the agent.
    pub fn train<E, A, R>(&mut self, env: E, agent: &mut A, recorder: &mut R) -> Result<()>
    where
        E: Env,
        A: Agent<E>,
        R: Recorder,
    {
        let mut sampler = BatchSampler::new(env, self.batch_size).render(self.render);
        agent.train();

        for epoch in 0..self.epochs {
            let mut record = self.train_epoch(agent, &mut sampler)?;
            info!(
                "epoch: {:3} \t loss: {:.3} \t return: {:.3} \t ep_len: {:.3}",
                epoch,
                record.get_scalar("loss")?,
                record.get_scalar("mean_return")?,
                record.get_scalar("mean_ep_len")?,
            );
            record.insert("epoch", Scalar(epoch as f32));
            recorder.write(record);
        }

        Ok(())
    }
}
