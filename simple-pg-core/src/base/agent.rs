//! Agent.
use super::{Env, Policy, TrajectoryBatch};
use crate::record::Record;
use anyhow::Result;

/// Represents a trainable policy on an environment.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step with the given batch.
    fn opt(&mut self, batch: &TrajectoryBatch<E>) -> Result<()> {
        let _ = self.opt_with_record(batch)?;
        Ok(())
    }

    /// Performs an optimization step and returns some information.
    ///
    /// The returned record is expected to have the value of the loss
    /// under the key `"loss"`, evaluated before the parameters are updated.
    fn opt_with_record(&mut self, batch: &TrajectoryBatch<E>) -> Result<Record>;
}
