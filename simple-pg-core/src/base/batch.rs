//! Batch of trajectories.
use super::{Act, Env};

/// Steps of one or more whole episodes, used for a single optimization step.
///
/// Every step is weighted by the return of the episode it belongs to,
/// i.e., the sum of all rewards in the episode. Neither discounting nor
/// reward-to-go is applied.
pub struct TrajectoryBatch<E: Env> {
    /// Observations at which actions were taken.
    pub obs: Vec<E::Obs>,

    /// Actions taken.
    pub acts: Vec<E::Act>,

    /// Weights of log-probabilities, one per step.
    pub weights: Vec<f32>,

    /// Returns of the episodes in the batch.
    pub returns: Vec<f32>,

    /// Lengths of the episodes in the batch.
    pub lengths: Vec<usize>,

    // Number of steps pushed after the last episode boundary.
    n_pending: usize,
}

impl<E: Env> Default for TrajectoryBatch<E> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<E: Env> TrajectoryBatch<E> {
    /// Constructs an empty batch.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            obs: Vec::with_capacity(capacity),
            acts: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
            returns: vec![],
            lengths: vec![],
            n_pending: 0,
        }
    }

    /// Pushes a pair of an observation and the action taken on it.
    ///
    /// The weight of the step is given when the episode finishes.
    pub fn push(&mut self, obs: E::Obs, act: E::Act) {
        self.obs.push(obs);
        self.acts.push(act);
        self.n_pending += 1;
    }

    /// Closes the current episode with its rewards.
    ///
    /// The sum of `rewards` is assigned as the weight of every step pushed
    /// since the previous episode boundary. Returns `(return, length)` of the episode.
    pub fn finish_episode(&mut self, rewards: &[f32]) -> (f32, usize) {
        debug_assert_eq!(rewards.len(), self.n_pending);
        let ep_ret: f32 = rewards.iter().sum();
        let ep_len = self.n_pending;
        self.weights.extend(std::iter::repeat(ep_ret).take(ep_len));
        self.returns.push(ep_ret);
        self.lengths.push(ep_len);
        self.n_pending = 0;
        (ep_ret, ep_len)
    }

    /// The number of steps in the batch.
    pub fn len(&self) -> usize {
        self.obs.len()
    }

    /// Returns `true` if the batch has no steps.
    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    /// The number of finished episodes in the batch.
    pub fn n_episodes(&self) -> usize {
        self.returns.len()
    }

    /// Mean of the episode returns.
    pub fn mean_return(&self) -> f32 {
        if self.returns.is_empty() {
            return 0.0;
        }
        self.returns.iter().sum::<f32>() / self.returns.len() as f32
    }

    /// Mean of the episode lengths.
    pub fn mean_length(&self) -> f32 {
        if self.lengths.is_empty() {
            return 0.0;
        }
        self.lengths.iter().sum::<usize>() as f32 / self.lengths.len() as f32
    }

    /// Indices of the actions in the batch.
    pub fn act_indices(&self) -> Vec<usize> {
        self.acts.iter().map(|a| a.index()).collect()
    }
}
