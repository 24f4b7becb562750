//! Core functionalities.
mod agent;
mod batch;
mod env;
mod policy;
mod step;
pub use agent::Agent;
pub use batch::TrajectoryBatch;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments are not vectorized, so an object of this trait holds a single
/// observation vector.
pub trait Obs: Clone + Debug {
    /// Returns the number of elements of the observation vector.
    fn len(&self) -> usize;
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the index of the action in the discrete action set.
    fn index(&self) -> usize;
}
