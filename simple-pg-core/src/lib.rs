#![warn(missing_docs)]
//! Core functionalities of the simplest policy gradient trainer.
//!
//! This crate is independent of any deep learning backend. It provides
//!
//! * traits of environments and agents ([`Env`], [`Policy`], [`Agent`]),
//! * [`TrajectoryBatch`], a set of whole episodes weighted by their returns,
//! * [`BatchSampler`], collecting a batch by running a policy in an environment,
//! * [`Trainer`], the epoch loop of collecting a batch and updating the agent once,
//! * [`record`], a key-value container used for logging training statistics.
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Env, Info, Obs, Policy, Step, TrajectoryBatch};

mod trainer;
pub use trainer::{BatchSampler, Trainer, TrainerConfig};
