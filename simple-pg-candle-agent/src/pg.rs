//! Vanilla policy gradient agent.
//!
//! Every step of a batch is weighted by the return of its episode, and
//! the parameters of a categorical policy are updated once per batch by
//! minimizing `-mean(logp(a | o) * w)`.
mod actor;
mod base;
mod config;
pub use actor::{pg_loss, sample_categorical, CategoricalActor, CategoricalActorConfig};
pub use base::SimplePg;
pub use config::SimplePgConfig;
