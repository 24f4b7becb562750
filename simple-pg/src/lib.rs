//! The simplest formulation of policy gradient.
//!
//! A categorical policy is trained on a Gymnasium environment with a continuous
//! observation space and a discrete action space. In every epoch, whole episodes
//! are collected until the number of steps exceeds the batch size, every step is
//! weighted by the return of its episode, and the policy takes a single gradient
//! step on `-mean(logp(a | o) * w)`.
//!
//! This crate collects the following crates and provides the `simple_pg` program:
//!
//! * [`simple_pg_core`] has the traits of environments and agents, and the
//!   training loop ([`Trainer`](simple_pg_core::Trainer)).
//! * [`simple_pg_candle_agent`] has the policy gradient agent based on
//!   [candle](https://crates.io/crates/candle-core).
//! * [`simple_pg_py_gym_env`] is a wrapper of [Gymnasium](https://gymnasium.farama.org)
//!   environments written in Python.
pub use simple_pg_candle_agent as candle_agent;
pub use simple_pg_core as core;
pub use simple_pg_py_gym_env as py_gym_env;
