//! Action filters.
mod discrete_filter;
pub use discrete_filter::{DiscreteActFilter, DiscreteActFilterConfig};
