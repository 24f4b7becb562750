//! Observation filters.
mod array_filter;
pub use array_filter::{ArrayObsFilter, ArrayObsFilterConfig};
