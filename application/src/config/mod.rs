//! Application-level configuration.
//!
//! - [`SearchParams`]: per-invocation execution control (timeouts)

pub mod search_params;

pub use search_params::SearchParams;
