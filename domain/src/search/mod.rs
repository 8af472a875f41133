//! Search domain module
//!
//! Types for one web search: what the agent may ask for, what is forwarded
//! to the provider, and how the provider's loosely-shaped answer becomes a
//! [`SearchOutput`].

pub mod parsing;
pub mod request;
pub mod result;

pub use parsing::{ProviderPayload, parse_provider_payload};
pub use request::{FIXED_MAX_RESULTS, SearchDepth, SearchRequest, SearchToolInput, SearchTopic};
pub use result::{ParsedResult, SearchOutput, positional_score};
