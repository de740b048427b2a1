#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Adapts kubert watch indexing to pool-reference predicates.
//!
//! Watches only report that a resource was applied or deleted. The [`Index`]
//! remembers the last version of each resource so that applies can be told
//! apart as creates or updates, and so that deletes can be evaluated against
//! the deleted object. Accepted notifications are sent to a reconciliation
//! queue as [`Request`]s.

mod index;
mod metrics;
mod resource_id;


pub use self::{
    index::{Index, Request, SharedIndex},
    metrics::IndexMetrics,
    resource_id::ResourceId,
};
