//! Core data model shared across the crate.

mod aggregate;
mod roast;

pub use aggregate::{
    CommitSummary, EventSummary, RepoCommits, RepoSummary, UserAggregate, UserProfile,
};
pub use roast::{GeneratedRoast, Language};
