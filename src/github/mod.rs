//! GitHub REST API plumbing
//!
//! This module handles communication with the GitHub commits endpoint:
//! the HTTP transport seam, the retry/rate-limit-aware client, the
//! pagination link parser, and the fixed repository target list.

pub mod client;
pub mod pagination;
pub mod targets;
pub mod transport;
