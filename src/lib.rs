//! chainwalk: cycle-safe chain traversal library.
//!
//! Walks single-parent chains (a node, its parent, its parent's parent, ...)
//! to call back at each step or to merge one property along the way, nearer
//! nodes taking precedence. Links resolve either directly or by identifier
//! lookup in a collection, and a revisited node ends the walk.

pub mod chain;
pub mod config;
pub mod error;
pub mod observability;
pub mod record;
