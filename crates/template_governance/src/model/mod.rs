//! Template domain model.
//!
//! # Responsibility
//! - Define the single owned record for template identity, version and
//!   lifecycle state.
//!
//! # Invariants
//! - Every template is identified by a stable string id.
//! - `status` and `locked` are only mutated through lifecycle governance.

pub mod template;
