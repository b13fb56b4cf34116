//! Pairwise contact rules for physics integrations: which collision groups may collide, and how
//! the surface materials of two touching bodies combine into friction and restitution.
//!
//! This crate is engine-agnostic. `bevy-contact-rules` wires it into Bevy, and physics backends
//! consult it through [`ContactRulesExt`](contact_ext::ContactRulesExt).

pub mod collision_groups;
pub mod contact_ext;
pub mod error;
pub mod fixed;
pub mod materials;
pub mod math;
pub mod relation;

pub use error::ContactRulesError;
