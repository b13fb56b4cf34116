//! # Contact rules for Bevy physics integrations
//!
//! Scene configuration declares which collision groups may collide and how pairs of surface
//! materials combine into friction and restitution. Physics backends then ask
//! [`ContactRulesQuery`] about each candidate contact pair.
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_contact_rules::prelude::*;
//! let ice = MaterialDescriptor {
//!     dynamic_friction: 0.02,
//!     static_friction: 0.05,
//!     ..Default::default()
//! };
//! let rubber = MaterialDescriptor {
//!     dynamic_friction: 0.9,
//!     static_friction: 1.0,
//!     bounciness: 0.8,
//!     ..Default::default()
//! };
//!
//! App::new()
//!     .add_plugins(ContactRulesPlugin::new(FixedUpdate))
//!     .insert_resource(
//!         ContactRulesDeclarations::default()
//!             .within_set([1, 2, 3], CollisionRule::NoCollide, CollisionRule::Collide)
//!             .combine(ice, rubber, CombineMode::Minimum, CombineMode::Maximum),
//!     );
//! ```
//!
//! Bodies opt in by carrying a [`CollisionGroupMember`] and a [`PhysicsMaterial`].
//!
//! The rules themselves live in the engine-agnostic
//! `bevy-contact-rules-physics-integration-layer` crate, re-exported here.

mod components;
mod contact_query;
mod declarations;
mod plugin;

pub use bevy_contact_rules_physics_integration_layer::{
    ContactRulesError, collision_groups, contact_ext, fixed, materials, math, relation,
};

pub use components::*;
pub use contact_query::ContactRulesQuery;
pub use declarations::*;
pub use plugin::{ContactRulesPlugin, ContactRulesSettings};

use bevy::prelude::*;

pub mod prelude {
    pub use crate::collision_groups::{CollisionGroupCatalog, CollisionRule};
    pub use crate::contact_ext::ContactRulesExt;
    pub use crate::materials::{
        CombineMode, InteractionCapture, InteractionProperties, MaterialDescriptor,
        MaterialResolver,
    };
    pub use crate::{
        CollisionGroupMember, ContactRulesDeclarations, ContactRulesPlugin, ContactRulesQuery,
        ContactRulesSettings, ContactRulesSystems, PhysicsMaterial,
    };
}

/// Attaches newly created bodies to the contact rules.
///
/// Physics backends should run their narrow phase after this set, so that bodies created this
/// frame already have their materials interned.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ContactRulesSystems;
