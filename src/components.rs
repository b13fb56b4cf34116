use bevy::prelude::*;

use crate::materials::{MaterialDescriptor, MaterialHandle};

/// The collision group a body belongs to.
///
/// The body creation layer adds this when it builds a physics body. The group must have been
/// mentioned by at least one collision rule - see
/// [`validate_collision_groups_system`](crate::ContactRulesSystems).
///
/// Bodies without this component use the catalog's default rule against everything.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionGroupMember(pub i32);

/// The surface material a body was authored with.
///
/// When this is added (or changed) the plugin interns it and inserts the matching
/// [`InternedMaterial`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsMaterial(pub MaterialDescriptor);

/// The interned material of a body. Managed by the plugin - do not insert it manually.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternedMaterial(pub MaterialHandle);
