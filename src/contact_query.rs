use bevy::{ecs::system::SystemParam, prelude::*};

use crate::collision_groups::{CollisionGroupCatalog, CollisionRule};
use crate::contact_ext::ContactRulesExt;
use crate::materials::{InteractionProperties, MaterialResolver};
use crate::math::Float;
use crate::{CollisionGroupMember, InternedMaterial};

/// The Bevy side of [`ContactRulesExt`]: answers the narrow phase's questions using the entities'
/// [`CollisionGroupMember`] and [`InternedMaterial`] components.
///
/// Only takes shared access, so systems using it can run in parallel with each other.
#[derive(SystemParam)]
pub struct ContactRulesQuery<'w, 's> {
    catalog: Res<'w, CollisionGroupCatalog>,
    resolver: Res<'w, MaterialResolver<Float>>,
    groups_query: Query<'w, 's, &'static CollisionGroupMember>,
    materials_query: Query<'w, 's, &'static InternedMaterial>,
}

impl ContactRulesExt for ContactRulesQuery<'_, '_> {
    type Scalar = Float;

    fn collision_rule(&self, entity1: Entity, entity2: Entity) -> CollisionRule {
        let (Ok(group1), Ok(group2)) = (
            self.groups_query.get(entity1),
            self.groups_query.get(entity2),
        ) else {
            return self.catalog.default_rule();
        };
        self.catalog.rule(group1.0, group2.0)
    }

    fn interaction_properties(
        &self,
        entity1: Entity,
        entity2: Entity,
    ) -> Option<InteractionProperties<Float>> {
        let material1 = self.materials_query.get(entity1).ok()?;
        let material2 = self.materials_query.get(entity2).ok()?;
        self.resolver.resolve(material1.0, material2.0)
    }
}
