use bevy::ecs::error::BevyError;
use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use crate::collision_groups::{CollisionGroupCatalog, CollisionRule};
use crate::materials::{InteractionCapture, MaterialResolver};
use crate::math::Float;
use crate::{
    CollisionGroupMember, ContactRulesDeclarations, ContactRulesSystems, InternedMaterial,
    PhysicsMaterial,
};

/// Global knobs of the contact rules, read when the plugin is built.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ContactRulesSettings {
    /// The rule for group pairs without an explicit rule, and for bodies without a group.
    pub default_rule: CollisionRule,
    /// Treat a body that references an undeclared collision group as a fatal error instead of
    /// logging it.
    pub strict_groups: bool,
    /// See [`InteractionCapture`].
    pub capture: InteractionCapture,
}

impl Default for ContactRulesSettings {
    fn default() -> Self {
        Self {
            default_rule: CollisionRule::Collide,
            strict_groups: false,
            capture: InteractionCapture::DefinitionTime,
        }
    }
}

/// Owns the [`CollisionGroupCatalog`] and the [`MaterialResolver`] of the app.
///
/// The [`ContactRulesDeclarations`] resource (if inserted) is applied at [`Startup`]. Bodies are
/// attached to the rules in the schedule passed to [`ContactRulesPlugin::new`], which should be
/// the schedule the physics backend runs in - the systems are in [`ContactRulesSystems`], and the
/// backend should order its narrow phase after it.
pub struct ContactRulesPlugin {
    schedule: InternedScheduleLabel,
    settings: ContactRulesSettings,
}

impl ContactRulesPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
            settings: Default::default(),
        }
    }

    pub fn with_settings(mut self, settings: ContactRulesSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Plugin for ContactRulesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings);
        app.insert_resource(CollisionGroupCatalog::new(self.settings.default_rule));
        app.insert_resource(MaterialResolver::<Float>::new(self.settings.capture));
        app.init_resource::<ContactRulesDeclarations>();
        app.add_systems(Startup, apply_declarations_system);
        app.add_systems(
            self.schedule,
            (intern_materials_system, validate_collision_groups_system).in_set(ContactRulesSystems),
        );
    }
}

fn apply_declarations_system(
    declarations: Res<ContactRulesDeclarations>,
    mut catalog: ResMut<CollisionGroupCatalog>,
    mut resolver: ResMut<MaterialResolver<Float>>,
) -> Result<(), BevyError> {
    declarations.apply(&mut catalog, &mut *resolver)?;
    info!(
        "Contact rules applied: {} collision groups with {} explicit rules, {} materials with {} combinations",
        catalog.len(),
        catalog.rule_count(),
        resolver.len(),
        resolver.interaction_count(),
    );
    Ok(())
}

fn intern_materials_system(
    query: Query<(Entity, &PhysicsMaterial), Changed<PhysicsMaterial>>,
    mut removed: RemovedComponents<PhysicsMaterial>,
    mut resolver: ResMut<MaterialResolver<Float>>,
    mut commands: Commands,
) {
    // Queued before the inserts below, so a material that was removed and re-added in the same
    // frame ends up interned.
    for entity in removed.read() {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.remove::<InternedMaterial>();
        }
    }
    for (entity, material) in query.iter() {
        match resolver.try_intern(&material.0) {
            Ok(handle) => {
                commands.entity(entity).insert(InternedMaterial(handle));
            }
            Err(err) => {
                error!("Cannot attach material to {entity}: {err}");
                commands.entity(entity).remove::<InternedMaterial>();
            }
        }
    }
}

fn validate_collision_groups_system(
    query: Query<(Entity, &CollisionGroupMember), Changed<CollisionGroupMember>>,
    catalog: Res<CollisionGroupCatalog>,
    settings: Res<ContactRulesSettings>,
) -> Result<(), BevyError> {
    for (entity, member) in query.iter() {
        if let Err(err) = catalog.require_group(member.0) {
            if settings.strict_groups {
                return Err(err.into());
            }
            error!("{entity} will use the default collision rule: {err}");
        }
    }
    Ok(())
}
