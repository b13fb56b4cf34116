use bevy::prelude::*;

use crate::collision_groups::CollisionRule;
use crate::materials::InteractionProperties;
use crate::math::ContactScalar;

/// What a physics backend's narrow phase asks about a pair of colliding entities.
///
/// Implementations must be cheap and side-effect free - they are called for every candidate pair
/// in every step, possibly from several worker threads.
pub trait ContactRulesExt {
    type Scalar: ContactScalar;

    fn collision_rule(&self, entity1: Entity, entity2: Entity) -> CollisionRule;

    /// Whether contacts should be generated for the pair at all.
    fn can_interact(&self, entity1: Entity, entity2: Entity) -> bool {
        self.collision_rule(entity1, entity2).generates_contacts()
    }

    /// The custom contact coefficients for the pair, or `None` to let the engine combine the
    /// materials its own way.
    fn interaction_properties(
        &self,
        entity1: Entity,
        entity2: Entity,
    ) -> Option<InteractionProperties<Self::Scalar>>;
}
