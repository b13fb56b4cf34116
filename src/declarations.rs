use bevy::prelude::*;

use crate::ContactRulesError;
use crate::collision_groups::{CollisionGroupCatalog, CollisionRule};
use crate::materials::{CombineMode, MaterialDescriptor, MaterialResolver};
use crate::math::ContactScalar;

/// A collision rule definition, expressed over sets of collision groups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionRuleDeclaration {
    Pair {
        group_a: i32,
        group_b: i32,
        rule: CollisionRule,
    },
    /// `rule` between `group` and every member of `groups`.
    WithSet {
        group: i32,
        groups: Vec<i32>,
        rule: CollisionRule,
    },
    /// `rule` between every member of `groups_a` and every member of `groups_b`.
    BetweenSets {
        groups_a: Vec<i32>,
        groups_b: Vec<i32>,
        rule: CollisionRule,
    },
    /// `self_rule` for each group with itself, `other_rule` between distinct members.
    WithinSet {
        groups: Vec<i32>,
        self_rule: CollisionRule,
        other_rule: CollisionRule,
    },
}

impl CollisionRuleDeclaration {
    pub fn apply(&self, catalog: &mut CollisionGroupCatalog) {
        match self {
            Self::Pair {
                group_a,
                group_b,
                rule,
            } => {
                catalog.define_rule(*group_a, *group_b, *rule);
            }
            Self::WithSet {
                group,
                groups,
                rule,
            } => catalog.define_rules_with_set(*group, groups, *rule),
            Self::BetweenSets {
                groups_a,
                groups_b,
                rule,
            } => catalog.define_rules_between_sets(groups_a, groups_b, *rule),
            Self::WithinSet {
                groups,
                self_rule,
                other_rule,
            } => catalog.define_rules_within_set(groups, *self_rule, *other_rule),
        }
    }
}

/// How contacts between two authored materials should be combined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialCombineDeclaration {
    pub material_a: MaterialDescriptor,
    pub material_b: MaterialDescriptor,
    pub friction_combine: CombineMode,
    pub bounce_combine: CombineMode,
}

impl MaterialCombineDeclaration {
    pub fn apply<S: ContactScalar>(
        &self,
        resolver: &mut MaterialResolver<S>,
    ) -> Result<(), ContactRulesError> {
        let material_a = resolver.try_intern(&self.material_a)?;
        let material_b = resolver.try_intern(&self.material_b)?;
        resolver.define_combination(
            material_a,
            material_b,
            self.friction_combine,
            self.bounce_combine,
        )?;
        Ok(())
    }
}

/// The scene's contact rules, applied once at [`Startup`].
///
/// Insert this resource before the first app update. Declarations are applied in order, so when
/// the same pair is mentioned twice the later declaration wins.
///
/// ```
/// # use bevy_contact_rules::prelude::*;
/// const PLAYER: i32 = 1;
/// const ENEMY: i32 = 2;
/// const DEBRIS: i32 = 3;
///
/// let declarations = ContactRulesDeclarations::default()
///     .within_set([PLAYER, ENEMY], CollisionRule::NoCollide, CollisionRule::Collide)
///     .with_set(DEBRIS, [PLAYER, ENEMY], CollisionRule::EventsOnly);
/// ```
#[derive(Resource, Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactRulesDeclarations {
    #[cfg_attr(feature = "serialize", serde(default))]
    pub collision_rules: Vec<CollisionRuleDeclaration>,
    #[cfg_attr(feature = "serialize", serde(default))]
    pub material_combines: Vec<MaterialCombineDeclaration>,
}

impl ContactRulesDeclarations {
    pub fn pair(mut self, group_a: i32, group_b: i32, rule: CollisionRule) -> Self {
        self.collision_rules.push(CollisionRuleDeclaration::Pair {
            group_a,
            group_b,
            rule,
        });
        self
    }

    pub fn with_set(
        mut self,
        group: i32,
        groups: impl IntoIterator<Item = i32>,
        rule: CollisionRule,
    ) -> Self {
        self.collision_rules.push(CollisionRuleDeclaration::WithSet {
            group,
            groups: groups.into_iter().collect(),
            rule,
        });
        self
    }

    pub fn between_sets(
        mut self,
        groups_a: impl IntoIterator<Item = i32>,
        groups_b: impl IntoIterator<Item = i32>,
        rule: CollisionRule,
    ) -> Self {
        self.collision_rules.push(CollisionRuleDeclaration::BetweenSets {
            groups_a: groups_a.into_iter().collect(),
            groups_b: groups_b.into_iter().collect(),
            rule,
        });
        self
    }

    pub fn within_set(
        mut self,
        groups: impl IntoIterator<Item = i32>,
        self_rule: CollisionRule,
        other_rule: CollisionRule,
    ) -> Self {
        self.collision_rules.push(CollisionRuleDeclaration::WithinSet {
            groups: groups.into_iter().collect(),
            self_rule,
            other_rule,
        });
        self
    }

    pub fn combine(
        mut self,
        material_a: MaterialDescriptor,
        material_b: MaterialDescriptor,
        friction_combine: CombineMode,
        bounce_combine: CombineMode,
    ) -> Self {
        self.material_combines.push(MaterialCombineDeclaration {
            material_a,
            material_b,
            friction_combine,
            bounce_combine,
        });
        self
    }

    /// Apply all the declarations. Stops at the first invalid material declaration.
    pub fn apply<S: ContactScalar>(
        &self,
        catalog: &mut CollisionGroupCatalog,
        resolver: &mut MaterialResolver<S>,
    ) -> Result<(), ContactRulesError> {
        for declaration in self.collision_rules.iter() {
            declaration.apply(catalog);
        }
        for declaration in self.material_combines.iter() {
            declaration.apply(resolver)?;
        }
        Ok(())
    }
}
