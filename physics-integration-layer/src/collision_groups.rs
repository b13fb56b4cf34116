use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::error::ContactRulesError;
use crate::relation::RelationRegistry;

/// What the narrow phase should do with a pair of bodies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionRule {
    /// Generate contacts and resolve them.
    #[default]
    Collide,
    /// Generate contacts (so collision events fire) but do not let the solver act on them.
    EventsOnly,
    /// Do not generate contacts at all.
    NoCollide,
}

impl CollisionRule {
    pub fn generates_contacts(self) -> bool {
        !matches!(self, Self::NoCollide)
    }

    pub fn has_response(self) -> bool {
        matches!(self, Self::Collide)
    }
}

/// Handle to a collision group registered in a [`CollisionGroupCatalog`].
///
/// Handles are dense indices in creation order. They are only meaningful for the catalog that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionGroup(u32);

impl CollisionGroup {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// All the collision groups of one simulation, and the rules between them.
///
/// Groups are identified by plain integers chosen by the scene configuration. A group comes into
/// existence the first time any `define_*` method mentions it. Pairs without a rule use the
/// catalog's default rule, and so do groups the catalog has never heard of - querying never
/// fails.
#[derive(Resource, Debug, Clone)]
pub struct CollisionGroupCatalog {
    default_rule: CollisionRule,
    groups: HashMap<i32, CollisionGroup>,
    ids: Vec<i32>,
    rules: RelationRegistry<CollisionGroup, CollisionRule>,
}

impl Default for CollisionGroupCatalog {
    fn default() -> Self {
        Self::new(CollisionRule::Collide)
    }
}

impl CollisionGroupCatalog {
    pub fn new(default_rule: CollisionRule) -> Self {
        Self {
            default_rule,
            groups: Default::default(),
            ids: Vec::new(),
            rules: Default::default(),
        }
    }

    pub fn default_rule(&self) -> CollisionRule {
        self.default_rule
    }

    pub fn set_default_rule(&mut self, rule: CollisionRule) {
        self.default_rule = rule;
    }

    pub fn get_or_create_group(&mut self, id: i32) -> CollisionGroup {
        if let Some(group) = self.groups.get(&id) {
            return *group;
        }
        let group = CollisionGroup(self.ids.len() as u32);
        self.ids.push(id);
        self.groups.insert(id, group);
        group
    }

    pub fn group(&self, id: i32) -> Option<CollisionGroup> {
        self.groups.get(&id).copied()
    }

    pub fn contains_group(&self, id: i32) -> bool {
        self.groups.contains_key(&id)
    }

    /// Like [`group`](Self::group), but treats a missing group as a configuration error.
    ///
    /// Use this when attaching a body to a group, so that a typo in a group id is caught when the
    /// body is created rather than silently falling back to the default rule.
    pub fn require_group(&self, id: i32) -> Result<CollisionGroup, ContactRulesError> {
        self.group(id)
            .ok_or(ContactRulesError::UndeclaredGroup { group: id })
    }

    /// The integer id a group was created with.
    pub fn id_of(&self, group: CollisionGroup) -> Option<i32> {
        self.ids.get(group.index()).copied()
    }

    pub fn groups(&self) -> impl '_ + Iterator<Item = (i32, CollisionGroup)> {
        self.ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, CollisionGroup(index as u32)))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of group pairs with an explicit rule.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Set the rule between two groups, returning the rule it replaced (if the pair had one).
    pub fn define_rule(
        &mut self,
        group_a: i32,
        group_b: i32,
        rule: CollisionRule,
    ) -> Option<CollisionRule> {
        let a = self.get_or_create_group(group_a);
        let b = self.get_or_create_group(group_b);
        let old_rule = self.rules.set(a, b, rule);
        if let Some(old_rule) = old_rule
            && old_rule != rule
        {
            debug!(
                "Collision rule between groups {group_a} and {group_b} redefined from {old_rule:?} to {rule:?}"
            );
        }
        old_rule
    }

    /// Define `rule` for every pair in the Cartesian product of the two sets.
    pub fn define_rules_between_sets(
        &mut self,
        groups_a: &[i32],
        groups_b: &[i32],
        rule: CollisionRule,
    ) {
        for group in groups_a {
            self.define_rules_with_set(*group, groups_b, rule);
        }
    }

    /// Define `rule` between `group` and each member of `groups`.
    pub fn define_rules_with_set(&mut self, group: i32, groups: &[i32], rule: CollisionRule) {
        for other in groups {
            self.define_rule(group, *other, rule);
        }
    }

    /// Define `self_rule` for each group in the set with itself, and `other_rule` between each two
    /// distinct members of the set.
    pub fn define_rules_within_set(
        &mut self,
        groups: &[i32],
        self_rule: CollisionRule,
        other_rule: CollisionRule,
    ) {
        for group in groups {
            self.define_rule(*group, *group, self_rule);
        }
        for (i, group_a) in groups.iter().enumerate() {
            for group_b in &groups[i + 1..] {
                self.define_rule(*group_a, *group_b, other_rule);
            }
        }
    }

    /// The rule between two group ids, for the narrow phase.
    ///
    /// Unknown groups and pairs without a rule both resolve to the default rule.
    pub fn rule(&self, group_a: i32, group_b: i32) -> CollisionRule {
        let (Some(a), Some(b)) = (self.group(group_a), self.group(group_b)) else {
            return self.default_rule;
        };
        self.rule_between(a, b)
    }

    pub fn rule_between(&self, group_a: CollisionGroup, group_b: CollisionGroup) -> CollisionRule {
        self.rules.get_or(group_a, group_b, self.default_rule)
    }

    /// Whether the pair has an explicit rule, as opposed to falling back to the default.
    pub fn has_rule(&self, group_a: i32, group_b: i32) -> bool {
        let (Some(a), Some(b)) = (self.group(group_a), self.group(group_b)) else {
            return false;
        };
        self.rules.contains(a, b)
    }
}
