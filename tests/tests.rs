use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy_contact_rules::InternedMaterial;
use bevy_contact_rules::prelude::*;

const PLAYER: i32 = 1;
const ENEMY: i32 = 2;
const PROJECTILE: i32 = 3;
const TERRAIN: i32 = 4;

fn ice() -> MaterialDescriptor {
    MaterialDescriptor {
        dynamic_friction: 0.1,
        static_friction: 0.2,
        bounciness: 0.0,
        ..Default::default()
    }
}

fn rubber() -> MaterialDescriptor {
    MaterialDescriptor {
        dynamic_friction: 0.9,
        static_friction: 1.0,
        bounciness: 0.8,
        ..Default::default()
    }
}

fn declarations() -> ContactRulesDeclarations {
    ContactRulesDeclarations::default()
        .within_set(
            [PLAYER, ENEMY, PROJECTILE],
            CollisionRule::NoCollide,
            CollisionRule::Collide,
        )
        .with_set(TERRAIN, [PLAYER, ENEMY], CollisionRule::Collide)
        .pair(TERRAIN, PROJECTILE, CollisionRule::EventsOnly)
        .combine(ice(), rubber(), CombineMode::Minimum, CombineMode::Maximum)
}

fn app_with(settings: ContactRulesSettings, declarations: ContactRulesDeclarations) -> App {
    let mut app = App::new();
    app.add_plugins(ContactRulesPlugin::new(Update).with_settings(settings));
    app.insert_resource(declarations);
    app
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn declarations_are_applied_at_startup() {
    let mut app = app_with(Default::default(), declarations());
    app.update();

    let catalog = app.world().resource::<CollisionGroupCatalog>();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.rule(PLAYER, PLAYER), CollisionRule::NoCollide);
    assert_eq!(catalog.rule(ENEMY, PLAYER), CollisionRule::Collide);
    assert_eq!(catalog.rule(PROJECTILE, TERRAIN), CollisionRule::EventsOnly);
    assert_eq!(catalog.rule(TERRAIN, TERRAIN), CollisionRule::Collide);
    assert!(!catalog.has_rule(TERRAIN, TERRAIN));

    let resolver = app.world().resource::<MaterialResolver>();
    assert_eq!(resolver.len(), 2);
    assert_eq!(resolver.interaction_count(), 1);
}

#[test]
fn narrow_phase_queries_use_body_components() {
    let mut app = app_with(Default::default(), declarations());
    let player = app
        .world_mut()
        .spawn((CollisionGroupMember(PLAYER), PhysicsMaterial(rubber())))
        .id();
    let other_player = app
        .world_mut()
        .spawn((CollisionGroupMember(PLAYER), PhysicsMaterial(rubber())))
        .id();
    let projectile = app
        .world_mut()
        .spawn((CollisionGroupMember(PROJECTILE), PhysicsMaterial(rubber())))
        .id();
    let terrain = app
        .world_mut()
        .spawn((CollisionGroupMember(TERRAIN), PhysicsMaterial(ice())))
        .id();
    let ungrouped = app.world_mut().spawn_empty().id();
    app.update();

    let player_material = app.world().get::<InternedMaterial>(player).copied();
    assert!(player_material.is_some());
    assert_eq!(
        app.world().get::<InternedMaterial>(other_player).copied(),
        player_material
    );

    let mut state = SystemState::<ContactRulesQuery>::new(app.world_mut());
    let rules = state.get(app.world());

    assert!(!rules.can_interact(player, other_player));
    assert!(rules.can_interact(player, projectile));
    assert!(rules.can_interact(terrain, player));
    assert_eq!(
        rules.collision_rule(terrain, projectile),
        CollisionRule::EventsOnly
    );
    assert_eq!(rules.collision_rule(ungrouped, player), CollisionRule::Collide);

    let properties = rules.interaction_properties(terrain, player).unwrap();
    assert_close(properties.kinetic_friction as f32, 0.1);
    assert_close(properties.static_friction as f32, 0.2);
    assert_close(properties.bounciness as f32, 0.8);
    assert_eq!(
        rules.interaction_properties(player, terrain),
        Some(properties)
    );

    assert!(rules.interaction_properties(player, projectile).is_none());
    assert!(rules.interaction_properties(player, ungrouped).is_none());
}

#[test]
fn default_rule_is_configurable() {
    let settings = ContactRulesSettings {
        default_rule: CollisionRule::NoCollide,
        ..Default::default()
    };
    let mut app = app_with(settings, declarations());
    let unknown = app.world_mut().spawn(CollisionGroupMember(99)).id();
    let player = app.world_mut().spawn(CollisionGroupMember(PLAYER)).id();
    let terrain = app.world_mut().spawn(CollisionGroupMember(TERRAIN)).id();
    app.update();

    let mut state = SystemState::<ContactRulesQuery>::new(app.world_mut());
    let rules = state.get(app.world());
    assert_eq!(rules.collision_rule(unknown, player), CollisionRule::NoCollide);
    assert_eq!(rules.collision_rule(terrain, terrain), CollisionRule::NoCollide);
    assert_eq!(rules.collision_rule(terrain, player), CollisionRule::Collide);
}

#[test]
fn undeclared_group_falls_back_to_default_rule() {
    let mut app = app_with(Default::default(), declarations());
    let stray = app.world_mut().spawn(CollisionGroupMember(42)).id();
    let player = app.world_mut().spawn(CollisionGroupMember(PLAYER)).id();
    app.update();

    let mut state = SystemState::<ContactRulesQuery>::new(app.world_mut());
    let rules = state.get(app.world());
    assert_eq!(rules.collision_rule(stray, player), CollisionRule::Collide);
    assert!(!app.world().resource::<CollisionGroupCatalog>().contains_group(42));
}

#[test]
#[should_panic]
fn undeclared_group_fails_in_strict_mode() {
    let settings = ContactRulesSettings {
        strict_groups: true,
        ..Default::default()
    };
    let mut app = app_with(settings, declarations());
    app.world_mut().spawn(CollisionGroupMember(42));
    app.update();
}

#[test]
#[should_panic]
fn invalid_material_declaration_fails_at_startup() {
    let broken = MaterialDescriptor {
        bounciness: f32::NAN,
        ..Default::default()
    };
    let mut app = app_with(
        Default::default(),
        ContactRulesDeclarations::default().combine(
            broken,
            ice(),
            CombineMode::Average,
            CombineMode::Average,
        ),
    );
    app.update();
}

#[test]
fn invalid_body_material_is_not_interned() {
    let mut app = app_with(Default::default(), declarations());
    let broken = app
        .world_mut()
        .spawn(PhysicsMaterial(MaterialDescriptor {
            static_friction: -1.0,
            ..Default::default()
        }))
        .id();
    app.update();

    assert!(app.world().get::<InternedMaterial>(broken).is_none());
}

#[test]
fn removed_material_is_detached() {
    let mut app = app_with(Default::default(), declarations());
    let slab = app.world_mut().spawn(PhysicsMaterial(ice())).id();
    let ball = app.world_mut().spawn(PhysicsMaterial(rubber())).id();
    app.update();

    {
        let mut state = SystemState::<ContactRulesQuery>::new(app.world_mut());
        let rules = state.get(app.world());
        assert!(rules.interaction_properties(slab, ball).is_some());
    }

    app.world_mut().entity_mut(slab).remove::<PhysicsMaterial>();
    app.update();

    assert!(app.world().get::<InternedMaterial>(slab).is_none());
    assert!(app.world().get::<InternedMaterial>(ball).is_some());
    let mut state = SystemState::<ContactRulesQuery>::new(app.world_mut());
    let rules = state.get(app.world());
    assert!(rules.interaction_properties(slab, ball).is_none());
}

#[test]
fn material_removed_and_readded_stays_interned() {
    let mut app = app_with(Default::default(), declarations());
    let body = app.world_mut().spawn(PhysicsMaterial(ice())).id();
    app.update();

    app.world_mut().entity_mut(body).remove::<PhysicsMaterial>();
    app.world_mut()
        .entity_mut(body)
        .insert(PhysicsMaterial(rubber()));
    app.update();

    assert!(app.world().get::<InternedMaterial>(body).is_some());
}

#[test]
fn despawned_body_with_material_does_not_fail() {
    let mut app = app_with(Default::default(), declarations());
    let body = app.world_mut().spawn(PhysicsMaterial(ice())).id();
    app.update();

    app.world_mut().despawn(body);
    app.update();

    assert!(app.world().get_entity(body).is_err());
}

#[test]
fn changed_material_is_reinterned() {
    let mut app = app_with(Default::default(), declarations());
    let body = app.world_mut().spawn(PhysicsMaterial(ice())).id();
    app.update();
    let before = app.world().get::<InternedMaterial>(body).copied();

    app.world_mut()
        .entity_mut(body)
        .insert(PhysicsMaterial(rubber()));
    app.update();
    let after = app.world().get::<InternedMaterial>(body).copied();

    assert!(before.is_some());
    assert!(after.is_some());
    assert_ne!(before, after);
    assert_eq!(app.world().resource::<MaterialResolver>().len(), 2);
}

#[cfg(feature = "serialize")]
#[test]
fn declarations_deserialize_from_ron() {
    let declarations: ContactRulesDeclarations = ron::from_str(
        r#"(
            collision_rules: [
                WithinSet(groups: [1, 2], self_rule: NoCollide, other_rule: Collide),
                Pair(group_a: 1, group_b: 3, rule: EventsOnly),
            ],
            material_combines: [
                (
                    material_a: (
                        dynamic_friction: 0.6,
                        static_friction: 0.6,
                        bounciness: 0.0,
                        friction_combine: Average,
                        bounce_combine: SomethingElse,
                    ),
                    material_b: (
                        dynamic_friction: 0.4,
                        static_friction: 0.4,
                        bounciness: 0.5,
                        friction_combine: Maximum,
                        bounce_combine: Minimum,
                    ),
                    friction_combine: Average,
                    bounce_combine: Bogus,
                ),
            ],
        )"#,
    )
    .expect("Unable to deserialize the declarations");

    assert_eq!(declarations.collision_rules.len(), 2);
    let combine = &declarations.material_combines[0];
    assert_eq!(combine.material_a.bounce_combine, CombineMode::Multiply);
    assert_eq!(combine.bounce_combine, CombineMode::Multiply);

    let mut catalog = CollisionGroupCatalog::default();
    let mut resolver = MaterialResolver::<f32>::default();
    declarations.apply(&mut catalog, &mut resolver).unwrap();
    assert_eq!(catalog.rule(2, 2), CollisionRule::NoCollide);
    assert_eq!(catalog.rule(3, 1), CollisionRule::EventsOnly);
    assert_eq!(resolver.interaction_count(), 1);
}
