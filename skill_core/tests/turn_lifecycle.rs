//! Integration test: Status stacking, turn ticks, energy and destruction

mod common;

use common::{convoy, flat_damage, health, run};
use proptest::prelude::*;
use skill_core::log::{Importance, LogEventType, StatusChange};
use skill_core::modifier::{ModifierSpec, ModifierType};
use skill_core::{
    ApplyStatusEffect, Attribute, AttributeModifierEffect, CombatEvent, Component, ComponentId,
    ComponentRef, DamageEffect, EffectTarget, MemoryLog, ResourceKind, ResourceRestorationEffect,
    RollType, ScriptedRoller, Skill, SkillError, SkillExecutor, SkillUse, TargetingMode,
};

fn status_changes(log: &MemoryLog) -> Vec<StatusChange> {
    log.all_events()
        .filter_map(|e| match e {
            CombatEvent::StatusEffect { change, .. } => Some(*change),
            _ => None,
        })
        .collect()
}

fn armor_class(convoy: &common::Convoy, at: ComponentRef) -> i32 {
    convoy.stage.component(at).unwrap().armor_class()
}

#[test]
fn test_status_stacking_rules() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let request = SkillUse::new(convoy.raider, convoy.hauler);
    let slow = |effect: ApplyStatusEffect| {
        Skill::new("slow", "Slow", RollType::None).with_effect(effect, EffectTarget::TargetVehicle)
    };

    // Fresh: applied to the treads (Speed routes to the drive)
    run(&executor, &mut convoy, &slow(ApplyStatusEffect::new("slow")), request, Vec::new(), &mut log);
    // Same magnitude, same duration: refused
    run(&executor, &mut convoy, &slow(ApplyStatusEffect::new("slow")), request, Vec::new(), &mut log);
    // Stronger: replaces
    run(
        &executor,
        &mut convoy,
        &slow(ApplyStatusEffect::new("slow").with_magnitude(2.0)),
        request,
        Vec::new(),
        &mut log,
    );
    // Weaker but longer: refused
    run(
        &executor,
        &mut convoy,
        &slow(ApplyStatusEffect::new("slow").with_duration(5)),
        request,
        Vec::new(),
        &mut log,
    );
    // Equal magnitude, longer duration: replaces
    run(
        &executor,
        &mut convoy,
        &slow(ApplyStatusEffect::new("slow").with_magnitude(2.0).with_duration(4)),
        request,
        Vec::new(),
        &mut log,
    );

    assert_eq!(
        status_changes(&log),
        vec![
            StatusChange::Applied,
            StatusChange::Refused,
            StatusChange::Replaced,
            StatusChange::Refused,
            StatusChange::Replaced,
        ]
    );

    let treads = convoy.stage.component(ComponentRef::new(convoy.hauler, convoy.treads)).unwrap();
    let status = treads.status("slow").unwrap();
    assert_eq!(status.turns_remaining, 4);
    assert!((status.magnitude - 60.0).abs() < 1e-9);
    // Only the live instance's modifier remains
    assert_eq!(treads.active_status_effects().len(), 1);
    assert_eq!(treads.modifiers().len(), 1);
}

#[test]
fn test_status_expires_with_its_modifiers() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let hull = ComponentRef::chassis(convoy.hauler);
    let plating = Skill::new("plating", "Plating", RollType::None)
        .with_targeting(TargetingMode::SelfOnly)
        .with_effect(ApplyStatusEffect::new("reinforced").with_duration(2), EffectTarget::SourceVehicle);

    let request = SkillUse::on_self(convoy.hauler);
    run(&executor, &mut convoy, &plating, request, Vec::new(), &mut log);
    assert_eq!(armor_class(&convoy, hull), 16);

    convoy.stage.end_turn(&mut log);
    assert_eq!(armor_class(&convoy, hull), 16);
    assert_eq!(convoy.stage.component(hull).unwrap().status("reinforced").unwrap().turns_remaining, 1);

    convoy.stage.end_turn(&mut log);
    assert_eq!(armor_class(&convoy, hull), 14);
    assert!(!convoy.stage.component(hull).unwrap().has_status("reinforced"));
    assert!(log
        .loose_events()
        .iter()
        .any(|e| matches!(e, CombatEvent::StatusExpired { status, .. } if status == "Reinforced Plating")));
}

#[test]
fn test_timed_modifier_expires() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let hull = ComponentRef::chassis(convoy.raider);
    let brace = Skill::new("brace", "Brace", RollType::None)
        .with_targeting(TargetingMode::SelfOnly)
        .with_effect(
            AttributeModifierEffect::new(ModifierSpec::new(Attribute::ArmorClass, ModifierType::Flat, 3.0), 1),
            EffectTarget::SourceVehicle,
        );

    let request = SkillUse::on_self(convoy.raider);
    run(&executor, &mut convoy, &brace, request, Vec::new(), &mut log);
    assert_eq!(armor_class(&convoy, hull), 17);

    convoy.stage.end_turn(&mut log);
    assert_eq!(armor_class(&convoy, hull), 14);
    assert_eq!(
        log.loose_events()
            .iter()
            .filter(|e| matches!(e, CombatEvent::ModifierExpired { .. }))
            .count(),
        1
    );
}

#[test]
fn test_energy_regenerates_up_to_max() {
    let mut convoy = convoy();
    let mut log = MemoryLog::new();
    let raider = convoy.stage.vehicle_mut(convoy.raider).unwrap();
    assert_eq!(raider.restore_energy(-6), -6);

    convoy.stage.end_turn(&mut log);
    assert_eq!(convoy.stage.vehicle(convoy.raider).unwrap().energy(), 6);

    for _ in 0..5 {
        convoy.stage.end_turn(&mut log);
    }
    assert_eq!(convoy.stage.vehicle(convoy.raider).unwrap().energy(), 10);
}

#[test]
fn test_power_core_loss_empties_the_pool() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let overload = Skill::new("overload", "Overload", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(50)), EffectTarget::SelectedTarget);
    let at_core = SkillUse::new(convoy.hauler, convoy.raider).at_component(ComponentId::POWER_CORE);

    assert!(run(&executor, &mut convoy, &overload, at_core, Vec::new(), &mut log));
    let raider = convoy.stage.vehicle(convoy.raider).unwrap();
    assert!(raider.power_core().is_destroyed());
    assert!(raider.is_active());
    assert_eq!(raider.energy(), 0);

    convoy.stage.end_turn(&mut log);
    assert_eq!(convoy.stage.vehicle(convoy.raider).unwrap().energy(), 0);

    let high = log.entries_at_least(Importance::High).count();
    assert_eq!(high, 1);
}

#[test]
fn test_chassis_destruction_ends_the_vehicle() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let stun = Skill::new("stun", "Stun", RollType::None)
        .with_effect(ApplyStatusEffect::new("stunned"), EffectTarget::TargetVehicle);
    let crush = Skill::new("crush", "Crush", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(100)), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler);

    run(&executor, &mut convoy, &stun, request, Vec::new(), &mut log);
    assert!(run(&executor, &mut convoy, &crush, request, Vec::new(), &mut log));

    let hauler = convoy.stage.vehicle(convoy.hauler).unwrap();
    assert!(hauler.is_destroyed());
    assert!(hauler.chassis().active_status_effects().is_empty());
    assert_eq!(log.last_action().unwrap().total_damage(), 60);

    let destruction = log
        .entries()
        .iter()
        .find(|e| e.event_type == LogEventType::Destruction)
        .unwrap();
    assert_eq!(destruction.importance, Importance::Critical);

    let mut roller = ScriptedRoller::default();
    assert_eq!(
        executor.try_execute(&crush, &request, &mut convoy.stage, &mut roller, &mut log),
        Err(SkillError::TargetDestroyed)
    );
    assert!(convoy.stage.enemies_in_stage(convoy.raider).is_empty());
}

#[test]
fn test_drain_never_destroys() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let leech = Skill::new("leech", "Leech", RollType::None).with_effect(
        ResourceRestorationEffect::new(ResourceKind::Health, -100),
        EffectTarget::SelectedTarget,
    );

    let request = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(run(&executor, &mut convoy, &leech, request, Vec::new(), &mut log));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 1);
    assert!(convoy.stage.vehicle(convoy.hauler).unwrap().is_active());
}

proptest! {
    #[test]
    fn prop_restoration_stays_in_bounds(deltas in prop::collection::vec(-80i32..80, 1..20)) {
        let mut component = Component::chassis("Hull", 60, 14);
        for delta in deltas {
            let before = component.health();
            let actual = component.restore_health(delta);
            prop_assert_eq!(component.health(), before + actual);
            prop_assert!(component.health() >= 1);
            prop_assert!(component.health() <= 60);
            prop_assert!(!component.is_destroyed());
        }
    }
}
