//! Integration test: Validate -> Roll -> Route -> Apply, through the executor

mod common;

use common::{convoy, flat_damage, health, run};
use skill_core::dice::DiceSpec;
use skill_core::effect::CommandHandler;
use skill_core::log::{AttackStage, LogEventType};
use skill_core::skill::SkillContext;
use skill_core::{
    ApplyStatusEffect, Attribute, CombatEvent, ComponentId, ComponentRef, CustomCommandEffect,
    DamageEffect, DamageFormula, DamageType, EffectOutcome, EffectTarget, InaccessibilityReason,
    MemoryLog, PositionChangeEffect, ResourceKind, ResourceRestorationEffect, RollType, Skill,
    SkillError, SkillExecutor, SkillUse, Stage, StagePosition, TargetingMode, TeamId, Vehicle,
};
use skill_core::{CombatLog, ScriptedRoller};

fn attack_stages(log: &MemoryLog) -> Vec<AttackStage> {
    log.last_action()
        .unwrap()
        .events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::AttackRoll { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect()
}

#[test]
fn test_weapon_plus_skill_critical() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let skill = Skill::new("called_shot", "Called Shot", RollType::AttackRoll).with_effect(
        DamageEffect::new(DamageFormula::weapon_plus(DiceSpec::new(1, 6), 1)),
        EffectTarget::SelectedTarget,
    );
    let request = SkillUse::new(convoy.raider, convoy.hauler).from_component(convoy.autocannon);

    // Natural 20; 1d8 twice [5, 3], 1d6 twice [4, 2]; +2 weapon +1 skill once
    let applied = run(&executor, &mut convoy, &skill, request, vec![20, 5, 3, 4, 2], &mut log);

    assert!(applied);
    let action = log.last_action().unwrap();
    assert_eq!(action.total_damage(), 17);
    assert_eq!(action.succeeded(), Some(true));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 43);

    let critical = action.events.iter().any(|e| {
        matches!(e, CombatEvent::Damage { critical: true, damage_type: DamageType::Kinetic, .. })
    });
    assert!(critical);
}

#[test]
fn test_attack_uses_caster_and_weapon_bonus() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let skill = Skill::new("shot", "Shot", RollType::AttackRoll)
        .with_effect(DamageEffect::new(DamageFormula::weapon()), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler).from_component(convoy.autocannon);

    // The autocannon has no AttackBonus of its own: 11 + 0 caster + 1 weapon = 12 vs 14
    assert!(!run(&executor, &mut convoy, &skill, request, vec![11], &mut log));
    // 13 + 1 = 14 meets AC 14
    assert!(run(&executor, &mut convoy, &skill, request, vec![13, 6], &mut log));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 52);
}

#[test]
fn test_save_meets_dc_blocks_effects() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let skill = Skill::new("shock", "Shock", RollType::SavingThrow)
        .with_save(Attribute::Stability, 15)
        .with_effect(DamageEffect::new(flat_damage(6)), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler);

    // 12 + 3 = 15 vs DC 15: saved
    assert!(!run(&executor, &mut convoy, &skill, request, vec![12], &mut log));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 60);
    assert_eq!(log.last_action().unwrap().succeeded(), Some(false));

    // 11 + 3 = 14: failed
    assert!(run(&executor, &mut convoy, &skill, request, vec![11], &mut log));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 54);
}

#[test]
fn test_component_hit_is_a_single_roll() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let skill = Skill::new("snipe", "Snipe", RollType::AttackRoll)
        .with_component_targeting(3)
        .with_effect(DamageEffect::new(flat_damage(5)), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler).at_component(convoy.treads);

    // 15 + 2 = 17 vs Treads AC 16
    assert!(run(&executor, &mut convoy, &skill, request, vec![15], &mut log));
    assert_eq!(attack_stages(&log), vec![AttackStage::Component]);
    assert_eq!(health(&convoy, convoy.hauler, convoy.treads), 15);
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 60);
}

#[test]
fn test_component_miss_rolls_against_chassis_with_penalty() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let skill = Skill::new("snipe", "Snipe", RollType::AttackRoll)
        .with_component_targeting(3)
        .with_effect(DamageEffect::new(flat_damage(5)), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler).at_component(convoy.treads);

    // 3 + 2 misses the treads; 15 + 2 - 3 = 14 meets the hull
    assert!(run(&executor, &mut convoy, &skill, request, vec![3, 15], &mut log));
    assert_eq!(
        attack_stages(&log),
        vec![AttackStage::Component, AttackStage::ChassisFallback]
    );
    assert_eq!(health(&convoy, convoy.hauler, convoy.treads), 20);
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 55);
}

#[test]
fn test_default_penalty_applies_when_skill_sets_none() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let mut skill = Skill::new("snipe", "Snipe", RollType::AttackRoll)
        .with_effect(DamageEffect::new(flat_damage(5)), EffectTarget::SelectedTarget);
    skill.allows_component_targeting = true;
    let request = SkillUse::new(convoy.raider, convoy.hauler).at_component(convoy.treads);

    // 15 + 2 - 5 = 12 vs AC 14
    assert!(!run(&executor, &mut convoy, &skill, request, vec![3, 15], &mut log));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 60);
}

#[test]
fn test_internal_component_gated_for_enemies_but_not_owner() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let strike = Skill::new("strike", "Strike", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(3)), EffectTarget::SelectedTarget);
    let at_bay = SkillUse::new(convoy.raider, convoy.hauler).at_component(convoy.reactor_bay);

    let mut roller = ScriptedRoller::default();
    let err = executor
        .try_execute(&strike, &at_bay, &mut convoy.stage, &mut roller, &mut log)
        .unwrap_err();
    assert!(matches!(
        err,
        SkillError::ComponentInaccessible(InaccessibilityReason::Internal { .. })
    ));

    // The owner reaches its own internals
    let vent = Skill::new("vent", "Vent", RollType::None)
        .with_targeting(TargetingMode::SelfOnly)
        .with_effect(DamageEffect::new(flat_damage(2)), EffectTarget::SelectedTarget);
    let own_bay = SkillUse::on_self(convoy.hauler).at_component(convoy.reactor_bay);
    assert!(run(&executor, &mut convoy, &vent, own_bay, Vec::new(), &mut log));
    assert_eq!(health(&convoy, convoy.hauler, convoy.reactor_bay), 8);

    // Half the hull gone opens the bay up
    let breach = Skill::new("breach", "Breach", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(30)), EffectTarget::SelectedTarget);
    let at_hull = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(run(&executor, &mut convoy, &breach, at_hull, Vec::new(), &mut log));
    assert!(run(&executor, &mut convoy, &strike, at_bay, Vec::new(), &mut log));
    assert_eq!(health(&convoy, convoy.hauler, convoy.reactor_bay), 5);
}

#[test]
fn test_validation_failure_is_logged_and_returns_false() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let skill = Skill::new("nova", "Nova", RollType::None)
        .with_energy_cost(20)
        .with_effect(DamageEffect::new(flat_damage(50)), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler);

    let mut roller = ScriptedRoller::default();
    assert_eq!(
        executor.try_execute(&skill, &request, &mut convoy.stage, &mut roller, &mut log),
        Err(SkillError::InsufficientEnergy {
            required: 20,
            available: 10
        })
    );
    assert!(!run(&executor, &mut convoy, &skill, request, Vec::new(), &mut log));

    assert!(log.actions().is_empty());
    assert!(log
        .loose_events()
        .iter()
        .all(|e| matches!(e, CombatEvent::ValidationFailed { .. })));
    assert_eq!(log.loose_events().len(), 2);
    assert!(log.entries().iter().all(|e| e.event_type == LogEventType::Validation));
    assert!(log
        .entries()
        .iter()
        .all(|e| e.location.as_deref() == Some("stage 0 lane 0")));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 60);
}

#[test]
fn test_targeting_mode_and_missing_target() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let mut roller = ScriptedRoller::default();
    let repair = Skill::new("repair", "Repair", RollType::None)
        .with_targeting(TargetingMode::Ally)
        .with_effect(
            ResourceRestorationEffect::new(ResourceKind::Health, 5),
            EffectTarget::SelectedTarget,
        );

    let on_enemy = SkillUse::new(convoy.raider, convoy.hauler);
    assert_eq!(
        executor.try_execute(&repair, &on_enemy, &mut convoy.stage, &mut roller, &mut log),
        Err(SkillError::InvalidTarget(TargetingMode::Ally))
    );

    let mut nobody = SkillUse::on_self(convoy.raider);
    nobody.target = None;
    assert_eq!(
        executor.try_execute(&repair, &nobody, &mut convoy.stage, &mut roller, &mut log),
        Err(SkillError::MissingTarget)
    );
}

#[test]
fn test_energy_cost_spent_before_effects() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let siphon = Skill::new("siphon", "Siphon", RollType::None)
        .with_targeting(TargetingMode::SelfOnly)
        .with_energy_cost(5)
        .with_effect(
            ResourceRestorationEffect::new(ResourceKind::Energy, -20),
            EffectTarget::SourceVehicle,
        );

    let request = SkillUse::on_self(convoy.raider);
    assert!(run(&executor, &mut convoy, &siphon, request, Vec::new(), &mut log));

    let restored = log.last_action().unwrap().events.iter().find_map(|e| match e {
        CombatEvent::Restoration {
            requested,
            actual,
            current,
            ..
        } => Some((*requested, *actual, *current)),
        _ => None,
    });
    assert_eq!(restored, Some((-20, -5, 0)));
    assert_eq!(convoy.stage.vehicle(convoy.raider).unwrap().energy(), 0);
}

#[test]
fn test_health_restoration_clamps_to_max() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let dent = Skill::new("dent", "Dent", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(10)), EffectTarget::SelectedTarget);
    let patch = Skill::new("patch", "Patch", RollType::None)
        .with_targeting(TargetingMode::Ally)
        .with_effect(
            ResourceRestorationEffect::new(ResourceKind::Health, 50),
            EffectTarget::SelectedTarget,
        );

    let attack = SkillUse::new(convoy.raider, convoy.hauler);
    let self_repair = SkillUse::on_self(convoy.hauler);
    assert!(run(&executor, &mut convoy, &dent, attack, Vec::new(), &mut log));
    assert!(run(&executor, &mut convoy, &patch, self_repair, Vec::new(), &mut log));

    let actual = log.last_action().unwrap().events.iter().find_map(|e| match e {
        CombatEvent::Restoration { actual, .. } => Some(*actual),
        _ => None,
    });
    assert_eq!(actual, Some(10));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 60);
}

#[test]
fn test_status_routes_to_component_and_stuns() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let slick = Skill::new("slick", "Slick", RollType::None).with_effect(
        ApplyStatusEffect::new("immobilized"),
        EffectTarget::TargetVehicle,
    );
    let stun = Skill::new("stun", "Stun", RollType::None)
        .with_effect(ApplyStatusEffect::new("stunned"), EffectTarget::TargetVehicle);

    let request = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(run(&executor, &mut convoy, &slick, request, Vec::new(), &mut log));
    let hauler = convoy.stage.vehicle(convoy.hauler).unwrap();
    assert!(hauler.component(convoy.treads).unwrap().has_status("immobilized"));
    assert!(!hauler.can_move());

    assert!(run(&executor, &mut convoy, &stun, request, Vec::new(), &mut log));
    let mut roller = ScriptedRoller::default();
    let err = executor
        .try_execute(&stun, &SkillUse::new(convoy.hauler, convoy.raider), &mut convoy.stage, &mut roller, &mut log)
        .unwrap_err();
    assert!(matches!(err, SkillError::UserCannotAct(_)));
}

#[test]
fn test_position_change_blocked_by_immobilized() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let pin = Skill::new("pin", "Pin", RollType::None).with_effect(
        ApplyStatusEffect::new("immobilized"),
        EffectTarget::TargetVehicle,
    );
    let swerve = Skill::new("swerve", "Swerve", RollType::None)
        .with_targeting(TargetingMode::SelfOnly)
        .with_effect(PositionChangeEffect::new(0, 1), EffectTarget::SourceVehicle);

    let raider_swerves = SkillUse::on_self(convoy.raider);
    let hauler_swerves = SkillUse::on_self(convoy.hauler);
    let pin_hauler = SkillUse::new(convoy.raider, convoy.hauler);

    assert!(run(&executor, &mut convoy, &swerve, raider_swerves, Vec::new(), &mut log));
    assert_eq!(convoy.stage.vehicle(convoy.raider).unwrap().position, StagePosition::new(0, 1));

    assert!(run(&executor, &mut convoy, &pin, pin_hauler, Vec::new(), &mut log));
    // The resolver still succeeds; the effect itself is skipped
    assert!(run(&executor, &mut convoy, &swerve, hauler_swerves, Vec::new(), &mut log));
    assert_eq!(convoy.stage.vehicle(convoy.hauler).unwrap().position, StagePosition::new(0, 0));
    let skipped = log
        .last_action()
        .unwrap()
        .count(|e| matches!(e, CombatEvent::EffectSkipped { .. }));
    assert_eq!(skipped, 1);
}

#[test]
fn test_opposed_hack_disables_component() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let hack = Skill::new("hack", "Hack", RollType::OpposedCheck)
        .with_opposed(Attribute::Systems, Attribute::Systems)
        .with_effect(CustomCommandEffect::new("disable_component", 0), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler).at_component(convoy.treads);

    // Treads have no Systems: 10 + 1 vs 10 + 0 wins
    assert!(run(&executor, &mut convoy, &hack, request, vec![10, 10], &mut log));
    let treads = convoy.stage.component(ComponentRef::new(convoy.hauler, convoy.treads)).unwrap();
    assert!(treads.is_disabled);
    assert!(!treads.can_act());

    // Against the hull: 10 + 1 vs 10 + 1 ties, defender wins
    let at_hull = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(!run(&executor, &mut convoy, &hack, at_hull, vec![10, 10], &mut log));
    assert!(!convoy.stage.component(ComponentRef::chassis(convoy.hauler)).unwrap().is_disabled);
}

struct Overheat;

impl CommandHandler for Overheat {
    fn execute(
        &self,
        _ctx: &SkillContext<'_>,
        target: ComponentRef,
        value: i32,
        stage: &mut Stage,
        _log: &mut dyn CombatLog,
    ) -> EffectOutcome {
        match stage.vehicle_mut(target.vehicle) {
            Some(vehicle) => {
                vehicle.restore_energy(-value);
                EffectOutcome::Command
            }
            None => EffectOutcome::skipped("no vehicle"),
        }
    }
}

#[test]
fn test_custom_command_dispatch() {
    let mut convoy = convoy();
    let mut executor = SkillExecutor::with_defaults();
    executor.rules_mut().commands.register("overheat", Overheat);
    let mut log = MemoryLog::new();

    let request = SkillUse::new(convoy.raider, convoy.hauler);

    let overheat = Skill::new("overheat", "Overheat", RollType::None)
        .with_effect(CustomCommandEffect::new("overheat", 4), EffectTarget::TargetVehicle);
    assert!(run(&executor, &mut convoy, &overheat, request, Vec::new(), &mut log));
    assert_eq!(convoy.stage.vehicle(convoy.hauler).unwrap().energy(), 6);
    assert_eq!(
        log.last_action().unwrap().count(|e| matches!(e, CombatEvent::Command { .. })),
        1
    );

    let unknown = Skill::new("glitch", "Glitch", RollType::None)
        .with_effect(CustomCommandEffect::new("glitch", 0), EffectTarget::TargetVehicle);
    assert!(run(&executor, &mut convoy, &unknown, request, Vec::new(), &mut log));
    assert_eq!(
        log.last_action().unwrap().count(|e| matches!(e, CombatEvent::EffectSkipped { .. })),
        1
    );
}

#[test]
fn test_area_targets_stay_in_stage() {
    let mut convoy = convoy();
    let straggler = convoy.stage.add_vehicle(
        Vehicle::standard("Straggler", TeamId(2), 30, 12, 5).at(StagePosition::new(1, 0)),
    );
    let escort = convoy
        .stage
        .add_vehicle(Vehicle::standard("Escort", TeamId(2), 30, 12, 5));
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();

    let flak = Skill::new("flak", "Flak", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(4)), EffectTarget::AllEnemiesInStage);
    let request = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(run(&executor, &mut convoy, &flak, request, Vec::new(), &mut log));

    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 56);
    assert_eq!(health(&convoy, escort, ComponentId::CHASSIS), 26);
    assert_eq!(health(&convoy, straggler, ComponentId::CHASSIS), 30);
    assert_eq!(health(&convoy, convoy.raider, ComponentId::CHASSIS), 40);
    assert_eq!(log.last_action().unwrap().total_damage(), 8);
}

#[test]
fn test_both_hits_user_and_target_once_each() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let burn = Skill::new("burn", "Burn", RollType::None).with_effect(
        DamageEffect::new(DamageFormula::skill(DiceSpec::none(), 3, DamageType::Fire)),
        EffectTarget::Both,
    );

    let request = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(run(&executor, &mut convoy, &burn, request, Vec::new(), &mut log));
    assert_eq!(health(&convoy, convoy.raider, ComponentId::CHASSIS), 37);
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 57);

    // On oneself the two references collapse into one
    let on_self = SkillUse::on_self(convoy.raider);
    assert!(run(&executor, &mut convoy, &burn, on_self, Vec::new(), &mut log));
    assert_eq!(health(&convoy, convoy.raider, ComponentId::CHASSIS), 34);
}

#[test]
fn test_action_summary_reads_as_one_event() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let mut log = MemoryLog::new();
    let ram = Skill::new("ram", "Ram", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(12)), EffectTarget::SelectedTarget)
        .with_effect(
            ResourceRestorationEffect::new(ResourceKind::Energy, 5),
            EffectTarget::SourceVehicle,
        );
    convoy.stage.vehicle_mut(convoy.raider).unwrap().restore_energy(-5);

    let request = SkillUse::new(convoy.raider, convoy.hauler);
    assert!(run(&executor, &mut convoy, &ram, request, Vec::new(), &mut log));
    assert_eq!(
        log.last_action().unwrap().summary(),
        "Raider uses Ram on Hauler Hull: deals 12 damage and restores 5 energy"
    );
    assert!(!log.in_action());
}

#[test]
fn test_any_sink_can_observe_resolution() {
    let mut convoy = convoy();
    let executor = SkillExecutor::with_defaults();
    let strike = Skill::new("strike", "Strike", RollType::None)
        .with_effect(DamageEffect::new(flat_damage(7)), EffectTarget::SelectedTarget);
    let request = SkillUse::new(convoy.raider, convoy.hauler);
    let mut roller = ScriptedRoller::default();

    let mut tracing_log = skill_core::TracingLog;
    assert!(executor.execute(&strike, &request, &mut convoy.stage, &mut roller, &mut tracing_log));
    let mut null_log = skill_core::NullLog;
    assert!(executor.execute(&strike, &request, &mut convoy.stage, &mut roller, &mut null_log));
    assert_eq!(health(&convoy, convoy.hauler, ComponentId::CHASSIS), 46);
}
