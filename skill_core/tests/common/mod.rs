//! Shared convoy fixture for integration tests

#![allow(dead_code)]

use skill_core::dice::DiceSpec;
use skill_core::{
    Attribute, Component, ComponentExposure, ComponentId, DamageFormula, DamageType, MemoryLog,
    ScriptedRoller, Skill, SkillExecutor, SkillUse, Stage, TeamId, Vehicle, VehicleId,
    WeaponProfile,
};

pub struct Convoy {
    pub stage: Stage,
    pub raider: VehicleId,
    pub hauler: VehicleId,
    pub autocannon: ComponentId,
    pub treads: ComponentId,
    pub reactor_bay: ComponentId,
}

/// Raider (team 1) against Hauler (team 2), both in stage 0
///
/// Raider: Frame 40hp AC14 +2 attack, Core 10 energy +2 regen,
/// Autocannon 1d8+2 kinetic with +1 to hit.
/// Hauler: Hull 60hp AC14 Stability +3 Systems +1, Treads AC16,
/// internal Reactor Bay gated at 50% chassis damage.
pub fn convoy() -> Convoy {
    let mut raider = Vehicle::new(
        "Raider",
        TeamId(1),
        Component::chassis("Frame", 40, 14)
            .with_stat(Attribute::AttackBonus, 2.0)
            .with_stat(Attribute::Systems, 1.0),
        Component::power_core("Core", 20, 12, 10).with_stat(Attribute::EnergyRegen, 2.0),
    )
    .unwrap();
    let autocannon = raider.add_component(Component::weapon(
        "Autocannon",
        12,
        13,
        WeaponProfile::new(DiceSpec::new(1, 8), 2, DamageType::Kinetic).with_attack_bonus(1),
    ));

    let mut hauler = Vehicle::new(
        "Hauler",
        TeamId(2),
        Component::chassis("Hull", 60, 14)
            .with_stat(Attribute::Stability, 3.0)
            .with_stat(Attribute::Systems, 1.0),
        Component::power_core("Core", 20, 12, 10),
    )
    .unwrap();
    let treads = hauler.add_component(Component::drive("Treads", 20, 16));
    let reactor_bay = hauler.add_component(
        Component::utility("Reactor Bay", 10, 10)
            .with_exposure(ComponentExposure::Internal)
            .with_internal_threshold(0.5),
    );

    let mut stage = Stage::new();
    let raider = stage.add_vehicle(raider);
    let hauler = stage.add_vehicle(hauler);
    Convoy {
        stage,
        raider,
        hauler,
        autocannon,
        treads,
        reactor_bay,
    }
}

/// Skill bonus only, no dice: a fixed amount of kinetic damage
pub fn flat_damage(amount: i32) -> DamageFormula {
    DamageFormula::skill(DiceSpec::none(), amount, DamageType::Kinetic)
}

/// Run one skill use with scripted faces, returning the verdict
pub fn run(
    executor: &SkillExecutor,
    convoy: &mut Convoy,
    skill: &Skill,
    request: SkillUse,
    faces: Vec<u32>,
    log: &mut MemoryLog,
) -> bool {
    let mut roller = ScriptedRoller::new(faces);
    executor.execute(skill, &request, &mut convoy.stage, &mut roller, log)
}

pub fn health(convoy: &Convoy, vehicle: VehicleId, component: ComponentId) -> i32 {
    convoy
        .stage
        .vehicle(vehicle)
        .and_then(|v| v.component(component))
        .map(|c| c.health())
        .unwrap()
}
