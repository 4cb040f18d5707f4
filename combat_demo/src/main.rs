//! Scripted duel between two vehicles
//!
//! Usage: combat_demo [seed] [skills.toml]
//!
//! Set RUST_LOG=skill_core=debug to trace rolls and routing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skill_core::config::load_skill_configs;
use skill_core::dice::DiceSpec;
use skill_core::{
    default_skills, Attribute, AttributeModifier, CombatEvent, Component,
    ComponentExposure, ComponentId, DamageType, MemoryLog, ModifierSource, ResistanceLevel,
    RngRoller, Skill, SkillExecutor, SkillUse, Stage, TeamId, Vehicle, VehicleId, WeaponProfile,
};
use std::collections::HashMap;
use std::path::Path;

const ROUNDS: usize = 8;

/// Who a planned skill is aimed at
#[derive(Debug, Clone, Copy)]
enum Aim {
    Opponent,
    OpponentComponent(ComponentId),
    Own,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    skill: &'static str,
    aim: Aim,
    source: Option<ComponentId>,
}

impl Step {
    fn new(skill: &'static str, aim: Aim) -> Self {
        Step {
            skill,
            aim,
            source: None,
        }
    }

    fn using(mut self, component: ComponentId) -> Self {
        self.source = Some(component);
        self
    }

    fn request(&self, user: VehicleId, opponent: VehicleId) -> SkillUse {
        let request = match self.aim {
            Aim::Opponent => SkillUse::new(user, opponent),
            Aim::OpponentComponent(component) => SkillUse::new(user, opponent).at_component(component),
            Aim::Own => SkillUse::on_self(user),
        };
        match self.source {
            Some(component) => request.from_component(component),
            None => request,
        }
    }
}

struct Combatant {
    id: VehicleId,
    plan: Vec<Step>,
}

fn build_raider() -> (Vehicle, ComponentId) {
    let mut raider = Vehicle::standard("Raider", TeamId(1), 45, 14, 12);
    raider.chassis_mut().add_modifier(AttributeModifier::flat(
        Attribute::Systems,
        2.0,
        ModifierSource::Other("crew".to_string()),
    ));
    let autocannon = raider.add_component(
        Component::weapon(
            "Autocannon",
            15,
            13,
            WeaponProfile::new(DiceSpec::new(1, 8), 2, DamageType::Kinetic).with_attack_bonus(2),
        )
        .with_stat(Attribute::AttackBonus, 1.0),
    );
    raider.add_component(
        Component::utility("Fuel Line", 8, 10).with_exposure(ComponentExposure::Internal),
    );
    (raider, autocannon)
}

fn build_hauler() -> (Vehicle, ComponentId) {
    let mut hauler = Vehicle::standard("Hauler", TeamId(2), 70, 13, 10);
    let treads = hauler.add_component(
        Component::drive("Treads", 25, 15).with_resistance(DamageType::Kinetic, ResistanceLevel::Resistant),
    );
    hauler.add_component(
        Component::utility("Reactor Bay", 12, 10).with_exposure(ComponentExposure::Internal),
    );
    (hauler, treads)
}

fn load_skills(path: Option<String>) -> HashMap<String, Skill> {
    match path {
        Some(path) => match load_skill_configs(Path::new(&path)) {
            Ok(skills) => skills,
            Err(err) => {
                eprintln!("Error loading skills from '{}': {}", path, err);
                std::process::exit(1);
            }
        },
        None => default_skills(),
    }
}

fn print_vehicle(vehicle: &Vehicle) {
    println!(
        "  {} [{:?}] energy {}/{} at stage {} lane {}",
        vehicle.name,
        vehicle.status,
        vehicle.energy(),
        vehicle.max_energy(),
        vehicle.position.stage,
        vehicle.position.lane
    );
    for component in vehicle.components() {
        let statuses: Vec<String> = component
            .active_status_effects()
            .iter()
            .map(|s| format!("{} ({})", s.name, s.turns_remaining))
            .collect();
        println!(
            "    {:<12} {:>3}/{:<3} AC {:<2}{}{}",
            component.name,
            component.health(),
            component.max_health(),
            component.armor_class(),
            if component.is_disabled { " disabled" } else { "" },
            if statuses.is_empty() {
                String::new()
            } else {
                format!(" [{}]", statuses.join(", "))
            }
        );
    }
}

fn print_stage(stage: &Stage) {
    for vehicle in stage.vehicles() {
        print_vehicle(vehicle);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let skills = load_skills(args.next());

    let executor = SkillExecutor::with_defaults();

    // Components without their own internal gate take the configured one
    let mut stage = Stage::with_constants(&executor.rules().constants);
    let (raider, autocannon) = build_raider();
    let (hauler, treads) = build_hauler();
    let raider = stage.add_vehicle(raider);
    let hauler = stage.add_vehicle(hauler);

    let combatants = [
        Combatant {
            id: raider,
            plan: vec![
                Step::new("called_shot", Aim::OpponentComponent(treads)).using(autocannon),
                Step::new("oil_slick", Aim::Opponent),
                Step::new("hack", Aim::OpponentComponent(treads)),
                Step::new("power_surge", Aim::Own),
                Step::new("barrage", Aim::Opponent).using(autocannon),
                Step::new("ram", Aim::Opponent),
            ],
        },
        Combatant {
            id: hauler,
            plan: vec![
                Step::new("ram", Aim::Opponent),
                Step::new("brace", Aim::Own),
                Step::new("disruptor_pulse", Aim::Opponent),
                Step::new("field_repair", Aim::Own),
                Step::new("swerve", Aim::Own),
                Step::new("rally", Aim::Own),
            ],
        },
    ];

    let mut roller = RngRoller::new(ChaCha8Rng::seed_from_u64(seed));
    let mut log = MemoryLog::new();

    println!("=== Duel (seed {}) ===", seed);
    print_stage(&stage);

    'rounds: for round in 1..=ROUNDS {
        println!("\n--- Round {} ---", round);
        for combatant in &combatants {
            let opponent = if combatant.id == raider { hauler } else { raider };
            let step = combatant.plan[(round - 1) % combatant.plan.len()];
            let Some(skill) = skills.get(step.skill) else {
                tracing::warn!(skill = step.skill, "skill not loaded, skipping");
                continue;
            };

            let actions_before = log.actions().len();
            executor.execute(skill, &step.request(combatant.id, opponent), &mut stage, &mut roller, &mut log);

            if log.actions().len() > actions_before {
                if let Some(action) = log.last_action() {
                    println!("  {}", action.summary());
                }
            } else if let Some(CombatEvent::ValidationFailed { skill, reason }) = log.loose_events().last() {
                let name = stage.vehicle(combatant.id).map(|v| v.name.as_str()).unwrap_or("?");
                println!("  {} cannot use {}: {}", name, skill, reason);
            }

            if stage.active_vehicles().count() < 2 {
                break 'rounds;
            }
        }
        stage.end_turn(&mut log);
    }

    println!("\n=== Result ===");
    print_stage(&stage);

    let total: i32 = log.actions().iter().map(|a| a.total_damage()).sum();
    println!("\n{} actions, {} damage dealt", log.actions().len(), total);
}
