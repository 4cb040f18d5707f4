//! Core types shared across the skill pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a vehicle inside a [`Stage`](crate::vehicle::Stage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub usize);

/// Index of a component inside its owning vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub usize);

impl ComponentId {
    /// Every vehicle's chassis lives in slot 0
    pub const CHASSIS: ComponentId = ComponentId(0);
    /// Every vehicle's power core lives in slot 1
    pub const POWER_CORE: ComponentId = ComponentId(1);
}

/// Team a vehicle fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

/// A fully-qualified component address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    pub vehicle: VehicleId,
    pub component: ComponentId,
}

impl ComponentRef {
    pub fn new(vehicle: VehicleId, component: ComponentId) -> Self {
        ComponentRef { vehicle, component }
    }

    /// The chassis of the given vehicle
    pub fn chassis(vehicle: VehicleId) -> Self {
        ComponentRef {
            vehicle,
            component: ComponentId::CHASSIS,
        }
    }
}

/// Attributes a component can carry and modifiers can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    // Structure
    MaxHealth,
    ArmorClass,
    Stability,
    // Locomotion
    Speed,
    Acceleration,
    Mobility,
    // Power
    MaxEnergy,
    EnergyRegen,
    Systems,
    // Offense
    AttackBonus,
    // Sensors
    Perception,
    // Crew
    SkillDcBonus,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::MaxHealth,
            Attribute::ArmorClass,
            Attribute::Stability,
            Attribute::Speed,
            Attribute::Acceleration,
            Attribute::Mobility,
            Attribute::MaxEnergy,
            Attribute::EnergyRegen,
            Attribute::Systems,
            Attribute::AttackBonus,
            Attribute::Perception,
            Attribute::SkillDcBonus,
        ]
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::MaxHealth => "Max Health",
            Attribute::ArmorClass => "Armor Class",
            Attribute::Stability => "Stability",
            Attribute::Speed => "Speed",
            Attribute::Acceleration => "Acceleration",
            Attribute::Mobility => "Mobility",
            Attribute::MaxEnergy => "Max Energy",
            Attribute::EnergyRegen => "Energy Regen",
            Attribute::Systems => "Systems",
            Attribute::AttackBonus => "Attack Bonus",
            Attribute::Perception => "Perception",
            Attribute::SkillDcBonus => "Skill DC Bonus",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Damage types for resistances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Kinetic,
    Explosive,
    Energy,
    Fire,
    Electric,
    Corrosive,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DamageType::Kinetic => "kinetic",
            DamageType::Explosive => "explosive",
            DamageType::Energy => "energy",
            DamageType::Fire => "fire",
            DamageType::Electric => "electric",
            DamageType::Corrosive => "corrosive",
        };
        f.write_str(name)
    }
}

/// What delivered a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSource {
    /// The skill's own payload
    Skill,
    /// The acting weapon's dice
    Weapon,
}

impl fmt::Display for DamageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DamageSource::Skill => "skill",
            DamageSource::Weapon => "weapon",
        })
    }
}

/// Categorical damage modifier on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceLevel {
    #[default]
    Normal,
    Resistant,
    Vulnerable,
    Immune,
}

/// Role of a component within a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Chassis,
    PowerCore,
    Drive,
    Weapon,
    Utility,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::Chassis => "chassis",
            ComponentType::PowerCore => "power core",
            ComponentType::Drive => "drive",
            ComponentType::Weapon => "weapon",
            ComponentType::Utility => "utility",
        };
        f.write_str(name)
    }
}

/// How reachable a component is for hostile targeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentExposure {
    #[default]
    External,
    Protected,
    Internal,
    Shielded,
}

/// Lifecycle status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    #[default]
    Active,
    Destroyed,
}

/// Restorable resource pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Energy,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Health => f.write_str("health"),
            ResourceKind::Energy => f.write_str("energy"),
        }
    }
}

/// Where a vehicle sits on the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StagePosition {
    pub stage: u32,
    pub lane: i32,
}

impl StagePosition {
    pub fn new(stage: u32, lane: i32) -> Self {
        StagePosition { stage, lane }
    }
}

impl fmt::Display for StagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {} lane {}", self.stage, self.lane)
    }
}
