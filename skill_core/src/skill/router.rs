//! VehicleEffectRouter - Picks the component an effect lands on when a whole
//! vehicle is targeted

use crate::effect::Effect;
use crate::status::StatusEffectRegistry;
use crate::types::{Attribute, ComponentId, ComponentType};
use crate::vehicle::Vehicle;

/// Total routing from effects and attributes to components
pub struct VehicleEffectRouter;

impl VehicleEffectRouter {
    /// Which component role carries an attribute
    pub fn rule_for(attribute: Attribute) -> ComponentType {
        match attribute {
            Attribute::MaxHealth | Attribute::ArmorClass | Attribute::Stability => ComponentType::Chassis,
            Attribute::Speed | Attribute::Acceleration | Attribute::Mobility => ComponentType::Drive,
            Attribute::MaxEnergy | Attribute::EnergyRegen | Attribute::Systems => ComponentType::PowerCore,
            Attribute::AttackBonus => ComponentType::Weapon,
            Attribute::Perception => ComponentType::Utility,
            Attribute::SkillDcBonus => ComponentType::Chassis,
        }
    }

    /// First surviving component for the attribute's role, else the chassis
    pub fn resolve_modifier_target(vehicle: &Vehicle, attribute: Attribute) -> ComponentId {
        let role = Self::rule_for(attribute);
        vehicle.first_of_type(role).unwrap_or(ComponentId::CHASSIS)
    }

    /// Component an effect aimed at `vehicle` applies to
    pub fn route(effect: &Effect, vehicle: &Vehicle, statuses: &StatusEffectRegistry) -> ComponentId {
        let routed = match effect {
            Effect::Damage(_) => ComponentId::CHASSIS,
            // energy lives in a vehicle-wide pool; the chassis is the handle
            Effect::ResourceRestoration(_) => ComponentId::CHASSIS,
            Effect::AttributeModifier(e) => Self::resolve_modifier_target(vehicle, e.modifier.attribute),
            Effect::ApplyStatus(e) => statuses
                .get(&e.status_id)
                .and_then(|t| t.primary_attribute())
                .map(|attribute| Self::resolve_modifier_target(vehicle, attribute))
                .unwrap_or(ComponentId::CHASSIS),
            Effect::PositionChange(_) | Effect::CustomCommand(_) => ComponentId::CHASSIS,
        };
        tracing::debug!(effect = effect.name(), vehicle = %vehicle.name, component = routed.0, "routed");
        routed
    }
}
