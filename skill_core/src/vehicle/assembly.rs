//! Vehicle - A composed target owning a chassis, a power core and optional parts

use super::component::Component;
use crate::log::CombatLog;
use crate::types::{
    Attribute, ComponentId, ComponentType, EntityStatus, StagePosition, TeamId, VehicleId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Construction errors
#[derive(Debug, Error, PartialEq)]
pub enum VehicleError {
    #[error("{slot} slot needs a {expected} component, got {found}")]
    WrongKind {
        slot: &'static str,
        expected: ComponentType,
        found: ComponentType,
    },
}

/// A vehicle on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Assigned by the stage on insertion
    pub id: VehicleId,
    pub name: String,
    pub team: TeamId,
    pub position: StagePosition,
    pub status: EntityStatus,
    components: Vec<Component>,
    energy: i32,
}

impl Vehicle {
    /// Build a vehicle from its two mandatory parts
    pub fn new(
        name: &str,
        team: TeamId,
        chassis: Component,
        power_core: Component,
    ) -> Result<Self, VehicleError> {
        if chassis.component_type() != ComponentType::Chassis {
            return Err(VehicleError::WrongKind {
                slot: "chassis",
                expected: ComponentType::Chassis,
                found: chassis.component_type(),
            });
        }
        if power_core.component_type() != ComponentType::PowerCore {
            return Err(VehicleError::WrongKind {
                slot: "power core",
                expected: ComponentType::PowerCore,
                found: power_core.component_type(),
            });
        }

        let mut vehicle = Self::bare(name, team);
        vehicle.add_component(chassis);
        vehicle.add_component(power_core);
        vehicle.energy = vehicle.max_energy();
        Ok(vehicle)
    }

    /// Vehicle with a default chassis and power core
    pub fn standard(name: &str, team: TeamId, chassis_health: i32, armor_class: i32, max_energy: i32) -> Self {
        let mut vehicle = Self::bare(name, team);
        vehicle.add_component(Component::chassis("Chassis", chassis_health, armor_class));
        vehicle.add_component(Component::power_core("Power Core", 20, armor_class, max_energy));
        vehicle.energy = vehicle.max_energy();
        vehicle
    }

    fn bare(name: &str, team: TeamId) -> Self {
        Vehicle {
            id: VehicleId(0),
            name: name.to_string(),
            team,
            position: StagePosition::default(),
            status: EntityStatus::Active,
            components: Vec::new(),
            energy: 0,
        }
    }

    pub fn at(mut self, position: StagePosition) -> Self {
        self.position = position;
        self
    }

    /// Install an optional part, returning its slot
    pub fn add_component(&mut self, mut component: Component) -> ComponentId {
        let id = ComponentId(self.components.len());
        component.id = id;
        self.components.push(component);
        id
    }

    // === Components ===

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.0)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn chassis(&self) -> &Component {
        &self.components[ComponentId::CHASSIS.0]
    }

    pub fn chassis_mut(&mut self) -> &mut Component {
        &mut self.components[ComponentId::CHASSIS.0]
    }

    pub fn power_core(&self) -> &Component {
        &self.components[ComponentId::POWER_CORE.0]
    }

    /// First surviving component of a given role
    pub fn first_of_type(&self, component_type: ComponentType) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|c| c.component_type() == component_type && !c.is_destroyed())
            .map(|c| c.id)
    }

    // === Status ===

    pub fn is_active(&self) -> bool {
        self.status == EntityStatus::Active
    }

    pub fn is_destroyed(&self) -> bool {
        self.status == EntityStatus::Destroyed
    }

    /// Propagate chassis destruction to the whole vehicle
    /// Give every component without its own internal gate `threshold`
    pub(crate) fn fill_internal_threshold(&mut self, threshold: f64) {
        for component in &mut self.components {
            if component.internal_access_threshold.is_none() {
                component.internal_access_threshold = Some(threshold);
            }
        }
    }

    pub(crate) fn sync_status(&mut self) {
        if self.chassis().is_destroyed() {
            self.status = EntityStatus::Destroyed;
        }
    }

    /// Whether the vehicle may use skills at all
    pub fn can_act(&self) -> bool {
        self.is_active() && self.chassis().can_act()
    }

    /// Whether the vehicle may change position
    pub fn can_move(&self) -> bool {
        if !self.is_active() || self.chassis().prevents_movement() {
            return false;
        }
        !self
            .components
            .iter()
            .any(|c| c.component_type() == ComponentType::Drive && !c.is_destroyed() && c.prevents_movement())
    }

    // === Energy ===

    /// Current pool, never above the current maximum
    pub fn energy(&self) -> i32 {
        self.energy.min(self.max_energy())
    }

    /// Pool size; zero once the power core is gone
    pub fn max_energy(&self) -> i32 {
        let core = self.power_core();
        if core.is_destroyed() {
            0
        } else {
            core.effective_int(Attribute::MaxEnergy).max(0)
        }
    }

    /// Change the pool by `delta`, clamped to `0..=max_energy`. Returns the actual change.
    pub fn restore_energy(&mut self, delta: i32) -> i32 {
        let current = self.energy();
        let target = (current as i64 + delta as i64).clamp(0, self.max_energy() as i64) as i32;
        let actual = target - current;
        self.energy = target;
        actual
    }

    // === Turn update ===

    /// Turn-end pass over every component, then energy regeneration
    pub fn end_turn(&mut self, log: &mut dyn CombatLog) {
        for component in self.components.iter_mut() {
            if !component.is_destroyed() {
                component.end_turn(&self.name, log);
            }
        }

        let regen = {
            let core = self.power_core();
            if core.is_destroyed() {
                0
            } else {
                core.effective_int(Attribute::EnergyRegen)
            }
        };
        // Also re-clamps after MaxEnergy modifiers expire
        let gained = self.restore_energy(regen);
        if gained != 0 {
            tracing::debug!(vehicle = %self.name, gained, energy = self.energy, "energy regenerated");
        }
    }
}
