//! Stage - Arena owning every vehicle in an encounter

use super::{Component, Vehicle};
use crate::config::CombatConstants;
use crate::log::CombatLog;
use crate::types::{ComponentRef, VehicleId};

/// All vehicles taking part in an encounter
#[derive(Debug, Clone, Default)]
pub struct Stage {
    vehicles: Vec<Vehicle>,
    /// Internal gate handed to components that join without one
    internal_access_threshold: Option<f64>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty stage whose vehicles take their defaults from `constants`
    pub fn with_constants(constants: &CombatConstants) -> Self {
        Stage {
            vehicles: Vec::new(),
            internal_access_threshold: Some(constants.default_internal_access_threshold),
        }
    }

    /// Add a vehicle, returning its id
    pub fn add_vehicle(&mut self, mut vehicle: Vehicle) -> VehicleId {
        let id = VehicleId(self.vehicles.len());
        vehicle.id = id;
        if let Some(threshold) = self.internal_access_threshold {
            vehicle.fill_internal_threshold(threshold);
        }
        self.vehicles.push(vehicle);
        id
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.0)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.0)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn component(&self, at: ComponentRef) -> Option<&Component> {
        self.vehicle(at.vehicle)?.component(at.component)
    }

    pub fn component_mut(&mut self, at: ComponentRef) -> Option<&mut Component> {
        self.vehicle_mut(at.vehicle)?.component_mut(at.component)
    }

    /// "Raider Chassis", or "?" for a dangling reference
    pub fn describe(&self, at: ComponentRef) -> String {
        match (self.vehicle(at.vehicle), self.component(at)) {
            (Some(v), Some(c)) => format!("{} {}", v.name, c.name),
            (Some(v), None) => v.name.clone(),
            _ => "?".to_string(),
        }
    }

    /// Active opponents sharing the vehicle's stage
    pub fn enemies_in_stage(&self, of: VehicleId) -> Vec<VehicleId> {
        let Some(me) = self.vehicle(of) else {
            return Vec::new();
        };
        self.vehicles
            .iter()
            .filter(|v| v.is_active() && v.team != me.team && v.position.stage == me.position.stage)
            .map(|v| v.id)
            .collect()
    }

    /// Active teammates sharing the vehicle's stage, itself included
    pub fn allies_in_stage(&self, of: VehicleId) -> Vec<VehicleId> {
        let Some(me) = self.vehicle(of) else {
            return Vec::new();
        };
        self.vehicles
            .iter()
            .filter(|v| v.is_active() && v.team == me.team && v.position.stage == me.position.stage)
            .map(|v| v.id)
            .collect()
    }

    /// Vehicles still in the fight
    pub fn active_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.is_active())
    }

    /// Turn-end update for every surviving vehicle
    pub fn end_turn(&mut self, log: &mut dyn CombatLog) {
        for vehicle in self.vehicles.iter_mut().filter(|v| v.is_active()) {
            vehicle.end_turn(log);
        }
    }
}
