//! DamageApplicator - The single point where combat damage reduces health

use super::DamageResult;
use crate::log::{CombatEvent, CombatLog, Importance, LogEntry, LogEventType};
use crate::types::{ComponentId, ComponentRef, DamageSource, VehicleId};
use crate::vehicle::Stage;

/// Applies resolved damage to a component
pub struct DamageApplicator;

impl DamageApplicator {
    /// Subtract `final_damage` from the target and handle destruction.
    ///
    /// Damage to a missing or already destroyed component is a no-op that
    /// reports zero applied damage. `cause` names the skill for the history
    /// and `source` says whether the skill or a weapon delivered the hit.
    pub fn apply(
        mut result: DamageResult,
        stage: &mut Stage,
        target: ComponentRef,
        attacker: Option<VehicleId>,
        cause: &str,
        source: DamageSource,
        log: &mut dyn CombatLog,
    ) -> DamageResult {
        let label = stage.describe(target);
        let attacker_name = attacker
            .and_then(|id| stage.vehicle(id))
            .map(|v| v.name.clone());

        let Some(vehicle) = stage.vehicle_mut(target.vehicle) else {
            return result;
        };
        let Some(component) = vehicle.component_mut(target.component) else {
            return result;
        };
        if component.is_destroyed() {
            tracing::debug!(target = %label, "damage on destroyed component ignored");
            log.emit(CombatEvent::EffectSkipped {
                target: label,
                reason: "already destroyed".to_string(),
            });
            return result;
        }

        let (applied, destroyed) = component.take_damage(result.final_damage);
        result.applied = applied;
        result.destroyed = destroyed;

        if destroyed {
            vehicle.sync_status();
        }
        let vehicle_destroyed = destroyed && target.component == ComponentId::CHASSIS;
        let vehicle_name = vehicle.name.clone();
        let position = vehicle.position;

        tracing::debug!(
            target = %label,
            %source,
            raw = result.raw_total,
            resistance = ?result.resistance,
            requested = result.final_damage,
            applied,
            destroyed,
            "damage applied"
        );

        log.emit(CombatEvent::Damage {
            target: label.clone(),
            source,
            damage_type: result.damage_type,
            raw: result.raw_total,
            resistance: result.resistance,
            requested: result.final_damage,
            actual: applied,
            critical: result.critical,
            destroyed,
        });

        if destroyed {
            let (importance, message) = if vehicle_destroyed {
                (Importance::Critical, format!("{} is destroyed", vehicle_name))
            } else {
                (Importance::High, format!("{} is destroyed", label))
            };
            let mut entry = LogEntry::new(LogEventType::Destruction, importance, message)
                .at(position.to_string())
                .with_participant(vehicle_name)
                .with_metadata("cause", cause)
                .with_metadata("source", source.to_string())
                .with_metadata("damage", applied);
            if let Some(name) = attacker_name {
                entry = entry.with_participant(name);
            }
            log.log(entry);
        }

        result
    }
}
