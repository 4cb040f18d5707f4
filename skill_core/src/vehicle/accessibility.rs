//! Component reachability for hostile targeting

use super::Vehicle;
use crate::types::{ComponentExposure, ComponentId, VehicleId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a component cannot currently be targeted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InaccessibilityReason {
    /// No component with that id
    Missing,
    Destroyed,
    /// Covered by a shield component that still stands
    Shielded { by: ComponentId },
    /// Behind a protector that still stands
    Protected { by: ComponentId },
    /// The chassis has not taken enough damage yet
    Internal { required: f64, current: f64 },
}

impl fmt::Display for InaccessibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InaccessibilityReason::Missing => write!(f, "component does not exist"),
            InaccessibilityReason::Destroyed => write!(f, "component is destroyed"),
            InaccessibilityReason::Shielded { by } => {
                write!(f, "shielded by component {}", by.0)
            }
            InaccessibilityReason::Protected { by } => {
                write!(f, "protected by component {}", by.0)
            }
            InaccessibilityReason::Internal { required, current } => write!(
                f,
                "internal: chassis must be {:.0}% damaged (currently {:.0}%)",
                required * 100.0,
                current * 100.0
            ),
        }
    }
}

impl Vehicle {
    /// Whether a hostile actor can target `id` right now
    pub fn is_component_accessible(&self, id: ComponentId) -> bool {
        self.inaccessibility_reason(id).is_none()
    }

    /// Whether `actor` can target `id`; a vehicle always reaches its own parts
    /// unless they are destroyed.
    pub fn is_component_accessible_to(&self, id: ComponentId, actor: VehicleId) -> bool {
        if actor == self.id {
            return self.component(id).is_some_and(|c| !c.is_destroyed());
        }
        self.is_component_accessible(id)
    }

    /// `None` when the component is reachable
    pub fn inaccessibility_reason(&self, id: ComponentId) -> Option<InaccessibilityReason> {
        let Some(component) = self.component(id) else {
            return Some(InaccessibilityReason::Missing);
        };
        if component.is_destroyed() {
            return Some(InaccessibilityReason::Destroyed);
        }

        match component.exposure {
            ComponentExposure::External => None,
            ComponentExposure::Shielded => match component.shielded_by {
                Some(shield) if self.is_standing(shield) => {
                    Some(InaccessibilityReason::Shielded { by: shield })
                }
                _ => None,
            },
            ComponentExposure::Protected => match component.shielded_by {
                Some(protector) if self.is_standing(protector) => {
                    Some(InaccessibilityReason::Protected { by: protector })
                }
                Some(_) => None,
                None => self.internal_gate(component.internal_threshold()),
            },
            ComponentExposure::Internal => self.internal_gate(component.internal_threshold()),
        }
    }

    fn is_standing(&self, id: ComponentId) -> bool {
        self.component(id).is_some_and(|c| !c.is_destroyed())
    }

    fn internal_gate(&self, threshold: f64) -> Option<InaccessibilityReason> {
        let current = self.chassis().damage_fraction();
        if current >= threshold {
            None
        } else {
            Some(InaccessibilityReason::Internal {
                required: threshold,
                current,
            })
        }
    }
}
