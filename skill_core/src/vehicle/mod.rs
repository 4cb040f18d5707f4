//! Vehicles - components, composed targets, reachability and the stage arena

mod accessibility;
mod assembly;
mod component;
mod stage;

pub use accessibility::InaccessibilityReason;
pub use assembly::{Vehicle, VehicleError};
pub use component::{Component, ComponentKind, DisplayStat, StatusApplication, WeaponProfile};
pub use stage::Stage;
