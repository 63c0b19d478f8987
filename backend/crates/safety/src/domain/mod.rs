//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{hazard::Hazard, safety_card::SafetyCard};
pub use repository::{HazardRepository, SafetyCardRepository};
