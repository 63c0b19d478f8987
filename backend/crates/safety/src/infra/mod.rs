//! Infrastructure Layer

pub mod document;

pub use document::{DocHazardRepository, DocSafetyCardRepository};
