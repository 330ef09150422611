//! Domain models for the Hepascan application.

pub mod patient;
pub mod prediction;

pub use patient::{PatientInput, Sex, FEATURE_COUNT};
pub use prediction::{DiseaseClass, Outcome, PredictionResult, CLASS_COUNT};
