//! Diagnosis Oracle Port - Interface to the external symptom classifier.
//!
//! The dialogue engine never sees how a diagnosis is computed; it only needs
//! the symptom vocabulary, a deterministic prediction, and the metadata used
//! to build the final report.

use crate::domain::foundation::{DiseaseId, SymptomId};

/// Errors raised by oracle lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("Disease not indexed: {0}")]
    UnknownDisease(DiseaseId),
}

/// Port for the diagnosis classifier and its disease metadata.
pub trait DiagnosisOracle: Send + Sync {
    /// The full ordered symptom vocabulary.
    fn vocabulary(&self) -> &[SymptomId];

    /// Predicts a disease from a set of symptoms.
    ///
    /// Must be deterministic: the same symptoms always yield the same disease.
    fn predict(&self, symptoms: &[SymptomId]) -> DiseaseId;

    /// Symptoms that co-occur with `disease` in the training data.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownDisease` if the disease is not indexed.
    fn related_symptoms(&self, disease: &DiseaseId) -> Result<Vec<SymptomId>, OracleError>;

    /// Free-text description of the disease, if one is known.
    fn description(&self, disease: &DiseaseId) -> Option<String>;

    /// Ordered precautions for the disease; empty when none are known.
    fn precautions(&self, disease: &DiseaseId) -> Vec<String>;
}
