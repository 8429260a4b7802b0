//! Diagnosis report - reconciles the preliminary and final predictions.
//!
//! The preliminary prediction comes from the primary symptom alone, the
//! final one from every symptom the user confirmed. The report always lists
//! the preliminary disease first and adds the final disease only when the
//! two differ. Precautions come from the preliminary disease only.

use crate::domain::foundation::DiseaseId;
use crate::ports::DiagnosisOracle;

/// Placeholder used when the oracle has no description for a disease.
pub const MISSING_DESCRIPTION: &str = "No description available.";

/// Which symptoms the report was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportBasis {
    /// No related symptoms were asked; only the primary symptom counted.
    PrimarySymptom,
    /// The yes/no loop ran; the final prediction used every confirmed symptom.
    AllSymptoms,
}

/// A predicted disease with the description shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseFinding {
    pub disease: DiseaseId,
    pub description: String,
}

/// Everything the final reply needs, already looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisReport {
    basis: ReportBasis,
    findings: Vec<DiseaseFinding>,
    precautions: Vec<String>,
}

impl DiagnosisReport {
    /// Report for a conversation that skipped the yes/no loop.
    pub fn primary_only(oracle: &dyn DiagnosisOracle, initial: &DiseaseId) -> Self {
        Self {
            basis: ReportBasis::PrimarySymptom,
            findings: vec![finding(oracle, initial)],
            precautions: oracle.precautions(initial),
        }
    }

    /// Report merging the preliminary and the final prediction.
    ///
    /// Lists `[initial]` when both agree, `[initial, final]` otherwise.
    pub fn reconcile(
        oracle: &dyn DiagnosisOracle,
        initial: &DiseaseId,
        final_prediction: &DiseaseId,
    ) -> Self {
        let mut findings = vec![finding(oracle, initial)];
        if final_prediction != initial {
            findings.push(finding(oracle, final_prediction));
        }
        Self {
            basis: ReportBasis::AllSymptoms,
            findings,
            precautions: oracle.precautions(initial),
        }
    }

    pub fn basis(&self) -> ReportBasis {
        self.basis
    }

    pub fn findings(&self) -> &[DiseaseFinding] {
        &self.findings
    }

    pub fn precautions(&self) -> &[String] {
        &self.precautions
    }

    /// Diseases in report order, preliminary first.
    pub fn diseases(&self) -> impl Iterator<Item = &DiseaseId> {
        self.findings.iter().map(|f| &f.disease)
    }
}

fn finding(oracle: &dyn DiagnosisOracle, disease: &DiseaseId) -> DiseaseFinding {
    DiseaseFinding {
        disease: disease.clone(),
        description: oracle
            .description(disease)
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
    }
}
