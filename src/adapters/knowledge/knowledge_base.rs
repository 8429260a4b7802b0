//! YAML-backed knowledge base implementing the DiagnosisOracle port.
//!
//! The file lists the symptom vocabulary and one profile per disease:
//!
//! ```yaml
//! symptoms: [itching, skin_rash, cough]
//! diseases:
//!   - name: Fungal infection
//!     symptoms: [itching, skin_rash]
//!     description: A fungal skin infection.
//!     precautions: [bath twice, keep infected area dry]
//! ```
//!
//! Prediction picks the disease whose profile covers the most of the given
//! symptoms, ties going to the disease listed first.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

use crate::domain::foundation::{DiseaseId, SymptomId, ValidationError};
use crate::ports::{DiagnosisOracle, OracleError};

/// Errors raised while loading a knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("Failed to read knowledge base: {0}")]
    IoError(String),

    #[error("Failed to parse knowledge base: {0}")]
    ParseFailed(String),

    #[error("Knowledge base has no diseases")]
    NoDiseases,

    #[error("Disease '{disease}' lists symptom '{symptom}' missing from the vocabulary")]
    UnknownSymptom { disease: String, symptom: String },

    #[error("Disease '{0}' is listed twice")]
    DuplicateDisease(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] ValidationError),
}

#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    symptoms: Vec<String>,
    diseases: Vec<DiseaseEntry>,
}

#[derive(Debug, Deserialize)]
struct DiseaseEntry {
    name: String,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    precautions: Vec<String>,
}

#[derive(Debug, Clone)]
struct DiseaseProfile {
    id: DiseaseId,
    /// Profile symptoms in vocabulary order.
    symptoms: Vec<SymptomId>,
    description: Option<String>,
    precautions: Vec<String>,
}

impl DiseaseProfile {
    fn coverage(&self, symptoms: &[SymptomId]) -> usize {
        symptoms.iter().filter(|s| self.symptoms.contains(s)).count()
    }
}

/// In-memory symptom vocabulary and disease profiles.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    vocabulary: Vec<SymptomId>,
    diseases: Vec<DiseaseProfile>,
    index: HashMap<DiseaseId, usize>,
}

impl KnowledgeBase {
    /// Load a knowledge base from a YAML file.
    ///
    /// # Errors
    /// Returns `KnowledgeBaseError` if the file cannot be read or is invalid
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeBaseError> {
        let yaml = fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| KnowledgeBaseError::IoError(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    /// Parse and validate a knowledge base from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, KnowledgeBaseError> {
        let file: KnowledgeFile =
            serde_yaml::from_str(yaml).map_err(|e| KnowledgeBaseError::ParseFailed(e.to_string()))?;
        Self::from_file(file)
    }

    fn from_file(file: KnowledgeFile) -> Result<Self, KnowledgeBaseError> {
        if file.diseases.is_empty() {
            return Err(KnowledgeBaseError::NoDiseases);
        }

        let mut vocabulary: Vec<SymptomId> = Vec::with_capacity(file.symptoms.len());
        for raw in file.symptoms {
            let symptom = SymptomId::new(raw.trim())?;
            if !vocabulary.contains(&symptom) {
                vocabulary.push(symptom);
            }
        }

        let mut diseases = Vec::with_capacity(file.diseases.len());
        let mut index = HashMap::new();
        for entry in file.diseases {
            let id = DiseaseId::new(entry.name.trim())?;
            if index.contains_key(&id) {
                return Err(KnowledgeBaseError::DuplicateDisease(entry.name));
            }

            for raw in &entry.symptoms {
                if !vocabulary.iter().any(|v| v.as_str() == raw.trim()) {
                    return Err(KnowledgeBaseError::UnknownSymptom {
                        disease: entry.name.clone(),
                        symptom: raw.clone(),
                    });
                }
            }
            let symptoms = vocabulary
                .iter()
                .filter(|v| entry.symptoms.iter().any(|raw| raw.trim() == v.as_str()))
                .cloned()
                .collect();

            index.insert(id.clone(), diseases.len());
            diseases.push(DiseaseProfile {
                id,
                symptoms,
                description: entry.description.filter(|d| !d.trim().is_empty()),
                precautions: entry.precautions,
            });
        }

        Ok(Self {
            vocabulary,
            diseases,
            index,
        })
    }

    /// Number of disease profiles loaded.
    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    fn profile(&self, disease: &DiseaseId) -> Option<&DiseaseProfile> {
        self.index.get(disease).map(|&i| &self.diseases[i])
    }
}

impl DiagnosisOracle for KnowledgeBase {
    fn vocabulary(&self) -> &[SymptomId] {
        &self.vocabulary
    }

    fn predict(&self, symptoms: &[SymptomId]) -> DiseaseId {
        let mut best = &self.diseases[0];
        let mut best_coverage = best.coverage(symptoms);
        for profile in &self.diseases[1..] {
            let coverage = profile.coverage(symptoms);
            if coverage > best_coverage {
                best = profile;
                best_coverage = coverage;
            }
        }
        best.id.clone()
    }

    fn related_symptoms(&self, disease: &DiseaseId) -> Result<Vec<SymptomId>, OracleError> {
        self.profile(disease)
            .map(|p| p.symptoms.clone())
            .ok_or_else(|| OracleError::UnknownDisease(disease.clone()))
    }

    fn description(&self, disease: &DiseaseId) -> Option<String> {
        self.profile(disease).and_then(|p| p.description.clone())
    }

    fn precautions(&self, disease: &DiseaseId) -> Vec<String> {
        self.profile(disease)
            .map(|p| p.precautions.clone())
            .unwrap_or_default()
    }
}
