//! Crop disease catalog and assessment records

use serde::{Deserialize, Serialize};

/// Recommendation returned for any code the catalog does not know
pub const GENERIC_RECOMMENDATION: &str = "Consult local agricultural expert";

/// Description reported for codes missing from the catalog
pub const UNKNOWN_DISEASE_DESCRIPTION: &str = "Unknown disease";

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiseaseEntry {
    pub code: String,
    pub description: String,
    /// Treatment recommendations, most urgent first
    pub treatments: Vec<String>,
}

/// Fixed set of disease codes the classifier may return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DiseaseCatalog {
    entries: Vec<DiseaseEntry>,
}

impl DiseaseCatalog {
    pub fn new(entries: Vec<DiseaseEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DiseaseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codes in catalog order
    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.code.clone()).collect()
    }

    pub fn get(&self, code: &str) -> Option<&DiseaseEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn description(&self, code: &str) -> &str {
        self.get(code)
            .map(|e| e.description.as_str())
            .unwrap_or(UNKNOWN_DISEASE_DESCRIPTION)
    }

    /// Treatment list for a code; never empty
    pub fn recommendations(&self, code: &str) -> Vec<String> {
        match self.get(code) {
            Some(entry) if !entry.treatments.is_empty() => entry.treatments.clone(),
            _ => vec![GENERIC_RECOMMENDATION.to_string()],
        }
    }
}

impl Default for DiseaseCatalog {
    /// Tomato leaf diseases the demo classifier is labelled with
    fn default() -> Self {
        let entry = |code: &str, description: &str, treatments: &[&str]| DiseaseEntry {
            code: code.to_string(),
            description: description.to_string(),
            treatments: treatments.iter().map(|t| t.to_string()).collect(),
        };

        Self::new(vec![
            entry(
                "healthy",
                "Healthy plant",
                &["Continue current care routine", "Monitor for any changes"],
            ),
            entry(
                "early_blight",
                "Early Blight - Use fungicide treatment",
                &[
                    "Apply copper-based fungicide",
                    "Remove affected leaves",
                    "Improve air circulation",
                ],
            ),
            entry(
                "late_blight",
                "Late Blight - Remove affected leaves and apply copper-based fungicide",
                &[
                    "Apply fungicide immediately",
                    "Remove all affected parts",
                    "Avoid overhead watering",
                ],
            ),
            entry(
                "leaf_mold",
                "Leaf Mold - Improve air circulation and reduce humidity",
                &[
                    "Reduce humidity",
                    "Improve ventilation",
                    "Apply fungicide if severe",
                ],
            ),
            entry(
                "septoria_leaf_spot",
                "Septoria Leaf Spot - Remove infected leaves and apply fungicide",
                &[
                    "Remove infected leaves",
                    "Apply fungicide",
                    "Avoid overhead watering",
                ],
            ),
            entry(
                "spider_mites",
                "Spider Mites - Use insecticidal soap or neem oil",
                &[
                    "Apply insecticidal soap",
                    "Use neem oil",
                    "Increase humidity",
                ],
            ),
            entry(
                "target_spot",
                "Target Spot - Apply fungicide and improve plant spacing",
                &[
                    "Apply fungicide",
                    "Improve plant spacing",
                    "Remove affected leaves",
                ],
            ),
            entry(
                "yellow_leaf_curl_virus",
                "Yellow Leaf Curl Virus - Remove infected plants and control whiteflies",
                &[
                    "Remove infected plants",
                    "Control whiteflies",
                    "Use resistant varieties",
                ],
            ),
            entry(
                "mosaic_virus",
                "Mosaic Virus - Remove infected plants and control aphids",
                &[
                    "Remove infected plants",
                    "Control aphids",
                    "Disinfect tools",
                ],
            ),
        ])
    }
}

/// Disease advisory result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseAssessment {
    /// Catalog code, e.g. `early_blight`
    pub disease: String,
    pub description: String,
    /// In `[0, 1]`, two decimal places
    pub confidence: f64,
    pub recommendations: Vec<String>,
}
