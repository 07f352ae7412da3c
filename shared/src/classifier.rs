//! Disease classifiers
//!
//! The contract is features in, label plus confidence out. The bundled
//! [`PlaceholderClassifier`] is not trained on real images; a real model
//! plugs in by implementing [`DiseaseClassifier`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::features::{ImageFeatures, FEATURE_COUNT};
use crate::random::RandomSource;

/// Lower bound of simulated confidence
pub const MIN_CONFIDENCE: f64 = 0.70;

/// Upper bound of simulated confidence
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Seed the placeholder centroids are generated from
pub const DEFAULT_CLASSIFIER_SEED: u64 = 42;

/// Raw classifier output
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

/// Maps a feature vector onto one label of a fixed label set
pub trait DiseaseClassifier: Send + Sync {
    /// Labels this classifier can return
    fn labels(&self) -> &[String];

    fn classify(&self, features: &ImageFeatures, rng: &mut dyn RandomSource) -> Classification;
}

/// Nearest-centroid stand-in over synthetic centroids
///
/// Label choice is a deterministic function of the features. Confidence is
/// drawn from `[MIN_CONFIDENCE, MAX_CONFIDENCE)`.
#[derive(Debug, Clone)]
pub struct PlaceholderClassifier {
    labels: Vec<String>,
    centroids: Vec<[f64; FEATURE_COUNT]>,
}

impl PlaceholderClassifier {
    pub fn new(labels: Vec<String>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let centroids = labels
            .iter()
            .map(|_| {
                let mut centroid = [0.0; FEATURE_COUNT];
                for value in centroid.iter_mut() {
                    *value = rng.gen::<f64>();
                }
                centroid
            })
            .collect();

        Self { labels, centroids }
    }

    /// Index of the closest centroid
    fn nearest(&self, features: &ImageFeatures) -> Option<usize> {
        let point = features.normalized();
        self.centroids
            .iter()
            .map(|c| {
                c.iter()
                    .zip(point.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
            })
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }
}

impl DiseaseClassifier for PlaceholderClassifier {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn classify(&self, features: &ImageFeatures, rng: &mut dyn RandomSource) -> Classification {
        let label = self
            .nearest(features)
            .map(|i| self.labels[i].clone())
            .unwrap_or_default();

        Classification {
            label,
            confidence: rng.uniform(MIN_CONFIDENCE, MAX_CONFIDENCE),
        }
    }
}
