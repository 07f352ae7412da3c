//! Reference data tests
//!
//! Engines are built from explicit tables; invalid tables are rejected
//! before an engine can exist.

use rust_decimal::Decimal;
use shared::{
    AdvisoryEngine, AdvisoryError, ComputationError, DiseaseCatalog, DiseaseEntry,
    ImageFeatures, ReferenceData, ReferenceError, ScriptedRandom, FEATURE_COUNT,
};

const CUSTOM_TABLES: &str = r#"{
    "diseases": [
        {"code": "coffee_rust", "description": "Coffee Leaf Rust", "treatments": ["Apply copper fungicide", "Prune for airflow"]},
        {"code": "healthy", "description": "Healthy plant", "treatments": ["Keep monitoring"]}
    ],
    "crop_prices": {
        "prices": [
            {"crop": "coffee", "base_price": "320"},
            {"crop": "tea", "base_price": "180"}
        ],
        "default_price": "25"
    }
}"#;

mod loading {
    use super::*;

    #[test]
    fn custom_tables_load() {
        let data = ReferenceData::from_json(CUSTOM_TABLES).unwrap();
        assert_eq!(data.diseases.len(), 2);
        assert_eq!(data.crop_prices.crops(), vec!["coffee", "tea"]);
        assert_eq!(data.crop_prices.base_price("sisal"), Decimal::from(25));
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let err = ReferenceData::from_json(
            r#"{"diseases": [
                {"code": "rust", "description": "a", "treatments": ["x"]},
                {"code": "rust", "description": "b", "treatments": ["y"]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidDisease { ref code, .. } if code == "rust"));
    }

    #[test]
    fn entries_without_treatments_are_rejected() {
        let err = ReferenceData::from_json(
            r#"{"diseases": [{"code": "rust", "description": "a", "treatments": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidDisease { .. }));
    }

    #[test]
    fn duplicate_crops_after_normalization_are_rejected() {
        let err = ReferenceData::from_json(
            r#"{"crop_prices": {"prices": [
                {"crop": "Tea", "base_price": "1"},
                {"crop": "tea ", "base_price": "2"}
            ]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidCrop { ref crop, .. } if crop == "tea"));
    }

    #[test]
    fn negative_default_price_is_rejected() {
        let err = ReferenceData::from_json(
            r#"{"crop_prices": {"prices": [], "default_price": "-5"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidCrop { .. }));
    }
}

mod engines {
    use super::*;

    #[test]
    fn classifier_labels_follow_the_catalog() {
        let engine = AdvisoryEngine::new(ReferenceData::from_json(CUSTOM_TABLES).unwrap());
        let features = ImageFeatures::from_array([100.0; FEATURE_COUNT]);
        let assessment = engine
            .assess_disease_features(&features, &mut ScriptedRandom::default())
            .unwrap();

        assert!(["coffee_rust", "healthy"].contains(&assessment.disease.as_str()));
    }

    #[test]
    fn engines_are_independent() {
        let custom = AdvisoryEngine::new(ReferenceData::from_json(CUSTOM_TABLES).unwrap());
        let default = AdvisoryEngine::default();

        assert_eq!(custom.base_price("coffee"), Decimal::from(320));
        assert_eq!(default.base_price("coffee"), Decimal::from(30));
        assert_eq!(default.reference().diseases.len(), 9);
    }

    #[test]
    fn catalog_without_matching_labels_reports_unknown_label() {
        // classifier labelled from one catalog, engine describing another
        let classifier = std::sync::Arc::new(shared::PlaceholderClassifier::new(
            vec!["blister_blight".to_string()],
            1,
        ));
        let reference = ReferenceData {
            diseases: DiseaseCatalog::new(vec![DiseaseEntry {
                code: "healthy".to_string(),
                description: "Healthy plant".to_string(),
                treatments: vec!["Keep monitoring".to_string()],
            }]),
            ..ReferenceData::default()
        };
        let engine = AdvisoryEngine::with_classifier(reference, classifier);

        let err = engine
            .assess_disease_features(
                &ImageFeatures::from_array([1.0; FEATURE_COUNT]),
                &mut ScriptedRandom::default(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            AdvisoryError::Computation(ComputationError::UnknownLabel("blister_blight".to_string()))
        );
    }
}
