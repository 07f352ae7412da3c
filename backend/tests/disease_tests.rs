//! Disease advisory tests
//!
//! Covers feature extraction from encoded images, catalog lookups and the
//! classifier contract.

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use proptest::prelude::*;
use shared::{
    extract_features, AdvisoryEngine, AdvisoryError, DecodeError, DiseaseCatalog, ImageFeatures,
    RngSource, GENERIC_RECOMMENDATION, MAX_CONFIDENCE, MIN_CONFIDENCE,
};
use std::io::Cursor;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Left half one colour, right half another
fn leaf_image() -> DynamicImage {
    let mut image = RgbImage::from_pixel(64, 48, Rgb([34, 139, 34]));
    for x in 32..64 {
        for y in 0..48 {
            image.put_pixel(x, y, Rgb([160, 120, 40]));
        }
    }
    DynamicImage::ImageRgb8(image)
}

// ============================================================================
// Catalog
// ============================================================================

mod catalog {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_generic_advice() {
        let catalog = DiseaseCatalog::default();
        let recommendations = catalog.recommendations("unknown_disease");
        assert_eq!(recommendations, vec![GENERIC_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn every_code_has_treatments() {
        let catalog = DiseaseCatalog::default();
        for code in catalog.codes() {
            assert!(!catalog.recommendations(&code).is_empty(), "{} has no treatments", code);
        }
    }
}

// ============================================================================
// Image input
// ============================================================================

mod images {
    use super::*;

    #[test]
    fn png_and_jpeg_are_classified() {
        let engine = AdvisoryEngine::default();
        for format in [ImageFormat::Png, ImageFormat::Jpeg] {
            let bytes = encode(leaf_image(), format);
            let assessment = engine
                .assess_disease_image(&bytes, &mut RngSource::seeded(3))
                .unwrap();

            assert!(engine.reference().diseases.contains(&assessment.disease));
            assert_eq!(
                assessment.description,
                engine.reference().diseases.description(&assessment.disease)
            );
            assert!(assessment.confidence >= MIN_CONFIDENCE);
            assert!(assessment.confidence <= MAX_CONFIDENCE);
        }
    }

    #[test]
    fn features_are_resolution_independent_for_flat_images() {
        let small = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([90, 180, 45]))),
            ImageFormat::Png,
        );
        let large = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 300, Rgb([90, 180, 45]))),
            ImageFormat::Png,
        );

        let a = extract_features(&small).unwrap();
        let b = extract_features(&large).unwrap();
        assert_eq!(a.red_mean, 90.0);
        assert_eq!(a.green_mean, 180.0);
        assert_eq!(a.gray_std, 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn grayscale_is_a_decode_error() {
        let bytes = encode(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([128]))),
            ImageFormat::Png,
        );
        let err = AdvisoryEngine::default()
            .assess_disease_image(&bytes, &mut RngSource::seeded(0))
            .unwrap_err();
        assert_eq!(err, AdvisoryError::Decode(DecodeError::MissingColorChannels { channels: 1 }));
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let bytes = encode(leaf_image(), ImageFormat::Png);
        let err = AdvisoryEngine::default()
            .assess_disease_image(&bytes[..bytes.len() / 2], &mut RngSource::seeded(0))
            .unwrap_err();
        assert!(matches!(err, AdvisoryError::Decode(_)));
    }

    #[test]
    fn same_image_same_seed_same_result() {
        let engine = AdvisoryEngine::default();
        let bytes = encode(leaf_image(), ImageFormat::Png);
        let first = engine.assess_disease_image(&bytes, &mut RngSource::seeded(21)).unwrap();
        let second = engine.assess_disease_image(&bytes, &mut RngSource::seeded(21)).unwrap();
        assert_eq!(first, second);
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any finite feature vector yields a catalog code and a bounded confidence
    #[test]
    fn finite_features_classify_into_catalog(
        values in prop::array::uniform10(0.0f64..255.0),
        seed in any::<u64>(),
    ) {
        let engine = AdvisoryEngine::default();
        let features = ImageFeatures::from_array(values);
        let assessment = engine
            .assess_disease_features(&features, &mut RngSource::seeded(seed))
            .unwrap();

        prop_assert!(engine.reference().diseases.contains(&assessment.disease));
        prop_assert!(assessment.confidence >= MIN_CONFIDENCE && assessment.confidence <= MAX_CONFIDENCE);
        prop_assert!(!assessment.recommendations.is_empty());
    }

    /// Label choice depends on the features alone
    #[test]
    fn label_ignores_the_random_source(
        values in prop::array::uniform10(0.0f64..255.0),
        a in any::<u64>(),
        b in any::<u64>(),
    ) {
        let engine = AdvisoryEngine::default();
        let features = ImageFeatures::from_array(values);
        let first = engine.assess_disease_features(&features, &mut RngSource::seeded(a)).unwrap();
        let second = engine.assess_disease_features(&features, &mut RngSource::seeded(b)).unwrap();
        prop_assert_eq!(first.disease, second.disease);
    }
}
