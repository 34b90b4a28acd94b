use super::*;
use crate::error::ScoringError;
use crate::model::scores::ComponentScoreSet;

#[test]
fn test_weighted_sum() {
    let w = WeightVector::from_array([0.4, 0.3, 0.2, 0.1]);
    let out = composite_score(&[10.0, 0.0], &[20.0, 0.0], &[30.0, 0.0], &[40.0, 100.0], &w).unwrap();
    assert!((out[0] - 20.0).abs() < 1e-12);
    assert!((out[1] - 10.0).abs() < 1e-12);
}

#[test]
fn test_constant_hundred_equal_weights_is_exactly_hundred() {
    let c = vec![100.0; 50];
    let out = composite_score(&c, &c, &c, &c, &WeightVector::uniform()).unwrap();
    assert!(out.iter().all(|&v| v == 100.0));
}

#[test]
fn test_composite_is_bit_reproducible() {
    let e = [0.13, 71.2, 5.5];
    let d = [9.9, 0.01, 33.3];
    let q = [1e-3, 42.0, 17.17];
    let g = [64.0, 2.5, 0.7];
    let w = WeightVector::from_array([0.31, 0.19, 0.27, 0.23]);
    let a = composite_score(&e, &d, &q, &g, &w).unwrap();
    let b = composite_score(&e, &d, &q, &g, &w).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn test_output_is_not_clamped() {
    let w = WeightVector::from_array([1.0, 1.0, 1.0, 1.0]);
    let out = composite_score(&[90.0], &[90.0], &[90.0], &[90.0], &w).unwrap();
    assert_eq!(out, vec![360.0]);
}

#[test]
fn test_dimension_mismatch() {
    let err = composite_score(&[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0], &[1.0], &WeightVector::uniform())
        .unwrap_err();
    assert_eq!(
        err,
        ScoringError::DimensionMismatch {
            context: "goal component",
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_composite_from_set() {
    let set = NormalizedScoreSet {
        scores: ComponentScoreSet::new(vec![40.0], vec![60.0], vec![80.0], vec![20.0]).unwrap(),
        display_scale: 100.0,
    };
    let out = composite_from_set(&set, &WeightVector::uniform()).unwrap();
    assert_eq!(out, vec![50.0]);
}

#[test]
fn test_non_finite_component_is_rejected() {
    let ok = [1.0, 2.0];
    let bad = [1.0, f64::NAN];
    let w = WeightVector::uniform();
    assert_eq!(
        composite_score(&ok, &ok, &bad, &ok, &w),
        Err(ScoringError::NonFinite("quality component"))
    );
    assert!(matches!(
        composite_score(&[f64::INFINITY], &[0.0], &[0.0], &[0.0], &w),
        Err(ScoringError::NonFinite(_))
    ));
}

#[test]
fn test_invalid_weights_are_rejected() {
    let c = [10.0, 20.0];
    let nan_weight = WeightVector::from_array([f64::NAN, 0.25, 0.25, 0.25]);
    assert_eq!(
        composite_score(&c, &c, &c, &c, &nan_weight),
        Err(ScoringError::NonFinite("weight vector"))
    );
    let negative = WeightVector::from_array([0.5, 0.5, 0.5, -0.5]);
    assert!(matches!(
        composite_score(&c, &c, &c, &c, &negative),
        Err(ScoringError::InvalidParameter(_))
    ));
}
