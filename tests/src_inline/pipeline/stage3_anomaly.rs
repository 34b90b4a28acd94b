use super::*;
use crate::error::ScoringError;
use crate::model::weights::WeightVector;
use crate::pipeline::stage2_composite::composite_score;

fn spike_series() -> Vec<f64> {
    let mut s = vec![0.0; 1000];
    s[500] = 50.0;
    s
}

#[test]
fn test_empty_series() {
    let report = detect_anomalies(&[], ThresholdMode::Dynamic).unwrap();
    assert!(report.indices.is_empty());
    assert!(report.ewma.is_empty());
}

#[test]
fn test_constant_series_has_no_anomalies() {
    for mode in [ThresholdMode::Dynamic, ThresholdMode::Static] {
        for n in [2usize, 50, 300] {
            let report = detect_anomalies(&vec![7.5; n], mode).unwrap();
            assert!(report.indices.is_empty(), "{mode:?} n={n}");
            assert_eq!(report.ewma.len(), n);
            assert!(report.ewma.iter().all(|&v| (v - 7.5).abs() < 1e-12));
        }
    }
}

#[test]
fn test_spike_detected_shortly_after_onset() {
    for mode in [ThresholdMode::Dynamic, ThresholdMode::Static] {
        let report = detect_anomalies(&spike_series(), mode).unwrap();
        let first = *report.indices.first().expect("spike must be flagged");
        assert!((500..=505).contains(&first), "{mode:?}: first={first}");
        assert!(report.indices.iter().all(|&i| i >= 500));
    }
}

#[test]
fn test_ewma_recurrence() {
    let report = detect_anomalies(&[10.0, 0.0, 0.0, 20.0], ThresholdMode::Static).unwrap();
    let expected = [10.0, 8.0, 6.4, 0.2 * 20.0 + 0.8 * 6.4];
    for (a, b) in report.ewma.iter().zip(expected) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_accumulators_reset_after_trigger() {
    let params = DetectorParams::default();
    let mut state = AnomalyRunState::start(0.0, 0.0, 5.0, &params);
    assert!(state.step(100.0, ThresholdMode::Static, &params));
    assert_eq!(state.cusum_pos, 0.0);
    assert_eq!(state.cusum_neg, 0.0);
    // ewma is carried across the reset
    assert!((state.ewma - 20.0).abs() < 1e-12);
}

#[test]
fn test_downward_shift_triggers_negative_cusum() {
    let mut s = vec![10.0; 60];
    s.extend(vec![-10.0; 20]);
    let report = detect_anomalies(&s, ThresholdMode::Dynamic).unwrap();
    let first = report.indices[0];
    assert!((60..65).contains(&first), "first={first}");
}

#[test]
fn test_stepwise_state_matches_batch() {
    let series = (0..400)
        .map(|i| ((i as f64) * 0.37).sin() * 3.0 + if i > 250 { 4.0 } else { 0.0 })
        .collect::<Vec<_>>();
    let params = DetectorParams::default();
    let mode = ThresholdMode::Dynamic;
    let batch = detect_anomalies_with(&series, mode, &params).unwrap();

    let (baseline, threshold) = initial_baseline(&series, mode, &params);
    let mut state = AnomalyRunState::start(series[0], baseline, threshold, &params);
    let mut indices = Vec::new();
    let mut ewma = vec![series[0]];
    for (t, &x) in series.iter().enumerate().skip(1) {
        if state.step(x, mode, &params) {
            indices.push(t);
        }
        ewma.push(state.ewma);
    }
    assert_eq!(indices, batch.indices);
    assert_eq!(ewma, batch.ewma);
}

#[test]
fn test_dynamic_threshold_uses_mad() {
    let series = [0.0, 1.0, 2.0, 3.0, 100.0];
    let (mu0, h) = initial_baseline(&series, ThresholdMode::Dynamic, &DetectorParams::default());
    assert_eq!(mu0, 2.0);
    assert_eq!(h, 5.0);
    let (mu0, h) = initial_baseline(&series, ThresholdMode::Static, &DetectorParams::default());
    assert_eq!(mu0, 21.2);
    assert_eq!(h, 5.0);
    // MAD of 0 falls back to the fixed threshold
    let (_, h) = initial_baseline(
        &[0.0, 0.0, 4.0, 4.0, 4.0],
        ThresholdMode::Dynamic,
        &DetectorParams::default(),
    );
    assert_eq!(h, 5.0);
}

#[test]
fn test_constant_hundred_composite_end_to_end() {
    let c = vec![100.0; 200];
    let composite = composite_score(&c, &c, &c, &c, &WeightVector::uniform()).unwrap();
    assert!(composite.iter().all(|&v| v == 100.0));
    let report = detect_anomalies(&composite, ThresholdMode::Dynamic).unwrap();
    assert!(report.indices.is_empty());
}

#[test]
fn test_non_finite_series_is_rejected() {
    assert_eq!(
        detect_anomalies(&[1.0, f64::INFINITY], ThresholdMode::Static),
        Err(ScoringError::NonFinite("anomaly detector series"))
    );
}

#[test]
fn test_invalid_detector_params_are_rejected() {
    let empty_window = DetectorParams {
        window: 0,
        ..DetectorParams::default()
    };
    assert!(matches!(
        detect_anomalies_with(&spike_series(), ThresholdMode::Dynamic, &empty_window),
        Err(ScoringError::InvalidParameter(_))
    ));

    let wide_lambda = DetectorParams {
        ewma_lambda: 1.5,
        ..DetectorParams::default()
    };
    assert!(matches!(
        detect_anomalies_with(&[], ThresholdMode::Static, &wide_lambda),
        Err(ScoringError::InvalidParameter(_))
    ));
}
