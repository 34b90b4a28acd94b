use super::*;
use crate::report::json::build_parallel_coords;
use crate::report::text::render_report_text;

fn context(anomalies: Vec<usize>) -> ReportContext {
    ReportContext {
        tool_name: "prodscore".to_string(),
        tool_version: "0.0.0".to_string(),
        input_source: "demo".to_string(),
        n_entities: 2,
        n_days: 3,
        center_mode: "robust".to_string(),
        threshold_mode: "dynamic".to_string(),
        seed: 42,
        n_bootstrap: 1000,
        ci_alpha: 0.05,
        weights: WeightVector::uniform(),
        cronbach_alpha: 0.83,
        component_alpha: 0.41,
        confidence_interval: ConfidenceInterval {
            lower: 48.2,
            upper: 53.9,
        },
        statistics: SummaryStatistics::compute(&[40.0, 50.0, 60.0]),
        anomalies,
    }
}

#[test]
fn test_summary_statistics() {
    let s = SummaryStatistics::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(s.mean, 3.0);
    assert_eq!(s.median, 3.0);
    assert_eq!(s.q1, 2.0);
    assert_eq!(s.q3, 4.0);
    assert!((s.std - 2.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_reliability_bands() {
    assert_eq!(ReliabilityBand::from_alpha(0.95), ReliabilityBand::Excellent);
    assert_eq!(ReliabilityBand::from_alpha(0.9), ReliabilityBand::Excellent);
    assert_eq!(ReliabilityBand::from_alpha(0.85), ReliabilityBand::Good);
    assert_eq!(ReliabilityBand::from_alpha(0.7), ReliabilityBand::Acceptable);
    assert_eq!(ReliabilityBand::from_alpha(0.65), ReliabilityBand::Questionable);
    assert_eq!(ReliabilityBand::from_alpha(0.0), ReliabilityBand::Poor);
    assert_eq!(ReliabilityBand::Good.label(), "Good");
}

#[test]
fn test_day_labels() {
    assert_eq!(day_label(0), "Sun");
    assert_eq!(day_label(6), "Sat");
    assert_eq!(day_label(7), "Day7");
}

#[test]
fn test_parallel_coords_without_values() {
    let ctx = context(vec![1, 4]);
    let rows = vec![vec![10.0, 20.0, 30.0], vec![40.0, 50.0, 60.0]];
    let doc = build_parallel_coords(&rows, None, &ctx);
    assert_eq!(doc.data, rows);
    assert_eq!(doc.dimensions.len(), 3);
    assert_eq!(doc.metadata.anomaly_count, 2);
    assert_eq!(doc.metadata.confidence_interval, (48.2, 53.9));

    let doc = build_parallel_coords(&rows, Some(&[0.5, 0.25]), &ctx);
    assert_eq!(doc.data[0], vec![10.0, 20.0, 30.0, 50.0]);
    assert_eq!(doc.dimensions.last().unwrap().name, "Value");
}

#[test]
fn test_report_text_sections() {
    let text = render_report_text(&context((0..30).collect()));
    assert!(text.contains("Cronbach's alpha: 0.830"));
    assert!(text.contains("Interpretation: Good"));
    assert!(text.contains("Confidence interval (95.0%, BCa, n=1000): [48.2, 53.9]"));
    assert!(text.contains("Anomalies found: 30"));
    assert!(text.contains(", ..."));
    assert!(!text.contains("crossed"));
}

#[test]
fn test_report_text_flags_crossed_interval() {
    let mut ctx = context(Vec::new());
    ctx.confidence_interval = ConfidenceInterval {
        lower: 55.0,
        upper: 50.0,
    };
    let text = render_report_text(&ctx);
    assert!(text.contains("crossed"));
    assert!(!text.contains("Indices:"));
}
