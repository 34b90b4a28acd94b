use crate::report::{ReliabilityBand, ReportContext, format_f64_1, format_f64_3};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let mut out = String::new();

    out.push_str("Productivity Analysis Report\n");
    out.push_str("============================\n\n");

    out.push_str(&format!(
        "Input: {} ({} entities x {} time steps)\n",
        ctx.input_source, ctx.n_entities, ctx.n_days
    ));
    out.push_str(&format!(
        "Normalization: {}; anomaly threshold: {}\n\n",
        ctx.center_mode, ctx.threshold_mode
    ));

    out.push_str("1. Weights\n");
    out.push_str(&format!(
        "effort={}, duration={}, quality={}, goal={}\n\n",
        format_f64_3(ctx.weights.effort),
        format_f64_3(ctx.weights.duration),
        format_f64_3(ctx.weights.quality),
        format_f64_3(ctx.weights.goal)
    ));

    let s = &ctx.statistics;
    out.push_str("2. Performance metrics\n");
    out.push_str(&format!("Mean score: {}\n", format_f64_1(s.mean)));
    out.push_str(&format!("Std deviation: {}\n", format_f64_1(s.std)));
    out.push_str(&format!("Median: {}\n", format_f64_1(s.median)));
    out.push_str(&format!(
        "IQR: {} - {}\n",
        format_f64_1(s.q1),
        format_f64_1(s.q3)
    ));
    out.push_str(&format!(
        "Confidence interval ({}%, BCa, n={}): [{}, {}]\n",
        format_f64_1((1.0 - ctx.ci_alpha) * 100.0),
        ctx.n_bootstrap,
        format_f64_1(ctx.confidence_interval.lower),
        format_f64_1(ctx.confidence_interval.upper)
    ));
    if !ctx.confidence_interval.is_ordered() {
        out.push_str("Note: adjusted percentiles crossed; bounds reported as computed.\n");
    }
    out.push('\n');

    out.push_str("3. Reliability\n");
    out.push_str(&format!(
        "Cronbach's alpha: {}\n",
        format_f64_3(ctx.cronbach_alpha)
    ));
    out.push_str(&format!(
        "Interpretation: {}\n",
        ReliabilityBand::from_alpha(ctx.cronbach_alpha).label()
    ));
    out.push_str(&format!(
        "Component alpha (effort/duration/quality/goal): {}\n\n",
        format_f64_3(ctx.component_alpha)
    ));

    out.push_str("4. Anomaly detection\n");
    out.push_str(&format!("Anomalies found: {}\n", ctx.anomalies.len()));
    out.push_str("Detection method: CUSUM-EWMA with adaptive thresholds\n");
    if !ctx.anomalies.is_empty() {
        let shown = ctx
            .anomalies
            .iter()
            .take(20)
            .map(|i| i.to_string())
            .collect::<Vec<_>>();
        let more = if ctx.anomalies.len() > shown.len() {
            ", ..."
        } else {
            ""
        };
        out.push_str(&format!("Indices: {}{}\n", shown.join(", "), more));
    }

    out
}
