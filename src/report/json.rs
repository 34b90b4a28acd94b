use serde::Serialize;

use crate::model::interval::ConfidenceInterval;
use crate::model::weights::WeightVector;
use crate::report::{ReliabilityBand, ReportContext, SummaryStatistics, day_label};

#[derive(Debug, Serialize)]
pub struct Dimension {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize)]
pub struct ChartMetadata {
    pub weights: WeightVector,
    pub cronbach_alpha: f64,
    pub confidence_interval: (f64, f64),
    pub statistics: SummaryStatistics,
    pub anomaly_count: usize,
}

/// Parallel-coordinates document: one row per entity with per-day composite
/// scores, followed by its value on a 0-100 scale when values are known.
#[derive(Debug, Serialize)]
pub struct ParallelCoordsDocument {
    pub data: Vec<Vec<f64>>,
    pub dimensions: Vec<Dimension>,
    pub metadata: ChartMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    tool: ToolMeta<'a>,
    input: InputMeta<'a>,
    weights: WeightVector,
    reliability: Reliability,
    confidence_interval: IntervalMeta,
    statistics: SummaryStatistics,
    anomalies: AnomalyMeta<'a>,
}

#[derive(Debug, Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct InputMeta<'a> {
    source: &'a str,
    n_entities: usize,
    n_days: usize,
    center_mode: &'a str,
    threshold_mode: &'a str,
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Reliability {
    cronbach_alpha: f64,
    interpretation: &'static str,
    component_alpha: f64,
}

#[derive(Debug, Serialize)]
struct IntervalMeta {
    lower: f64,
    upper: f64,
    alpha: f64,
    n_bootstrap: usize,
    statistic: &'static str,
}

#[derive(Debug, Serialize)]
struct AnomalyMeta<'a> {
    count: usize,
    indices: &'a [usize],
    method: &'static str,
}

pub fn build_parallel_coords(
    composite_by_entity: &[Vec<f64>],
    values: Option<&[f64]>,
    ctx: &ReportContext,
) -> ParallelCoordsDocument {
    let data = composite_by_entity
        .iter()
        .enumerate()
        .map(|(entity, row)| {
            let mut out = row.clone();
            if let Some(value) = values.and_then(|v| v.get(entity)) {
                out.push(value * 100.0);
            }
            out
        })
        .collect::<Vec<_>>();

    let mut dimensions = (0..ctx.n_days)
        .map(|day| Dimension {
            name: day_label(day),
            min: 0.0,
            max: 100.0,
        })
        .collect::<Vec<_>>();
    if values.is_some() {
        dimensions.push(Dimension {
            name: "Value".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    ParallelCoordsDocument {
        data,
        dimensions,
        metadata: ChartMetadata {
            weights: ctx.weights,
            cronbach_alpha: ctx.cronbach_alpha,
            confidence_interval: interval_pair(&ctx.confidence_interval),
            statistics: ctx.statistics,
            anomaly_count: ctx.anomalies.len(),
        },
    }
}

pub fn render_parallel_coords_json(doc: &ParallelCoordsDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

pub fn render_summary_json(ctx: &ReportContext) -> serde_json::Result<String> {
    let doc = SummaryDocument {
        tool: ToolMeta {
            name: &ctx.tool_name,
            version: &ctx.tool_version,
        },
        input: InputMeta {
            source: &ctx.input_source,
            n_entities: ctx.n_entities,
            n_days: ctx.n_days,
            center_mode: &ctx.center_mode,
            threshold_mode: &ctx.threshold_mode,
            seed: ctx.seed,
        },
        weights: ctx.weights,
        reliability: Reliability {
            cronbach_alpha: ctx.cronbach_alpha,
            interpretation: ReliabilityBand::from_alpha(ctx.cronbach_alpha).label(),
            component_alpha: ctx.component_alpha,
        },
        confidence_interval: IntervalMeta {
            lower: ctx.confidence_interval.lower,
            upper: ctx.confidence_interval.upper,
            alpha: ctx.ci_alpha,
            n_bootstrap: ctx.n_bootstrap,
            statistic: "mean",
        },
        statistics: ctx.statistics,
        anomalies: AnomalyMeta {
            count: ctx.anomalies.len(),
            indices: &ctx.anomalies,
            method: "CUSUM-EWMA",
        },
    };
    serde_json::to_string_pretty(&doc)
}

fn interval_pair(ci: &ConfidenceInterval) -> (f64, f64) {
    (ci.lower, ci.upper)
}
