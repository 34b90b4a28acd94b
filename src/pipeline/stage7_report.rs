use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::ScoringError;
use crate::input::{InputError, ScoreTable};
use crate::model::config::AnalysisConfig;
use crate::model::interval::ConfidenceInterval;
use crate::model::scores::{ComponentScoreSet, NormalizedScoreSet};
use crate::pipeline::stage1_normalize::normalize_set;
use crate::pipeline::stage2_composite::composite_from_set;
use crate::pipeline::stage3_anomaly::{AnomalyReport, detect_anomalies_with};
use crate::pipeline::stage4_reliability::{cronbach_alpha, cronbach_alpha_items};
use crate::pipeline::stage5_uncertainty::bca_mean_interval;
use crate::report::json::{build_parallel_coords, render_parallel_coords_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{ReportContext, SummaryStatistics};
use crate::stats::mean;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub normalized_by_day: Vec<NormalizedScoreSet>,
    /// Entity × time step composite scores.
    pub composite_by_entity: Vec<Vec<f64>>,
    /// Entity-major flattening of `composite_by_entity`, as fed to the detector.
    pub series: Vec<f64>,
    pub anomalies: AnomalyReport,
    /// Time steps as items; falls back to the component alpha for one step.
    pub cronbach_alpha: f64,
    /// The four normalized components as items over all (entity, step) rows.
    pub component_alpha: f64,
    pub entity_means: Vec<f64>,
    pub confidence_interval: ConfidenceInterval,
    pub statistics: SummaryStatistics,
}

pub fn run_analysis<R: Rng + ?Sized>(
    table: &ScoreTable,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisOutput, RunError> {
    table.validate()?;
    config.weights.validate()?;
    let n_entities = table.n_entities();
    let n_days = table.n_days();

    let mut normalized_by_day = Vec::with_capacity(n_days);
    let mut composite_by_entity = vec![vec![0.0; n_days]; n_entities];
    for day in 0..n_days {
        let normalized = normalize_set(
            &table.day_set(day),
            config.center_mode,
            config.display_scale,
        )?;
        let composite = composite_from_set(&normalized, &config.weights)?;
        for (entity, value) in composite.into_iter().enumerate() {
            composite_by_entity[entity][day] = value;
        }
        normalized_by_day.push(normalized);
    }

    let series = composite_by_entity.concat();
    let anomalies = detect_anomalies_with(&series, config.threshold_mode, &config.detector)?;

    let component_alpha = cronbach_alpha(&stack_components(&normalized_by_day).rows())?;
    let cronbach_alpha = if n_days >= 2 {
        let day_columns = (0..n_days)
            .map(|day| composite_by_entity.iter().map(|row| row[day]).collect())
            .collect::<Vec<Vec<f64>>>();
        cronbach_alpha_items(&day_columns)?
    } else {
        warn!("single time step; reporting component reliability only");
        component_alpha
    };

    let entity_means = composite_by_entity
        .iter()
        .map(|row| mean(row))
        .collect::<Vec<_>>();
    let confidence_interval = bca_mean_interval(&entity_means, &config.bootstrap, rng)?;
    let statistics = SummaryStatistics::compute(&series);

    info!(
        entities = n_entities,
        days = n_days,
        anomalies = anomalies.indices.len(),
        cronbach_alpha,
        ci_lower = confidence_interval.lower,
        ci_upper = confidence_interval.upper,
        "analysis finished"
    );

    Ok(AnalysisOutput {
        normalized_by_day,
        composite_by_entity,
        series,
        anomalies,
        cronbach_alpha,
        component_alpha,
        entity_means,
        confidence_interval,
        statistics,
    })
}

fn stack_components(days: &[NormalizedScoreSet]) -> ComponentScoreSet {
    let mut out = ComponentScoreSet::default();
    for day in days {
        out.effort.extend_from_slice(&day.scores.effort);
        out.duration.extend_from_slice(&day.scores.duration);
        out.quality.extend_from_slice(&day.scores.quality);
        out.goal.extend_from_slice(&day.scores.goal);
    }
    out
}

pub fn build_report_context(
    output: &AnalysisOutput,
    table: &ScoreTable,
    config: &AnalysisConfig,
    input_source: &str,
) -> ReportContext {
    ReportContext {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input_source: input_source.to_string(),
        n_entities: table.n_entities(),
        n_days: table.n_days(),
        center_mode: format!("{:?}", config.center_mode).to_ascii_lowercase(),
        threshold_mode: format!("{:?}", config.threshold_mode).to_ascii_lowercase(),
        seed: config.seed,
        n_bootstrap: config.bootstrap.n_bootstrap,
        ci_alpha: config.bootstrap.alpha,
        weights: config.weights,
        cronbach_alpha: output.cronbach_alpha,
        component_alpha: output.component_alpha,
        confidence_interval: output.confidence_interval,
        statistics: output.statistics,
        anomalies: output.anomalies.indices.clone(),
    }
}

/// Writes `summary.json`, `parallel_coords.json`, `composite.tsv` and `report.txt`.
pub fn write_reports(
    output: &AnalysisOutput,
    table: &ScoreTable,
    ctx: &ReportContext,
    out_dir: &Path,
) -> Result<(), RunError> {
    fs::create_dir_all(out_dir)?;

    let summary = render_summary_json(ctx)?;
    write_text(&out_dir.join("summary.json"), &summary)?;

    let chart = build_parallel_coords(&output.composite_by_entity, table.values.as_deref(), ctx);
    let chart_json = render_parallel_coords_json(&chart)?;
    write_text(&out_dir.join("parallel_coords.json"), &chart_json)?;

    write_composite_tsv(output, &out_dir.join("composite.tsv"))?;

    let report = render_report_text(ctx);
    write_text(&out_dir.join("report.txt"), &report)?;

    info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_composite_tsv(output: &AnalysisOutput, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "entity\tstep\tcomposite\tewma\tanomaly")?;
    let n_days = output.composite_by_entity.first().map_or(0, Vec::len);
    let mut flagged = output.anomalies.indices.iter().peekable();
    for (idx, (&score, &ewma)) in output
        .series
        .iter()
        .zip(&output.anomalies.ewma)
        .enumerate()
    {
        let is_anomaly = flagged.next_if(|&&i| i == idx).is_some();
        writeln!(
            w,
            "{}\t{}\t{:.6}\t{:.6}\t{}",
            idx / n_days,
            idx % n_days,
            score,
            ewma,
            u8::from(is_anomaly)
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
