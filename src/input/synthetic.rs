use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::input::{InputError, ScoreTable};

/// Additive effect per weekday (Sunday first) on effort, duration, quality, goal.
const DAY_OF_WEEK_EFFECTS: [[f64; 4]; 7] = [
    [-10.0, -5.0, 0.0, -15.0],
    [15.0, 10.0, 12.0, 18.0],
    [12.0, 15.0, 10.0, 14.0],
    [5.0, 8.0, 8.0, 10.0],
    [-8.0, -10.0, -5.0, -12.0],
    [3.0, 5.0, 10.0, 8.0],
    [-5.0, 0.0, 5.0, -8.0],
];

const NOISE_SD: [f64; 4] = [5.0, 4.0, 6.0, 3.0];

pub fn day_of_week_effect(day: usize) -> [f64; 4] {
    DAY_OF_WEEK_EFFECTS.get(day).copied().unwrap_or([0.0; 4])
}

/// Demo telemetry: per-entity base levels, weekday effects, gaussian noise,
/// clipped to [0, 100].
pub fn generate_demo_table<R: Rng + ?Sized>(
    n_entities: usize,
    n_days: usize,
    rng: &mut R,
) -> Result<ScoreTable, InputError> {
    if n_entities == 0 || n_days == 0 {
        return Err(InputError::InvalidInput(
            "demo data needs at least one entity and one day".to_string(),
        ));
    }
    let mut noise = Vec::with_capacity(4);
    for sd in NOISE_SD {
        noise.push(Normal::new(0.0, sd).map_err(|e| InputError::InvalidInput(e.to_string()))?);
    }

    let values = (0..n_entities)
        .map(|_| rng.gen_range(0.0..1.0))
        .collect::<Vec<f64>>();

    let mut table = ScoreTable {
        effort: vec![vec![0.0; n_days]; n_entities],
        duration: vec![vec![0.0; n_days]; n_entities],
        quality: vec![vec![0.0; n_days]; n_entities],
        goal: vec![vec![0.0; n_days]; n_entities],
        values: None,
    };

    for entity in 0..n_entities {
        let base_effort = rng.gen_range(40.0..80.0);
        let base_duration = rng.gen_range(50.0..90.0);
        let base_quality = rng.gen_range(30.0..70.0);
        let base_goal = rng.gen_range(45.0..85.0);
        let boost = values[entity] * 20.0;

        for day in 0..n_days {
            let dow = day_of_week_effect(day);
            table.effort[entity][day] =
                (base_effort + dow[0] + noise[0].sample(rng) + boost).clamp(0.0, 100.0);
            table.duration[entity][day] =
                (base_duration + dow[1] + noise[1].sample(rng)).clamp(0.0, 100.0);
            table.quality[entity][day] =
                (base_quality + dow[2] + noise[2].sample(rng) + boost / 2.0).clamp(0.0, 100.0);
            table.goal[entity][day] = (base_goal + dow[3] + noise[3].sample(rng)).clamp(0.0, 100.0);
        }
    }
    table.values = Some(values);

    info!(entities = n_entities, days = n_days, "generated demo score table");
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/synthetic.rs"]
mod tests;
