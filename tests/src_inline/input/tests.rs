use super::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("prodscore_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const TABLE_JSON: &str = r#"{
    "effort":   [[10, 20, 30], [40, 50, 60]],
    "duration": [[1, 2, 3], [4, 5, 6]],
    "quality":  [[7, 8, 9], [10, 11, 12]],
    "goal":     [[0.5, 0.25, 0], [1, 1, 1]],
    "values":   [0.3, 0.9]
}"#;

#[test]
fn test_load_score_table() {
    let dir = make_temp_dir();
    let path = dir.join("scores.json");
    fs::write(&path, TABLE_JSON).unwrap();

    let table = load_score_table(&path).unwrap();
    assert_eq!(table.n_entities(), 2);
    assert_eq!(table.n_days(), 3);
    assert_eq!(table.values, Some(vec![0.3, 0.9]));

    let day1 = table.day_set(1);
    assert_eq!(day1.effort, vec![20.0, 50.0]);
    assert_eq!(day1.goal, vec![0.25, 1.0]);
    assert_eq!(day1.rows()[1], [50.0, 5.0, 11.0, 1.0]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_values_are_optional() {
    let table: ScoreTable = serde_json::from_str(
        r#"{"effort":[[1]],"duration":[[1]],"quality":[[1]],"goal":[[1]]}"#,
    )
    .unwrap();
    assert!(table.values.is_none());
    table.validate().unwrap();
}

#[test]
fn test_ragged_table_is_rejected() {
    let mut table: ScoreTable = serde_json::from_str(TABLE_JSON).unwrap();
    table.quality[1].pop();
    let err = table.validate().unwrap_err();
    assert!(err.to_string().contains("quality row 1"), "{err}");

    let mut table: ScoreTable = serde_json::from_str(TABLE_JSON).unwrap();
    table.goal.pop();
    assert!(matches!(table.validate(), Err(InputError::InvalidInput(_))));

    let mut table: ScoreTable = serde_json::from_str(TABLE_JSON).unwrap();
    table.values = Some(vec![0.1]);
    assert!(matches!(table.validate(), Err(InputError::InvalidInput(_))));
}

#[test]
fn test_empty_table_is_rejected() {
    let table: ScoreTable =
        serde_json::from_str(r#"{"effort":[],"duration":[],"quality":[],"goal":[]}"#).unwrap();
    assert!(matches!(table.validate(), Err(InputError::InvalidInput(_))));
}

#[test]
fn test_missing_file_and_bad_json() {
    let dir = make_temp_dir();
    assert!(matches!(
        load_score_table(&dir.join("absent.json")),
        Err(InputError::Io(_))
    ));
    let bad = dir.join("bad.json");
    fs::write(&bad, "{\"effort\": [[1]]").unwrap();
    assert!(matches!(load_score_table(&bad), Err(InputError::Json(_))));
    fs::remove_dir_all(&dir).ok();
}
