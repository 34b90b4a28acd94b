use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_demo_table_shape_and_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let table = generate_demo_table(40, 7, &mut rng).unwrap();
    table.validate().unwrap();
    assert_eq!(table.n_entities(), 40);
    assert_eq!(table.n_days(), 7);
    for m in [&table.effort, &table.duration, &table.quality, &table.goal] {
        for row in m.iter() {
            assert!(row.iter().all(|&v| (0.0..=100.0).contains(&v)));
        }
    }
    let values = table.values.as_ref().unwrap();
    assert!(values.iter().all(|&v| (0.0..1.0).contains(&v)));
}

#[test]
fn test_demo_table_is_seeded() {
    let a = generate_demo_table(10, 9, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = generate_demo_table(10, 9, &mut StdRng::seed_from_u64(5)).unwrap();
    let c = generate_demo_table(10, 9, &mut StdRng::seed_from_u64(6)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_day_of_week_effects() {
    assert_eq!(day_of_week_effect(1), [15.0, 10.0, 12.0, 18.0]);
    assert_eq!(day_of_week_effect(4), [-8.0, -10.0, -5.0, -12.0]);
    assert_eq!(day_of_week_effect(7), [0.0; 4]);
}

#[test]
fn test_monday_outscores_thursday_on_average() {
    let table = generate_demo_table(200, 7, &mut StdRng::seed_from_u64(42)).unwrap();
    let day_mean = |day: usize| table.goal.iter().map(|r| r[day]).sum::<f64>() / 200.0;
    assert!(day_mean(1) > day_mean(4) + 20.0);
}

#[test]
fn test_empty_request_is_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(generate_demo_table(0, 7, &mut rng).is_err());
    assert!(generate_demo_table(5, 0, &mut rng).is_err());
}
