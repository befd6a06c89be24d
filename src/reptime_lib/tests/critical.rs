use super::*;

/// Absolute tolerance against published table values.
const TABLE_EPS: f64 = 1e-3;

fn level(percent: u8) -> ConfidenceLevel {
    ConfidenceLevel::new(percent).unwrap()
}

#[test]
fn test_t_values_match_published_tables() {
    assert!((t_value(level(95), 9) - 2.262).abs() < TABLE_EPS);
    assert!((t_value(level(99), 4) - 4.604).abs() < TABLE_EPS);
    assert!((t_value(level(90), 1) - 6.314).abs() < TABLE_EPS);
    assert!((t_value(level(95), 29) - 2.045).abs() < TABLE_EPS);
}

#[test]
fn test_z_values_match_published_tables() {
    assert!((z_value(level(90)) - 1.645).abs() < TABLE_EPS);
    assert!((z_value(level(95)) - 1.960).abs() < TABLE_EPS);
    assert!((z_value(level(99)) - 2.576).abs() < TABLE_EPS);
}

#[test]
fn test_z_values_increase_with_level() {
    assert!(z_value(level(50)) < z_value(level(90)));
    assert!(z_value(level(90)) < z_value(level(99)));
}

#[test]
fn test_t_exceeds_z_for_small_samples() {
    // The t distribution has heavier tails than the normal one.
    for df in 1..=MAX_DF {
        assert!(t_value(level(95), df) > z_value(level(95)));
    }
}

#[test]
fn test_t_approaches_z_with_more_degrees_of_freedom() {
    let far = t_value(level(95), 1) - z_value(level(95));
    let close = t_value(level(95), MAX_DF) - z_value(level(95));

    assert!(close < far);
    assert!(close < 0.1);
}

#[test]
#[should_panic]
fn test_t_value_rejects_zero_degrees_of_freedom() {
    t_value(level(95), 0);
}

#[test]
#[should_panic]
fn test_t_value_rejects_large_samples() {
    t_value(level(95), MAX_DF + 1);
}
