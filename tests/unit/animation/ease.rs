use super::*;

#[test]
fn endpoints_are_fixed() {
    assert_eq!(ease(0.0), 0.0);
    assert_eq!(ease(1.0), 1.0);
    assert_eq!(ease(0.5), 0.5);
    assert_eq!(Ease::Linear.apply(0.25), 0.25);
}

#[test]
fn input_is_clamped() {
    assert_eq!(ease(-3.0), 0.0);
    assert_eq!(ease(7.0), 1.0);
    assert_eq!(ease(f64::NAN), 0.0);
    assert_eq!(Ease::Linear.apply(1.5), 1.0);
}

#[test]
fn in_out_cubic_is_monotonic() {
    let mut prev = ease(0.0);
    for i in 1..=1000 {
        let v = ease(f64::from(i) / 1000.0);
        assert!(v >= prev, "ease decreased at step {i}");
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
}

#[test]
fn in_out_cubic_is_slow_at_the_edges() {
    assert!(ease(0.1) < 0.1);
    assert!(ease(0.9) > 0.9);
}
