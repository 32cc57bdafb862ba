use super::*;

#[test]
fn max_frame_count_floors_the_product() {
    let cfg = SamplingConfig::new(60, 1.0).unwrap();
    assert_eq!(cfg.max_frame_count(), 60);

    let cfg = SamplingConfig::new(30, 2.5).unwrap();
    assert_eq!(cfg.max_frame_count(), 75);

    let cfg = SamplingConfig::new(1, 0.5).unwrap();
    assert_eq!(cfg.max_frame_count(), 0);
}

#[test]
fn non_positive_values_are_rejected() {
    assert!(SamplingConfig::new(0, 1.0).is_err());
    assert!(SamplingConfig::new(30, 0.0).is_err());
    assert!(SamplingConfig::new(30, -2.0).is_err());
    assert!(SamplingConfig::new(30, f64::NAN).is_err());
    assert!(matches!(
        SamplingConfig::new(30, f64::INFINITY),
        Err(ReelError::InvalidConfiguration(_))
    ));
}

#[test]
fn document_fps_must_be_integral() {
    assert!(SamplingConfig::from_document_values(30.0, 10.0).is_ok());
    assert!(SamplingConfig::from_document_values(29.97, 10.0).is_err());
    assert!(SamplingConfig::from_document_values(-1.0, 10.0).is_err());
}

#[test]
fn canvas_scale_uses_smaller_axis() {
    assert_eq!(Canvas::new(1280, 720).unwrap().scale(), 1.0);
    assert_eq!(Canvas::new(640, 720).unwrap().scale(), 0.5);
    assert!(Canvas::new(0, 10).is_err());
}
