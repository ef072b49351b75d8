use super::*;

#[test]
fn default_config_is_valid() {
    let cfg = IntroConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.palette_rgb().unwrap().len(), 6);
    assert_eq!(cfg.walk_spec().sample_count, 32);
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg = IntroConfig::from_json_str(r#"{ "outer_count": 8, "start_radius": 20.0 }"#).unwrap();
    assert_eq!(cfg.outer_count, 8);
    assert_eq!(cfg.start_radius, 20.0);
    assert_eq!(cfg.inner_count, 32);
    assert_eq!(cfg.logo.tubular_segments, 400);
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = IntroConfig::default();
    cfg.palette.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.inner_start_margin = 40.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.complete_at = 1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.palette[0] = "red".to_owned();
    assert!(cfg.validate().is_err());

    assert!(IntroConfig::from_json_str("{ not json").is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = IntroConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    assert_eq!(IntroConfig::from_json_str(&s).unwrap(), cfg);
}
