use std::path::PathBuf;

use streamchart::{ChartStyle, StreamChartConfig, StreamChartError, DEFAULT_CAPACITY};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("streamchart-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_match_dashboard_behavior() {
    let cfg = StreamChartConfig::default();
    assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
    assert_eq!(cfg.initial_samples, 10_000);
    assert_eq!(cfg.initial_step_ms, 100);
    assert_eq!(cfg.rate_ms, 100);
    assert_eq!(cfg.style, ChartStyle::default());
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_yaml_keeps_other_defaults() {
    let cfg = StreamChartConfig::from_yaml_str(
        "capacity: 50000\nrate_ms: 50\nstyle:\n  line_width: 2.0\n",
    )
    .unwrap();
    assert_eq!(cfg.capacity, 50_000);
    assert_eq!(cfg.rate_ms, 50);
    assert_eq!(cfg.style.line_width, 2.0);
    assert_eq!(cfg.style.fill_rgba, ChartStyle::default().fill_rgba);
    assert_eq!(cfg.chunk_size, StreamChartConfig::default().chunk_size);
}

#[test]
fn json_is_accepted() {
    let cfg = StreamChartConfig::from_json_str(r#"{"title": "Sensors", "show_table": false}"#)
        .unwrap();
    assert_eq!(cfg.title, "Sensors");
    assert!(!cfg.show_table);
}

#[test]
fn out_of_range_values_are_rejected() {
    for yaml in [
        "capacity: 0",
        "chunk_size: 0",
        "rate_ms: 0\nmin_rate_ms: 0",
        "min_rate_ms: 500\nmax_rate_ms: 100",
        "rate_ms: 5000",
        "chart_height: 0.0",
    ] {
        let err = StreamChartConfig::from_yaml_str(yaml).unwrap_err();
        assert!(
            matches!(err, StreamChartError::InvalidConfig(_)),
            "{yaml:?} gave {err:?}"
        );
    }
}

#[test]
fn malformed_text_is_a_parse_error() {
    assert!(matches!(
        StreamChartConfig::from_yaml_str("capacity: [1, 2"),
        Err(StreamChartError::Yaml(_))
    ));
    assert!(matches!(
        StreamChartConfig::from_json_str("{\"capacity\": \"many\"}"),
        Err(StreamChartError::Json(_))
    ));
}

#[test]
fn file_extension_selects_format() {
    let json = temp_file("cfg.json", r#"{"capacity": 1234}"#);
    assert_eq!(StreamChartConfig::from_path(&json).unwrap().capacity, 1234);

    let yaml = temp_file("cfg.yaml", "capacity: 4321\n");
    assert_eq!(StreamChartConfig::from_path(&yaml).unwrap().capacity, 4321);

    let _ = std::fs::remove_file(json);
    let _ = std::fs::remove_file(yaml);
}

#[test]
fn missing_file_reports_its_path() {
    let path = std::env::temp_dir().join("streamchart-does-not-exist.yaml");
    let err = StreamChartConfig::from_path(&path).unwrap_err();
    match err {
        StreamChartError::ConfigIo { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other:?}"),
    }
}
