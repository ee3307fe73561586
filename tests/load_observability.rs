use std::sync::{Arc, Mutex};

use eda_report::LoadError;
use eda_report::ingestion::{
    CompositeObserver, LoadContext, LoadObserver, LoadOptions, LoadSeverity, LoadStats,
    load_from_path,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    load_from_path("tests/fixtures/sample.csv", &opts).unwrap();

    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![LoadStats {
            rows: 4,
            columns: 3
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![LoadSeverity::Critical]
    );
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn unknown_encoding_is_error_severity_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        encoding: "no-such-encoding".to_string(),
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let _ = load_from_path("tests/fixtures/sample.csv", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![a.clone(), b.clone()]);
    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        alert_at_or_above: LoadSeverity::Error,
        ..Default::default()
    };

    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    for obs in [&a, &b] {
        assert_eq!(obs.failures.lock().unwrap().len(), 1);
        assert_eq!(obs.alerts.lock().unwrap().len(), 1);
    }
}
