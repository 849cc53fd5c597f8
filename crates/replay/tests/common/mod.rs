use std::io::Write;

use tempfile::NamedTempFile;

/// Write a script to a temporary file that lives as long as the handle.
pub fn write_script(script: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp script");
    serde_json::to_writer(&mut file, script).expect("write script");
    file.flush().expect("flush script");
    file
}

/// Load and run a script value with the default engine configuration.
pub fn replay(script: serde_json::Value) -> annotator_replay::ReplayOutcome {
    let file = write_script(&script);
    let script = annotator_replay::load_script(file.path()).expect("load script");
    annotator_replay::run_script(script, annotator_core::EngineConfig::default())
        .expect("run script")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
