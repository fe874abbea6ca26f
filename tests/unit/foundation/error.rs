use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StagehandError::module_resolution("scenes::intro", "not registered")
            .to_string()
            .contains("module resolution error:")
    );
    assert!(
        StagehandError::invalid_selection("x")
            .to_string()
            .contains("invalid selection:")
    );
    assert!(
        StagehandError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        StagehandError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn scene_execution_names_scene_and_cause() {
    let cause = anyhow::anyhow!("disk full").context("write frame 3");
    let err = StagehandError::scene_execution("Intro", cause);
    let msg = err.to_string();
    assert!(msg.contains("'Intro'"));
    assert!(msg.contains("write frame 3"));
    assert!(msg.contains("disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StagehandError::from(base);
    assert!(err.to_string().contains("boom"));
}
