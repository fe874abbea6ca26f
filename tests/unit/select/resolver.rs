use super::*;
use crate::foundation::error::StagehandError;

/// Chooser that records whether it was consulted and answers with fixed names.
struct Scripted {
    calls: usize,
    answer: Vec<&'static str>,
}

impl Scripted {
    fn new(answer: &[&'static str]) -> Self {
        Self {
            calls: 0,
            answer: answer.to_vec(),
        }
    }
}

impl Chooser for Scripted {
    fn choose(&mut self, catalog: &SceneCatalog) -> StagehandResult<Vec<TypeDef>> {
        self.calls += 1;
        Ok(self
            .answer
            .iter()
            .filter_map(|n| catalog.get(n).cloned())
            .collect())
    }
}

struct Refuses;

impl Chooser for Refuses {
    fn choose(&mut self, _: &SceneCatalog) -> StagehandResult<Vec<TypeDef>> {
        Err(StagehandError::invalid_selection("9 is not between 1 and 3"))
    }
}

fn catalog(names: &[&str]) -> SceneCatalog {
    names
        .iter()
        .map(|n| {
            (
                n.to_string(),
                TypeDef::derive(*n, TypeDef::scene_root(), None),
            )
        })
        .collect()
}

fn names(r: &Resolution) -> Vec<&str> {
    r.scenes().iter().map(TypeDef::name).collect()
}

fn configs() -> Vec<Config> {
    let mut out = Vec::new();
    for scene_name in ["", "B", "Missing"] {
        for write_all in [false, true] {
            out.push(Config {
                scene_name: scene_name.to_string(),
                write_all,
                ..Config::default()
            });
        }
    }
    out
}

#[test]
fn empty_catalog_reports_no_scene_for_any_config() {
    for cfg in configs() {
        let mut chooser = Scripted::new(&[]);
        let r = resolve(&catalog(&[]), &cfg, &mut chooser).unwrap();
        assert_eq!(r, Resolution::NoSceneFound);
        assert_eq!(r.report(), Some(NO_SCENE_MESSAGE));
        assert!(r.scenes().is_empty());
        assert_eq!(chooser.calls, 0);
    }
}

#[test]
fn single_entry_short_circuits_every_config() {
    for cfg in configs() {
        let mut chooser = Scripted::new(&[]);
        let r = resolve(&catalog(&["Only"]), &cfg, &mut chooser).unwrap();
        assert_eq!(names(&r), ["Only"]);
        assert_eq!(r.report(), None);
        assert_eq!(chooser.calls, 0);
    }
}

#[test]
fn exact_name_wins_even_with_write_all() {
    for write_all in [false, true] {
        let cfg = Config {
            scene_name: "B".to_string(),
            write_all,
            ..Config::default()
        };
        let mut chooser = Scripted::new(&[]);
        let r = resolve(&catalog(&["A", "B", "C"]), &cfg, &mut chooser).unwrap();
        assert_eq!(names(&r), ["B"]);
        assert_eq!(chooser.calls, 0);
    }
}

#[test]
fn unknown_name_is_reported_not_raised() {
    let cfg = Config {
        scene_name: "Nope".to_string(),
        write_all: true,
        ..Config::default()
    };
    let r = resolve(&catalog(&["A", "B"]), &cfg, &mut Scripted::new(&[])).unwrap();
    assert_eq!(r, Resolution::SceneNotFound("Nope".to_string()));
    assert_eq!(r.report(), Some(SCENE_NOT_FOUND_MESSAGE));
    assert!(r.into_scenes().is_empty());
}

#[test]
fn write_all_returns_everything_sorted() {
    let cfg = Config {
        write_all: true,
        ..Config::default()
    };
    let r = resolve(&catalog(&["Zed", "Alpha", "Mid"]), &cfg, &mut Scripted::new(&[])).unwrap();
    assert_eq!(names(&r), ["Alpha", "Mid", "Zed"]);
}

#[test]
fn ambiguous_request_asks_the_chooser() {
    let mut chooser = Scripted::new(&["C", "A"]);
    let r = resolve(&catalog(&["A", "B", "C"]), &Config::default(), &mut chooser).unwrap();
    assert_eq!(chooser.calls, 1);
    assert_eq!(names(&r), ["C", "A"]);
}

#[test]
fn chooser_failure_propagates() {
    let err = resolve(&catalog(&["A", "B", "C"]), &Config::default(), &mut Refuses).unwrap_err();
    assert!(matches!(err, StagehandError::InvalidSelection(_)));
}
