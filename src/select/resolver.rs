use crate::{
    foundation::{config::Config, error::StagehandResult},
    module::catalog::SceneCatalog,
    scene::TypeDef,
};

pub const NO_SCENE_MESSAGE: &str = "There are no scenes inside that module";
pub const SCENE_NOT_FOUND_MESSAGE: &str = "That scene is not in the module";

/// Picks scenes when the configuration alone cannot.
pub trait Chooser {
    fn choose(&mut self, catalog: &SceneCatalog) -> StagehandResult<Vec<TypeDef>>;
}

/// Outcome of scene selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Scenes to run, in order.
    Run(Vec<TypeDef>),
    /// The module defines no scenes.
    NoSceneFound,
    /// `scene_name` was set but matches nothing.
    SceneNotFound(String),
}

impl Resolution {
    /// The batch to run; empty for the reporting outcomes.
    pub fn scenes(&self) -> &[TypeDef] {
        match self {
            Resolution::Run(scenes) => scenes,
            Resolution::NoSceneFound | Resolution::SceneNotFound(_) => &[],
        }
    }

    pub fn into_scenes(self) -> Vec<TypeDef> {
        match self {
            Resolution::Run(scenes) => scenes,
            Resolution::NoSceneFound | Resolution::SceneNotFound(_) => Vec::new(),
        }
    }

    /// User-facing report for outcomes that select nothing.
    pub fn report(&self) -> Option<&'static str> {
        match self {
            Resolution::Run(_) => None,
            Resolution::NoSceneFound => Some(NO_SCENE_MESSAGE),
            Resolution::SceneNotFound(_) => Some(SCENE_NOT_FOUND_MESSAGE),
        }
    }
}

/// Decide which scenes to run. First matching rule wins:
///
/// 1. empty catalog: nothing, reported;
/// 2. exactly one scene: that scene, whatever the config says;
/// 3. `scene_name` names a scene: that scene (even with `write_all`);
/// 4. `scene_name` set but unknown: nothing, reported;
/// 5. `write_all`: every scene, sorted by name;
/// 6. otherwise ask `chooser`.
///
/// Only the chooser can fail.
pub fn resolve(
    catalog: &SceneCatalog,
    config: &Config,
    chooser: &mut dyn Chooser,
) -> StagehandResult<Resolution> {
    if catalog.is_empty() {
        tracing::warn!("module has no scenes");
        return Ok(Resolution::NoSceneFound);
    }
    if catalog.len() == 1 {
        return Ok(Resolution::Run(catalog.types().cloned().collect()));
    }
    if let Some(t) = catalog.get(&config.scene_name) {
        return Ok(Resolution::Run(vec![t.clone()]));
    }
    if !config.scene_name.is_empty() {
        tracing::warn!(scene = %config.scene_name, "scene not found");
        return Ok(Resolution::SceneNotFound(config.scene_name.clone()));
    }
    if config.write_all {
        return Ok(Resolution::Run(catalog.types().cloned().collect()));
    }
    chooser.choose(catalog).map(Resolution::Run)
}

#[cfg(test)]
#[path = "../../tests/unit/select/resolver.rs"]
mod tests;
