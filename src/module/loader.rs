use std::{collections::BTreeMap, path::Path};

use crate::{
    foundation::error::{StagehandError, StagehandResult},
    scene::Binding,
};

/// Source-file suffix stripped from module paths.
pub const SOURCE_SUFFIX: &str = ".rs";
/// Separator used in module names (`demos/shapes.rs` -> `demos::shapes`).
pub const MODULE_SEPARATOR: &str = "::";

/// A loaded module: its name and its top-level bindings, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct SceneModule {
    name: String,
    bindings: Vec<(String, Binding)>,
}

impl SceneModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Add a binding. A later binding with the same name shadows the earlier one.
    pub fn bind(mut self, name: impl Into<String>, binding: Binding) -> Self {
        let name = name.into();
        self.bindings.retain(|(n, _)| *n != name);
        self.bindings.push((name, binding));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(n, b)| (n.as_str(), b))
    }
}

/// Builds a module's bindings. An `Err` models a failure while the module initializes.
pub type ModuleFactory = fn() -> anyhow::Result<SceneModule>;

/// Explicit table of loadable modules, keyed by module name.
#[derive(Clone, Debug, Default)]
pub struct ModuleRegistry {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every module bundled with this crate.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        reg.register(crate::demos::shapes::MODULE_NAME, crate::demos::shapes::module);
        reg
    }

    pub fn register(&mut self, name: impl Into<String>, factory: ModuleFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

/// Translate a relative source path into a module name.
pub fn module_name_for_path(path: &Path) -> String {
    let lossy = path.to_string_lossy();
    let raw: &str = &lossy;
    let raw = raw.strip_prefix("./").unwrap_or(raw);
    let raw = raw.strip_prefix(".\\").unwrap_or(raw);
    let stem = raw.strip_suffix(SOURCE_SUFFIX).unwrap_or(raw);
    stem.split(['/', '\\'])
        .filter(|seg| !seg.is_empty())
        .collect::<Vec<_>>()
        .join(MODULE_SEPARATOR)
}

/// Resolve `path` against `registry` and initialize the module.
///
/// Any failure here is fatal for the invocation: without a module there is nothing to
/// discover.
#[tracing::instrument(skip(registry))]
pub fn load_module(path: &Path, registry: &ModuleRegistry) -> StagehandResult<SceneModule> {
    let name = module_name_for_path(path);
    if name.is_empty() {
        return Err(StagehandError::module_resolution(
            path.display().to_string(),
            "path does not name a module",
        ));
    }

    let factory = registry.factories.get(&name).ok_or_else(|| {
        let known = registry.names().collect::<Vec<_>>().join(", ");
        StagehandError::module_resolution(
            &name,
            format!("no such module (known modules: {known})"),
        )
    })?;

    tracing::debug!(module = %name, "initializing module");
    factory().map_err(|e| StagehandError::module_resolution(&name, format!("{e:#}")))
}

#[cfg(test)]
#[path = "../../tests/unit/module/loader.rs"]
mod tests;
