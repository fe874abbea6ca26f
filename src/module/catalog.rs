use std::collections::BTreeMap;

use crate::{
    module::loader::SceneModule,
    scene::{Binding, TypeDef, is_scene},
};

/// Scene name to scene type, iterated in lexicographic name order.
#[derive(Clone, Debug, Default)]
pub struct SceneCatalog {
    entries: BTreeMap<String, TypeDef>,
}

impl SceneCatalog {
    /// Keep every top-level binding that passes [`is_scene`].
    pub fn from_module(module: &SceneModule) -> Self {
        module
            .bindings()
            .filter(|(_, b)| is_scene(b))
            .filter_map(|(name, b)| match b {
                Binding::Type(t) => Some((name.to_string(), t.clone())),
                Binding::Value(_) | Binding::Function(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.entries.get(name)
    }

    /// Names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Types in display order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDef)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }
}

impl FromIterator<(String, TypeDef)> for SceneCatalog {
    fn from_iter<I: IntoIterator<Item = (String, TypeDef)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/module/catalog.rs"]
mod tests;
