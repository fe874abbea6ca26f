//! The scene capability and the runtime type descriptors used to discover it.
//!
//! Rendering lives behind the [`Scene`] trait. What gets discovered in a module is a
//! [`TypeDef`]: a named descriptor with an optional base type and an optional
//! constructor. A type is a scene type when its base chain reaches
//! [`TypeDef::scene_root`] and it is not that root itself.

pub(crate) mod params;

use std::{
    fmt,
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use crate::foundation::{config::ImageMode, console::Console};

use params::SceneParams;

/// Capability every constructed scene provides to post-processing.
///
/// Constructing a scene renders it; by the time an instance exists its frames are
/// written and these accessors describe the results.
///
/// Scenes print through the [`Console`] handed to their constructor. Quiet mode mutes
/// that console only; output written straight to the process stdout (`println!`) stays
/// visible.
pub trait Scene {
    /// Persist the final frame as a still image at [`Scene::image_file_path`].
    fn save_image(&mut self, mode: ImageMode) -> anyhow::Result<()>;

    fn image_file_path(&self) -> PathBuf;

    fn movie_file_path(&self) -> PathBuf;
}

/// Scene constructor. Runs the scene to completion and returns the finished instance.
pub type SceneCtor =
    Arc<dyn Fn(&SceneParams, &mut Console) -> anyhow::Result<Box<dyn Scene>> + Send + Sync>;

struct TypeInfo {
    name: String,
    base: Option<TypeDef>,
    ctor: Option<SceneCtor>,
}

/// Cheaply clonable type descriptor. Equality is identity, not name.
#[derive(Clone)]
pub struct TypeDef(Arc<TypeInfo>);

impl TypeDef {
    /// The abstract scene capability itself.
    pub fn scene_root() -> &'static TypeDef {
        static ROOT: OnceLock<TypeDef> = OnceLock::new();
        ROOT.get_or_init(|| TypeDef::plain("Scene"))
    }

    /// A type with no base and no constructor, e.g. a helper class in a module.
    pub fn plain(name: impl Into<String>) -> Self {
        Self(Arc::new(TypeInfo {
            name: name.into(),
            base: None,
            ctor: None,
        }))
    }

    /// A type deriving from `base`. Without its own constructor it inherits the
    /// nearest one up the chain.
    pub fn derive(name: impl Into<String>, base: &TypeDef, ctor: Option<SceneCtor>) -> Self {
        Self(Arc::new(TypeInfo {
            name: name.into(),
            base: Some(base.clone()),
            ctor,
        }))
    }

    /// Shorthand for a concrete scene type deriving from `base` with its own constructor.
    pub fn scene<F>(name: impl Into<String>, base: &TypeDef, ctor: F) -> Self
    where
        F: Fn(&SceneParams, &mut Console) -> anyhow::Result<Box<dyn Scene>>
            + Send
            + Sync
            + 'static,
    {
        Self::derive(name, base, Some(Arc::new(ctor)))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn base(&self) -> Option<&TypeDef> {
        self.0.base.as_ref()
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDef> {
        std::iter::successors(self.base(), |t| t.base())
    }

    /// True if `other` appears anywhere in this type's base chain.
    pub fn derives_from(&self, other: &TypeDef) -> bool {
        self.ancestors().any(|t| t == other)
    }

    pub fn is_scene_root(&self) -> bool {
        self == Self::scene_root()
    }

    /// Construct (and thereby run) the scene.
    pub fn instantiate(
        &self,
        params: &SceneParams,
        console: &mut Console,
    ) -> anyhow::Result<Box<dyn Scene>> {
        let ctor = std::iter::once(self)
            .chain(self.ancestors())
            .find_map(|t| t.0.ctor.as_ref())
            .ok_or_else(|| {
                anyhow::anyhow!("'{}' is abstract and cannot be constructed", self.name())
            })?;
        ctor(params, console)
    }
}

impl PartialEq for TypeDef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeDef {}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.0.name)
            .field("base", &self.base().map(TypeDef::name))
            .field("has_ctor", &self.0.ctor.is_some())
            .finish()
    }
}

/// A top-level binding exposed by a loaded module.
#[derive(Clone, Debug)]
pub enum Binding {
    Type(TypeDef),
    Value(serde_json::Value),
    Function(String),
}

/// Scene predicate: a concrete specialization of the scene capability.
///
/// Never fails; anything that is not a type is simply not a scene.
pub fn is_scene(binding: &Binding) -> bool {
    match binding {
        Binding::Type(t) => !t.is_scene_root() && t.derives_from(TypeDef::scene_root()),
        Binding::Value(_) | Binding::Function(_) => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/predicate.rs"]
mod tests;
