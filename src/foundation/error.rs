/// Convenience alias used across the crate.
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Error taxonomy for module loading, scene selection and batch execution.
///
/// "No scenes" and "scene not found" are deliberately absent: those are ordinary
/// selection outcomes (see [`crate::Resolution`]), not errors.
#[derive(thiserror::Error, Debug)]
pub enum StagehandError {
    /// The target module could not be resolved or its factory failed. Fatal.
    #[error("module resolution error: cannot load '{module}': {reason}")]
    ModuleResolution {
        /// Module name derived from the input path.
        module: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// Malformed or out-of-range interactive input. Ends the invocation.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// One scene failed during construction or post-processing.
    #[error("scene '{scene}' failed: {cause:#}")]
    SceneExecution {
        /// Name of the failing scene type.
        scene: String,
        /// Underlying failure with its full context chain.
        cause: anyhow::Error,
    },

    /// Configuration rejected during loading or validation.
    #[error("config error: {0}")]
    Config(String),

    /// Frame rendering or encoding failed inside a bundled scene.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagehandError {
    pub fn module_resolution(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModuleResolution {
            module: module.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    pub fn scene_execution(scene: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::SceneExecution {
            scene: scene.into(),
            cause,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<std::io::Error> for StagehandError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
