pub(crate) mod chooser;
pub(crate) mod resolver;
