pub(crate) mod config;
pub(crate) mod console;
pub(crate) mod error;
