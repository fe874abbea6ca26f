//! Scene modules bundled with the binary.

pub(crate) mod shapes;
