//! Infrastructure layer: I/O implementations of the domain seams

pub mod logging;
pub mod provider;
