//! Domain layer: pure decision logic with no I/O
//!
//! Everything here is a function of its inputs. The only seam to the outside
//! world is [`experiment::ExperimentDataProvider`], implemented in
//! `infrastructure`.

pub mod cookie;
pub mod error;
pub mod experiment;

pub use error::DomainError;
