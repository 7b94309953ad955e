//! Problem model and solution types for the puente solver driver.
//!
//! This crate holds the pieces a driver and a solver engine share:
//!
//! - [`Problem`]: the model of variables, objectives, and constraints,
//!   bulk-loaded from a stub-keyed artifact or grown incrementally
//! - [`ProblemChanges`]: an append-only changeset against a base problem
//! - [`Solution`] and [`SolveStatus`]: the typed solve result
//! - [`io`]: the stub-keyed interchange contract traits

pub mod error;
pub mod grow;
pub mod io;
pub mod problem;
pub mod solution;
pub mod types;

pub use error::ProblemError;
pub use grow::GrowVec;
pub use io::{
    IoError, ModelIo, ModelReader, ModelWriter, ProblemData, SolutionData, SolutionReader,
    SolutionWriter, WriteFlags,
};
pub use problem::{Problem, ProblemChanges};
pub use solution::{Solution, SolveStatus};
pub use types::{Sense, VarType};
