//! Stub-keyed interchange contract.
//!
//! The binary/text encoding of the model interchange format lives in an
//! external collaborator. This module defines only the call contract: a
//! *stub* is a base filename identifying a paired set of artifacts,
//! conventionally `<stub>.nl` for the model and `<stub>.sol` for the
//! solution.

use crate::problem::{Problem, ProblemChanges};
use crate::types::{Sense, VarType};
use puente_expr::{LinearExpr, LogicalExpr, NumericExpr};

/// Interchange read/write errors.
#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    /// No artifact found for the stub.
    NotFound { stub: String },
    /// The artifact exists but its contents are unusable.
    Malformed { stub: String, reason: String },
    /// Writing an artifact failed.
    Write { stub: String, reason: String },
}

impl IoError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            IoError::NotFound { .. } => "IO_STUB_NOT_FOUND",
            IoError::Malformed { .. } => "IO_MALFORMED",
            IoError::Write { .. } => "IO_WRITE_FAILED",
        }
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::NotFound { stub } => {
                write!(f, "[{}] No problem found for stub \"{}\"", self.code(), stub)
            }
            IoError::Malformed { stub, reason } => {
                write!(f, "[{}] Malformed artifact \"{}\": {}", self.code(), stub, reason)
            }
            IoError::Write { stub, reason } => {
                write!(f, "[{}] Can't write artifact \"{}\": {}", self.code(), stub, reason)
            }
        }
    }
}

impl std::error::Error for IoError {}

/// Path of the model artifact for a stub.
pub fn nl_path(stub: &str) -> String {
    format!("{stub}.nl")
}

/// Path of the solution artifact for a stub.
pub fn sol_path(stub: &str) -> String {
    format!("{stub}.sol")
}

/// Serialization flags for [`ModelWriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteFlags {
    /// Suppress registered nonlinear function calls in the output.
    pub ignore_functions: bool,
}

/// Bulk model data produced by a [`ModelReader`].
///
/// Array lengths define the entity counts: one bounds pair per variable and
/// per algebraic constraint, one sense and expression pair per objective.
#[derive(Debug, Clone, Default)]
pub struct ProblemData {
    pub var_lb: Vec<f64>,
    pub var_ub: Vec<f64>,
    /// Explicit per-variable types; `None` when integer variables follow
    /// continuous ones by position.
    pub var_types: Option<Vec<VarType>>,
    /// Number of integer variables under the positional convention.
    pub num_integer_vars: usize,
    pub con_lb: Vec<f64>,
    pub con_ub: Vec<f64>,
    pub obj_senses: Vec<Sense>,
    pub linear_objs: Vec<LinearExpr>,
    pub nonlinear_objs: Vec<Option<NumericExpr>>,
    pub linear_cons: Vec<LinearExpr>,
    pub nonlinear_cons: Vec<Option<NumericExpr>>,
    pub logical_cons: Vec<LogicalExpr>,
}

/// Solution data produced by a [`SolutionReader`].
#[derive(Debug, Clone, Default)]
pub struct SolutionData {
    pub solve_code: i32,
    pub values: Vec<f64>,
    pub dual_values: Vec<f64>,
}

/// Loads a full problem model identified by a stub.
pub trait ModelReader {
    fn read_model(&self, stub: &str) -> Result<ProblemData, IoError>;
}

/// Serializes a base problem plus an optional changeset.
pub trait ModelWriter {
    fn write_model(
        &self,
        stub: &str,
        problem: &Problem,
        changes: Option<&ProblemChanges<'_>>,
        flags: WriteFlags,
    ) -> Result<(), IoError>;
}

/// Reads back a previously solved artifact sized to the given counts.
pub trait SolutionReader {
    fn read_solution(
        &self,
        stub: &str,
        num_vars: usize,
        num_cons: usize,
    ) -> Result<SolutionData, IoError>;
}

/// Writes a result artifact for a stub.
pub trait SolutionWriter {
    fn write_solution(&self, stub: &str, solution: &crate::solution::Solution)
        -> Result<(), IoError>;
}

/// The full interchange surface a driver needs.
pub trait ModelIo: ModelReader + ModelWriter + SolutionReader + SolutionWriter {}

impl<T: ModelReader + ModelWriter + SolutionReader + SolutionWriter> ModelIo for T {}
