//! The solver engine contract.

use puente_core::{Problem, Solution};

/// Everything the driver hands an engine for one solve.
pub struct SolveContext<'a> {
    /// The loaded problem.
    pub problem: &'a mut Problem,
    /// Seconds spent loading the model and parsing options, for inclusion
    /// in the engine's timing report.
    pub read_time: f64,
}

/// Trait implemented by the external numerical engine.
///
/// Solve quality is reported through the returned solution's status, not
/// through an error: a failed solve is still a completed attempt.
pub trait Solve {
    fn solve(&mut self, ctx: SolveContext<'_>) -> Solution;
}
