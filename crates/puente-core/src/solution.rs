//! Solve results.

use crate::io::{IoError, SolutionReader};

/// Coarse solution status derived from the solve code.
///
/// Ordered by declaration so that status comparisons follow the code bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolveStatus {
    /// Code is negative or out of the banded range.
    Unknown,
    /// Codes 0..=99: an optimal solution was found.
    Solved,
    /// Codes 100..=199: a solution was returned but its optimality is
    /// uncertain.
    SolvedMaybe,
    /// Codes 200..=299: the problem is infeasible.
    Infeasible,
    /// Codes 300..=399: the objective is unbounded.
    Unbounded,
    /// Codes 400..=499: a solver limit was reached.
    Limit,
    /// Codes 500..=599: the solver failed.
    Failure,
}

impl SolveStatus {
    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Unknown => "unknown",
            SolveStatus::Solved => "solved",
            SolveStatus::SolvedMaybe => "solved?",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Limit => "limit",
            SolveStatus::Failure => "failure",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A solution of an optimization problem.
///
/// Filled in place by [`Solution::read`] after a solve; immutable through
/// the accessor surface afterwards.
#[derive(Debug, Clone)]
pub struct Solution {
    solve_code: i32,
    values: Vec<f64>,
    dual_values: Vec<f64>,
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl Solution {
    /// Solution with zero variables and constraints and solve code -1.
    pub fn new() -> Self {
        Self {
            solve_code: -1,
            values: Vec::new(),
            dual_values: Vec::new(),
        }
    }

    /// The solution status derived from the solve code band.
    pub fn status(&self) -> SolveStatus {
        if self.solve_code < 0 || self.solve_code >= 600 {
            return SolveStatus::Unknown;
        }
        match self.solve_code / 100 {
            0 => SolveStatus::Solved,
            1 => SolveStatus::SolvedMaybe,
            2 => SolveStatus::Infeasible,
            3 => SolveStatus::Unbounded,
            4 => SolveStatus::Limit,
            _ => SolveStatus::Failure,
        }
    }

    /// The raw solve code.
    pub fn solve_code(&self) -> i32 {
        self.solve_code
    }

    /// Number of variables at solve time.
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// Number of constraints at solve time.
    pub fn num_cons(&self) -> usize {
        self.dual_values.len()
    }

    /// Primal values of all variables.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Dual values of all constraints.
    pub fn dual_values(&self) -> &[f64] {
        &self.dual_values
    }

    /// Get the primal value at the given index.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get the dual value at the given index.
    pub fn dual_value(&self, index: usize) -> Option<f64> {
        self.dual_values.get(index).copied()
    }

    /// Swap this solution with another without copying the value arrays.
    pub fn swap(&mut self, other: &mut Solution) {
        std::mem::swap(self, other);
    }

    /// Fill this solution from a previously solved artifact.
    ///
    /// The reader contract sizes the arrays to the given counts; a mismatch
    /// is a malformed artifact.
    pub fn read(
        &mut self,
        reader: &dyn SolutionReader,
        stub: &str,
        num_vars: usize,
        num_cons: usize,
    ) -> Result<(), IoError> {
        let data = reader.read_solution(stub, num_vars, num_cons)?;
        if data.values.len() != num_vars || data.dual_values.len() != num_cons {
            return Err(IoError::Malformed {
                stub: stub.to_string(),
                reason: format!(
                    "expected {} values and {} duals, got {} and {}",
                    num_vars,
                    num_cons,
                    data.values.len(),
                    data.dual_values.len()
                ),
            });
        }
        self.solve_code = data.solve_code;
        self.values = data.values;
        self.dual_values = data.dual_values;
        tracing::debug!(
            component = "solution",
            operation = "read",
            status = "success",
            stub = stub,
            solve_code = self.solve_code,
            num_vars = num_vars as u64,
            num_cons = num_cons as u64,
            "Read solution artifact"
        );
        Ok(())
    }

    /// Construct a solution directly from a solve code and value arrays.
    pub fn from_parts(solve_code: i32, values: Vec<f64>, dual_values: Vec<f64>) -> Self {
        Self {
            solve_code,
            values,
            dual_values,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::io::SolutionData;

    struct FixtureReader {
        data: SolutionData,
    }

    impl SolutionReader for FixtureReader {
        fn read_solution(
            &self,
            _stub: &str,
            _num_vars: usize,
            _num_cons: usize,
        ) -> Result<SolutionData, IoError> {
            Ok(self.data.clone())
        }
    }

    #[test]
    fn default_solution_is_unknown() {
        let solution = Solution::new();
        assert_eq!(solution.solve_code(), -1);
        assert_eq!(solution.num_vars(), 0);
        assert_eq!(solution.num_cons(), 0);
        assert_eq!(solution.status(), SolveStatus::Unknown);
    }

    #[test]
    fn status_band_mapping() {
        let cases = [
            (0, SolveStatus::Solved),
            (150, SolveStatus::SolvedMaybe),
            (250, SolveStatus::Infeasible),
            (350, SolveStatus::Unbounded),
            (450, SolveStatus::Limit),
            (550, SolveStatus::Failure),
            (600, SolveStatus::Unknown),
            (-1, SolveStatus::Unknown),
        ];
        for (code, expected) in cases {
            let solution = Solution::from_parts(code, Vec::new(), Vec::new());
            assert_eq!(solution.status(), expected, "code {code}");
        }
    }

    #[test]
    fn status_ordering_follows_bands() {
        assert!(SolveStatus::Solved < SolveStatus::SolvedMaybe);
        assert!(SolveStatus::SolvedMaybe < SolveStatus::Infeasible);
        assert!(SolveStatus::Infeasible < SolveStatus::Unbounded);
        assert!(SolveStatus::Unbounded < SolveStatus::Limit);
        assert!(SolveStatus::Limit < SolveStatus::Failure);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = Solution::from_parts(0, vec![1.0, 2.0], vec![0.5]);
        let mut b = Solution::new();
        a.swap(&mut b);
        assert_eq!(a.solve_code(), -1);
        assert_eq!(b.values(), &[1.0, 2.0]);
        assert_eq!(b.dual_values(), &[0.5]);
    }

    #[test]
    fn read_fills_in_place() {
        let reader = FixtureReader {
            data: SolutionData {
                solve_code: 100,
                values: vec![3.0, 4.0],
                dual_values: vec![1.0],
            },
        };
        let mut solution = Solution::new();
        solution.read(&reader, "diet", 2, 1).unwrap();
        assert_eq!(solution.status(), SolveStatus::SolvedMaybe);
        assert_eq!(solution.value(1), Some(4.0));
        assert_eq!(solution.value(2), None);
        assert_eq!(solution.dual_value(0), Some(1.0));
    }

    #[test]
    fn read_rejects_mismatched_counts() {
        let reader = FixtureReader {
            data: SolutionData {
                solve_code: 0,
                values: vec![1.0],
                dual_values: Vec::new(),
            },
        };
        let mut solution = Solution::new();
        let err = solution.read(&reader, "diet", 2, 0).unwrap_err();
        assert_eq!(err.code(), "IO_MALFORMED");
    }
}
