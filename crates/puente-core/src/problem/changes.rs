//! Append-only changesets against a base problem.

use crate::error::ProblemError;
use crate::problem::Problem;
use crate::types::Sense;
use puente_expr::{LinearExpr, VariableId};

/// Changes (additions) to an optimization problem.
///
/// Records additional variables, constraints, and objectives against a
/// borrowed base [`Problem`] without mutating it. Variable indices returned
/// by [`ProblemChanges::add_var`] are offset by the base problem's variable
/// count, so base and delta share one index space. Term storage is owned
/// and index-addressed; appending never invalidates earlier entries.
///
/// Cloning deep-copies the delta while still borrowing the same base.
#[derive(Debug, Clone)]
pub struct ProblemChanges<'a> {
    base: &'a Problem,
    var_lb: Vec<f64>,
    var_ub: Vec<f64>,
    con_lb: Vec<f64>,
    con_ub: Vec<f64>,
    con_exprs: Vec<LinearExpr>,
    obj_senses: Vec<Sense>,
    obj_exprs: Vec<LinearExpr>,
}

impl<'a> ProblemChanges<'a> {
    /// Empty changeset against a base problem.
    pub fn new(base: &'a Problem) -> Self {
        Self {
            base,
            var_lb: Vec::new(),
            var_ub: Vec::new(),
            con_lb: Vec::new(),
            con_ub: Vec::new(),
            con_exprs: Vec::new(),
            obj_senses: Vec::new(),
            obj_exprs: Vec::new(),
        }
    }

    /// Number of additional variables.
    pub fn num_vars(&self) -> usize {
        self.var_lb.len()
    }

    /// Number of additional constraints.
    pub fn num_cons(&self) -> usize {
        self.con_exprs.len()
    }

    /// Number of additional objectives.
    pub fn num_objs(&self) -> usize {
        self.obj_exprs.len()
    }

    /// Variable count of the unified base-plus-delta index space.
    pub fn total_num_vars(&self) -> usize {
        self.base.num_vars() + self.num_vars()
    }

    /// Add a variable, returning its index in the unified space.
    pub fn add_var(&mut self, lb: f64, ub: f64) -> VariableId {
        self.var_lb.push(lb);
        self.var_ub.push(ub);
        VariableId::from_index(self.base.num_vars() + self.var_lb.len() - 1)
    }

    /// Add a constraint from dense coefficients over the unified variable
    /// space.
    ///
    /// Zero coefficients are dropped; `coefs` must cover every base and
    /// delta variable.
    pub fn add_con(&mut self, coefs: &[f64], lb: f64, ub: f64) -> Result<(), ProblemError> {
        if coefs.len() != self.total_num_vars() {
            return Err(ProblemError::InvalidData {
                reason: format!(
                    "{} constraint coefficients for {} variables",
                    coefs.len(),
                    self.total_num_vars()
                ),
            });
        }
        let expr = coefs
            .iter()
            .enumerate()
            .map(|(i, c)| (VariableId::from_index(i), *c))
            .collect();
        self.con_lb.push(lb);
        self.con_ub.push(ub);
        self.con_exprs.push(expr);
        Ok(())
    }

    /// Add an objective from sparse terms over the unified variable space.
    pub fn add_obj(
        &mut self,
        sense: Sense,
        terms: &[(VariableId, f64)],
    ) -> Result<(), ProblemError> {
        let total = self.total_num_vars();
        if let Some((var, _)) = terms.iter().find(|(var, _)| var.index() >= total) {
            return Err(ProblemError::InvalidData {
                reason: format!(
                    "objective term references variable {} of {}",
                    var.inner(),
                    total
                ),
            });
        }
        self.obj_senses.push(sense);
        self.obj_exprs.push(LinearExpr::from_terms(terms.to_vec()));
        Ok(())
    }

    // ── Delta access (for the interchange writer) ───────────

    /// Lower bounds of the added variables.
    pub fn var_lb(&self) -> &[f64] {
        &self.var_lb
    }

    /// Upper bounds of the added variables.
    pub fn var_ub(&self) -> &[f64] {
        &self.var_ub
    }

    /// Lower bounds of the added constraints.
    pub fn con_lb(&self) -> &[f64] {
        &self.con_lb
    }

    /// Upper bounds of the added constraints.
    pub fn con_ub(&self) -> &[f64] {
        &self.con_ub
    }

    /// Terms of an added constraint.
    pub fn con_expr(&self, index: usize) -> &LinearExpr {
        &self.con_exprs[index]
    }

    /// Sense of an added objective.
    pub fn obj_sense(&self, index: usize) -> Sense {
        self.obj_senses[index]
    }

    /// Terms of an added objective.
    pub fn obj_expr(&self, index: usize) -> &LinearExpr {
        &self.obj_exprs[index]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::VarType;

    fn base_with_vars(n: usize) -> Problem {
        let mut problem = Problem::new();
        for _ in 0..n {
            problem.add_var(0.0, 1.0, VarType::Continuous).unwrap();
        }
        problem
    }

    #[test]
    fn add_var_offsets_into_unified_space() {
        let base = base_with_vars(3);
        let mut changes = ProblemChanges::new(&base);
        let first = changes.add_var(-1.0, 1.0);
        assert_eq!(first.index(), 3);
        let second = changes.add_var(0.0, 2.0);
        assert_eq!(second.index(), 4);
        assert_eq!(changes.num_vars(), 2);
        assert_eq!(changes.total_num_vars(), 5);
        assert_eq!(changes.var_lb(), &[-1.0, 0.0]);
        assert_eq!(changes.var_ub(), &[1.0, 2.0]);
    }

    #[test]
    fn add_con_sparsifies_dense_coefficients() {
        let base = base_with_vars(2);
        let mut changes = ProblemChanges::new(&base);
        let extra = changes.add_var(0.0, 1.0);
        changes.add_con(&[1.0, 0.0, -2.0], 0.0, 5.0).unwrap();
        assert_eq!(changes.num_cons(), 1);
        let expr = changes.con_expr(0);
        assert_eq!(expr.terms(), &[(VariableId::new(0), 1.0), (extra, -2.0)]);
        assert_eq!(changes.con_lb(), &[0.0]);
        assert_eq!(changes.con_ub(), &[5.0]);
    }

    #[test]
    fn add_con_rejects_wrong_length() {
        let base = base_with_vars(2);
        let mut changes = ProblemChanges::new(&base);
        let err = changes.add_con(&[1.0], 0.0, 1.0).unwrap_err();
        assert_eq!(err.code(), "PROBLEM_INVALID_DATA");
    }

    #[test]
    fn add_obj_validates_term_ids() {
        let base = base_with_vars(2);
        let mut changes = ProblemChanges::new(&base);
        changes
            .add_obj(Sense::Maximize, &[(VariableId::new(1), 3.0)])
            .unwrap();
        assert_eq!(changes.obj_sense(0), Sense::Maximize);
        assert_eq!(changes.obj_expr(0).terms(), &[(VariableId::new(1), 3.0)]);

        let err = changes
            .add_obj(Sense::Minimize, &[(VariableId::new(7), 1.0)])
            .unwrap_err();
        assert_eq!(err.code(), "PROBLEM_INVALID_DATA");
    }

    #[test]
    fn clone_deep_copies_the_delta() {
        let base = base_with_vars(1);
        let mut changes = ProblemChanges::new(&base);
        changes.add_var(0.0, 1.0);
        let mut copy = changes.clone();
        copy.add_var(2.0, 3.0);
        assert_eq!(changes.num_vars(), 1);
        assert_eq!(copy.num_vars(), 2);
        assert_eq!(copy.total_num_vars(), 3);
    }
}
