//! The optimization problem model.
//!
//! A [`Problem`] is mutable at construction through the `add_*` methods and
//! effectively frozen after a bulk [`Problem::read`]: loaded arrays carry
//! zero spare capacity and reject structural growth. Incremental additions
//! against a loaded problem go through [`ProblemChanges`] instead.

mod changes;

pub use changes::ProblemChanges;

use crate::error::ProblemError;
use crate::grow::GrowVec;
use crate::io::{ModelReader, ModelWriter, ProblemData, WriteFlags};
use crate::types::{Sense, VarType};
use puente_expr::{ConstraintId, LinearExpr, LogicalExpr, NumericExpr, ObjectiveId, VariableId};

/// An optimization problem.
#[derive(Debug)]
pub struct Problem {
    var_lb: GrowVec<f64>,
    var_ub: GrowVec<f64>,
    /// Explicit per-variable types, or `None` while integer variables
    /// follow continuous variables by position.
    var_types: Option<Vec<VarType>>,
    /// Integer variable count under the positional convention; unused once
    /// `var_types` is materialized.
    positional_integer_vars: usize,
    con_lb: GrowVec<f64>,
    con_ub: GrowVec<f64>,
    linear_cons: GrowVec<LinearExpr>,
    nonlinear_cons: GrowVec<Option<NumericExpr>>,
    obj_senses: GrowVec<Sense>,
    linear_objs: GrowVec<LinearExpr>,
    nonlinear_objs: GrowVec<Option<NumericExpr>>,
    logical_cons: GrowVec<LogicalExpr>,
    solve_code: i32,
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem {
    /// Empty, growable problem.
    pub fn new() -> Self {
        Self {
            var_lb: GrowVec::new(),
            var_ub: GrowVec::new(),
            var_types: None,
            positional_integer_vars: 0,
            con_lb: GrowVec::new(),
            con_ub: GrowVec::new(),
            linear_cons: GrowVec::new(),
            nonlinear_cons: GrowVec::new(),
            obj_senses: GrowVec::new(),
            linear_objs: GrowVec::new(),
            nonlinear_objs: GrowVec::new(),
            logical_cons: GrowVec::new(),
            solve_code: -1,
        }
    }

    // ── Counts ──────────────────────────────────────────────

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.var_lb.len()
    }

    /// Number of objectives.
    pub fn num_objs(&self) -> usize {
        self.obj_senses.len()
    }

    /// Number of algebraic constraints, excluding logical constraints.
    pub fn num_cons(&self) -> usize {
        self.con_lb.len()
    }

    /// Number of logical constraints.
    pub fn num_logical_cons(&self) -> usize {
        self.logical_cons.len()
    }

    /// Number of integer variables.
    pub fn num_integer_vars(&self) -> usize {
        match &self.var_types {
            Some(types) => types.iter().filter(|t| **t == VarType::Integer).count(),
            None => self.positional_integer_vars,
        }
    }

    /// Number of continuous variables.
    pub fn num_continuous_vars(&self) -> usize {
        self.num_vars() - self.num_integer_vars()
    }

    /// Number of objectives with a nonlinear part.
    pub fn num_nonlinear_objs(&self) -> usize {
        self.nonlinear_objs.iter().filter(|e| e.is_some()).count()
    }

    /// Number of constraints with a nonlinear part.
    pub fn num_nonlinear_cons(&self) -> usize {
        self.nonlinear_cons.iter().filter(|e| e.is_some()).count()
    }

    // ── Storage access ──────────────────────────────────────

    /// Lower bounds for the variables.
    pub fn var_lb(&self) -> &[f64] {
        self.var_lb.as_slice()
    }

    /// Upper bounds for the variables.
    pub fn var_ub(&self) -> &[f64] {
        self.var_ub.as_slice()
    }

    /// Lower bounds for the algebraic constraints.
    pub fn con_lb(&self) -> &[f64] {
        self.con_lb.as_slice()
    }

    /// Upper bounds for the algebraic constraints.
    pub fn con_ub(&self) -> &[f64] {
        self.con_ub.as_slice()
    }

    /// The type of a variable.
    ///
    /// Without an explicit type array this is derived from the positional
    /// convention: indices at or past `num_continuous_vars()` are integer.
    ///
    /// Panics if `index` is out of range.
    pub fn var_type(&self, index: usize) -> VarType {
        assert!(index < self.num_vars());
        if let Some(types) = &self.var_types {
            return types[index];
        }
        if index >= self.num_continuous_vars() {
            VarType::Integer
        } else {
            VarType::Continuous
        }
    }

    /// The optimization sense of an objective.
    pub fn obj_sense(&self, obj: ObjectiveId) -> Sense {
        self.obj_senses[obj.index()]
    }

    /// The linear part of an objective expression.
    pub fn linear_obj_expr(&self, obj: ObjectiveId) -> &LinearExpr {
        &self.linear_objs[obj.index()]
    }

    /// The nonlinear part of an objective expression, if any.
    pub fn nonlinear_obj_expr(&self, obj: ObjectiveId) -> Option<&NumericExpr> {
        self.nonlinear_objs[obj.index()].as_ref()
    }

    /// The linear part of a constraint expression.
    pub fn linear_con_expr(&self, con: ConstraintId) -> &LinearExpr {
        &self.linear_cons[con.index()]
    }

    /// The nonlinear part of a constraint expression, if any.
    pub fn nonlinear_con_expr(&self, con: ConstraintId) -> Option<&NumericExpr> {
        self.nonlinear_cons[con.index()].as_ref()
    }

    /// A logical constraint expression.
    pub fn logical_con_expr(&self, con: ConstraintId) -> &LogicalExpr {
        &self.logical_cons[con.index()]
    }

    /// The solve code recorded by the last solve.
    pub fn solve_code(&self) -> i32 {
        self.solve_code
    }

    /// Record the solve code.
    pub fn set_solve_code(&mut self, value: i32) {
        self.solve_code = value;
    }

    // ── Structural growth ───────────────────────────────────

    /// Add a variable, returning its index.
    ///
    /// Fails with the structural-modification error on a problem frozen at
    /// load time.
    pub fn add_var(&mut self, lb: f64, ub: f64, var_type: VarType) -> Result<VariableId, ProblemError> {
        let index = self.var_lb.push(lb)?;
        self.var_ub.push(ub)?;
        match &mut self.var_types {
            Some(types) => types.push(var_type),
            None => match var_type {
                // Appending an integer variable keeps the positional
                // convention intact: the integer block stays a suffix.
                VarType::Integer => self.positional_integer_vars += 1,
                VarType::Continuous => {
                    if self.positional_integer_vars > 0 {
                        // A continuous variable after integer ones breaks
                        // the convention; materialize the explicit array.
                        let split = index - self.positional_integer_vars;
                        let mut types: Vec<VarType> = (0..index)
                            .map(|i| {
                                if i >= split {
                                    VarType::Integer
                                } else {
                                    VarType::Continuous
                                }
                            })
                            .collect();
                        types.push(VarType::Continuous);
                        self.var_types = Some(types);
                    }
                }
            },
        }
        Ok(VariableId::from_index(index))
    }

    /// Add an objective with a nonlinear expression, returning its index.
    pub fn add_obj(&mut self, sense: Sense, expr: NumericExpr) -> Result<ObjectiveId, ProblemError> {
        let index = self.obj_senses.push(sense)?;
        self.linear_objs.push(LinearExpr::new())?;
        self.nonlinear_objs.push(Some(expr))?;
        Ok(ObjectiveId::from_index(index))
    }

    /// Add a logical constraint, returning its index.
    pub fn add_con(&mut self, expr: LogicalExpr) -> Result<ConstraintId, ProblemError> {
        let index = self.logical_cons.push(expr)?;
        Ok(ConstraintId::from_index(index))
    }

    // ── Interchange ─────────────────────────────────────────

    /// Bulk-load the problem from the artifact identified by `stub`.
    ///
    /// Replaces the current contents; the loaded arrays are frozen at
    /// exactly their loaded sizes.
    pub fn read(&mut self, reader: &dyn ModelReader, stub: &str) -> Result<(), ProblemError> {
        let data = reader.read_model(stub)?;
        Self::validate(&data)?;
        let num_vars = data.var_lb.len();
        let num_cons = data.con_lb.len();
        self.var_lb = GrowVec::from_loaded(data.var_lb);
        self.var_ub = GrowVec::from_loaded(data.var_ub);
        self.var_types = data.var_types;
        self.positional_integer_vars = data.num_integer_vars;
        self.con_lb = GrowVec::from_loaded(data.con_lb);
        self.con_ub = GrowVec::from_loaded(data.con_ub);
        self.linear_cons = GrowVec::from_loaded(data.linear_cons);
        self.nonlinear_cons = GrowVec::from_loaded(data.nonlinear_cons);
        self.obj_senses = GrowVec::from_loaded(data.obj_senses);
        self.linear_objs = GrowVec::from_loaded(data.linear_objs);
        self.nonlinear_objs = GrowVec::from_loaded(data.nonlinear_objs);
        self.logical_cons = GrowVec::from_loaded(data.logical_cons);
        self.solve_code = -1;
        tracing::debug!(
            component = "problem",
            operation = "read",
            status = "success",
            stub = stub,
            variables = num_vars as u64,
            constraints = num_cons as u64,
            objectives = self.num_objs() as u64,
            "Loaded problem from stub"
        );
        Ok(())
    }

    /// Serialize the problem, plus an optional changeset, through the
    /// external writer contract.
    pub fn write_nl(
        &self,
        writer: &dyn ModelWriter,
        stub: &str,
        changes: Option<&ProblemChanges<'_>>,
        flags: WriteFlags,
    ) -> Result<(), ProblemError> {
        writer.write_model(stub, self, changes, flags)?;
        tracing::debug!(
            component = "problem",
            operation = "write_nl",
            status = "success",
            stub = stub,
            added_vars = changes.map_or(0, |c| c.num_vars()) as u64,
            ignore_functions = flags.ignore_functions,
            "Serialized problem"
        );
        Ok(())
    }

    fn validate(data: &ProblemData) -> Result<(), ProblemError> {
        let num_vars = data.var_lb.len();
        let num_cons = data.con_lb.len();
        let num_objs = data.obj_senses.len();
        if data.var_ub.len() != num_vars {
            return Err(ProblemError::InvalidData {
                reason: format!(
                    "{} variable lower bounds but {} upper bounds",
                    num_vars,
                    data.var_ub.len()
                ),
            });
        }
        if let Some(types) = &data.var_types {
            if types.len() != num_vars {
                return Err(ProblemError::InvalidData {
                    reason: format!("{} variables but {} type entries", num_vars, types.len()),
                });
            }
        } else if data.num_integer_vars > num_vars {
            return Err(ProblemError::InvalidData {
                reason: format!(
                    "{} integer variables out of {} total",
                    data.num_integer_vars, num_vars
                ),
            });
        }
        if data.con_ub.len() != num_cons
            || data.linear_cons.len() != num_cons
            || data.nonlinear_cons.len() != num_cons
        {
            return Err(ProblemError::InvalidData {
                reason: "constraint array lengths disagree".to_string(),
            });
        }
        if data.linear_objs.len() != num_objs || data.nonlinear_objs.len() != num_objs {
            return Err(ProblemError::InvalidData {
                reason: "objective array lengths disagree".to_string(),
            });
        }
        Ok(())
    }
}
