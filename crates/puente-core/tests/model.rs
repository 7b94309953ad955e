#![allow(clippy::float_cmp)]

use std::cell::RefCell;

use puente_core::{
    IoError, ModelReader, ModelWriter, Problem, ProblemChanges, ProblemData, ProblemError, Sense,
    VarType, WriteFlags,
};
use puente_expr::{BinaryOp, LinearExpr, NumericExpr, VariableId};

struct FixtureReader {
    data: ProblemData,
}

impl ModelReader for FixtureReader {
    fn read_model(&self, _stub: &str) -> Result<ProblemData, IoError> {
        Ok(self.data.clone())
    }
}

/// Writer that replays the unified base-plus-delta view it was handed.
#[derive(Default)]
struct CapturingWriter {
    captured: RefCell<Vec<(Vec<f64>, Vec<f64>, bool)>>,
}

impl ModelWriter for CapturingWriter {
    fn write_model(
        &self,
        _stub: &str,
        problem: &Problem,
        changes: Option<&ProblemChanges<'_>>,
        flags: WriteFlags,
    ) -> Result<(), IoError> {
        let mut lb = problem.var_lb().to_vec();
        let mut ub = problem.var_ub().to_vec();
        if let Some(changes) = changes {
            lb.extend_from_slice(changes.var_lb());
            ub.extend_from_slice(changes.var_ub());
        }
        self.captured
            .borrow_mut()
            .push((lb, ub, flags.ignore_functions));
        Ok(())
    }
}

fn loaded_problem(num_vars: usize) -> Problem {
    let reader = FixtureReader {
        data: ProblemData {
            var_lb: vec![0.0; num_vars],
            var_ub: vec![1.0; num_vars],
            ..ProblemData::default()
        },
    };
    let mut problem = Problem::new();
    problem.read(&reader, "base").unwrap();
    problem
}

#[test]
fn changeset_roundtrip_offsets_into_the_base_space() {
    let problem = loaded_problem(4);
    let mut changes = ProblemChanges::new(&problem);
    assert_eq!(changes.add_var(-1.0, 1.0).index(), 4);
    assert_eq!(changes.add_var(-2.0, 2.0).index(), 5);
    assert_eq!(changes.total_num_vars(), 6);
}

#[test]
fn writer_sees_the_unified_bounds() {
    let problem = loaded_problem(2);
    let mut changes = ProblemChanges::new(&problem);
    changes.add_var(-3.0, 3.0);
    changes
        .add_obj(Sense::Minimize, &[(VariableId::new(2), 1.0)])
        .unwrap();

    let writer = CapturingWriter::default();
    problem
        .write_nl(&writer, "out", Some(&changes), WriteFlags::default())
        .unwrap();

    let captured = writer.captured.borrow();
    let (lb, ub, ignore_functions) = &captured[0];
    assert_eq!(lb, &[0.0, 0.0, -3.0]);
    assert_eq!(ub, &[1.0, 1.0, 3.0]);
    assert!(!ignore_functions);
}

#[test]
fn growable_problem_freezes_after_bulk_read() {
    let mut problem = Problem::new();
    problem.add_var(0.0, 1.0, VarType::Continuous).unwrap();
    problem
        .add_obj(
            Sense::Minimize,
            NumericExpr::binary(
                BinaryOp::Mul,
                NumericExpr::var(VariableId::new(0)),
                NumericExpr::var(VariableId::new(0)),
            ),
        )
        .unwrap();
    assert_eq!(problem.num_vars(), 1);
    assert_eq!(problem.num_nonlinear_objs(), 1);

    let reader = FixtureReader {
        data: ProblemData {
            var_lb: vec![0.0, 0.0],
            var_ub: vec![2.0, 2.0],
            obj_senses: vec![Sense::Maximize],
            linear_objs: vec![LinearExpr::from_terms(vec![(VariableId::new(1), 1.0)])],
            nonlinear_objs: vec![None],
            ..ProblemData::default()
        },
    };
    problem.read(&reader, "replacement").unwrap();
    assert_eq!(problem.num_vars(), 2);
    assert_eq!(problem.num_nonlinear_objs(), 0);
    assert_eq!(
        problem.add_var(0.0, 1.0, VarType::Integer),
        Err(ProblemError::Unmodifiable)
    );
}
