pub mod expr;
pub mod ids;

pub use expr::{BinaryOp, LinearExpr, LogicalExpr, NumericExpr, RelOp, UnaryOp};
pub use ids::{ConstraintId, ObjectiveId, VariableId};
