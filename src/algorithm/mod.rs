/// Generation driver with budget checks and parallel rule application
pub mod engine;
/// Production rules, rule tables and generation transitions
pub mod rules;
/// Two-circle intersection with constraint tie-break
pub mod solver;

pub use engine::{EngineConfig, Generation, StepReport, SubstitutionEngine};
pub use rules::{AffineChild, Production, Recurrence, RuleTable, Transition};
pub use solver::{Constraint, ConstraintSolver};
