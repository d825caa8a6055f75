pub mod formulation;
pub mod model;
pub mod plan;
pub mod solver;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use formulation::formulate;
pub use model::{Node, ProblemInstance, Route, TransportProblem};
pub use plan::{RouteShipment, SolutionPlan};
pub use solver::{solve, TransportError, TransportSolver};
pub use transport_lp::{LpSolve, SolutionStatus, Solver};
