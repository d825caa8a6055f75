use thiserror::Error;
use tracing::{debug, info, warn};
use transport_lp::{LpSolve, SolutionStatus, Solver};

use crate::formulation::formulate;
use crate::model::{ProblemInstance, TransportProblem};
use crate::plan::{RouteShipment, SolutionPlan};

/// Negative solver noise no larger than this is reported as exactly zero
const ZERO_TOLERANCE: f64 = 1e-9;
/// Allowed drift between the solver's objective and the recomputed plan cost
const COST_TOLERANCE: f64 = 1e-6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("No feasible shipping plan found (solver status: {status}, code {})", .status.code())]
    Infeasible { status: SolutionStatus },
    #[error("Invalid problem shape: {0}")]
    Shape(String),
}

impl TransportError {
    /// Solver status code behind an infeasible outcome
    pub fn status_code(&self) -> Option<i32> {
        match self {
            TransportError::Infeasible { status } => Some(status.code()),
            TransportError::Shape(_) => None,
        }
    }
}

/// Solve the two-factory, two-city problem with the bundled simplex solver.
///
/// `costs` are per unit for Factory1→City2, Factory1→City3, Factory2→City2 and
/// Factory2→City3; `supplies` are the factory capacities and `demands` the
/// city requirements.
pub fn solve(costs: [f64; 4], supplies: [f64; 2], demands: [f64; 2]) -> Result<SolutionPlan, TransportError> {
    TransportSolver::new().solve_instance(&ProblemInstance::new(costs, supplies, demands))
}

/// Builds the transportation LP, hands it to an [`LpSolve`] backend and maps
/// the result back onto named routes.
#[derive(Debug, Clone, Default)]
pub struct TransportSolver<S = Solver> {
    backend: S,
}

impl TransportSolver<Solver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: LpSolve> TransportSolver<S> {
    pub fn with_backend(backend: S) -> Self {
        Self { backend }
    }

    pub fn solve_instance(&self, instance: &ProblemInstance) -> Result<SolutionPlan, TransportError> {
        self.solve_problem(&TransportProblem::from(instance))
    }

    pub fn solve_problem(&self, problem: &TransportProblem) -> Result<SolutionPlan, TransportError> {
        let lp = formulate(problem);
        let solution = self.backend.solve(&lp);

        if solution.status != SolutionStatus::Optimal {
            info!(
                status = %solution.status,
                supply = problem.total_supply(),
                demand = problem.total_demand(),
                "no feasible shipping plan"
            );
            return Err(TransportError::Infeasible { status: solution.status });
        }
        if solution.values.len() != lp.num_variables() {
            warn!(
                expected = lp.num_variables(),
                got = solution.values.len(),
                "solver returned a malformed assignment"
            );
            return Err(TransportError::Infeasible {
                status: SolutionStatus::NotSolved,
            });
        }

        let shipments: Vec<RouteShipment> = problem
            .routes()
            .map(|route| {
                let raw = solution.values[problem.route_index(route)];
                RouteShipment {
                    route: problem.route_name(route),
                    source: problem.sources()[route.source()].name.clone(),
                    destination: problem.destinations()[route.destination()].name.clone(),
                    unit_cost: problem.cost(route),
                    quantity: if raw < 0.0 && raw >= -ZERO_TOLERANCE { 0.0 } else { raw },
                }
            })
            .collect();

        let plan = SolutionPlan {
            shipments,
            total_cost: solution.objective_value,
        };

        let recomputed = plan.recomputed_cost();
        if (recomputed - plan.total_cost).abs() > COST_TOLERANCE {
            warn!(
                objective = plan.total_cost,
                recomputed, "solver objective disagrees with plan cost"
            );
        }
        debug!(total_cost = plan.total_cost, "optimal shipping plan");

        Ok(plan)
    }
}
