use transport_lp::{ConstraintOp, LpProblem};
use tracing::debug;

use crate::model::TransportProblem;

/// Build the minimum-cost LP for a transportation problem.
///
/// One non-negative variable per route (source-major), a `supply_<code>`
/// upper bound per source and a `demand_<code>` lower bound per destination.
pub fn formulate(problem: &TransportProblem) -> LpProblem {
    let n = problem.num_routes();
    let variables = problem.routes().map(|r| problem.route_name(r)).collect();
    let mut lp = LpProblem::new(variables);

    let costs = problem.routes().map(|r| problem.cost(r)).collect();
    lp.set_objective(costs, true);

    for (i, source) in problem.sources().iter().enumerate() {
        let mut coefficients = vec![0.0; n];
        for route in problem.routes().filter(|r| r.source() == i) {
            coefficients[problem.route_index(route)] = 1.0;
        }
        lp.add_constraint(format!("supply_{}", source.code), coefficients, ConstraintOp::Le, source.amount);
    }

    for (j, destination) in problem.destinations().iter().enumerate() {
        let mut coefficients = vec![0.0; n];
        for route in problem.routes().filter(|r| r.destination() == j) {
            coefficients[problem.route_index(route)] = 1.0;
        }
        lp.add_constraint(
            format!("demand_{}", destination.code),
            coefficients,
            ConstraintOp::Ge,
            destination.amount,
        );
    }

    debug!(
        variables = lp.num_variables(),
        constraints = lp.num_constraints(),
        "formulated transportation LP"
    );
    lp
}
