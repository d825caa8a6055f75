use tracing::{debug, trace};

use crate::problem::{ConstraintOp, LpProblem};
use crate::solution::Solution;

/// Anything that can solve an [`LpProblem`].
///
/// Callers build an objective and constraints, hand them over, and read back a
/// status plus a variable assignment. The two-phase [`Solver`] is the bundled
/// implementation.
pub trait LpSolve {
    fn solve(&self, problem: &LpProblem) -> Solution;
}

impl<T: LpSolve + ?Sized> LpSolve for &T {
    fn solve(&self, problem: &LpProblem) -> Solution {
        (**self).solve(problem)
    }
}

/// Simplex solver for linear programming problems
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl LpSolve for Solver {
    fn solve(&self, problem: &LpProblem) -> Solution {
        Solver::solve(self, problem)
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem using the two-phase simplex method
    pub fn solve(&self, problem: &LpProblem) -> Solution {
        let mut tableau = self.build_tableau(problem);
        debug!(
            variables = tableau.n_vars,
            slack = tableau.n_slack,
            artificial = tableau.n_artificial,
            "built simplex tableau"
        );

        // Phase 1: Find initial basic feasible solution
        if tableau.n_artificial > 0 {
            match self.phase1(&mut tableau) {
                SimplexResult::Optimal => {}
                SimplexResult::Infeasible => {
                    debug!("phase 1 left artificial variables positive");
                    return Solution::infeasible();
                }
                SimplexResult::Unbounded | SimplexResult::IterationLimit => {
                    return Solution::not_solved();
                }
            }
            self.drive_out_artificials(&mut tableau);
        }

        // Phase 2: Optimize
        match self.phase2(&mut tableau) {
            SimplexResult::Optimal => {}
            SimplexResult::Unbounded => return Solution::unbounded(),
            SimplexResult::Infeasible => return Solution::infeasible(),
            SimplexResult::IterationLimit => return Solution::not_solved(),
        }

        self.extract_solution(&tableau, problem)
    }

    fn build_tableau(&self, problem: &LpProblem) -> Tableau {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        // Rows with a negative RHS are multiplied by -1 so every basic value starts non-negative
        let rows: Vec<(Vec<f64>, ConstraintOp, f64)> = problem
            .constraints
            .iter()
            .map(|c| {
                let mut coefficients = vec![0.0; n_vars];
                for (slot, &coef) in coefficients.iter_mut().zip(&c.coefficients) {
                    *slot = coef;
                }
                if c.rhs < 0.0 {
                    coefficients.iter_mut().for_each(|x| *x = -*x);
                    (coefficients, c.op.flipped(), -c.rhs)
                } else {
                    (coefficients, c.op, c.rhs)
                }
            })
            .collect();

        // Count slack and artificial variables needed
        let mut n_slack = 0;
        let mut n_artificial = 0;

        for (_, op, _) in &rows {
            match op {
                ConstraintOp::Le => n_slack += 1,
                ConstraintOp::Ge => {
                    n_slack += 1; // surplus
                    n_artificial += 1;
                }
                ConstraintOp::Eq => n_artificial += 1,
            }
        }

        let total_cols = n_vars + n_slack + n_artificial + 1; // +1 for RHS
        let total_rows = n_constraints + 1; // +1 for objective

        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; total_rows],
            basic_vars: vec![0; n_constraints],
            n_vars,
            n_slack,
            n_artificial,
        };

        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;

        for (i, (coefficients, op, rhs)) in rows.into_iter().enumerate() {
            tableau.data[i][..n_vars].copy_from_slice(&coefficients);
            tableau.data[i][total_cols - 1] = rhs;

            match op {
                ConstraintOp::Le => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                    slack_idx += 1;
                }
                ConstraintOp::Ge => {
                    tableau.data[i][slack_idx] = -1.0; // surplus
                    slack_idx += 1;
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
                ConstraintOp::Eq => {
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        // Objective row (last row). The tableau always maximizes, so a
        // minimization stores the negated costs.
        let obj_row = n_constraints;
        for (j, &coef) in problem.objective.coefficients.iter().take(n_vars).enumerate() {
            tableau.data[obj_row][j] = if problem.objective.minimize { -coef } else { coef };
        }

        tableau
    }

    fn phase1(&self, tableau: &mut Tableau) -> SimplexResult {
        // Auxiliary objective: maximize -sum(artificials)
        let n_constraints = tableau.data.len() - 1;
        let n_cols = tableau.data[0].len();
        let art_start = tableau.art_start();

        let orig_obj = std::mem::replace(&mut tableau.data[n_constraints], vec![0.0; n_cols]);
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[n_constraints][j] = -1.0;
        }

        // Price out the basic artificials
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] += tableau.data[i][j];
                }
            }
        }

        let result = self.iterate(tableau, n_cols - 1);
        debug!(?result, "phase 1 finished");
        match result {
            SimplexResult::Optimal => {}
            // The auxiliary objective is bounded by zero
            SimplexResult::Unbounded => return SimplexResult::Infeasible,
            other => return other,
        }

        let rhs_col = n_cols - 1;
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start && tableau.data[i][rhs_col].abs() > self.tolerance {
                return SimplexResult::Infeasible;
            }
        }

        // Restore original objective and price out the basic variables
        tableau.data[n_constraints] = orig_obj;
        for i in 0..n_constraints {
            let basic = tableau.basic_vars[i];
            let ratio = tableau.data[n_constraints][basic];
            if ratio.abs() > self.tolerance {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] -= ratio * tableau.data[i][j];
                }
            }
        }

        SimplexResult::Optimal
    }

    /// Pivot zero-valued artificials out of the basis so phase 2 cannot move them.
    /// Rows with no structural or slack entry are redundant and keep their artificial.
    fn drive_out_artificials(&self, tableau: &mut Tableau) {
        let art_start = tableau.art_start();
        for row in 0..tableau.basic_vars.len() {
            if tableau.basic_vars[row] < art_start {
                continue;
            }
            let replacement = (0..art_start).find(|&j| tableau.data[row][j].abs() > self.tolerance);
            if let Some(col) = replacement {
                trace!(row, col, "driving artificial out of basis");
                self.pivot(tableau, row, col);
            }
        }
    }

    fn phase2(&self, tableau: &mut Tableau) -> SimplexResult {
        // Artificial columns never re-enter
        let entering_limit = tableau.art_start();
        let result = self.iterate(tableau, entering_limit);
        debug!(?result, "phase 2 finished");
        result
    }

    /// Pivot until no column below `entering_limit` improves the objective
    fn iterate(&self, tableau: &mut Tableau, entering_limit: usize) -> SimplexResult {
        let rhs_col = tableau.data[0].len() - 1;
        let mut degenerate_run = 0;

        for _ in 0..self.max_iterations {
            // Dantzig's rule, falling back to Bland's rule on long degenerate runs to avoid cycling
            let bland = degenerate_run > entering_limit;
            let Some(pivot_col) = self.find_pivot_column(tableau, entering_limit, bland) else {
                return SimplexResult::Optimal;
            };
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col) else {
                return SimplexResult::Unbounded;
            };
            if tableau.data[pivot_row][rhs_col].abs() <= self.tolerance {
                degenerate_run += 1;
            } else {
                degenerate_run = 0;
            }
            self.pivot(tableau, pivot_row, pivot_col);
        }
        SimplexResult::IterationLimit
    }

    fn find_pivot_column(&self, tableau: &Tableau, entering_limit: usize, bland: bool) -> Option<usize> {
        let obj_row = tableau.data.len() - 1;
        let reduced = &tableau.data[obj_row][..entering_limit];

        if bland {
            return reduced.iter().position(|&r| r > self.tolerance);
        }

        // Most positive reduced cost
        let mut max_val = self.tolerance;
        let mut max_col = None;
        for (j, &r) in reduced.iter().enumerate() {
            if r > max_val {
                max_val = r;
                max_col = Some(j);
            }
        }
        max_col
    }

    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let n_constraints = tableau.data.len() - 1;
        let rhs_col = tableau.data[0].len() - 1;

        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 0..n_constraints {
            let val = tableau.data[i][col];
            if val > self.tolerance {
                let ratio = tableau.data[i][rhs_col] / val;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }

    fn pivot(&self, tableau: &mut Tableau, row: usize, col: usize) {
        tableau.basic_vars[row] = col;

        let pivot_val = tableau.data[row][col];
        for x in tableau.data[row].iter_mut() {
            *x /= pivot_val;
        }

        let pivot_row = tableau.data[row].clone();
        for (i, other) in tableau.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = other[col];
            if factor != 0.0 {
                for (x, &p) in other.iter_mut().zip(&pivot_row) {
                    *x -= factor * p;
                }
            }
        }
    }

    fn extract_solution(&self, tableau: &Tableau, problem: &LpProblem) -> Solution {
        let n_vars = problem.num_variables();
        let rhs_col = tableau.data[0].len() - 1;

        let mut values = vec![0.0; n_vars];
        for (i, &basic) in tableau.basic_vars.iter().enumerate() {
            if basic < n_vars {
                values[basic] = tableau.data[i][rhs_col];
            }
        }

        let objective_value = problem.evaluate(&values);
        debug!(objective_value, "optimal solution extracted");

        Solution::optimal(values, objective_value)
    }
}

struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
    n_slack: usize,
    n_artificial: usize,
}

impl Tableau {
    fn art_start(&self) -> usize {
        self.n_vars + self.n_slack
    }
}

#[derive(Debug)]
enum SimplexResult {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
}
