/// A linear program over named, non-negative continuous variables
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function coefficients (costs)
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl ConstraintOp {
    /// The operator obtained by multiplying both sides by -1
    pub fn flipped(self) -> Self {
        match self {
            ConstraintOp::Le => ConstraintOp::Ge,
            ConstraintOp::Ge => ConstraintOp::Le,
            ConstraintOp::Eq => ConstraintOp::Eq,
        }
    }
}

impl LpProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                minimize: true,
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective { coefficients, minimize };
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            op,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of an assignment
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        dot(&self.objective.coefficients, values)
    }

    /// Whether an assignment is non-negative and satisfies every constraint within `tolerance`
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.num_variables() || values.iter().any(|&v| v < -tolerance) {
            return false;
        }
        self.constraints.iter().all(|c| {
            let lhs = dot(&c.coefficients, values);
            match c.op {
                ConstraintOp::Le => lhs <= c.rhs + tolerance,
                ConstraintOp::Ge => lhs >= c.rhs - tolerance,
                ConstraintOp::Eq => (lhs - c.rhs).abs() <= tolerance,
            }
        })
    }
}

fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients.iter().zip(values).map(|(c, v)| c * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_problem_has_zero_minimize_objective() {
        let problem = LpProblem::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 0);
        assert!(problem.objective.minimize);
        assert_eq!(problem.objective.coefficients, vec![0.0, 0.0]);
    }

    #[test]
    fn test_is_satisfied_by() {
        let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
        problem.set_objective(vec![1.0, 2.0], true);
        problem.add_constraint("cap", vec![1.0, 1.0], ConstraintOp::Le, 10.0);
        problem.add_constraint("need", vec![1.0, 0.0], ConstraintOp::Ge, 3.0);

        assert!(problem.is_satisfied_by(&[3.0, 7.0], 1e-9));
        assert!(!problem.is_satisfied_by(&[2.0, 0.0], 1e-9));
        assert!(!problem.is_satisfied_by(&[4.0, 7.0], 1e-9));
        assert!(!problem.is_satisfied_by(&[4.0, -1.0], 1e-9));
        assert!(!problem.is_satisfied_by(&[4.0], 1e-9));
        assert_eq!(problem.evaluate(&[3.0, 7.0]), 17.0);
    }

    #[test]
    fn test_flipped_op() {
        assert_eq!(ConstraintOp::Le.flipped(), ConstraintOp::Ge);
        assert_eq!(ConstraintOp::Ge.flipped(), ConstraintOp::Le);
        assert_eq!(ConstraintOp::Eq.flipped(), ConstraintOp::Eq);
    }
}
